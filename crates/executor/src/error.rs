//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: each variant has typed fields for error details
//! - **Serializable**: can be sent back to clients as JSON
//! - **Lossless**: no detail is dropped when converting engine errors

use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Governed by `on_error` |
/// |----------|----------|------------------------|
/// | Operation | `TypeMismatch`, `KeyNotFound`, `ValueNotFound`, `Overflow`, `DivisionByZero` | yes |
/// | Command | `MissingValue`, `Configuration`, `UnknownOperation`, `InvalidCommand` | no |
/// | System | `Storage` | no |
///
/// # Example
///
/// ```text
/// match executor.execute(cmd) {
///     Ok(output) => { /* broadcast */ }
///     Err(Error::MissingValue { key }) => {
///         println!("'{}' has no value and no default", key);
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Operation ====================
    /// Current value or operand has the wrong shape
    #[error("{operation}: type mismatch, expected {expected}, got {actual}")]
    TypeMismatch {
        /// Operation tag
        operation: String,
        /// Expected shape
        expected: String,
        /// Actual type name
        actual: String,
    },

    /// Mapping entry does not exist
    #[error("{operation}: key not found: {key}")]
    KeyNotFound {
        /// Operation tag
        operation: String,
        /// Missing mapping key
        key: String,
    },

    /// Sequence element does not exist
    #[error("{operation}: value not found: {value}")]
    ValueNotFound {
        /// Operation tag
        operation: String,
        /// Missing element
        value: String,
    },

    /// Integer overflow
    #[error("{operation}: integer overflow")]
    Overflow {
        /// Operation tag
        operation: String,
    },

    /// Modulo by zero
    #[error("{operation}: division by zero")]
    DivisionByZero {
        /// Operation tag
        operation: String,
    },

    // ==================== Command ====================
    /// Key absent and no default supplied
    #[error("no value stored under '{key}' and no default supplied")]
    MissingValue {
        /// Target key
        key: String,
    },

    /// Command is internally inconsistent
    #[error("configuration error: {reason}")]
    Configuration {
        /// Explanation
        reason: String,
    },

    /// Operation tag is not registered
    #[error("unknown operation: {operation}")]
    UnknownOperation {
        /// Unregistered tag
        operation: String,
    },

    /// Command failed validation
    #[error("invalid command: {reason}")]
    InvalidCommand {
        /// Explanation
        reason: String,
    },

    // ==================== System ====================
    /// Storage backend failure
    #[error("storage error: {reason}")]
    Storage {
        /// Backend message
        reason: String,
    },
}

impl Error {
    /// True for failures a non-`raise` policy would have absorbed
    pub fn is_operation_error(&self) -> bool {
        matches!(
            self,
            Error::TypeMismatch { .. }
                | Error::KeyNotFound { .. }
                | Error::ValueNotFound { .. }
                | Error::Overflow { .. }
                | Error::DivisionByZero { .. }
        )
    }
}
