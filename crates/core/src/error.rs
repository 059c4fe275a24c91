//! Error types for DataStorage
//!
//! Two layers of errors exist:
//!
//! - [`OperationError`]: the failure of a single pipeline step. Whether it
//!   reaches the caller is decided by the command's `on_error` policy.
//! - [`Error`]: everything a `set`/`get` invocation can surface. Apart from
//!   [`Error::Operation`], every variant is unconditional and bypasses the
//!   `on_error` policy.
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::value::Value;
use thiserror::Error;

/// Result type alias for DataStorage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of one operation step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperationError {
    /// Current value or operand has the wrong shape for the operation
    #[error("{operation}: type mismatch, expected {expected}, got {actual}")]
    TypeMismatch {
        /// Operation tag
        operation: String,
        /// Expected shape
        expected: String,
        /// Actual type name
        actual: String,
    },

    /// Mapping entry named by the operand does not exist
    #[error("{operation}: key not found: {key}")]
    KeyNotFound {
        /// Operation tag
        operation: String,
        /// Missing mapping key
        key: String,
    },

    /// Sequence element named by the operand does not exist
    #[error("{operation}: value not found: {value}")]
    ValueNotFound {
        /// Operation tag
        operation: String,
        /// Display form of the missing element
        value: String,
    },

    /// Integer arithmetic overflowed
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
}

impl OperationError {
    /// Build a `TypeMismatch` from the offending value
    pub fn type_mismatch(operation: &str, expected: &str, actual: &Value) -> Self {
        OperationError::TypeMismatch {
            operation: operation.to_string(),
            expected: expected.to_string(),
            actual: actual.type_name().to_string(),
        }
    }

    /// Build a `KeyNotFound` for a mapping entry
    pub fn key_not_found(operation: &str, key: impl Into<String>) -> Self {
        OperationError::KeyNotFound {
            operation: operation.to_string(),
            key: key.into(),
        }
    }

    /// Build a `ValueNotFound` for a sequence element
    pub fn value_not_found(operation: &str, value: &Value) -> Self {
        OperationError::ValueNotFound {
            operation: operation.to_string(),
            value: value.to_string(),
        }
    }

    /// Build an `Overflow`
    pub fn overflow(operation: &str) -> Self {
        OperationError::Overflow {
            operation: operation.to_string(),
        }
    }

    /// Build a `DivisionByZero`
    pub fn division_by_zero(operation: &str) -> Self {
        OperationError::DivisionByZero {
            operation: operation.to_string(),
        }
    }

    /// Tag of the operation that failed
    pub fn operation(&self) -> &str {
        match self {
            OperationError::TypeMismatch { operation, .. }
            | OperationError::KeyNotFound { operation, .. }
            | OperationError::ValueNotFound { operation, .. }
            | OperationError::Overflow { operation }
            | OperationError::DivisionByZero { operation } => operation,
        }
    }
}

/// Error types for DataStorage invocations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Key is absent and the command supplied no default
    #[error("no value stored under '{key}' and no default supplied")]
    MissingValue {
        /// Key the command targeted
        key: String,
    },

    /// Command is internally inconsistent (e.g. `set_default` without a default)
    #[error("configuration error: {reason}")]
    Configuration {
        /// Explanation
        reason: String,
    },

    /// A pipeline step failed and the policy let it escape
    #[error("operation failed: {0}")]
    Operation(#[from] OperationError),

    /// Operation tag is not registered
    #[error("unknown operation: {operation}")]
    UnknownOperation {
        /// Unregistered tag
        operation: String,
    },

    /// Command failed validation before any step ran
    #[error("invalid command: {reason}")]
    InvalidCommand {
        /// Explanation
        reason: String,
    },

    /// Storage backend failure
    #[error("storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Create a `Configuration` error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Error::Configuration {
            reason: reason.into(),
        }
    }

    /// Create an `InvalidCommand` error
    pub fn invalid_command(reason: impl Into<String>) -> Self {
        Error::InvalidCommand {
            reason: reason.into(),
        }
    }

    /// True if the error came from a pipeline step
    pub fn is_operation_error(&self) -> bool {
        matches!(self, Error::Operation(_))
    }
}
