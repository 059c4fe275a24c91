//! Error conversion from engine error types.

use datastorage_core::OperationError;

use crate::Error;

impl From<OperationError> for Error {
    fn from(err: OperationError) -> Self {
        match err {
            OperationError::TypeMismatch {
                operation,
                expected,
                actual,
            } => Error::TypeMismatch {
                operation,
                expected,
                actual,
            },
            OperationError::KeyNotFound { operation, key } => Error::KeyNotFound { operation, key },
            OperationError::ValueNotFound { operation, value } => {
                Error::ValueNotFound { operation, value }
            }
            OperationError::Overflow { operation } => Error::Overflow { operation },
            OperationError::DivisionByZero { operation } => Error::DivisionByZero { operation },
        }
    }
}

/// Preserves every field; operation failures are flattened into top-level
/// variants.
impl From<datastorage_core::Error> for Error {
    fn from(err: datastorage_core::Error) -> Self {
        match err {
            datastorage_core::Error::MissingValue { key } => Error::MissingValue { key },
            datastorage_core::Error::Configuration { reason } => Error::Configuration { reason },
            datastorage_core::Error::Operation(op) => op.into(),
            datastorage_core::Error::UnknownOperation { operation } => {
                Error::UnknownOperation { operation }
            }
            datastorage_core::Error::InvalidCommand { reason } => Error::InvalidCommand { reason },
            datastorage_core::Error::Storage(reason) => Error::Storage { reason },
        }
    }
}
