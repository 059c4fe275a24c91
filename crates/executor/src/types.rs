//! Supporting types for commands.
//!
//! These types are used in command parameters and serialize in the shape
//! game clients send.

use datastorage_core::{Operation, Value};
use serde::{Deserialize, Serialize};

/// One pipeline step as sent by a client: `{"operation": "add", "value": 12}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationSpec {
    /// Operation tag
    pub operation: String,
    /// Operand (required, even for operations that ignore it)
    #[serde(with = "crate::json::canonical")]
    pub value: Value,
}

impl OperationSpec {
    /// Create an operation spec
    pub fn new(operation: impl Into<String>, value: impl Into<Value>) -> Self {
        OperationSpec {
            operation: operation.into(),
            value: value.into(),
        }
    }
}

impl From<OperationSpec> for Operation {
    fn from(spec: OperationSpec) -> Self {
        Operation {
            kind: spec.operation,
            operand: spec.value,
        }
    }
}

impl From<Operation> for OperationSpec {
    fn from(op: Operation) -> Self {
        OperationSpec {
            operation: op.kind,
            value: op.operand,
        }
    }
}
