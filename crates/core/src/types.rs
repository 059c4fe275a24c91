//! Command and reply types for the `set` pipeline
//!
//! - Operation: one pipeline step (tag + operand)
//! - OnError: failure-handling policy for a command
//! - SetCommand: ordered operations against one key
//! - SetReply: committed value plus the reported snapshot

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value::Value;

/// One step of a command's transform pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Registered operation tag (e.g. `"add"`, `"pop"`, `"default"`)
    pub kind: String,
    /// Operand handed to the transform
    pub operand: Value,
}

impl Operation {
    /// Create an operation from a tag and operand
    pub fn new(kind: impl Into<String>, operand: impl Into<Value>) -> Self {
        Operation {
            kind: kind.into(),
            operand: operand.into(),
        }
    }
}

/// How a failing operation affects the rest of the pipeline.
///
/// | Policy | Remaining steps | Committed value |
/// |--------|-----------------|-----------------|
/// | `Raise` | not run | nothing committed, error escapes |
/// | `SetDefault` | not run | the command default |
/// | `Undo` | not run | the snapshot |
/// | `Abort` | not run | value before the failing step |
/// | `Ignore` | run | failing steps skipped |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnError {
    /// Propagate the error (default)
    #[default]
    Raise,
    /// Replace the value with the command default
    SetDefault,
    /// Revert to the snapshot
    Undo,
    /// Keep everything before the failing step
    Abort,
    /// Skip the failing step and continue
    Ignore,
}

impl OnError {
    /// Wire name of the policy
    pub fn as_str(&self) -> &'static str {
        match self {
            OnError::Raise => "raise",
            OnError::SetDefault => "set_default",
            OnError::Undo => "undo",
            OnError::Abort => "abort",
            OnError::Ignore => "ignore",
        }
    }
}

impl fmt::Display for OnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnError {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raise" => Ok(OnError::Raise),
            "set_default" => Ok(OnError::SetDefault),
            "undo" => Ok(OnError::Undo),
            "abort" => Ok(OnError::Abort),
            "ignore" => Ok(OnError::Ignore),
            other => Err(format!("unknown on_error policy '{}'", other)),
        }
    }
}

/// A `set` command against a single key.
///
/// # Example
///
/// ```
/// use datastorage_core::{OnError, Operation, SetCommand, Value};
///
/// let cmd = SetCommand::new("Score", vec![Operation::new("add", 5)])
///     .with_default(Value::Int(0))
///     .with_on_error(OnError::Undo);
/// assert_eq!(cmd.on_error, OnError::Undo);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SetCommand {
    /// Target key
    pub key: String,
    /// Starting value when the key is absent; also used by `set_default`
    /// and the `default` operation
    pub default: Option<Value>,
    /// Failure policy
    pub on_error: OnError,
    /// Steps, applied in order
    pub operations: Vec<Operation>,
}

impl SetCommand {
    /// Create a command with no default and the `raise` policy
    pub fn new(key: impl Into<String>, operations: Vec<Operation>) -> Self {
        SetCommand {
            key: key.into(),
            default: None,
            on_error: OnError::Raise,
            operations,
        }
    }

    /// Set the command default
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the failure policy
    pub fn with_on_error(mut self, on_error: OnError) -> Self {
        self.on_error = on_error;
        self
    }
}

/// Result of a committed `set` command.
#[derive(Debug, Clone, PartialEq)]
pub struct SetReply {
    /// Target key
    pub key: String,
    /// Value now stored under the key
    pub value: Value,
    /// Snapshot taken before the pipeline ran
    pub original_value: Value,
}
