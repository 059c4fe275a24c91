//! Command enum defining all DataStorage requests.
//!
//! Commands are the "instruction set" of DataStorage. They are:
//! - **Self-contained**: every parameter needed for execution is in the variant
//! - **Serializable**: JSON in the shape game clients already send
//! - **Pure data**: no closures or executable code

use datastorage_core::{OnError, SetCommand, Value};
use serde::{Deserialize, Serialize};

use crate::types::OperationSpec;

/// A command is a self-contained, serializable request.
///
/// | Command | Output |
/// |---------|--------|
/// | `Set` | `Output::SetReply` |
/// | `Get` | `Output::Retrieved` |
/// | `Ping` | `Output::Pong` |
///
/// # Example
///
/// ```
/// use datastorage_executor::Command;
///
/// let cmd: Command = serde_json::from_str(r#"{"Set": {
///     "key": "gold",
///     "default": 35,
///     "operations": [{"operation": "add", "value": 6}]
/// }}"#).unwrap();
/// assert!(matches!(cmd, Command::Set { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    /// Run an operation pipeline against one key.
    /// Returns: `Output::SetReply`
    Set {
        /// Target key
        key: String,
        /// Starting value when the key is absent, and the `set_default` fallback
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            with = "crate::json::canonical_option"
        )]
        default: Option<Value>,
        /// Failure policy; `raise` when omitted
        #[serde(default, skip_serializing_if = "Option::is_none")]
        on_error: Option<OnError>,
        /// Steps, applied in order
        operations: Vec<OperationSpec>,
    },

    /// Read several keys at once.
    /// Returns: `Output::Retrieved`
    Get {
        /// Keys to read
        keys: Vec<String>,
    },

    /// Health check.
    /// Returns: `Output::Pong`
    Ping,
}

impl Command {
    /// Variant name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::Set { .. } => "Set",
            Command::Get { .. } => "Get",
            Command::Ping => "Ping",
        }
    }
}

impl From<SetCommand> for Command {
    fn from(cmd: SetCommand) -> Self {
        Command::Set {
            key: cmd.key,
            default: cmd.default,
            on_error: Some(cmd.on_error),
            operations: cmd.operations.into_iter().map(OperationSpec::from).collect(),
        }
    }
}

/// Assemble the engine command from the fields of `Command::Set`
pub(crate) fn set_command(
    key: String,
    default: Option<Value>,
    on_error: Option<OnError>,
    operations: Vec<OperationSpec>,
) -> SetCommand {
    SetCommand {
        key,
        default,
        on_error: on_error.unwrap_or_default(),
        operations: operations.into_iter().map(Into::into).collect(),
    }
}
