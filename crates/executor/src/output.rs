//! Output enum for command execution results.
//!
//! Every command produces exactly one output variant. The mapping is
//! deterministic: the same command always produces the same variant.

use std::collections::BTreeMap;

use datastorage_core::{SetReply, Value};
use serde::{Deserialize, Serialize};

/// Successful command execution results.
///
/// # Example
///
/// ```text
/// match executor.execute(Command::Get { keys })? {
///     Output::Retrieved { keys } => println!("{} values", keys.len()),
///     _ => unreachable!("Get always returns Retrieved"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// Result of a committed `Set`
    SetReply {
        /// Target key
        key: String,
        /// Value now stored
        #[serde(with = "crate::json::canonical")]
        value: Value,
        /// Value before the pipeline ran
        #[serde(with = "crate::json::canonical")]
        original_value: Value,
    },

    /// Values read by `Get`; absent keys map to null
    Retrieved {
        /// Key → stored value
        #[serde(with = "crate::json::canonical_map")]
        keys: BTreeMap<String, Value>,
    },

    /// Ping response
    Pong {
        /// Engine version
        version: String,
    },
}

impl From<SetReply> for Output {
    fn from(reply: SetReply) -> Self {
        Output::SetReply {
            key: reply.key,
            value: reply.value,
            original_value: reply.original_value,
        }
    }
}
