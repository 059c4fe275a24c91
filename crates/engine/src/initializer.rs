//! Value initialization
//!
//! Resolves the value a pipeline starts from: the stored value when the key
//! exists, otherwise the command default. A missing key without a default is
//! an unconditional `MissingValue` error; `on_error` only governs failing
//! operations, never the absence of a starting value.

use datastorage_core::{Error, Result, Storage, Value};

/// Starting point of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct Initialized {
    /// Value the first operation sees
    pub value: Value,
    /// Whether the key existed in the store
    pub had_key_before: bool,
}

/// Resolve the starting value for `key`
///
/// The default is NOT written to the store here; only the reply builder
/// commits.
pub fn initialize<S>(store: &S, key: &str, default: Option<&Value>) -> Result<Initialized>
where
    S: Storage + ?Sized,
{
    match store.get(key)? {
        Some(value) => Ok(Initialized {
            value,
            had_key_before: true,
        }),
        None => match default {
            Some(default) => Ok(Initialized {
                value: default.clone(),
                had_key_before: false,
            }),
            None => Err(Error::MissingValue {
                key: key.to_string(),
            }),
        },
    }
}
