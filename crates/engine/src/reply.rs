//! Reply builder
//!
//! The only place a `set` invocation writes to the store. It is reached
//! solely when the pipeline finished in `DONE`, and it always writes exactly
//! the value it reports.

use datastorage_core::{Result, SetReply, Storage};
use tracing::debug;

use crate::pipeline::ExecutionState;

/// Commit the final value under `key` and package the reply
pub fn commit<S>(store: &S, key: &str, state: ExecutionState) -> Result<SetReply>
where
    S: Storage + ?Sized,
{
    store.put(key, state.current.clone())?;
    debug!(target: "datastorage::engine", key, created = !state.had_key_before, "Committed value");
    Ok(SetReply {
        key: key.to_string(),
        value: state.current,
        original_value: state.snapshot,
    })
}
