//! Core storage trait
//!
//! The engine only ever talks to the enclosing key/value store through
//! [`Storage`], so the in-memory store can be swapped for a persistent or
//! replicated one without touching the pipeline.

use crate::error::Result;
use crate::value::Value;

/// Storage abstraction for the enclosing key/value store.
///
/// Thread safety: All methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync). Per-key mutual exclusion for
/// read-modify-write cycles is provided by the engine, not by the store.
pub trait Storage: Send + Sync {
    /// Get the current value for a key
    ///
    /// Returns None if the key doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Check whether a key exists
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Store a value, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn put(&self, key: &str, value: Value) -> Result<()>;

    /// Number of stored keys
    fn len(&self) -> usize;

    /// True when no keys are stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
