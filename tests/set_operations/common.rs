//! Shared helpers for the set operation suite.

#![allow(dead_code)]

use std::sync::{Arc, Once};

pub use datastorage::engine::Error as EngineError;
pub use datastorage::{
    DataStorage, OnError, Operation, OperationError, SetCommand, ShardedStore, Storage, Value,
};

static INIT_TRACING: Once = Once::new();

/// Route engine logs to the test writer once per binary.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Engine over a store seeded with `entries`.
pub fn storage_with(entries: Vec<(&str, Value)>) -> DataStorage {
    init_tracing();
    DataStorage::with_store(Arc::new(ShardedStore::from_entries(entries)))
}

/// Current stored value, `None` when absent.
pub fn stored(storage: &DataStorage, key: &str) -> Option<Value> {
    storage.store().get(key).unwrap()
}

/// Shorthand for an operation.
pub fn op(kind: &str, operand: impl Into<Value>) -> Operation {
    Operation::new(kind, operand)
}
