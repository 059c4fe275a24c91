//! Test modules for the executor crate.


use std::sync::Arc;

use datastorage_core::Value;
use datastorage_engine::DataStorage;
use datastorage_storage::ShardedStore;

use crate::Executor;

/// Executor over an in-memory store seeded with `entries`.
pub(crate) fn executor_with(entries: Vec<(&str, Value)>) -> Executor {
    let store = Arc::new(ShardedStore::from_entries(entries));
    Executor::new(Arc::new(DataStorage::with_store(store)))
}
