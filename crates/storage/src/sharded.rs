//! Sharded in-memory storage
//!
//! # Design
//!
//! - DashMap: 16-way sharded by default, lock-free reads
//! - FxHash: fast non-crypto hash for string keys
//! - One entry per key, latest value only (no history)
//!
//! # Thread Safety
//!
//! All operations are thread-safe:
//! - get(): Lock-free read via DashMap
//! - put(): Only locks the target key's shard
//!
//! A `get` followed by a `put` is NOT atomic here. The engine wraps every
//! read-modify-write cycle in a [`KeyLockTable`](crate::KeyLockTable) guard.

use dashmap::DashMap;
use datastorage_core::{Result, Storage, Value};
use rustc_hash::FxHasher;
use std::collections::HashMap;
use std::hash::BuildHasherDefault;

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// Sharded key/value store
///
/// # Example
///
/// ```
/// use datastorage_core::{Storage, Value};
/// use datastorage_storage::ShardedStore;
///
/// let store = ShardedStore::from_entries([("BasicAdd", Value::Int(10))]);
/// assert_eq!(store.get("BasicAdd").unwrap(), Some(Value::Int(10)));
/// ```
pub struct ShardedStore {
    data: DashMap<String, Value, FxBuildHasher>,
}

impl ShardedStore {
    /// Create new empty store
    pub fn new() -> Self {
        Self {
            data: DashMap::with_hasher(FxBuildHasher::default()),
        }
    }

    /// Create with expected number of keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: DashMap::with_capacity_and_hasher(capacity, FxBuildHasher::default()),
        }
    }

    /// Create a store pre-populated with entries
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let store = Self::new();
        for (key, value) in entries {
            store.data.insert(key.into(), value);
        }
        store
    }

    /// All keys currently stored, in no particular order
    pub fn keys(&self) -> Vec<String> {
        self.data.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Copy of the whole store
    ///
    /// Entries written concurrently may or may not be included.
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.data
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

impl Default for ShardedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for ShardedStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.data.get(key).map(|entry| entry.value().clone()))
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.data.contains_key(key))
    }

    fn put(&self, key: &str, value: Value) -> Result<()> {
        self.data.insert(key.to_string(), value);
        Ok(())
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
