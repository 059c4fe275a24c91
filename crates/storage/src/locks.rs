//! Per-key lock table
//!
//! Every `set` invocation runs a read-modify-write cycle on exactly one key.
//! Two invocations on the same key must not interleave, otherwise the
//! snapshot captured by one would be overwritten by the other's commit.
//! Invocations on different keys must not contend at all.
//!
//! `KeyLockTable` maps each key to its own `Arc<Mutex<()>>`. The map itself
//! is a DashMap, so looking up a guard only touches one shard, and the
//! shard lock is released before blocking on the key's mutex.
//!
//! Entries are created lazily and removed by [`KeyLockTable::prune`] once no
//! invocation holds or waits on them.

use dashmap::DashMap;
use parking_lot::lock_api::ArcMutexGuard;
use parking_lot::{Mutex, RawMutex};
use std::sync::Arc;

/// Exclusive access to one key, released on drop
pub struct KeyGuard {
    key: String,
    _guard: ArcMutexGuard<RawMutex, ()>,
}

impl std::fmt::Debug for KeyGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyGuard").field("key", &self.key).finish()
    }
}

/// Index from key to a single-writer guard
#[derive(Default)]
pub struct KeyLockTable {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl KeyLockTable {
    /// Create an empty lock table
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Block until the caller has exclusive access to `key`
    pub fn lock(&self, key: &str) -> KeyGuard {
        let mutex = self.mutex_for(key);
        KeyGuard {
            key: key.to_string(),
            _guard: mutex.lock_arc(),
        }
    }

    /// Number of keys with a lock entry
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// True when the table holds no entries
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    /// Drop entries that no guard or waiter references
    ///
    /// Returns the number of entries removed.
    pub fn prune(&self) -> usize {
        let before = self.locks.len();
        // strong_count == 1 means only the table holds the Arc
        self.locks.retain(|_, mutex| Arc::strong_count(mutex) > 1);
        let removed = before.saturating_sub(self.locks.len());
        if removed > 0 {
            tracing::debug!(target: "datastorage::locks", removed, "Pruned idle key locks");
        }
        removed
    }

    fn mutex_for(&self, key: &str) -> Arc<Mutex<()>> {
        if let Some(existing) = self.locks.get(key) {
            return Arc::clone(existing.value());
        }
        // Shard ref is dropped at the end of this statement, before blocking
        Arc::clone(
            self.locks
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        )
    }
}
