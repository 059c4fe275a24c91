//! DataStorage facade
//!
//! Owns the store, the operation registry and the per-key lock table, and
//! runs one `set` invocation end to end:
//!
//! 1. validate the command shape and every operation tag
//! 2. lock the key
//! 3. resolve the starting value
//! 4. run the pipeline
//! 5. commit and build the reply
//!
//! Steps 1 and 3 fail unconditionally; step 4 is governed by `on_error`.
//! Nothing is written unless step 5 is reached.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use datastorage_core::{Error, Limits, Result, SetCommand, SetReply, Storage, Value};
use datastorage_storage::{KeyLockTable, ShardedStore};
use tracing::{debug, info};

use crate::config::{DataStorageConfig, CONFIG_FILE_NAME};
use crate::initializer::initialize;
use crate::pipeline::{ExecutionState, Pipeline};
use crate::registry::{OperationRegistry, Transform};
use crate::reply;

/// Per-key `set` engine over a [`Storage`] backend
///
/// # Example
///
/// ```
/// use datastorage_core::{Operation, SetCommand, Value};
/// use datastorage_engine::DataStorage;
///
/// let storage = DataStorage::new();
/// let cmd = SetCommand::new("gold", vec![Operation::new("add", 6)]).with_default(35);
/// let reply = storage.set(&cmd).unwrap();
/// assert_eq!(reply.value, Value::Int(41));
/// assert_eq!(reply.original_value, Value::Int(35));
/// ```
pub struct DataStorage<S: Storage = ShardedStore> {
    store: Arc<S>,
    registry: OperationRegistry,
    locks: KeyLockTable,
    limits: Limits,
    lock_prune_threshold: usize,
}

impl DataStorage<ShardedStore> {
    /// In-memory engine with the built-in operations and default limits
    pub fn new() -> Self {
        Self::with_store(Arc::new(ShardedStore::new()))
    }

    /// In-memory engine configured from `datastorage.toml` in `dir`
    ///
    /// Creates the directory and a default config file when missing, the same
    /// way a fresh data directory is initialised.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| {
            Error::configuration(format!("cannot create '{}': {}", dir.display(), e))
        })?;

        let config_path = dir.join(CONFIG_FILE_NAME);
        DataStorageConfig::write_default_if_missing(&config_path)
            .map_err(|e| Error::configuration(e.to_string()))?;
        let config = DataStorageConfig::from_file(&config_path)
            .map_err(|e| Error::configuration(e.to_string()))?;

        Self::with_config(Arc::new(ShardedStore::new()), &config)
    }
}

impl Default for DataStorage<ShardedStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Storage> DataStorage<S> {
    /// Engine over an existing store with default config
    pub fn with_store(store: Arc<S>) -> Self {
        let config = DataStorageConfig::default();
        Self::build(store, config.registry(), &config)
    }

    /// Engine over an existing store with explicit config
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if the config does not validate.
    pub fn with_config(store: Arc<S>, config: &DataStorageConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| Error::configuration(e.to_string()))?;
        Ok(Self::build(store, config.registry(), config))
    }

    fn build(store: Arc<S>, registry: OperationRegistry, config: &DataStorageConfig) -> Self {
        info!(
            target: "datastorage::engine",
            operations = registry.len(),
            max_operations = config.max_operations,
            max_key_length = config.max_key_length,
            "DataStorage ready"
        );
        DataStorage {
            store,
            registry,
            locks: KeyLockTable::new(),
            limits: config.limits(),
            lock_prune_threshold: config.lock_prune_threshold,
        }
    }

    /// Register (or replace) an operation kind
    pub fn register_operation<T>(&mut self, tag: impl Into<String>, transform: T) -> &mut Self
    where
        T: Transform + 'static,
    {
        self.registry.register(tag, transform);
        self
    }

    /// Backing store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Operation registry in use
    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Command limits in use
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Run one `set` command against its key
    ///
    /// # Errors
    ///
    /// - `InvalidCommand` / `UnknownOperation` before anything runs
    /// - `MissingValue` when the key is absent and no default was given
    /// - `Configuration` for `set_default` without a default, once a step fails
    /// - the failing step's `Operation` error under `raise`
    ///
    /// On error the store is left untouched.
    pub fn set(&self, cmd: &SetCommand) -> Result<SetReply> {
        self.limits.validate_command(cmd)?;
        let pipeline = Pipeline::new(&self.registry);
        pipeline.validate(&cmd.operations)?;

        let reply = {
            let _guard = self.locks.lock(&cmd.key);
            let initial = initialize(self.store.as_ref(), &cmd.key, cmd.default.as_ref())?;
            debug!(
                target: "datastorage::engine",
                key = %cmd.key,
                existed = initial.had_key_before,
                operations = cmd.operations.len(),
                on_error = %cmd.on_error,
                "Running set"
            );
            let state = pipeline.run(
                ExecutionState::new(initial),
                &cmd.operations,
                cmd.on_error,
                cmd.default.as_ref(),
            )?;
            reply::commit(self.store.as_ref(), &cmd.key, state)?
        };

        if self.locks.len() > self.lock_prune_threshold {
            self.locks.prune();
        }
        Ok(reply)
    }

    /// Read several keys at once
    ///
    /// Absent keys map to `Value::Null`. Reads take no key locks.
    pub fn get<K: AsRef<str>>(&self, keys: &[K]) -> Result<BTreeMap<String, Value>> {
        let mut out = BTreeMap::new();
        for key in keys {
            let key = key.as_ref();
            self.limits.validate_key(key)?;
            let value = self.store.get(key)?.unwrap_or(Value::Null);
            out.insert(key.to_string(), value);
        }
        Ok(out)
    }

    /// Drop idle per-key locks, returning how many were removed
    pub fn prune_locks(&self) -> usize {
        self.locks.prune()
    }

    /// Number of keys currently tracked by the lock table
    pub fn lock_count(&self) -> usize {
        self.locks.len()
    }
}

impl<S: Storage> std::fmt::Debug for DataStorage<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataStorage")
            .field("keys", &self.store.len())
            .field("registry", &self.registry)
            .field("limits", &self.limits)
            .finish()
    }
}
