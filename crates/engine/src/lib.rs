//! Set-operation engine for DataStorage
//!
//! This crate turns a `SetCommand` into a committed value:
//! - Registry: tag → transform lookup, with the built-in operations
//! - Initializer: resolves the starting value (stored value or default)
//! - Pipeline: runs operations in order under an `on_error` policy
//! - Reply: commits the final value and reports before/after
//! - DataStorage: per-key locked facade tying the above together
//!
//! The engine is the only component that writes to the store.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod data_storage;
pub mod initializer;
pub mod operations;
pub mod pipeline;
pub mod registry;
pub mod reply;

pub use config::{ConfigError, DataStorageConfig, CONFIG_FILE_NAME};
pub use data_storage::DataStorage;
pub use initializer::{initialize, Initialized};
pub use operations::BUILTIN_TAGS;
pub use pipeline::{ExecutionState, Pipeline};
pub use registry::{Applied, OperationContext, OperationRegistry, Transform, TransformResult};
