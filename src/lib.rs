//! DataStorage - shared key/value storage for multiplayer game servers
//!
//! Clients change stored values by sending a `set` command: a key, an
//! optional default, an `on_error` policy and an ordered list of operations
//! (`add`, `pop`, `default`, ...). The engine runs the operations against
//! the current value under a per-key lock, commits the result, and replies
//! with the new value and the value it started from.
//!
//! # Quick Start
//!
//! ```
//! use datastorage::{DataStorage, OnError, Operation, SetCommand, Value};
//!
//! let storage = DataStorage::new();
//! let cmd = SetCommand::new("gold", vec![Operation::new("add", 6)])
//!     .with_default(35)
//!     .with_on_error(OnError::Undo);
//! let reply = storage.set(&cmd).unwrap();
//! assert_eq!(reply.value, Value::Int(41));
//! assert_eq!(reply.original_value, Value::Int(35));
//! ```
//!
//! # Architecture
//!
//! Servers speaking JSON go through the [`Executor`] and its
//! [`Command`]/[`Output`] types. Embedders can call [`DataStorage`]
//! directly and plug in their own operations through the
//! [`OperationRegistry`].

// Re-export the public API from datastorage-executor
pub use datastorage_executor::*;

pub use datastorage_core::{Operation, OperationError, SetCommand, SetReply, Storage};
pub use datastorage_engine::{
    Applied, DataStorage, DataStorageConfig, OperationContext, OperationRegistry, Transform,
    TransformResult, BUILTIN_TAGS,
};
pub use datastorage_storage::ShardedStore;

/// Engine-level error and result types
pub mod engine {
    pub use datastorage_core::{Error, Result};
}
