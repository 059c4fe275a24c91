//! Core types for DataStorage
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: Unified value enum for everything stored under a key
//! - Operation / OnError / SetCommand / SetReply: the `set` pipeline contract
//! - Error / OperationError: Error type hierarchy
//! - Limits: command validation limits
//! - Storage: trait implemented by the enclosing key/value store

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;
pub mod traits;
pub mod types;
pub mod value;

pub use error::{Error, OperationError, Result};
pub use limits::{Limits, DEFAULT_MAX_KEY_BYTES, DEFAULT_MAX_OPERATIONS};
pub use traits::Storage;
pub use types::{OnError, Operation, SetCommand, SetReply};
pub use value::Value;
