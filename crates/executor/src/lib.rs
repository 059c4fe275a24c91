//! # DataStorage Executor
//!
//! Command layer for DataStorage, the key/value store behind a multiplayer
//! game server. Servers and SDKs talk to the engine through this crate:
//! - [`Command`]/[`Output`] - serializable instruction set
//! - [`Executor`] - dispatches commands to the engine
//! - [`Error`] - serializable, lossless error type
//!
//! ## Quick Start
//!
//! ```text
//! use datastorage_executor::{Command, Executor};
//!
//! let executor = Executor::new(Arc::new(DataStorage::new()));
//! let cmd: Command = serde_json::from_str(request_body)?;
//! let output = executor.execute(cmd)?;
//! let response = serde_json::to_string(&output)?;
//! ```
//!
//! ## Values on the wire
//!
//! Values are plain JSON. Non-finite floats use `{"$f64": "NaN"}` and
//! friends; see the `json` module.

#![warn(missing_docs)]

mod command;
mod convert;
mod error;
mod executor;
pub mod json;
mod output;
mod types;

#[cfg(test)]
mod tests;

pub use command::Command;
pub use error::Error;
pub use executor::Executor;
pub use output::Output;
pub use types::OperationSpec;

pub use datastorage_core::{OnError, Value};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
