//! The Executor - single entry point to the DataStorage engine.
//!
//! The Executor is a stateless dispatcher: it turns commands into engine
//! calls and engine results into outputs.

use std::sync::Arc;

use datastorage_engine::DataStorage;
use tracing::{debug, warn};

use crate::command::set_command;
use crate::{Command, Output, Result};

/// The command executor.
///
/// Holds a shared handle to the engine and no state of its own.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads. Commands on
/// the same key are serialized by the engine; commands on different keys run
/// in parallel.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use datastorage_engine::DataStorage;
/// use datastorage_executor::{Command, Executor, OperationSpec, Output};
///
/// let executor = Executor::new(Arc::new(DataStorage::new()));
/// let output = executor
///     .execute(Command::Set {
///         key: "gold".into(),
///         default: Some(35.into()),
///         on_error: None,
///         operations: vec![OperationSpec::new("add", 6)],
///     })
///     .unwrap();
/// assert!(matches!(output, Output::SetReply { .. }));
/// ```
#[derive(Debug, Clone)]
pub struct Executor {
    storage: Arc<DataStorage>,
}

impl Executor {
    /// Create a new executor over an engine.
    pub fn new(storage: Arc<DataStorage>) -> Self {
        Self { storage }
    }

    /// The engine this executor dispatches to.
    pub fn storage(&self) -> &Arc<DataStorage> {
        &self.storage
    }

    /// Execute a single command.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let name = cmd.name();
        let result = self.dispatch(cmd);
        match &result {
            Ok(_) => debug!(target: "datastorage::executor", command = name, "Command executed"),
            Err(e) => warn!(target: "datastorage::executor", command = name, error = %e, "Command failed"),
        }
        result
    }

    /// Execute commands in order, each independently.
    ///
    /// A failing command does not stop the ones after it; results line up
    /// with the input.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    fn dispatch(&self, cmd: Command) -> Result<Output> {
        match cmd {
            Command::Set {
                key,
                default,
                on_error,
                operations,
            } => {
                let cmd = set_command(key, default, on_error, operations);
                let reply = self.storage.set(&cmd)?;
                Ok(reply.into())
            }
            Command::Get { keys } => Ok(Output::Retrieved {
                keys: self.storage.get(keys.as_slice())?,
            }),
            Command::Ping => Ok(Output::Pong {
                version: env!("CARGO_PKG_VERSION").to_string(),
            }),
        }
    }
}
