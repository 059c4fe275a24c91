//! Pipeline executor
//!
//! Runs a command's operations, in order, against the registry and resolves
//! failures with the command's [`OnError`] policy.
//!
//! ## State machine
//!
//! ```text
//!            ┌──── step ok / ignore ────┐
//!            ▼                          │
//!        RUNNING ───────────────────────┘
//!         │    │
//!  raise  │    │ set_default / undo / abort / list exhausted
//!         ▼    ▼
//!      FAILED  DONE
//! ```
//!
//! `FAILED` escapes to the caller and nothing is committed. `DONE` always
//! produces a final value.
//!
//! ## Snapshot
//!
//! The snapshot is taken once, from the initial value. The only exception is
//! an [`Applied::Reinitialized`] step (the built-in `default` operation on a
//! key that did not exist), which moves the snapshot to its result.

use datastorage_core::{Error, OnError, Operation, Result, Value};
use tracing::{debug, warn};

use crate::initializer::Initialized;
use crate::registry::{Applied, OperationContext, OperationRegistry};

/// Ephemeral state of one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionState {
    /// Working value
    pub current: Value,
    /// Value reported as `original_value`
    pub snapshot: Value,
    /// Whether the key existed before the invocation
    pub had_key_before: bool,
}

impl ExecutionState {
    /// Capture the snapshot from the initial value
    pub fn new(initial: Initialized) -> Self {
        ExecutionState {
            snapshot: initial.value.clone(),
            current: initial.value,
            had_key_before: initial.had_key_before,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running,
    Done,
}

/// Executes operation lists against a registry
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'r> {
    registry: &'r OperationRegistry,
}

impl<'r> Pipeline<'r> {
    /// Create a pipeline over `registry`
    pub fn new(registry: &'r OperationRegistry) -> Self {
        Pipeline { registry }
    }

    /// Check every tag is registered
    ///
    /// Run before any step so an unknown tag never leaves a half-applied
    /// pipeline behind.
    pub fn validate(&self, operations: &[Operation]) -> Result<()> {
        match operations
            .iter()
            .find(|op| !self.registry.contains(&op.kind))
        {
            Some(op) => Err(Error::UnknownOperation {
                operation: op.kind.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Run `operations` starting from `state`
    ///
    /// Returns the terminal state on `DONE`. Under [`OnError::Raise`] the
    /// first failing step's error is returned as is.
    pub fn run(
        &self,
        mut state: ExecutionState,
        operations: &[Operation],
        on_error: OnError,
        default: Option<&Value>,
    ) -> Result<ExecutionState> {
        let mut phase = Phase::Running;

        for (index, operation) in operations.iter().enumerate() {
            if phase == Phase::Done {
                break;
            }

            let transform =
                self.registry
                    .get(&operation.kind)
                    .ok_or_else(|| Error::UnknownOperation {
                        operation: operation.kind.clone(),
                    })?;
            let ctx = OperationContext {
                tag: &operation.kind,
                had_key_before: state.had_key_before,
                default,
            };

            match transform.apply(&ctx, &state.current, &operation.operand) {
                Ok(Applied::Replaced(value)) => state.current = value,
                Ok(Applied::Unchanged) => {}
                Ok(Applied::Reinitialized(value)) => {
                    state.snapshot = value.clone();
                    state.current = value;
                }
                Err(err) => match on_error {
                    OnError::Raise => {
                        warn!(
                            target: "datastorage::pipeline",
                            step = index,
                            operation = %operation.kind,
                            error = %err,
                            "Operation failed, raising"
                        );
                        return Err(err.into());
                    }
                    OnError::SetDefault => {
                        let default = default.ok_or_else(|| {
                            Error::configuration("on_error 'set_default' requires a default value")
                        })?;
                        debug!(target: "datastorage::pipeline", step = index, error = %err, "Falling back to default");
                        state.current = default.clone();
                        phase = Phase::Done;
                    }
                    OnError::Undo => {
                        debug!(target: "datastorage::pipeline", step = index, error = %err, "Reverting to snapshot");
                        state.current = state.snapshot.clone();
                        phase = Phase::Done;
                    }
                    OnError::Abort => {
                        debug!(target: "datastorage::pipeline", step = index, error = %err, "Aborting remaining operations");
                        phase = Phase::Done;
                    }
                    OnError::Ignore => {
                        debug!(target: "datastorage::pipeline", step = index, error = %err, "Ignoring failed operation");
                    }
                },
            }
        }

        Ok(state)
    }
}
