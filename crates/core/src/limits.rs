//! Limits enforced on incoming commands
//!
//! Violations are reported as `InvalidCommand` before any operation runs,
//! so a rejected command never touches the store.

use crate::error::{Error, Result};
use crate::types::SetCommand;

/// Default maximum number of operations in one command
pub const DEFAULT_MAX_OPERATIONS: usize = 256;

/// Default maximum key length in bytes
pub const DEFAULT_MAX_KEY_BYTES: usize = 1024;

/// Command limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum key length in bytes (default: 1024)
    pub max_key_bytes: usize,

    /// Maximum operations per command (default: 256)
    pub max_operations: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_key_bytes: DEFAULT_MAX_KEY_BYTES,
            max_operations: DEFAULT_MAX_OPERATIONS,
        }
    }
}

impl Limits {
    /// Validate a key
    ///
    /// Any string is a key, including `""`, as long as it fits
    /// `max_key_bytes` and contains no NUL bytes.
    pub fn validate_key(&self, key: &str) -> Result<()> {
        if key.len() > self.max_key_bytes {
            return Err(Error::invalid_command(format!(
                "key exceeds maximum length of {} bytes",
                self.max_key_bytes
            )));
        }
        if key.contains('\0') {
            return Err(Error::invalid_command("key must not contain NUL bytes"));
        }
        Ok(())
    }

    /// Validate the shape of a `set` command (key and operation count)
    pub fn validate_command(&self, cmd: &SetCommand) -> Result<()> {
        self.validate_key(&cmd.key)?;
        if cmd.operations.is_empty() {
            return Err(Error::invalid_command("operations must not be empty"));
        }
        if cmd.operations.len() > self.max_operations {
            return Err(Error::invalid_command(format!(
                "{} operations exceed the limit of {}",
                cmd.operations.len(),
                self.max_operations
            )));
        }
        Ok(())
    }
}
