//! Engine configuration via `datastorage.toml`
//!
//! A missing file means defaults. To change settings, edit the file and
//! restart the server that embeds the engine.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use datastorage_core::{Limits, DEFAULT_MAX_KEY_BYTES, DEFAULT_MAX_OPERATIONS};

use crate::operations::BUILTIN_TAGS;
use crate::registry::OperationRegistry;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "datastorage.toml";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("config file '{path}': {source}")]
    Io {
        /// Offending path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for this schema
    #[error("failed to parse config file '{path}': {reason}")]
    Parse {
        /// Offending path
        path: String,
        /// Parser message
        reason: String,
    },

    /// Config could not be serialized
    #[error("failed to serialize config: {0}")]
    Serialize(String),

    /// Values are out of range or inconsistent
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Engine configuration loaded from `datastorage.toml`.
///
/// # Example
///
/// ```toml
/// max_operations = 256
/// max_key_length = 1024
/// disabled_operations = ["pow"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataStorageConfig {
    /// Maximum operations accepted in one `set` command
    #[serde(default = "default_max_operations")]
    pub max_operations: usize,
    /// Maximum key length in bytes
    #[serde(default = "default_max_key_length")]
    pub max_key_length: usize,
    /// Built-in operations to leave out of the registry
    #[serde(default)]
    pub disabled_operations: Vec<String>,
    /// Prune idle per-key locks once the lock table grows past this size
    #[serde(default = "default_lock_prune_threshold")]
    pub lock_prune_threshold: usize,
}

fn default_max_operations() -> usize {
    DEFAULT_MAX_OPERATIONS
}

fn default_max_key_length() -> usize {
    DEFAULT_MAX_KEY_BYTES
}

fn default_lock_prune_threshold() -> usize {
    4096
}

impl Default for DataStorageConfig {
    fn default() -> Self {
        Self {
            max_operations: default_max_operations(),
            max_key_length: default_max_key_length(),
            disabled_operations: Vec::new(),
            lock_prune_threshold: default_lock_prune_threshold(),
        }
    }
}

impl DataStorageConfig {
    /// Check ranges and that every disabled operation is a known built-in.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_operations == 0 {
            return Err(ConfigError::Invalid(
                "max_operations must be at least 1".to_string(),
            ));
        }
        if self.max_key_length == 0 {
            return Err(ConfigError::Invalid(
                "max_key_length must be at least 1".to_string(),
            ));
        }
        if let Some(unknown) = self
            .disabled_operations
            .iter()
            .find(|tag| !BUILTIN_TAGS.contains(&tag.as_str()))
        {
            return Err(ConfigError::Invalid(format!(
                "disabled_operations names unknown operation '{}'",
                unknown
            )));
        }
        Ok(())
    }

    /// Command limits derived from this config
    pub fn limits(&self) -> Limits {
        Limits {
            max_key_bytes: self.max_key_length,
            max_operations: self.max_operations,
        }
    }

    /// Built-in registry minus the disabled operations
    pub fn registry(&self) -> OperationRegistry {
        let mut registry = OperationRegistry::with_builtins();
        for tag in &self.disabled_operations {
            registry.unregister(tag);
        }
        registry
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# DataStorage configuration
#
# Maximum number of operations accepted in one set command (default: 256)
max_operations = 256

# Maximum key length in bytes (default: 1024)
max_key_length = 1024

# Built-in operations to disable, e.g. ["pow", "left_shift"]
disabled_operations = []

# Idle per-key locks are pruned once the lock table exceeds this size
lock_prune_threshold = 4096
"#
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: DataStorageConfig =
            toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `datastorage.toml` from a directory, or defaults if it is absent.
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}
