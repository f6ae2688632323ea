//! Configuration for the task list.
//!
//! Values come from, in increasing precedence: built-in defaults, a TOML
//! file named by `TASKLIST_CONFIG`, and individual environment variables.
//!
//! ```toml
//! name_policy = "strict"
//! max_name_length = 120
//! max_dispatched_actions = 16
//! broadcast_capacity = 64
//! ```
//!
//! # Example
//!
//! ```no_run
//! use tasklist::config::TaskListConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TaskListConfig::from_env()?;
//! println!("Name policy: {}", config.name_policy);
//! # Ok(())
//! # }
//! ```

use crate::validation::{NamePolicy, NameRules};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tasklist_runtime::StoreConfig;
use thiserror::Error;

/// Path of an optional TOML configuration file
pub const CONFIG_FILE_VAR: &str = "TASKLIST_CONFIG";
/// Overrides [`TaskListConfig::name_policy`]
pub const NAME_POLICY_VAR: &str = "TASKLIST_NAME_POLICY";
/// Overrides [`TaskListConfig::max_name_length`]
pub const MAX_NAME_LENGTH_VAR: &str = "TASKLIST_MAX_NAME_LENGTH";
/// Overrides [`TaskListConfig::max_dispatched_actions`]
pub const MAX_DISPATCHED_ACTIONS_VAR: &str = "TASKLIST_MAX_DISPATCHED_ACTIONS";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown name policy
    #[error("Invalid name policy {0:?} (expected \"permissive\" or \"strict\")")]
    InvalidPolicy(String),

    /// A numeric variable did not parse
    #[error("Invalid value {value:?} for {var}")]
    InvalidNumber {
        /// Variable name
        var: String,
        /// Offending value
        value: String,
    },

    /// The configuration file could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

/// Task list configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaskListConfig {
    /// Which names `Add` and `Rename` accept
    pub name_policy: NamePolicy,
    /// Longest accepted name under the strict policy
    pub max_name_length: usize,
    /// Follow-up actions a single command may dispatch
    pub max_dispatched_actions: usize,
    /// Actions buffered for slow subscribers
    pub broadcast_capacity: usize,
}

impl TaskListConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns error if the file or a variable is invalid, or the result
    /// fails validation
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration using `lookup` in place of the process environment
    ///
    /// # Errors
    ///
    /// Same as [`TaskListConfig::from_env`]
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_FILE_VAR) {
            Some(path) => Self::load_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(lookup)?;
        config.validate()?;

        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Parse a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse TOML text; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns error if the text is not valid TOML for this schema
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(NAME_POLICY_VAR) {
            self.name_policy = value
                .parse()
                .map_err(ConfigError::InvalidPolicy)?;
        }
        if let Some(value) = lookup(MAX_NAME_LENGTH_VAR) {
            self.max_name_length = parse_number(MAX_NAME_LENGTH_VAR, &value)?;
        }
        if let Some(value) = lookup(MAX_DISPATCHED_ACTIONS_VAR) {
            self.max_dispatched_actions = parse_number(MAX_DISPATCHED_ACTIONS_VAR, &value)?;
        }
        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if any limit is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_name_length == 0 {
            return Err(ConfigError::Validation(
                "max_name_length must be > 0".to_string(),
            ));
        }
        if self.max_dispatched_actions == 0 {
            return Err(ConfigError::Validation(
                "max_dispatched_actions must be > 0".to_string(),
            ));
        }
        if self.broadcast_capacity == 0 {
            return Err(ConfigError::Validation(
                "broadcast_capacity must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Name rules for the reducer environment
    #[must_use]
    pub const fn name_rules(&self) -> NameRules {
        NameRules {
            policy: self.name_policy,
            max_length: self.max_name_length,
        }
    }

    /// Store settings
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.max_dispatched_actions, self.broadcast_capacity)
    }
}

impl Default for TaskListConfig {
    fn default() -> Self {
        let store = StoreConfig::default();
        Self {
            name_policy: NamePolicy::default(),
            max_name_length: NameRules::DEFAULT_MAX_LENGTH,
            max_dispatched_actions: store.max_dispatched_actions,
            broadcast_capacity: store.broadcast_capacity,
        }
    }
}

fn parse_number(var: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var: var.to_string(),
        value: value.to_string(),
    })
}
