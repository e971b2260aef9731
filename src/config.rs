//! Layered runtime configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, then `TASKFLOW_*` environment variables.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Default configuration file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "taskflow.toml";

/// Prefix for environment variable overrides, e.g. `TASKFLOW_DATABASE_URL`.
pub const ENV_PREFIX: &str = "TASKFLOW";

/// Runtime settings for the task store and logging.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskFlowConfig {
    /// `SQLite` database path or URL.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Maximum number of pooled database connections.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// Tracing filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialised.
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// `pool_size` was zero.
    #[error("pool_size must be at least 1")]
    EmptyPool,
}

impl TaskFlowConfig {
    /// Loads configuration from `taskflow.toml` (if present) and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source is malformed or a value is out
    /// of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Loads configuration from the given file (if present) and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source is malformed or a value is out
    /// of range.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Loads from `path`, reading overrides from `env` instead of the process
    /// environment when it is `Some`.
    fn load_with_env(
        path: &Path,
        env: Option<::config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        loaded.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }
        Ok(self)
    }
}

impl Default for TaskFlowConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_pool_size(),
            log_filter: default_log_filter(),
        }
    }
}

fn default_database_url() -> String {
    "taskflow.db".to_owned()
}

const fn default_pool_size() -> u32 {
    4
}

fn default_log_filter() -> String {
    "info".to_owned()
}
