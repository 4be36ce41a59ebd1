//! API server configuration module.
//!
//! Configuration is layered with the `config` crate, later sources winning:
//!
//! ```text
//!   built-in defaults
//!        │
//!        ▼
//!   civitas.toml (optional, working directory)
//!        │
//!        ▼
//!   CIVITAS_* environment variables (CIVITAS_PORT=9090, ...)
//! ```

use std::path::PathBuf;

use civitas_db::DbConfig;
use config::{Config, Environment, File, Source};
use serde::{Deserialize, Serialize};

/// Name of the optional configuration file, without extension.
const CONFIG_FILE: &str = "civitas";

/// Prefix of the environment variables that override the file.
const ENV_PREFIX: &str = "CIVITAS";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: i64 = 8080;
const DEFAULT_DATABASE_PATH: &str = "civitas.db";
const DEFAULT_MAX_CONNECTIONS: i64 = 5;
const DEFAULT_LOG_FILTER: &str = "info,civitas=debug,sqlx=warn,tower_http=debug";

/// REST server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Connection pool size
    pub max_connections: u32,

    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl ApiConfig {
    /// Load configuration from `civitas.toml` (if present) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(File::with_name(CONFIG_FILE).required(false))
    }

    /// Load configuration with `source` in place of the configuration file.
    pub fn load_with<S>(source: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", DEFAULT_PORT)?
            .set_default("database_path", DEFAULT_DATABASE_PATH)?
            .set_default("max_connections", DEFAULT_MAX_CONNECTIONS)?
            .set_default("log_filter", DEFAULT_LOG_FILTER)?
            .add_source(source)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: ApiConfig = settings.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue("port".to_string()));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue("max_connections".to_string()));
        }

        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("database_path".to_string()));
        }

        Ok(())
    }

    /// Address the server listens on, e.g. `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}
