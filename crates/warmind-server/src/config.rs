//! Server configuration loading.
//!
//! The canonical configuration is a YAML file whose path comes from
//! `WARMIND_CONFIG`; every field has a default, so the server also runs
//! with no file at all. `WARMIND_HOST` and `WARMIND_PORT` override the
//! bind address from the environment regardless of the file.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use warmind_client::Roster;
use warmind_engine::{DecisionWeights, EngineConfig};

/// Environment variable naming the YAML config file.
pub const CONFIG_PATH_VAR: &str = "WARMIND_CONFIG";

/// Errors that can occur when loading server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        #[from]
        source: serde_yml::Error,
    },

    /// A field survived parsing but has a value outside its range.
    #[error(transparent)]
    Invalid(#[from] warmind_engine::ConfigError),

    /// An environment override could not be parsed.
    #[error("invalid {name}: {reason}")]
    Env {
        /// The offending environment variable.
        name: &'static str,
        /// Why its value was rejected.
        reason: String,
    },
}

/// Complete server configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind the control API to.
    pub host: String,
    /// TCP port for the control API.
    pub port: u16,
    /// Location ids mapped to their servers' base URLs.
    pub locations: Roster,
    /// Per-location call timeout in milliseconds.
    pub call_timeout_ms: u64,
    /// Overall snapshot fetch deadline in milliseconds.
    pub fetch_timeout_ms: u64,
    /// Analysis and pacing tunables.
    pub engine: EngineConfig,
    /// Per-phase action weight table.
    pub weights: DecisionWeights,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8081,
            locations: Roster::default(),
            call_timeout_ms: 2000,
            fetch_timeout_ms: 5000,
            engine: EngineConfig::default(),
            weights: DecisionWeights::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration the way the binary does: the YAML file named
    /// by `WARMIND_CONFIG` if set, defaults otherwise, then environment
    /// overrides, then validation.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the named file cannot be read or
    /// parsed, an override cannot be parsed, or a value is out of
    /// range.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply `WARMIND_HOST` / `WARMIND_PORT` overrides.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = std::env::var("WARMIND_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("WARMIND_PORT") {
            self.port = port.parse().map_err(|e| ConfigError::Env {
                name: "WARMIND_PORT",
                reason: format!("{e}"),
            })?;
        }
        Ok(())
    }

    /// Validate the tunables and weight table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if any engine tunable or weight
    /// is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.weights.validate()?;
        Ok(())
    }

    /// Per-location call timeout as a [`Duration`].
    pub const fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }

    /// Overall snapshot fetch deadline as a [`Duration`].
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}
