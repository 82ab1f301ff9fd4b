use serde::{Deserialize, Serialize};

use super::client::ClientConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::retry::RetryConfig;

const LOCAL_CONFIG_FILE: &str = "axfr-sweep.toml";

/// Main configuration structure for axfr-sweep
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// DNS client socket timeouts
    #[serde(default)]
    pub client: ClientConfig,

    /// Retry bounds for individual record-type queries
    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. axfr-sweep.toml in current directory
    /// 3. Default configuration
    ///
    /// Command-line overrides are applied on top of whichever source won.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_FILE).exists() {
            Self::from_file(LOCAL_CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(secs) = overrides.timeout_secs {
            self.client = ClientConfig::with_uniform_timeout(secs);
        }
        if let Some(attempts) = overrides.max_attempts {
            self.retry.max_attempts = Some(attempts);
        }
        if let Some(secs) = overrides.retry_deadline_secs {
            self.retry.deadline_secs = Some(secs);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client.dial_timeout_secs == 0
            || self.client.read_timeout_secs == 0
            || self.client.write_timeout_secs == 0
        {
            return Err(ConfigError::Validation(
                "Client timeouts must be at least 1 second".to_string(),
            ));
        }

        if self.retry.max_attempts == Some(0) {
            return Err(ConfigError::Validation(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }

        if self.retry.deadline_secs == Some(0) {
            return Err(ConfigError::Validation(
                "retry.deadline_secs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub timeout_secs: Option<u64>,
    pub max_attempts: Option<u32>,
    pub retry_deadline_secs: Option<u64>,
    pub log_level: Option<String>,
}
