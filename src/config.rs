//! Configuration for fee allocation consumers.
//!
//! Supports YAML file and environment variable overrides.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "trackpro.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "TRACKPRO_CONFIG";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "TRACKPRO_LOG";
/// Environment variable overriding the role poll interval (milliseconds).
pub const ROLE_POLL_INTERVAL_ENV_VAR: &str = "TRACKPRO_ROLE_POLL_INTERVAL_MS";
/// Environment variable overriding the role wait timeout (milliseconds).
pub const ROLE_WAIT_TIMEOUT_ENV_VAR: &str = "TRACKPRO_ROLE_WAIT_TIMEOUT_MS";

/// Default delay between role lookups.
pub const DEFAULT_ROLE_POLL_INTERVAL_MS: u64 = 100;
/// Default upper bound on waiting for a role.
pub const DEFAULT_ROLE_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Role resolution wait settings.
    pub role_wait: RoleWaitConfig,
}

/// How long and how often to look for the user's role.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RoleWaitConfig {
    /// Delay between lookups in milliseconds.
    pub poll_interval_ms: u64,
    /// Total wait before giving up, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for RoleWaitConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_ROLE_POLL_INTERVAL_MS,
            timeout_ms: DEFAULT_ROLE_WAIT_TIMEOUT_MS,
        }
    }
}

impl RoleWaitConfig {
    /// Create a config with explicit interval and timeout.
    pub fn new(poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            poll_interval_ms: poll_interval.as_millis() as u64,
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    /// Delay between lookups. Never zero, so the wait always yields.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// Total time allowed for the role to appear.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Number of retries that fit inside the timeout.
    pub fn max_retries(&self) -> usize {
        let interval = self.poll_interval_ms.max(1);
        usize::try_from(self.timeout_ms / interval)
            .unwrap_or(usize::MAX)
            .saturating_add(1)
    }
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file
    /// 3. Defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(ms) = std::env::var(ROLE_POLL_INTERVAL_ENV_VAR) {
            if let Ok(v) = ms.trim().parse() {
                self.role_wait.poll_interval_ms = v;
            }
        }

        if let Ok(ms) = std::env::var(ROLE_WAIT_TIMEOUT_ENV_VAR) {
            if let Ok(v) = ms.trim().parse() {
                self.role_wait.timeout_ms = v;
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),
}
