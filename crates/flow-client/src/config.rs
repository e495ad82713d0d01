//! Client configuration
//!
//! Loaded from `config.json` in a config directory, overridable from the
//! environment. A missing file yields the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::constants::{defaults, env, CONFIG_FILE};

/// Flow store connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the flow store API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Token refresh window in milliseconds
    #[serde(default = "default_refresh_window_ms")]
    pub refresh_window_ms: i64,
}

fn default_api_url() -> String {
    defaults::API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    defaults::TIMEOUT_SECS
}

fn default_refresh_window_ms() -> i64 {
    defaults::REFRESH_WINDOW_MS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            refresh_window_ms: default_refresh_window_ms(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `FLOWVIEW_API_URL` and `FLOWVIEW_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(env::API_URL).filter(|u| !u.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(env::TIMEOUT_SECS) {
            self.timeout_secs = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: env::TIMEOUT_SECS.to_string(),
                value: raw.clone(),
            })?;
        }
        Ok(self)
    }

    /// Load configuration from disk
    pub async fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if !fs::try_exists(&config_path).await.map_err(ConfigError::Io)? {
            log::debug!("No config at {:?}, using defaults", config_path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .await
            .map_err(ConfigError::Io)?;

        serde_json::from_str(&contents).map_err(ConfigError::Parse)
    }

    /// Save configuration to disk
    pub async fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        fs::create_dir_all(config_dir).await.map_err(ConfigError::Io)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let contents = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        fs::write(&config_path, contents).await.map_err(ConfigError::Io)?;

        log::info!("Configuration saved to {:?}", config_path);
        Ok(())
    }

    /// Full URL of a store route
    pub fn endpoint(&self, route: &str) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), route)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(serde_json::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(serde_json::Error),
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}
