//! Configuration management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vidsaver_fetch::{DEFAULT_RAPIDAPI_HOST, ExtractSettings};

use crate::error::StoreError;
use crate::persistence::{default_config_path, load_json, save_json};

/// Environment variable holding the RapidAPI key.
pub const ENV_RAPIDAPI_KEY: &str = "RAPIDAPI_KEY";

/// Environment variable overriding the RapidAPI host.
pub const ENV_RAPIDAPI_HOST: &str = "VIDSAVER_RAPIDAPI_HOST";

/// Application configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Budget for the structured JSON probe, in seconds.
    #[serde(default = "default_json_probe_secs")]
    pub json_probe_secs: u64,
    /// Budget for the embed page, in seconds.
    #[serde(default = "default_embed_secs")]
    pub embed_secs: u64,
    /// Budget for the full HTML page, in seconds.
    #[serde(default = "default_page_secs")]
    pub page_secs: u64,
    /// Budget for the video details API, in seconds.
    #[serde(default = "default_api_secs")]
    pub api_secs: u64,
    /// RapidAPI key for YouTube.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rapidapi_key: Option<String>,
    /// RapidAPI host.
    #[serde(default = "default_rapidapi_host")]
    pub rapidapi_host: String,
    /// Log the head of unmatched page bodies.
    #[serde(default)]
    pub debug_log_body: bool,
    /// Default log filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Only contact platform and API hosts.
    #[serde(default)]
    pub restrict_hosts: bool,
}

fn default_json_probe_secs() -> u64 {
    8
}

fn default_embed_secs() -> u64 {
    10
}

fn default_page_secs() -> u64 {
    30
}

fn default_api_secs() -> u64 {
    30
}

fn default_rapidapi_host() -> String {
    DEFAULT_RAPIDAPI_HOST.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            json_probe_secs: default_json_probe_secs(),
            embed_secs: default_embed_secs(),
            page_secs: default_page_secs(),
            api_secs: default_api_secs(),
            rapidapi_key: None,
            rapidapi_host: default_rapidapi_host(),
            debug_log_body: false,
            log_level: default_log_level(),
            restrict_hosts: false,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("json_probe_secs", &self.json_probe_secs)
            .field("embed_secs", &self.embed_secs)
            .field("page_secs", &self.page_secs)
            .field("api_secs", &self.api_secs)
            .field("rapidapi_key", &self.rapidapi_key.as_ref().map(|_| "<redacted>"))
            .field("rapidapi_host", &self.rapidapi_host)
            .field("debug_log_body", &self.debug_log_body)
            .field("log_level", &self.log_level)
            .field("restrict_hosts", &self.restrict_hosts)
            .finish()
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        default_config_path()
    }

    /// Loads configuration from the default path and applies the
    /// process environment.
    pub async fn load() -> Result<Self, StoreError> {
        let mut config = Self::load_from(&Self::default_path()).await?;
        config.apply_env();
        Ok(config)
    }

    /// Loads configuration from a specific path. A missing file yields defaults.
    pub async fn load_from(path: &Path) -> Result<Self, StoreError> {
        let config: Self = match load_json(path).await {
            Ok(config) => config,
            Err(e) if e.is_not_found() => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e),
        };
        config.validate()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to the default path.
    pub async fn save(&self) -> Result<(), StoreError> {
        self.save_to(&Self::default_path()).await
    }

    /// Saves configuration to a specific path.
    pub async fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        self.validate()?;
        save_json(path, self).await?;
        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Rejects zero timeouts and a blank API host.
    pub fn validate(&self) -> Result<(), StoreError> {
        let timeouts = [
            ("json_probe_secs", self.json_probe_secs),
            ("embed_secs", self.embed_secs),
            ("page_secs", self.page_secs),
            ("api_secs", self.api_secs),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, secs)| *secs == 0) {
            return Err(StoreError::Config(format!("{name} must be at least 1")));
        }
        if self.rapidapi_host.trim().is_empty() {
            return Err(StoreError::Config("rapidapi_host must not be empty".to_string()));
        }
        Ok(())
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Applies overrides read through `lookup`. Blank values are ignored.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = read(ENV_RAPIDAPI_KEY) {
            debug!(var = ENV_RAPIDAPI_KEY, "Using API key from environment");
            self.rapidapi_key = Some(key);
        }
        if let Some(host) = read(ENV_RAPIDAPI_HOST) {
            debug!(var = ENV_RAPIDAPI_HOST, host = %host, "Using API host from environment");
            self.rapidapi_host = host.trim().to_string();
        }
    }

    /// Returns true if an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.rapidapi_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Converts into the settings the extractor runs with.
    pub fn to_extract_settings(&self) -> ExtractSettings {
        ExtractSettings {
            json_probe_timeout: Duration::from_secs(self.json_probe_secs),
            embed_timeout: Duration::from_secs(self.embed_secs),
            page_timeout: Duration::from_secs(self.page_secs),
            api_timeout: Duration::from_secs(self.api_secs),
            rapidapi_key: self.rapidapi_key.clone(),
            rapidapi_host: self.rapidapi_host.clone(),
            debug_log_body: self.debug_log_body,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_extract_settings() {
        assert_eq!(Config::default().to_extract_settings(), ExtractSettings::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"page_secs": 12}"#).unwrap();
        assert_eq!(config.page_secs, 12);
        assert_eq!(config.json_probe_secs, 8);
        assert_eq!(config.rapidapi_host, DEFAULT_RAPIDAPI_HOST);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_RAPIDAPI_KEY, "from-env"),
            (ENV_RAPIDAPI_HOST, " other.p.rapidapi.com "),
        ]
        .into_iter()
        .collect();

        let mut config = Config {
            rapidapi_key: Some("from-file".to_string()),
            ..Config::default()
        };
        config.apply_env_with(|name| env.get(name).map(ToString::to_string));

        assert_eq!(config.rapidapi_key.as_deref(), Some("from-env"));
        assert_eq!(config.rapidapi_host, "other.p.rapidapi.com");
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let mut config = Config::default();
        config.apply_env_with(|_| Some("  ".to_string()));
        assert!(config.rapidapi_key.is_none());
        assert!(!config.has_api_key());
        assert_eq!(config.rapidapi_host, DEFAULT_RAPIDAPI_HOST);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config {
            embed_secs: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(StoreError::Config(msg)) if msg.contains("embed_secs")));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config {
            rapidapi_key: Some("super-secret".to_string()),
            ..Config::default()
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
