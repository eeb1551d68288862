//! CLI command implementations.

pub mod config;
pub mod extract;
pub mod platforms;

use std::path::Path;

use anyhow::{Context, Result};
use vidsaver_store::Config;

/// Loads configuration from `path` or the default location, then applies
/// environment overrides.
pub async fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let mut config = Config::load_from(path)
                .await
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            config.apply_env();
            Ok(config)
        }
        None => Config::load().await.context("failed to load config"),
    }
}
