// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `VidSaver` Store
//!
//! Persistent configuration for `VidSaver`.
//!
//! - **Config**: timeouts, API credentials and logging defaults
//! - **Persistence**: JSON file I/O with owner-only permissions
//!
//! ## Usage
//!
//! ```ignore
//! use vidsaver_fetch::ExtractContext;
//! use vidsaver_store::Config;
//!
//! let config = Config::load().await?;
//! let ctx = ExtractContext::with_settings(config.to_extract_settings());
//! ```

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{Config, ENV_RAPIDAPI_HOST, ENV_RAPIDAPI_KEY};
pub use error::StoreError;
pub use persistence::{default_config_dir, default_config_path, load_json, save_json};
