//! Core error types for `VidSaver`.

use thiserror::Error;

/// Core error type for `VidSaver` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The platform name is not recognized.
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    /// The URL could not be parsed or is not usable.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A result record violates its invariants.
    #[error("Invalid result: {0}")]
    InvalidResult(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
