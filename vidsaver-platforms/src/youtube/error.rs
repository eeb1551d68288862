//! YouTube video-details API errors.

use thiserror::Error;
use vidsaver_fetch::{ExtractError, HttpError};

/// Errors from a [`VideoDetailsApi`](super::VideoDetailsApi) lookup.
#[derive(Debug, Error)]
pub enum VideoApiError {
    /// No key, or the key was rejected.
    #[error("YouTube API not configured: {0}")]
    NotConfigured(String),

    /// The service reports the video as missing or unavailable.
    #[error("Video not found or unavailable: {0}")]
    NotFound(String),

    /// The service answered with something unusable.
    #[error("Upstream API error: {0}")]
    Upstream(String),

    /// Transport failure.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl From<VideoApiError> for ExtractError {
    fn from(err: VideoApiError) -> Self {
        match err {
            VideoApiError::NotConfigured(msg) => ExtractError::NotConfigured(msg),
            VideoApiError::NotFound(msg) => ExtractError::NotFound(msg),
            VideoApiError::Upstream(msg) => ExtractError::InvalidResponse(msg),
            VideoApiError::Http(e) => ExtractError::Http(e),
        }
    }
}
