//! The canonical output record.
//!
//! - [`ExtractionResult`] - One per request, success or error
//! - [`ErrorKind`] - Failure taxonomy

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::media::MediaCandidate;

// ============================================================================
// Status
// ============================================================================

/// Overall outcome of an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    /// A playable URL was found.
    Success,
    /// No strategy produced a URL.
    Error,
}

// ============================================================================
// Error Kind
// ============================================================================

/// Why an extraction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The post does not exist or was deleted.
    NotFound,
    /// The post is private or restricted.
    AccessDenied,
    /// The target did not answer in time.
    Timeout,
    /// The target served a login wall or anti-bot page.
    UpstreamBlocked,
    /// The page was reachable but no extractor matched.
    NoVideoFound,
    /// A required credential or setting is missing.
    ConfigError,
}

impl ErrorKind {
    /// How specific this failure is; higher wins when strategies disagree.
    pub fn specificity(self) -> u8 {
        match self {
            Self::ConfigError => 5,
            Self::UpstreamBlocked => 4,
            Self::AccessDenied => 3,
            Self::NotFound => 2,
            Self::Timeout => 1,
            Self::NoVideoFound => 0,
        }
    }

    /// HTTP status an outer server would typically answer with.
    pub fn suggested_http_status(self) -> u16 {
        match self {
            Self::NotFound | Self::NoVideoFound => 404,
            Self::AccessDenied => 403,
            Self::Timeout => 504,
            Self::UpstreamBlocked => 503,
            Self::ConfigError => 500,
        }
    }

    /// Message used when a failure carries no text of its own.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::NotFound => "Post not found",
            Self::AccessDenied => "Access denied (private post?)",
            Self::Timeout => "Timed out waiting for the platform",
            Self::UpstreamBlocked => "Server blocked (login page). Try again later.",
            Self::NoVideoFound => "No video found. Post might be private or not a video.",
            Self::ConfigError => "Extractor is not configured",
        }
    }

    /// Stable identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::AccessDenied => "AccessDenied",
            Self::Timeout => "Timeout",
            Self::UpstreamBlocked => "UpstreamBlocked",
            Self::NoVideoFound => "NoVideoFound",
            Self::ConfigError => "ConfigError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Extraction Result
// ============================================================================

/// Canonical result of one extraction request.
///
/// Build it through [`ExtractionResult::success`] or
/// [`ExtractionResult::failure`]; both uphold the record's invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Success or error.
    pub status: ExtractionStatus,
    /// Direct, playable media URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// `"<w>x<h>"` or `"unknown"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    /// Quality label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    /// Id of the strategy that found the URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_strategy: Option<String>,
    /// Title, when the source reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Thumbnail URL, when the source reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Duration in seconds, when the source reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,
    /// Human-readable failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Failure category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl ExtractionResult {
    /// Shapes a successful candidate into a result.
    pub fn success(candidate: MediaCandidate, strategy_id: impl Into<String>) -> Self {
        let resolution = candidate.resolution_label();
        Self {
            status: ExtractionStatus::Success,
            video_url: Some(candidate.url),
            resolution: Some(resolution),
            quality: candidate.quality,
            source_strategy: Some(strategy_id.into()),
            title: candidate.title,
            thumbnail: candidate.thumbnail,
            duration_secs: candidate.duration_secs,
            error_message: None,
            error_kind: None,
        }
    }

    /// Creates an error result. Blank messages fall back to the kind's default.
    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            kind.default_message().to_string()
        } else {
            message
        };
        Self {
            status: ExtractionStatus::Error,
            video_url: None,
            resolution: None,
            quality: None,
            source_strategy: None,
            title: None,
            thumbnail: None,
            duration_secs: None,
            error_message: Some(message),
            error_kind: Some(kind),
        }
    }

    /// Returns true for a success.
    pub fn is_success(&self) -> bool {
        self.status == ExtractionStatus::Success
    }

    /// Checks the record invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidResult`] when a success lacks an absolute
    /// URL, or an error lacks a message or carries a URL.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self.status {
            ExtractionStatus::Success => {
                let url = self
                    .video_url
                    .as_deref()
                    .ok_or_else(|| CoreError::InvalidResult("success without videoUrl".into()))?;
                let parsed = ::url::Url::parse(url)
                    .map_err(|e| CoreError::InvalidResult(format!("videoUrl: {e}")))?;
                if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
                    return Err(CoreError::InvalidResult(format!(
                        "videoUrl is not an absolute http(s) URL: {url}"
                    )));
                }
                Ok(())
            }
            ExtractionStatus::Error => {
                if self.video_url.is_some() {
                    return Err(CoreError::InvalidResult("error with videoUrl".into()));
                }
                match self.error_message.as_deref() {
                    Some(m) if !m.is_empty() => Ok(()),
                    _ => Err(CoreError::InvalidResult("error without message".into())),
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
