//! Fetch and extraction error types.

use std::time::Duration;

use thiserror::Error;
use vidsaver_core::ErrorKind;

// ============================================================================
// Main Extract Error
// ============================================================================

/// Error type for a single strategy attempt.
///
/// Every variant maps onto one public [`ErrorKind`]; the pipeline keeps the
/// most specific one when all strategies fail.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// The attempt exceeded its time budget.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// The post does not exist.
    #[error("Post not found: {0}")]
    NotFound(String),

    /// The post is private or restricted.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// The platform served a login wall or anti-bot page.
    #[error("Server blocked (login page): {0}")]
    Blocked(String),

    /// The page was readable but held no video.
    #[error("No video found: {0}")]
    NoVideoFound(String),

    /// The response has a shape this strategy does not handle.
    #[error("Not applicable: {0}")]
    NotApplicable(String),

    /// The response could not be interpreted.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required credential or setting is missing.
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// Strategy not available.
    #[error("Strategy not available: {0}")]
    StrategyNotAvailable(String),

    /// All strategies failed.
    #[error("All strategies failed")]
    AllStrategiesFailed,
}

impl ExtractError {
    /// Public category of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(HttpError::Timeout(_)) | Self::Timeout(_) => ErrorKind::Timeout,
            Self::Http(HttpError::Request(e)) if e.is_timeout() => ErrorKind::Timeout,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AccessDenied(_) => ErrorKind::AccessDenied,
            Self::Blocked(_) => ErrorKind::UpstreamBlocked,
            Self::NotConfigured(_) | Self::StrategyNotAvailable(_) => ErrorKind::ConfigError,
            Self::Http(_)
            | Self::NoVideoFound(_)
            | Self::NotApplicable(_)
            | Self::InvalidResponse(_)
            | Self::Json(_)
            | Self::AllStrategiesFailed => ErrorKind::NoVideoFound,
        }
    }

    /// Ordering key used to pick the error reported to the caller.
    ///
    /// Within one [`ErrorKind`], a strategy that merely did not apply ranks
    /// below one that inspected the content and came back empty.
    pub fn precedence(&self) -> (u8, u8) {
        let weak = matches!(self, Self::NotApplicable(_) | Self::AllStrategiesFailed);
        (self.kind().specificity(), u8::from(!weak))
    }

    /// Builds the error for an elapsed per-strategy deadline.
    pub fn timed_out(after: Duration) -> Self {
        Self::Timeout(after.as_secs())
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection-level failure outside of reqwest (fixtures, proxies).
    #[error("Network error: {0}")]
    Network(String),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value could not be encoded.
    #[error("Invalid header {name}: {reason}")]
    InvalidHeader {
        /// Header name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(ExtractError::Timeout(8).kind(), ErrorKind::Timeout);
        assert_eq!(
            ExtractError::Http(HttpError::Timeout(Duration::from_secs(3))).kind(),
            ErrorKind::Timeout
        );
        assert_eq!(
            ExtractError::Blocked("login".into()).kind(),
            ErrorKind::UpstreamBlocked
        );
        assert_eq!(
            ExtractError::NotApplicable("html".into()).kind(),
            ErrorKind::NoVideoFound
        );
        assert_eq!(
            ExtractError::NotConfigured("key".into()).kind(),
            ErrorKind::ConfigError
        );
        assert_eq!(
            ExtractError::Http(HttpError::Network("reset".into())).kind(),
            ErrorKind::NoVideoFound
        );
    }

    #[test]
    fn test_not_applicable_ranks_below_no_video() {
        let skipped = ExtractError::NotApplicable("html".into());
        let empty = ExtractError::NoVideoFound("nothing matched".into());
        assert!(empty.precedence() > skipped.precedence());
        assert!(ExtractError::NotFound("gone".into()).precedence() > empty.precedence());
    }
}
