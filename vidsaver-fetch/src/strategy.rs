//! Extraction strategy trait and types.
//!
//! A strategy is one way of locating the video behind a post URL. Each
//! platform has an ordered list of strategies that the pipeline tries until
//! one of them produces a candidate.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vidsaver_core::{ExtractionRequest, MediaCandidate, Platform, url::clean_url};

use crate::context::ExtractContext;
use crate::error::ExtractError;

// ============================================================================
// Strategy Kind
// ============================================================================

/// The kind of source a strategy reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Structured JSON endpoint of the post.
    JsonEndpoint,
    /// Lightweight embed page.
    EmbedPage,
    /// Full HTML post page.
    HtmlPage,
    /// Third-party API.
    ExternalApi,
}

impl StrategyKind {
    /// Returns the display name for this kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::JsonEndpoint => "JSON Endpoint",
            Self::EmbedPage => "Embed Page",
            Self::HtmlPage => "HTML Page",
            Self::ExternalApi => "External API",
        }
    }

    /// Default priority (higher runs first).
    pub fn default_priority(&self) -> u32 {
        match self {
            Self::JsonEndpoint => 100,
            Self::EmbedPage => 80,
            Self::HtmlPage => 60,
            Self::ExternalApi => 40,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Extract Target
// ============================================================================

/// What a strategy works on: the caller's URL in raw and cleaned form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractTarget {
    /// URL exactly as supplied by the caller.
    pub raw_url: String,
    /// `origin + path` of the raw URL.
    pub cleaned_url: String,
    /// Platform the URL was routed to.
    pub platform: Platform,
}

impl ExtractTarget {
    /// Creates a target, cleaning the URL.
    pub fn new(raw_url: impl Into<String>, platform: Platform) -> Self {
        let raw_url = raw_url.into();
        let cleaned_url = clean_url(&raw_url);
        Self {
            raw_url,
            cleaned_url,
            platform,
        }
    }
}

impl From<&ExtractionRequest> for ExtractTarget {
    fn from(request: &ExtractionRequest) -> Self {
        Self::new(request.raw_url.clone(), request.platform)
    }
}

// ============================================================================
// Extracted Media
// ============================================================================

/// A successful strategy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMedia {
    /// The located media.
    pub candidate: MediaCandidate,
    /// The strategy that found it.
    pub strategy_id: String,
    /// The kind of that strategy.
    pub kind: StrategyKind,
}

impl ExtractedMedia {
    /// Creates a new extracted media record.
    pub fn new(candidate: MediaCandidate, strategy_id: impl Into<String>, kind: StrategyKind) -> Self {
        Self {
            candidate,
            strategy_id: strategy_id.into(),
            kind,
        }
    }
}

// ============================================================================
// Extract Strategy Trait
// ============================================================================

/// A way of locating the video behind a post URL.
///
/// ## Implementing a Strategy
///
/// ```ignore
/// struct EmbedStrategy;
///
/// #[async_trait]
/// impl ExtractStrategy for EmbedStrategy {
///     fn id(&self) -> &str {
///         "instagram.embed"
///     }
///
///     fn kind(&self) -> StrategyKind {
///         StrategyKind::EmbedPage
///     }
///
///     async fn extract(
///         &self,
///         ctx: &ExtractContext,
///         target: &ExtractTarget,
///     ) -> Result<MediaCandidate, ExtractError> {
///         let page = ctx.http.fetch(&ctx.request(&target.cleaned_url, self.kind())).await?;
///         // Search the body and return a candidate
///     }
/// }
/// ```
#[async_trait]
pub trait ExtractStrategy: Send + Sync {
    /// Unique identifier, formatted `{platform}.{method}`.
    fn id(&self) -> &str;

    /// The kind of source this strategy reads.
    fn kind(&self) -> StrategyKind;

    /// Human-readable name for this strategy.
    fn display_name(&self) -> String {
        format!("{} ({})", self.id(), self.kind().display_name())
    }

    /// Locates the media for `target`.
    async fn extract(
        &self,
        ctx: &ExtractContext,
        target: &ExtractTarget,
    ) -> Result<MediaCandidate, ExtractError>;

    /// Priority of this strategy (higher = try first).
    fn priority(&self) -> u32 {
        self.kind().default_priority()
    }

    /// Time budget for one run of this strategy.
    fn timeout(&self, ctx: &ExtractContext) -> Duration {
        ctx.settings.timeout_for(self.kind())
    }
}

// ============================================================================
// Strategy Info
// ============================================================================

/// Information about a strategy (for reporting).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyInfo {
    /// Strategy ID.
    pub id: String,
    /// Strategy kind.
    pub kind: StrategyKind,
    /// Priority.
    pub priority: u32,
    /// Time budget in seconds.
    pub timeout_secs: u64,
}

impl StrategyInfo {
    /// Creates strategy info from a strategy implementation.
    pub fn from_strategy(strategy: &dyn ExtractStrategy, ctx: &ExtractContext) -> Self {
        Self {
            id: strategy.id().to_string(),
            kind: strategy.kind(),
            priority: strategy.priority(),
            timeout_secs: strategy.timeout(ctx).as_secs(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(StrategyKind::JsonEndpoint.display_name(), "JSON Endpoint");
        assert_eq!(StrategyKind::ExternalApi.to_string(), "External API");
    }

    #[test]
    fn test_kind_priorities_descend() {
        assert!(
            StrategyKind::JsonEndpoint.default_priority()
                > StrategyKind::EmbedPage.default_priority()
        );
        assert!(
            StrategyKind::EmbedPage.default_priority() > StrategyKind::HtmlPage.default_priority()
        );
    }

    #[test]
    fn test_target_keeps_raw_and_cleaned() {
        let request = ExtractionRequest::new(
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10",
            Platform::YouTube,
        );
        let target = ExtractTarget::from(&request);
        assert_eq!(target.raw_url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10");
        assert_eq!(target.cleaned_url, "https://www.youtube.com/watch");
        assert_eq!(target.platform, Platform::YouTube);
    }
}
