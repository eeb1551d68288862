//! Extraction context providing access to host APIs.
//!
//! The context is passed to every strategy. It carries the page fetcher,
//! the identity pool and the per-kind timeouts, all injectable so that a
//! whole pipeline can run against fixtures.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::host::http::{HttpClient, PageFetcher, PageRequest};
use crate::host::identity::IdentityPool;
use crate::strategy::StrategyKind;

/// Default RapidAPI host for the YouTube video details service.
pub const DEFAULT_RAPIDAPI_HOST: &str = "youtube-media-downloader.p.rapidapi.com";

// ============================================================================
// Extract Settings
// ============================================================================

/// Settings for extraction.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtractSettings {
    /// Budget for the structured JSON probe.
    pub json_probe_timeout: Duration,
    /// Budget for the embed page probe.
    pub embed_timeout: Duration,
    /// Budget for the full HTML page.
    pub page_timeout: Duration,
    /// Budget for the external video details API.
    pub api_timeout: Duration,
    /// RapidAPI key; YouTube extraction is unavailable without it.
    pub rapidapi_key: Option<String>,
    /// RapidAPI host header and base host.
    pub rapidapi_host: String,
    /// Log the head of unmatched page bodies at debug level.
    pub debug_log_body: bool,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            json_probe_timeout: Duration::from_secs(8),
            embed_timeout: Duration::from_secs(10),
            page_timeout: Duration::from_secs(30),
            api_timeout: Duration::from_secs(30),
            rapidapi_key: None,
            rapidapi_host: DEFAULT_RAPIDAPI_HOST.to_string(),
            debug_log_body: false,
        }
    }
}

impl ExtractSettings {
    /// Timeout for a strategy of the given kind.
    pub fn timeout_for(&self, kind: StrategyKind) -> Duration {
        match kind {
            StrategyKind::JsonEndpoint => self.json_probe_timeout,
            StrategyKind::EmbedPage => self.embed_timeout,
            StrategyKind::HtmlPage => self.page_timeout,
            StrategyKind::ExternalApi => self.api_timeout,
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_rapidapi_key(mut self, key: impl Into<String>) -> Self {
        self.rapidapi_key = Some(key.into());
        self
    }

    /// Enables body logging for failed page strategies.
    #[must_use]
    pub fn with_debug_body(mut self) -> Self {
        self.debug_log_body = true;
        self
    }

    /// Returns the API key if one is configured and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.rapidapi_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

impl std::fmt::Debug for ExtractSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractSettings")
            .field("json_probe_timeout", &self.json_probe_timeout)
            .field("embed_timeout", &self.embed_timeout)
            .field("page_timeout", &self.page_timeout)
            .field("api_timeout", &self.api_timeout)
            .field("rapidapi_key", &self.rapidapi_key.as_ref().map(|_| "<redacted>"))
            .field("rapidapi_host", &self.rapidapi_host)
            .field("debug_log_body", &self.debug_log_body)
            .finish()
    }
}

// ============================================================================
// Extract Context
// ============================================================================

/// Context provided to extraction strategies.
pub struct ExtractContext {
    /// Transport for all outbound requests.
    pub http: Arc<dyn PageFetcher>,
    /// User agents to rotate through.
    pub identities: Arc<IdentityPool>,
    /// Extraction settings.
    pub settings: ExtractSettings,
}

impl ExtractContext {
    /// Creates a context backed by a real HTTP client and the built-in identities.
    pub fn new() -> Self {
        Self::with_settings(ExtractSettings::default())
    }

    /// Creates a context with custom settings.
    pub fn with_settings(settings: ExtractSettings) -> Self {
        Self::builder().settings(settings).build()
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> ExtractContextBuilder {
        ExtractContextBuilder::new()
    }

    /// Builds a GET request for `url` with a rotated user agent and the
    /// timeout of the given strategy kind.
    pub fn request(&self, url: impl Into<String>, kind: StrategyKind) -> PageRequest {
        PageRequest::new(url, self.settings.timeout_for(kind))
            .header("User-Agent", self.identities.pick())
    }
}

impl Default for ExtractContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExtractContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractContext")
            .field("identities", &self.identities.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Extract Context Builder
// ============================================================================

/// Builder for constructing an `ExtractContext`.
#[derive(Default)]
pub struct ExtractContextBuilder {
    http: Option<Arc<dyn PageFetcher>>,
    identities: Option<Arc<IdentityPool>>,
    settings: ExtractSettings,
}

impl ExtractContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page fetcher.
    #[must_use]
    pub fn http(mut self, http: Arc<dyn PageFetcher>) -> Self {
        self.http = Some(http);
        self
    }

    /// Sets the identity pool.
    #[must_use]
    pub fn identities(mut self, identities: Arc<IdentityPool>) -> Self {
        self.identities = Some(identities);
        self
    }

    /// Sets the extraction settings.
    #[must_use]
    pub fn settings(mut self, settings: ExtractSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builds the context, filling unset host APIs with defaults.
    pub fn build(self) -> ExtractContext {
        if self.settings.debug_log_body {
            warn!(
                "Body logging enabled - page contents will appear in debug logs. \
                DO NOT USE IN PRODUCTION."
            );
        }

        ExtractContext {
            http: self.http.unwrap_or_else(|| Arc::new(HttpClient::new())),
            identities: self.identities.unwrap_or_default(),
            settings: self.settings,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fixture::FixtureFetcher;

    #[test]
    fn test_default_timeouts() {
        let settings = ExtractSettings::default();
        assert_eq!(settings.timeout_for(StrategyKind::JsonEndpoint), Duration::from_secs(8));
        assert_eq!(settings.timeout_for(StrategyKind::EmbedPage), Duration::from_secs(10));
        assert_eq!(settings.timeout_for(StrategyKind::HtmlPage), Duration::from_secs(30));
        assert_eq!(settings.timeout_for(StrategyKind::ExternalApi), Duration::from_secs(30));
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        assert_eq!(ExtractSettings::default().api_key(), None);
        assert_eq!(ExtractSettings::default().with_rapidapi_key("  ").api_key(), None);
        assert_eq!(
            ExtractSettings::default().with_rapidapi_key("k1").api_key(),
            Some("k1")
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let settings = ExtractSettings::default().with_rapidapi_key("secret-key");
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_request_uses_pool_and_kind_timeout() {
        let ctx = ExtractContext::builder()
            .http(Arc::new(FixtureFetcher::new()))
            .identities(Arc::new(IdentityPool::fixed("FixedUA/1.0")))
            .build();

        let req = ctx.request("https://www.instagram.com/p/x/", StrategyKind::EmbedPage);
        assert_eq!(req.user_agent(), Some("FixedUA/1.0"));
        assert_eq!(req.timeout, Duration::from_secs(10));
    }
}
