//! Video details API.
//!
//! YouTube URLs are resolved through a third-party details service rather
//! than scraped. [`VideoDetailsApi`] is the seam; [`RapidApiClient`] is the
//! default implementation and sends its request through the context's
//! [`PageFetcher`](vidsaver_fetch::PageFetcher), so fixtures cover it too.

use async_trait::async_trait;
use tracing::{debug, instrument};
use vidsaver_fetch::{ExtractContext, StrategyKind};

use super::error::VideoApiError;
use super::parser::RawApiResponse;

/// Path of the details endpoint.
const DETAILS_PATH: &str = "/v2/video/details";

// ============================================================================
// Trait
// ============================================================================

/// Looks up the downloadable streams for a video id.
#[async_trait]
pub trait VideoDetailsApi: Send + Sync {
    /// Fetches the details for `video_id`.
    ///
    /// # Errors
    ///
    /// - `NotConfigured` without a usable key
    /// - `NotFound` when the service reports the video unavailable
    /// - `Upstream` for any other unusable answer
    async fn lookup(
        &self,
        ctx: &ExtractContext,
        video_id: &str,
    ) -> Result<RawApiResponse, VideoApiError>;
}

// ============================================================================
// RapidAPI Client
// ============================================================================

/// Client for the RapidAPI YouTube media downloader.
#[derive(Debug, Clone, Default)]
pub struct RapidApiClient {
    base_url: Option<String>,
}

impl RapidApiClient {
    /// Creates a client that talks to `https://<rapidapi_host>`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client with a fixed base URL (mock servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into().trim_end_matches('/').to_string()),
        }
    }

    /// Full details URL for a video.
    pub fn endpoint(&self, host: &str, video_id: &str) -> String {
        let base = self
            .base_url
            .clone()
            .unwrap_or_else(|| format!("https://{host}"));
        format!("{base}{DETAILS_PATH}?videoId={video_id}")
    }
}

#[async_trait]
impl VideoDetailsApi for RapidApiClient {
    #[instrument(skip(self, ctx))]
    async fn lookup(
        &self,
        ctx: &ExtractContext,
        video_id: &str,
    ) -> Result<RawApiResponse, VideoApiError> {
        let key = ctx
            .settings
            .api_key()
            .ok_or_else(|| VideoApiError::NotConfigured("RAPIDAPI_KEY is not set".to_string()))?;
        let host = ctx.settings.rapidapi_host.as_str();

        let request = ctx
            .request(self.endpoint(host, video_id), StrategyKind::ExternalApi)
            .header("Accept", "application/json")
            .header("x-rapidapi-key", key)
            .header("x-rapidapi-host", host);

        let page = ctx.http.fetch(&request).await?;
        debug!(status = page.status, "Video details response");

        match page.status {
            s if (200..300).contains(&s) => {}
            401 | 403 => {
                return Err(VideoApiError::NotConfigured(format!(
                    "API key rejected (HTTP {})",
                    page.status
                )));
            }
            404 => return Err(VideoApiError::NotFound(video_id.to_string())),
            s => return Err(VideoApiError::Upstream(format!("HTTP {s}"))),
        }

        let raw: RawApiResponse = serde_json::from_str(&page.body)
            .map_err(|e| VideoApiError::Upstream(format!("Invalid API response: {e}")))?;

        if raw.is_unavailable() {
            let reason = raw.error_id.as_deref().unwrap_or(video_id);
            return Err(VideoApiError::NotFound(reason.to_string()));
        }
        Ok(raw)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vidsaver_fetch::{ExtractSettings, FixtureFetcher};

    const URL: &str =
        "https://youtube-media-downloader.p.rapidapi.com/v2/video/details?videoId=abc123";

    fn fixture_context(
        fixture: FixtureFetcher,
        key: Option<&str>,
    ) -> (ExtractContext, Arc<FixtureFetcher>) {
        let fixture = Arc::new(fixture);
        let mut settings = ExtractSettings::default();
        if let Some(key) = key {
            settings = settings.with_rapidapi_key(key);
        }
        let ctx = ExtractContext::builder()
            .http(fixture.clone())
            .settings(settings)
            .build();
        (ctx, fixture)
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            RapidApiClient::new().endpoint("youtube-media-downloader.p.rapidapi.com", "abc123"),
            URL
        );
        assert_eq!(
            RapidApiClient::with_base_url("http://127.0.0.1:9000/").endpoint("ignored", "x"),
            "http://127.0.0.1:9000/v2/video/details?videoId=x"
        );
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let (ctx, fixture) = fixture_context(FixtureFetcher::new(), Some("   "));
        let err = RapidApiClient::new().lookup(&ctx, "abc123").await.unwrap_err();
        assert!(matches!(err, VideoApiError::NotConfigured(_)));
        assert_eq!(fixture.request_count(), 0);
    }

    #[tokio::test]
    async fn test_sends_rapidapi_headers() {
        let (ctx, fixture) = fixture_context(
            FixtureFetcher::new().with_json(URL, r#"{"status":true,"videos":[]}"#),
            Some("secret"),
        );
        let raw = RapidApiClient::new().lookup(&ctx, "abc123").await.unwrap();
        assert!(raw.videos().is_empty());

        let sent = &fixture.requests()[0];
        assert_eq!(sent.header_value("x-rapidapi-key"), Some("secret"));
        assert_eq!(
            sent.header_value("x-rapidapi-host"),
            Some("youtube-media-downloader.p.rapidapi.com")
        );
    }

    #[tokio::test]
    async fn test_status_false_is_not_found() {
        let (ctx, _) = fixture_context(
            FixtureFetcher::new().with_json(URL, r#"{"status":false,"errorId":"VideoNotFound"}"#),
            Some("secret"),
        );
        let err = RapidApiClient::new().lookup(&ctx, "abc123").await.unwrap_err();
        assert!(matches!(err, VideoApiError::NotFound(ref id) if id == "VideoNotFound"));
    }

    #[tokio::test]
    async fn test_http_failures() {
        let (ctx, _) = fixture_context(
            FixtureFetcher::new().with_body(URL, 403, "application/json", "{}"),
            Some("bad"),
        );
        let err = RapidApiClient::new().lookup(&ctx, "abc123").await.unwrap_err();
        assert!(matches!(err, VideoApiError::NotConfigured(_)));

        let (ctx, _) = fixture_context(
            FixtureFetcher::new().with_body(URL, 502, "text/html", "<html>bad gateway</html>"),
            Some("secret"),
        );
        let err = RapidApiClient::new().lookup(&ctx, "abc123").await.unwrap_err();
        assert!(matches!(err, VideoApiError::Upstream(_)));

        let (ctx, _) = fixture_context(
            FixtureFetcher::new().with_json(URL, "not json"),
            Some("secret"),
        );
        let err = RapidApiClient::new().lookup(&ctx, "abc123").await.unwrap_err();
        assert!(matches!(err, VideoApiError::Upstream(_)));
    }
}
