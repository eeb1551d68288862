//! YouTube extraction strategy.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};
use vidsaver_core::MediaCandidate;
use vidsaver_fetch::{ExtractContext, ExtractError, ExtractStrategy, ExtractTarget, StrategyKind};

use super::api::{RapidApiClient, VideoDetailsApi};
use super::video_id::parse_video_id;

/// Resolves a YouTube URL through the video details API.
pub struct YouTubeApiStrategy {
    api: Arc<dyn VideoDetailsApi>,
}

impl YouTubeApiStrategy {
    /// Creates a strategy backed by [`RapidApiClient`].
    pub fn new() -> Self {
        Self::with_api(Arc::new(RapidApiClient::new()))
    }

    /// Creates a strategy backed by a custom details API.
    pub fn with_api(api: Arc<dyn VideoDetailsApi>) -> Self {
        Self { api }
    }
}

impl Default for YouTubeApiStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExtractStrategy for YouTubeApiStrategy {
    fn id(&self) -> &str {
        "youtube.api"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::ExternalApi
    }

    #[instrument(skip(self, ctx, target), fields(url = %target.raw_url))]
    async fn extract(
        &self,
        ctx: &ExtractContext,
        target: &ExtractTarget,
    ) -> Result<MediaCandidate, ExtractError> {
        let video_id = parse_video_id(&target.raw_url).ok_or_else(|| {
            ExtractError::NotFound("Could not extract YouTube video ID from URL".to_string())
        })?;
        debug!(video_id = %video_id, "Looking up video details");

        let raw = self.api.lookup(ctx, &video_id).await?;
        if raw.videos().is_empty() {
            debug!(video_id = %video_id, "API returned no videos");
        }
        raw.to_candidate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::error::VideoApiError;
    use crate::youtube::parser::RawApiResponse;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use vidsaver_core::Platform;

    /// Counts lookups and replays a fixed body.
    struct StubApi {
        body: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl VideoDetailsApi for StubApi {
        async fn lookup(
            &self,
            _ctx: &ExtractContext,
            _video_id: &str,
        ) -> Result<RawApiResponse, VideoApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            serde_json::from_str(self.body).map_err(|e| VideoApiError::Upstream(e.to_string()))
        }
    }

    fn stub(body: &'static str) -> Arc<StubApi> {
        Arc::new(StubApi {
            body,
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_no_id_fails_before_lookup() {
        let api = stub("{}");
        let strategy = YouTubeApiStrategy::with_api(api.clone());
        let target = ExtractTarget::new("https://www.youtube.com/@channel", Platform::YouTube);

        let err = strategy
            .extract(&ExtractContext::new(), &target)
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::NotFound(_)));
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_watch_url_uses_raw_query() {
        let api = stub(r#"{"videos":[{"url":"https://r1.googlevideo.com/v","extension":"mp4","hasAudio":true}]}"#);
        let strategy = YouTubeApiStrategy::with_api(api.clone());
        let target = ExtractTarget::new(
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            Platform::YouTube,
        );

        let candidate = strategy
            .extract(&ExtractContext::new(), &target)
            .await
            .unwrap();
        assert_eq!(candidate.url, "https://r1.googlevideo.com/v");
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }
}
