//! Entry point: from a post URL to an [`ExtractionResult`].

use tracing::{info, instrument, warn};
use vidsaver_core::{ErrorKind, ExtractionRequest, ExtractionResult};
use vidsaver_fetch::{ExtractContext, ExtractError, ExtractOutcome, ExtractTarget};

use crate::registry::PlatformRegistry;

/// Routes requests to their platform pipeline and shapes the result.
///
/// Holds no mutable state; one extractor can serve concurrent requests.
#[derive(Debug)]
pub struct VideoExtractor {
    ctx: ExtractContext,
}

impl VideoExtractor {
    /// Creates an extractor over the given context.
    pub fn new(ctx: ExtractContext) -> Self {
        Self { ctx }
    }

    /// The context strategies run with.
    pub fn context(&self) -> &ExtractContext {
        &self.ctx
    }

    /// Extracts the video behind `raw_url`, detecting the platform from its host.
    ///
    /// URLs no platform serves yield a `NotFound` error result.
    pub async fn extract(&self, raw_url: &str) -> ExtractionResult {
        match ExtractionRequest::detect(raw_url) {
            Ok(request) => self.extract_request(&request).await,
            Err(err) => {
                warn!(url = raw_url, error = %err, "Unsupported URL");
                ExtractionResult::failure(
                    ErrorKind::NotFound,
                    "Unsupported URL. Use an Instagram, Facebook or YouTube link.",
                )
            }
        }
    }

    /// Extracts the video for a request with an explicit platform.
    pub async fn extract_request(&self, request: &ExtractionRequest) -> ExtractionResult {
        self.extract_detailed(request).await.extraction_result()
    }

    /// Runs the platform pipeline and returns the full outcome, attempts included.
    #[instrument(skip(self, request), fields(platform = %request.platform, url = %request.raw_url))]
    pub async fn extract_detailed(&self, request: &ExtractionRequest) -> ExtractOutcome {
        let target = ExtractTarget::from(request);
        let Some(descriptor) = PlatformRegistry::get(request.platform) else {
            return ExtractOutcome {
                result: Err(ExtractError::StrategyNotAvailable(format!(
                    "no descriptor for {}",
                    request.platform
                ))),
                attempts: Vec::new(),
                duration: std::time::Duration::ZERO,
            };
        };

        let pipeline = descriptor.build_pipeline(&self.ctx);
        let outcome = pipeline.execute(&self.ctx, &target).await;
        info!(
            success = outcome.is_success(),
            attempts = outcome.attempts_count(),
            duration = ?outcome.duration,
            "Extraction finished"
        );
        outcome
    }
}

impl Default for VideoExtractor {
    fn default() -> Self {
        Self::new(ExtractContext::new())
    }
}
