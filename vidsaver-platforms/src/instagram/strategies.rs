//! Instagram extraction strategies.

use async_trait::async_trait;
use tracing::{debug, instrument};
use vidsaver_core::MediaCandidate;
use vidsaver_core::url::ensure_trailing_slash;
use vidsaver_fetch::{ExtractContext, ExtractError, ExtractStrategy, ExtractTarget, StrategyKind};

use super::page::{extract_from_embed, extract_from_page};
use super::parser::parse_post_json;
use crate::response::{
    check_status, is_login_wall, log_unmatched_body, navigation_headers, no_match,
};

const REFERER: &str = "https://www.instagram.com/";

/// Public web app id sent by instagram.com itself.
const IG_APP_ID: &str = "936619743392459";

// ============================================================================
// Structured Endpoint
// ============================================================================

/// Probes the post's structured JSON endpoint (`?__a=1&__d=dis`).
pub struct InstagramJsonStrategy;

impl InstagramJsonStrategy {
    /// Creates a new JSON endpoint strategy.
    pub fn new() -> Self {
        Self
    }

    /// The probed URL.
    pub fn endpoint(target: &ExtractTarget) -> String {
        format!("{}?__a=1&__d=dis", target.cleaned_url)
    }
}

impl Default for InstagramJsonStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExtractStrategy for InstagramJsonStrategy {
    fn id(&self) -> &str {
        "instagram.json"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::JsonEndpoint
    }

    #[instrument(skip(self, ctx, target), fields(url = %target.cleaned_url))]
    async fn extract(
        &self,
        ctx: &ExtractContext,
        target: &ExtractTarget,
    ) -> Result<MediaCandidate, ExtractError> {
        let request = ctx
            .request(Self::endpoint(target), self.kind())
            .headers([
                ("Accept", "application/json, text/plain, */*"),
                ("Accept-Language", "en-US,en;q=0.9"),
                ("Referer", REFERER),
                ("X-IG-App-ID", IG_APP_ID),
                ("X-Requested-With", "XMLHttpRequest"),
                ("Sec-Fetch-Dest", "empty"),
                ("Sec-Fetch-Mode", "cors"),
                ("Sec-Fetch-Site", "same-origin"),
            ]);
        let page = ctx.http.fetch(&request).await?;

        // An HTML answer means the endpoint refused to serve JSON.
        if page.looks_like_html() || is_login_wall(&page.body) {
            debug!(status = page.status, "JSON endpoint answered with HTML");
            return Err(ExtractError::NotApplicable(
                "JSON endpoint returned HTML".to_string(),
            ));
        }
        check_status(&request, &page)?;

        parse_post_json(&page.body)
    }
}

// ============================================================================
// Embed Page
// ============================================================================

/// Reads `video_url` from the lightweight embed page.
pub struct InstagramEmbedStrategy;

impl InstagramEmbedStrategy {
    /// Creates a new embed page strategy.
    pub fn new() -> Self {
        Self
    }

    /// The embed page URL.
    pub fn endpoint(target: &ExtractTarget) -> String {
        format!("{}embed/captioned/", ensure_trailing_slash(&target.cleaned_url))
    }
}

impl Default for InstagramEmbedStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExtractStrategy for InstagramEmbedStrategy {
    fn id(&self) -> &str {
        "instagram.embed"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::EmbedPage
    }

    #[instrument(skip(self, ctx, target), fields(url = %target.cleaned_url))]
    async fn extract(
        &self,
        ctx: &ExtractContext,
        target: &ExtractTarget,
    ) -> Result<MediaCandidate, ExtractError> {
        let request = navigation_headers(ctx.request(Self::endpoint(target), self.kind()), REFERER);
        let page = ctx.http.fetch(&request).await?;
        check_status(&request, &page)?;

        extract_from_embed(&page.body).ok_or_else(|| {
            log_unmatched_body(ctx, self.id(), &page);
            no_match(&page, "embed page has no video_url")
        })
    }
}

// ============================================================================
// Full Page
// ============================================================================

/// Scans the full post page with every known pattern.
pub struct InstagramPageStrategy;

impl InstagramPageStrategy {
    /// Creates a new full page strategy.
    pub fn new() -> Self {
        Self
    }
}

impl Default for InstagramPageStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExtractStrategy for InstagramPageStrategy {
    fn id(&self) -> &str {
        "instagram.page"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::HtmlPage
    }

    #[instrument(skip(self, ctx, target), fields(url = %target.cleaned_url))]
    async fn extract(
        &self,
        ctx: &ExtractContext,
        target: &ExtractTarget,
    ) -> Result<MediaCandidate, ExtractError> {
        let request = navigation_headers(ctx.request(&target.cleaned_url, self.kind()), REFERER);
        let page = ctx.http.fetch(&request).await?;
        check_status(&request, &page)?;

        match extract_from_page(&page.body) {
            Some(found) => {
                debug!(pattern = found.pattern, "Page pattern matched");
                Ok(found.candidate)
            }
            None => {
                log_unmatched_body(ctx, self.id(), &page);
                Err(no_match(&page, "no video pattern matched"))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vidsaver_core::Platform;

    fn target(url: &str) -> ExtractTarget {
        ExtractTarget::new(url, Platform::Instagram)
    }

    #[test]
    fn test_strategy_ids_and_order() {
        let json = InstagramJsonStrategy::new();
        let embed = InstagramEmbedStrategy::new();
        let page = InstagramPageStrategy::new();
        assert_eq!(json.id(), "instagram.json");
        assert!(json.priority() > embed.priority());
        assert!(embed.priority() > page.priority());
    }

    #[test]
    fn test_endpoints_use_cleaned_url() {
        let t = target("https://www.instagram.com/reel/Cabc/?igsh=xyz");
        assert_eq!(
            InstagramJsonStrategy::endpoint(&t),
            "https://www.instagram.com/reel/Cabc/?__a=1&__d=dis"
        );
        assert_eq!(
            InstagramEmbedStrategy::endpoint(&t),
            "https://www.instagram.com/reel/Cabc/embed/captioned/"
        );

        let t = target("https://www.instagram.com/p/Cabc");
        assert_eq!(
            InstagramEmbedStrategy::endpoint(&t),
            "https://www.instagram.com/p/Cabc/embed/captioned/"
        );
    }
}
