//! Facebook extraction strategy.

use async_trait::async_trait;
use tracing::{debug, instrument};
use url::Url;
use vidsaver_core::MediaCandidate;
use vidsaver_fetch::{ExtractContext, ExtractError, ExtractStrategy, ExtractTarget, StrategyKind};

use super::parser::extract_video;
use crate::response::{check_status, log_unmatched_body, navigation_headers, no_match};

const REFERER: &str = "https://www.facebook.com/";

/// Scans the video page for player sources and Open Graph tags.
pub struct FacebookPageStrategy;

impl FacebookPageStrategy {
    /// Creates a new page strategy.
    pub fn new() -> Self {
        Self
    }

    /// The page URL to fetch.
    ///
    /// `/watch/?v=<id>` keeps its `v` parameter: the cleaned path alone does
    /// not identify the video.
    pub fn page_url(target: &ExtractTarget) -> String {
        let video_param = Url::parse(target.raw_url.trim()).ok().and_then(|u| {
            u.query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned())
        });
        match (video_param, Url::parse(&target.cleaned_url)) {
            (Some(v), Ok(mut url)) if !v.is_empty() => {
                url.query_pairs_mut().append_pair("v", &v);
                url.to_string()
            }
            _ => target.cleaned_url.clone(),
        }
    }
}

impl Default for FacebookPageStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExtractStrategy for FacebookPageStrategy {
    fn id(&self) -> &str {
        "facebook.page"
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
        let request = navigation_headers(ctx.request(Self::page_url(target), self.kind()), REFERER);
        let page = ctx.http.fetch(&request).await?;
        check_status(&request, &page)?;

        if let Some((pattern, candidate)) = extract_video(&page.body) {
            debug!(pattern, "Page pattern matched");
            return Ok(candidate);
        }
        log_unmatched_body(ctx, self.id(), &page);
        Err(no_match(&page, "no video source on page"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidsaver_core::Platform;

    #[test]
    fn test_page_url_keeps_video_param() {
        let t = ExtractTarget::new(
            "https://www.facebook.com/watch/?v=1234567890&ref=sharing",
            Platform::Facebook,
        );
        assert_eq!(
            FacebookPageStrategy::page_url(&t),
            "https://www.facebook.com/watch/?v=1234567890"
        );

        let t = ExtractTarget::new(
            "https://www.facebook.com/user/videos/987/?mibextid=abc",
            Platform::Facebook,
        );
        assert_eq!(
            FacebookPageStrategy::page_url(&t),
            "https://www.facebook.com/user/videos/987/"
        );
    }

    #[test]
    fn test_page_url_encodes_video_param() {
        let t = ExtractTarget::new(
            "https://www.facebook.com/watch/?v=12%2634%2356&ref=sharing",
            Platform::Facebook,
        );
        let url = FacebookPageStrategy::page_url(&t);
        assert_eq!(url, "https://www.facebook.com/watch/?v=12%2634%2356");

        let parsed = Url::parse(&url).unwrap();
        let pairs: Vec<_> = parsed.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("v".to_string(), "12&34#56".to_string())]);
        assert!(parsed.fragment().is_none());
    }
}
