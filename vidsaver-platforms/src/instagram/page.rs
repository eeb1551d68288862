//! Instagram HTML pattern extraction.
//!
//! Pure functions over embed and post page bodies.

use serde_json::Value;
use vidsaver_core::{MediaCandidate, QualityTier, Resolution};

use super::parser::{PostPayload, best_of_versions};
use crate::patterns::{
    OG_VIDEO_TAGS, TWITTER_STREAM_TAG, cdn_mp4_url, cdn_video_path_url, json_arrays_after,
    json_object_after, ld_json_blocks, meta_content, quoted_field, quoted_field_on_cdn,
};

/// Script markers preceding embedded post JSON.
const SHARED_DATA_MARKERS: &[&str] = &["window._sharedData", "__additionalDataLoaded("];

/// A page match and the pattern that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMatch {
    /// Pattern name, for logs.
    pub pattern: &'static str,
    /// The located media.
    pub candidate: MediaCandidate,
}

impl PageMatch {
    fn standard(pattern: &'static str, url: String) -> Self {
        Self {
            pattern,
            candidate: MediaCandidate::new(url).with_tier(QualityTier::Standard),
        }
    }
}

/// Finds the `video_url` field of an embed page.
pub fn extract_from_embed(body: &str) -> Option<MediaCandidate> {
    quoted_field(body, "video_url").map(|url| MediaCandidate::new(url).with_tier(QualityTier::Standard))
}

/// Runs the post page patterns in order; the first hit wins.
pub fn extract_from_page(body: &str) -> Option<PageMatch> {
    if let Some(url) = meta_content(body, OG_VIDEO_TAGS) {
        return Some(PageMatch::standard("og:video", url));
    }
    if let Some(url) = meta_content(body, &[TWITTER_STREAM_TAG]) {
        return Some(PageMatch::standard(TWITTER_STREAM_TAG, url));
    }
    if let Some(url) = quoted_field_on_cdn(body, "video_url") {
        return Some(PageMatch::standard("video_url", url));
    }
    if let Some(url) = quoted_field_on_cdn(body, "playback_url") {
        return Some(PageMatch::standard("playback_url", url));
    }
    if let Some(url) = cdn_mp4_url(body) {
        return Some(PageMatch::standard("mp4 scan", url));
    }
    if let Some(url) = cdn_video_path_url(body) {
        return Some(PageMatch::standard("cdn scan", url));
    }
    if let Some(candidate) = json_arrays_after(body, "video_versions")
        .into_iter()
        .find_map(best_of_versions)
    {
        return Some(PageMatch {
            pattern: "video_versions",
            candidate,
        });
    }
    if let Some(candidate) = shared_data_candidate(body) {
        return Some(PageMatch {
            pattern: "shared data",
            candidate,
        });
    }
    ld_json_candidate(body).map(|candidate| PageMatch {
        pattern: "ld+json",
        candidate,
    })
}

fn shared_data_candidate(body: &str) -> Option<MediaCandidate> {
    SHARED_DATA_MARKERS
        .iter()
        .filter_map(|marker| json_object_after(body, marker))
        .filter_map(|blob| serde_json::from_str::<Value>(blob).ok())
        .filter_map(|value| PostPayload::from_shared_data(&value))
        .find_map(|payload| payload.to_candidate().ok())
}

/// First `VideoObject` with a `contentUrl` in the page's structured data.
fn ld_json_candidate(body: &str) -> Option<MediaCandidate> {
    ld_json_blocks(body)
        .iter()
        .find_map(find_video_object)
        .and_then(video_object_candidate)
}

/// Depth-first search; the object may be nested under `@graph` or `video`.
fn find_video_object(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(map) => {
            if map.get("@type").and_then(Value::as_str) == Some("VideoObject")
                && map.contains_key("contentUrl")
            {
                return Some(value);
            }
            map.values().find_map(find_video_object)
        }
        Value::Array(items) => items.iter().find_map(find_video_object),
        _ => None,
    }
}

fn video_object_candidate(object: &Value) -> Option<MediaCandidate> {
    let url = object["contentUrl"].as_str().filter(|u| !u.trim().is_empty())?;
    let resolution = match (dimension(&object["width"]), dimension(&object["height"])) {
        (Some(w), Some(h)) if w > 0 && h > 0 => Some(Resolution::new(w, h)),
        _ => None,
    };
    let thumbnail = match &object["thumbnailUrl"] {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(Value::as_str).map(ToString::to_string),
        _ => None,
    };

    Some(
        MediaCandidate::new(url)
            .with_resolution(resolution)
            .with_tier(QualityTier::Standard)
            .with_thumbnail(thumbnail),
    )
}

/// Reads a dimension given as a number or a numeric string.
fn dimension(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_escaped_video_url() {
        let body = r#"<script>{"shortcode_media":{"video_url":"https:\/\/scontent.cdninstagram.com\/v\/e.mp4?a=1&b=2"}}</script>"#;
        let candidate = extract_from_embed(body).unwrap();
        assert_eq!(
            vidsaver_core::url::absolute_media_url(&candidate.url).as_deref(),
            Some("https://scontent.cdninstagram.com/v/e.mp4?a=1&b=2")
        );
        assert!(extract_from_embed("<html>no video</html>").is_none());
    }

    #[test]
    fn test_og_video_wins_over_later_patterns() {
        let body = r#"
            <meta property="og:video" content="https://scontent.cdninstagram.com/v/og.mp4">
            <script>{"video_url":"https://scontent.cdninstagram.com/v/field.mp4"}</script>
        "#;
        let found = extract_from_page(body).unwrap();
        assert_eq!(found.pattern, "og:video");
        assert_eq!(found.candidate.url, "https://scontent.cdninstagram.com/v/og.mp4");
        assert_eq!(found.candidate.quality.as_deref(), Some("standard"));
    }

    #[test]
    fn test_twitter_stream_fallback() {
        let body = r#"<meta name="twitter:player:stream" content="https://scontent.cdninstagram.com/v/t.mp4">"#;
        assert_eq!(extract_from_page(body).unwrap().pattern, TWITTER_STREAM_TAG);
    }

    #[test]
    fn test_decoy_mp4_rejected() {
        let body = r#"<a href="https://ads.example.net/promo.mp4">ad</a>
            <script>{"video_url":"https://ads.example.net/also.mp4"}</script>"#;
        assert!(extract_from_page(body).is_none());
    }

    #[test]
    fn test_playback_url_on_cdn() {
        let body = r#"{"playback_url":"https://scontent.cdninstagram.com/v/p.mp4"}"#;
        assert_eq!(extract_from_page(body).unwrap().pattern, "playback_url");
    }

    #[test]
    fn test_video_versions_array() {
        let body = r#"<script>{"video_versions":[
            {"width":360,"height":640,"url":"https://scontent.cdninstagram.com/o1/low"},
            {"width":720,"height":1280,"url":"https://scontent.cdninstagram.com/o1/high"}
        ]}</script>"#;
        let found = extract_from_page(body).unwrap();
        assert_eq!(found.pattern, "video_versions");
        assert_eq!(found.candidate.url, "https://scontent.cdninstagram.com/o1/high");
        assert_eq!(found.candidate.quality.as_deref(), Some("original"));
    }

    #[test]
    fn test_shared_data_blob() {
        let body = r#"<script>window.__additionalDataLoaded('/p/abc/',{"items":[{"media_type":2,"video_url":"https://media.example.org/o1/blob"}]});</script>"#;
        let found = extract_from_page(body).unwrap();
        assert_eq!(found.pattern, "shared data");
        assert_eq!(found.candidate.url, "https://media.example.org/o1/blob");
    }

    #[test]
    fn test_video_versions_skips_empty_best_url() {
        let body = r#"<script>{"video_versions":[
            {"width":360,"height":640,"url":"https://scontent.cdninstagram.com/o1/low"},
            {"width":1080,"height":1920,"url":""}
        ]}</script>"#;
        let found = extract_from_page(body).unwrap();
        assert_eq!(found.pattern, "video_versions");
        assert_eq!(found.candidate.url, "https://scontent.cdninstagram.com/o1/low");
    }

    #[test]
    fn test_ld_json_video_object() {
        let body = r#"<html><head><script type="application/ld+json">
            {"@context":"https://schema.org","@type":"SocialMediaPosting",
             "video":[{"@type":"VideoObject","contentUrl":"https://scontent.cdninstagram.com/o1/v/t16/clip?efg=ld",
                       "width":"720","height":1280,"thumbnailUrl":["https://scontent.cdninstagram.com/t.jpg"]}]}
        </script></head></html>"#;
        let found = extract_from_page(body).unwrap();
        assert_eq!(found.pattern, "ld+json");
        assert_eq!(found.candidate.url, "https://scontent.cdninstagram.com/o1/v/t16/clip?efg=ld");
        assert_eq!(found.candidate.resolution_label(), "720x1280");
        assert_eq!(
            found.candidate.thumbnail.as_deref(),
            Some("https://scontent.cdninstagram.com/t.jpg")
        );
    }

    #[test]
    fn test_ld_json_without_video_object() {
        let body = r#"<script type="application/ld+json">{"@type":"ImageObject","contentUrl":"https://scontent.cdninstagram.com/i.jpg"}</script>"#;
        assert!(extract_from_page(body).is_none());
    }
}
