//! Text patterns shared by the scraping strategies.
//!
//! Pure functions over a response body. Nothing here touches the network.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use vidsaver_core::url::{absolute_media_url, host_in};

/// Hosts that serve Instagram and Facebook media.
pub const CDN_DOMAINS: &[&str] = &["cdninstagram.com", "fbcdn.net"];

/// Open Graph video tags, in lookup order.
pub const OG_VIDEO_TAGS: &[&str] = &["og:video", "og:video:secure_url", "og:video:url"];

/// Twitter card stream tag.
pub const TWITTER_STREAM_TAG: &str = "twitter:player:stream";

// ============================================================================
// Patterns
// ============================================================================

static META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta").expect("Invalid selector"));

static LD_JSON_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("Invalid selector")
});

/// `"key":"value"` (key quotes optional, for inline JS objects).
static PLAIN_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""?\b([A-Za-z_][A-Za-z0-9_]*)"?\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("Invalid regex")
});

/// `\"key\":\"value\"` as found in JSON embedded inside a JS string.
static ESCAPED_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\\"([A-Za-z_][A-Za-z0-9_]*)\\"\s*:\s*\\"(.*?)\\""#).expect("Invalid regex")
});

static QUOTED_MP4_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["'](https?:(?:\\?/){2}[^"'\s<>]+?\.mp4(?:[?#][^"'\s<>]*)?)\\?["']"#)
        .expect("Invalid regex")
});

static CDN_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"https?:(?:\\?/){2}[A-Za-z0-9.-]*(?:cdninstagram\.com|fbcdn\.net)\\?/[^"'\s<>]*"#,
    )
    .expect("Invalid regex")
});

// ============================================================================
// Meta Tags
// ============================================================================

/// Collects `property`/`name` → `content` for every meta tag, first wins.
fn meta_tags(html: &str) -> HashMap<String, String> {
    let document = Html::parse_document(html);
    let mut tags = HashMap::new();
    for meta in document.select(&META_SELECTOR) {
        let element = meta.value();
        let key = element.attr("property").or_else(|| element.attr("name"));
        let content = element.attr("content").map(str::trim);
        if let (Some(key), Some(content)) = (key, content) {
            if !content.is_empty() {
                tags.entry(key.to_ascii_lowercase())
                    .or_insert_with(|| content.to_string());
            }
        }
    }
    tags
}

/// Returns the content of the first tag in `names` present in the page.
///
/// Lookup follows the order of `names`, not document order. Character
/// references in the attribute are decoded.
pub fn meta_content(html: &str, names: &[&str]) -> Option<String> {
    let tags = meta_tags(html);
    names.iter().find_map(|name| tags.get(*name).cloned())
}

/// Bodies of every `application/ld+json` script block, in document order.
pub fn ld_json_blocks(html: &str) -> Vec<serde_json::Value> {
    let document = Html::parse_document(html);
    document
        .select(&LD_JSON_SELECTOR)
        .filter_map(|script| serde_json::from_str(&script.text().collect::<String>()).ok())
        .collect()
}

// ============================================================================
// Quoted Fields
// ============================================================================

/// All non-empty values of `field`, plain form first, then the escaped form.
pub fn quoted_field_values(body: &str, field: &str) -> Vec<String> {
    let plain = PLAIN_FIELD_RE.captures_iter(body);
    let escaped = ESCAPED_FIELD_RE.captures_iter(body);
    plain
        .chain(escaped)
        .filter(|cap| &cap[1] == field)
        .map(|cap| cap[2].to_string())
        .filter(|v| !v.trim().is_empty())
        .collect()
}

/// First non-empty value of `field`.
pub fn quoted_field(body: &str, field: &str) -> Option<String> {
    quoted_field_values(body, field).into_iter().next()
}

/// First value of `field` that resolves to a media CDN URL.
pub fn quoted_field_on_cdn(body: &str, field: &str) -> Option<String> {
    quoted_field_values(body, field)
        .into_iter()
        .find(|v| is_cdn_url(v))
}

// ============================================================================
// URL Scans
// ============================================================================

/// Returns true if the (possibly escaped) URL points at a media CDN.
pub fn is_cdn_url(raw: &str) -> bool {
    absolute_media_url(raw).is_some_and(|url| host_in(&url, CDN_DOMAINS))
}

/// First quoted `.mp4` URL hosted on a media CDN.
pub fn cdn_mp4_url(body: &str) -> Option<String> {
    QUOTED_MP4_RE
        .captures_iter(body)
        .map(|cap| cap[1].to_string())
        .find(|url| is_cdn_url(url))
}

/// First media CDN URL whose path contains `/video`.
pub fn cdn_video_path_url(body: &str) -> Option<String> {
    CDN_URL_RE
        .find_iter(body)
        .filter_map(|m| absolute_media_url(m.as_str()))
        .find(|url| {
            ::url::Url::parse(url).is_ok_and(|u| u.path().contains("/video"))
                && host_in(url, CDN_DOMAINS)
        })
}

/// Extracts the JSON array following `"key":`, bracket-balanced.
///
/// Returns every occurrence in document order.
pub fn json_arrays_after<'a>(body: &'a str, key: &str) -> Vec<&'a str> {
    let needle = format!("\"{key}\"");
    let mut found = Vec::new();
    let mut rest = body;
    let mut offset = 0;

    while let Some(pos) = rest.find(&needle) {
        let after = offset + pos + needle.len();
        if let Some(array) = balanced_after_colon(&body[after..], '[', ']') {
            found.push(array);
        }
        offset = after;
        rest = &body[offset..];
    }
    found
}

/// Extracts the JSON object starting right after `marker`, bracket-balanced.
pub fn json_object_after<'a>(body: &'a str, marker: &str) -> Option<&'a str> {
    let start = body.find(marker)? + marker.len();
    let tail = &body[start..];
    let open = tail.find('{')?;
    // Only an assignment, a call paren or a quoted label may sit in between.
    let separator_ok = tail[..open]
        .chars()
        .all(|c| c.is_alphanumeric() || c.is_whitespace() || "=(,'\"/._-".contains(c));
    if !separator_ok {
        return None;
    }
    balanced(&tail[open..], '{', '}')
}

fn balanced_after_colon(text: &str, open: char, close: char) -> Option<&str> {
    let trimmed = text.trim_start();
    let trimmed = trimmed.strip_prefix(':')?.trim_start();
    if !trimmed.starts_with(open) {
        return None;
    }
    balanced(trimmed, open, close)
}

/// Returns the prefix of `text` (which starts with `open`) up to its
/// matching `close`, skipping brackets inside JSON strings.
fn balanced(text: &str, open: char, close: char) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            c if c == open => depth += 1,
            c if c == close => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_content_any_attribute_order() {
        let html = r#"<head>
            <meta content="https://scontent.cdninstagram.com/v/b.mp4?x=1&amp;y=2" property="og:video:secure_url">
            <meta property='og:video' content='https://scontent.cdninstagram.com/v/a.mp4'/>
        </head>"#;
        assert_eq!(
            meta_content(html, OG_VIDEO_TAGS).as_deref(),
            Some("https://scontent.cdninstagram.com/v/a.mp4")
        );
        assert_eq!(
            meta_content(html, &["og:video:secure_url"]).as_deref(),
            Some("https://scontent.cdninstagram.com/v/b.mp4?x=1&y=2")
        );
        assert!(meta_content(html, &[TWITTER_STREAM_TAG]).is_none());
    }

    #[test]
    fn test_meta_content_skips_empty() {
        let html = r#"<meta property="og:video" content=""><meta name="twitter:player:stream" content="https://v.fbcdn.net/s.mp4">"#;
        assert!(meta_content(html, &["og:video"]).is_none());
        assert!(meta_content(html, &[TWITTER_STREAM_TAG]).is_some());
    }

    #[test]
    fn test_meta_content_unquoted_and_numeric_entities() {
        let html = "<meta property=og:video content=https://scontent.cdninstagram.com/v/og.mp4>";
        assert_eq!(
            meta_content(html, OG_VIDEO_TAGS).as_deref(),
            Some("https://scontent.cdninstagram.com/v/og.mp4")
        );

        let html = r#"<meta property="og:video" content="https://scontent.cdninstagram.com/v/og.mp4?a=1&#38;b=2&#x26;c=3">"#;
        assert_eq!(
            meta_content(html, OG_VIDEO_TAGS).as_deref(),
            Some("https://scontent.cdninstagram.com/v/og.mp4?a=1&b=2&c=3")
        );
    }

    #[test]
    fn test_ld_json_blocks_skip_invalid() {
        let html = r#"<script type="application/ld+json">{"@type":"VideoObject","contentUrl":"https://scontent.cdninstagram.com/v/ld.mp4"}</script>
            <script type="application/ld+json">{not json</script>
            <script>{"@type":"Ignored"}</script>"#;
        let blocks = ld_json_blocks(html);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0]["@type"], "VideoObject");
    }

    #[test]
    fn test_quoted_field_plain_and_escaped() {
        let plain = r#"{"video_url":"https:\/\/scontent.cdninstagram.com\/v\/a.mp4"}"#;
        assert_eq!(
            quoted_field(plain, "video_url").as_deref(),
            Some(r"https:\/\/scontent.cdninstagram.com\/v\/a.mp4")
        );

        let escaped = r#"s.handle("{\"video_url\":\"https:\\/\\/scontent.cdninstagram.com\\/v\\/b.mp4\"}")"#;
        let value = quoted_field(escaped, "video_url").unwrap();
        assert_eq!(
            absolute_media_url(&value).as_deref(),
            Some("https://scontent.cdninstagram.com/v/b.mp4")
        );
    }

    #[test]
    fn test_quoted_field_unquoted_key() {
        let js = r#"videoData:[{hd_src:"https://video.xx.fbcdn.net/hd.mp4",sd_src:"https://video.xx.fbcdn.net/sd.mp4"}]"#;
        assert_eq!(
            quoted_field(js, "sd_src").as_deref(),
            Some("https://video.xx.fbcdn.net/sd.mp4")
        );
    }

    #[test]
    fn test_quoted_field_ignores_null_and_empty() {
        assert!(quoted_field(r#"{"video_url":null}"#, "video_url").is_none());
        assert!(quoted_field(r#"{"video_url":""}"#, "video_url").is_none());
    }

    #[test]
    fn test_cdn_guard_on_fields() {
        let body = r#"{"video_url":"https://tracker.example.com/a.mp4"},{"video_url":"https://scontent.cdninstagram.com/v/a.mp4"}"#;
        assert_eq!(
            quoted_field_on_cdn(body, "video_url").as_deref(),
            Some("https://scontent.cdninstagram.com/v/a.mp4")
        );
    }

    #[test]
    fn test_mp4_scan_rejects_non_cdn() {
        let body = r#"<a href="https://evil.example.com/decoy.mp4">x</a>"#;
        assert!(cdn_mp4_url(body).is_none());

        let body = r#"var u = "https:\/\/scontent-lhr.cdninstagram.com\/o1\/v\/clip.mp4?efg=abc";"#;
        assert_eq!(
            cdn_mp4_url(body).and_then(|u| absolute_media_url(&u)).as_deref(),
            Some("https://scontent-lhr.cdninstagram.com/o1/v/clip.mp4?efg=abc")
        );
    }

    #[test]
    fn test_cdn_video_path_scan() {
        let body = r#"img src="https://scontent.cdninstagram.com/images/p.jpg" src2="https://video.xx.fbcdn.net/video/stream/abc?tag=1""#;
        assert_eq!(
            cdn_video_path_url(body).as_deref(),
            Some("https://video.xx.fbcdn.net/video/stream/abc?tag=1")
        );
        assert!(cdn_video_path_url("https://scontent.cdninstagram.com/images/p.jpg").is_none());
    }

    #[test]
    fn test_json_arrays_after_balanced() {
        let body = r#"x "video_versions": [{"url":"https://a/[1].mp4","width":1}], y "video_versions":[]"#;
        let arrays = json_arrays_after(body, "video_versions");
        assert_eq!(arrays, vec![r#"[{"url":"https://a/[1].mp4","width":1}]"#, "[]"]);
        assert!(json_arrays_after(r#""video_versions":null"#, "video_versions").is_empty());
    }

    #[test]
    fn test_json_object_after_marker() {
        let html = r#"<script>window._sharedData = {"entry_data":{"PostPage":[{}]}};</script>"#;
        assert_eq!(
            json_object_after(html, "window._sharedData"),
            Some(r#"{"entry_data":{"PostPage":[{}]}}"#)
        );

        let html = r#"window.__additionalDataLoaded('/p/abc/',{"graphql":{"a":"}"}});"#;
        assert_eq!(
            json_object_after(html, "__additionalDataLoaded("),
            Some(r#"{"graphql":{"a":"}"}}"#)
        );
        assert!(json_object_after("nothing here", "window._sharedData").is_none());
    }
}
