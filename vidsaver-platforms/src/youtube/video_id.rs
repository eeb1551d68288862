//! YouTube video id parsing.

use std::sync::LazyLock;

use regex::Regex;

/// URL shapes carrying a video id, in lookup order.
static ID_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        r"youtube\.com/shorts/([A-Za-z0-9_-]+)",
        r"[?&]v=([A-Za-z0-9_-]+)",
        r"yt\.be/([A-Za-z0-9_-]+)",
        r"youtu\.be/([A-Za-z0-9_-]+)",
    ]
    .map(|p| Regex::new(p).expect("Invalid regex"))
});

/// Extracts the video id from a raw YouTube URL.
///
/// Works on the raw input: the watch form keeps its id in the query string.
pub fn parse_video_id(raw_url: &str) -> Option<String> {
    ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(raw_url))
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_shapes() {
        let cases = [
            ("https://www.youtube.com/shorts/abc_DEF-123", "abc_DEF-123"),
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42", "dQw4w9WgXcQ"),
            ("https://m.youtube.com/watch?feature=share&v=dQw4w9WgXcQ", "dQw4w9WgXcQ"),
            ("https://yt.be/xyz789", "xyz789"),
            ("https://youtu.be/dQw4w9WgXcQ?si=tracking", "dQw4w9WgXcQ"),
        ];
        for (url, id) in cases {
            assert_eq!(parse_video_id(url).as_deref(), Some(id), "{url}");
        }
    }

    #[test]
    fn test_shorts_wins_over_query() {
        assert_eq!(
            parse_video_id("https://youtube.com/shorts/short1?v=other").as_deref(),
            Some("short1")
        );
    }

    #[test]
    fn test_no_id() {
        assert_eq!(parse_video_id("https://www.youtube.com/"), None);
        assert_eq!(parse_video_id("https://www.youtube.com/@channel"), None);
        assert_eq!(parse_video_id("https://youtu.be/"), None);
    }
}
