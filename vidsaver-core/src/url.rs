//! URL normalization helpers.
//!
//! - [`clean_url`] - Strip query and fragment from a post URL
//! - [`absolute_media_url`] - Unescape a scraped media URL and make it absolute
//! - [`host_matches`] - Domain/subdomain matching used by guards and routing

use ::url::Url;

/// Reduces a post URL to `origin + path`.
///
/// Share and tracking parameters change how platforms answer, so they are
/// dropped. Input that does not parse as an http(s) URL is returned as-is;
/// the strategies will fail on it with a clearer error.
pub fn clean_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let Ok(parsed) = Url::parse(trimmed) else {
        return raw.to_string();
    };

    let origin = parsed.origin();
    if !origin.is_tuple() {
        return raw.to_string();
    }

    format!("{}{}", origin.ascii_serialization(), parsed.path())
}

/// Returns `url` with exactly one trailing slash.
pub fn ensure_trailing_slash(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}

/// Returns true if `host` is `domain` or one of its subdomains.
pub fn host_matches(host: &str, domain: &str) -> bool {
    let host = host.trim_end_matches('.');
    host.eq_ignore_ascii_case(domain)
        || (host.len() > domain.len()
            && host.as_bytes()[host.len() - domain.len() - 1] == b'.'
            && host[host.len() - domain.len()..].eq_ignore_ascii_case(domain))
}

/// Returns true if `url` parses and its host belongs to one of `domains`.
pub fn host_in(url: &str, domains: &[&str]) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .is_some_and(|host| domains.iter().any(|d| host_matches(&host, d)))
}

/// Undoes the escaping platforms apply to URLs embedded in HTML and JSON.
///
/// Handles `&`, `/`, `&amp;`, `\/` and any stray backslashes.
pub fn unescape_media_url(raw: &str) -> String {
    raw.replace("\\u0026", "&")
        .replace("\\u003d", "=")
        .replace("\\u003D", "=")
        .replace("\\u002F", "/")
        .replace("\\u002f", "/")
        .replace("&amp;", "&")
        .replace('\\', "")
}

/// Unescapes a scraped media URL and checks that it is an absolute http(s) URL.
///
/// Protocol-relative URLs (`//host/path`) are upgraded to `https:`.
pub fn absolute_media_url(raw: &str) -> Option<String> {
    let unescaped = unescape_media_url(raw.trim());
    let candidate = if unescaped.starts_with("//") {
        format!("https:{unescaped}")
    } else {
        unescaped
    };

    let parsed = Url::parse(&candidate).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return None;
    }
    Some(candidate)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_url_strips_query_and_fragment() {
        assert_eq!(
            clean_url("https://www.instagram.com/reel/Cabc123/?igsh=MWQ1&utm_source=ig#top"),
            "https://www.instagram.com/reel/Cabc123/"
        );
        assert_eq!(
            clean_url("https://www.facebook.com/watch/?v=123"),
            "https://www.facebook.com/watch/"
        );
    }

    #[test]
    fn test_clean_url_keeps_port_and_bare_host() {
        assert_eq!(clean_url("http://127.0.0.1:8080/p/x?y=1"), "http://127.0.0.1:8080/p/x");
        assert_eq!(clean_url("https://instagram.com"), "https://instagram.com/");
    }

    #[test]
    fn test_clean_url_malformed_passthrough() {
        assert_eq!(clean_url("not a url at all"), "not a url at all");
        assert_eq!(clean_url("instagram.com/p/abc?x=1"), "instagram.com/p/abc?x=1");
        assert_eq!(clean_url("mailto:someone@example.com"), "mailto:someone@example.com");
    }

    #[test]
    fn test_ensure_trailing_slash() {
        assert_eq!(ensure_trailing_slash("https://x/p/a"), "https://x/p/a/");
        assert_eq!(ensure_trailing_slash("https://x/p/a/"), "https://x/p/a/");
        assert_eq!(ensure_trailing_slash("https://x/p/a//"), "https://x/p/a/");
    }

    #[test]
    fn test_host_matches() {
        assert!(host_matches("scontent.cdninstagram.com", "cdninstagram.com"));
        assert!(host_matches("cdninstagram.com", "cdninstagram.com"));
        assert!(host_matches("video.xx.fbcdn.net", "fbcdn.net"));
        assert!(!host_matches("evilcdninstagram.com", "cdninstagram.com"));
        assert!(!host_matches("cdninstagram.com.evil.io", "cdninstagram.com"));
    }

    #[test]
    fn test_unescape_media_url() {
        assert_eq!(
            unescape_media_url(r"https:\/\/scontent.cdninstagram.com\/v\/a.mp4?x=1&y=2"),
            "https://scontent.cdninstagram.com/v/a.mp4?x=1&y=2"
        );
        assert_eq!(
            unescape_media_url("https://video.fbcdn.net/v.mp4?a=1&amp;b=2"),
            "https://video.fbcdn.net/v.mp4?a=1&b=2"
        );
    }

    #[test]
    fn test_absolute_media_url() {
        assert_eq!(
            absolute_media_url("//video.fbcdn.net/v.mp4").as_deref(),
            Some("https://video.fbcdn.net/v.mp4")
        );
        assert!(absolute_media_url("/relative/path.mp4").is_none());
        assert!(absolute_media_url("javascript:alert(1)").is_none());
        assert!(absolute_media_url("").is_none());
    }

    #[test]
    fn test_host_in() {
        let cdns = ["cdninstagram.com", "fbcdn.net"];
        assert!(host_in("https://scontent-lhr8-1.cdninstagram.com/v/x.mp4", &cdns));
        assert!(!host_in("https://tracker.example.com/pixel.mp4", &cdns));
        assert!(!host_in("garbage", &cdns));
    }
}
