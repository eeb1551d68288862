//! Response classification shared by the scraping strategies.

use tracing::debug;
use url::Url;
use vidsaver_fetch::{ExtractContext, ExtractError, FetchedPage, PageRequest};

/// Strings that only appear on login walls.
const LOGIN_WALL_MARKERS: &[&str] = &[
    "Login • Instagram",
    // Same title as served with a mis-declared charset.
    "Login â€¢ Instagram",
    "Log in to Facebook",
    "id=\"login_form\"",
];

/// Path prefixes of the login pages a blocked request gets redirected to.
const LOGIN_PATH_PREFIXES: &[&str] = &["/accounts/login", "/login/", "/login.php"];

/// Characters of an unmatched body written to the debug log.
const BODY_LOG_CHARS: usize = 500;

/// Returns true if the body is a login wall.
pub fn is_login_wall(body: &str) -> bool {
    LOGIN_WALL_MARKERS.iter().any(|m| body.contains(m))
}

/// Returns true if the path is a login page.
fn is_login_path(path: &str) -> bool {
    path == "/login" || LOGIN_PATH_PREFIXES.iter().any(|p| path.starts_with(p))
}

/// Returns true if the request was redirected onto a login page.
///
/// A page served at its requested URL never counts, whatever its path.
pub fn redirected_to_login(requested_url: &str, page: &FetchedPage) -> bool {
    let Ok(final_url) = Url::parse(&page.final_url) else {
        return false;
    };
    let redirected = !Url::parse(requested_url).is_ok_and(|requested| requested == final_url);
    redirected && is_login_path(final_url.path())
}

/// Maps status codes and login redirects onto extraction errors.
///
/// 2xx pages pass through untouched; the caller inspects the body.
///
/// # Errors
///
/// - login redirect, 429, or 401/403 with a login wall → `Blocked`
/// - 401/403 → `AccessDenied`
/// - 404 → `NotFound`
/// - any other non-2xx → `InvalidResponse`
pub fn check_status(request: &PageRequest, page: &FetchedPage) -> Result<(), ExtractError> {
    if redirected_to_login(&request.url, page) {
        return Err(ExtractError::Blocked(format!(
            "redirected to login page ({})",
            page.final_url
        )));
    }

    match page.status {
        s if (200..300).contains(&s) => Ok(()),
        404 => Err(ExtractError::NotFound("Post not found".to_string())),
        401 | 403 if is_login_wall(&page.body) => Err(ExtractError::Blocked(format!(
            "login wall served with HTTP {}",
            page.status
        ))),
        401 | 403 => Err(ExtractError::AccessDenied(
            "Access denied (private post?)".to_string(),
        )),
        429 => Err(ExtractError::Blocked("rate limited (HTTP 429)".to_string())),
        s => Err(ExtractError::InvalidResponse(format!("HTTP {s}"))),
    }
}

/// The error for a readable page with no match.
pub fn no_match(page: &FetchedPage, what: &str) -> ExtractError {
    if is_login_wall(&page.body) {
        ExtractError::Blocked("Server blocked (login page). Try again later.".to_string())
    } else {
        ExtractError::NoVideoFound(format!(
            "{what}: post might be private or not a video"
        ))
    }
}

/// Logs the head of an unmatched body when body logging is enabled.
pub fn log_unmatched_body(ctx: &ExtractContext, strategy: &str, page: &FetchedPage) {
    if ctx.settings.debug_log_body {
        let head: String = page.body.chars().take(BODY_LOG_CHARS).collect();
        debug!(strategy, status = page.status, body = %head, "Unmatched body");
    }
}

/// Adds the headers a browser sends for a top-level page navigation.
pub fn navigation_headers(request: PageRequest, referer: &str) -> PageRequest {
    request.headers([
        (
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
        ("Accept-Language", "en-US,en;q=0.5"),
        ("Referer", referer),
        ("Sec-Fetch-Dest", "document"),
        ("Sec-Fetch-Mode", "navigate"),
        ("Sec-Fetch-Site", "cross-site"),
        ("Upgrade-Insecure-Requests", "1"),
    ])
}

// ============================================================================
// Tests
// ============================================================================
