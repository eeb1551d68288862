//! HTTP client with tracing, per-request timeouts and domain allowlist.
//!
//! Strategies talk to the network through the [`PageFetcher`] trait so that
//! the pipeline can be replayed against fixtures. [`HttpClient`] is the
//! production implementation backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, redirect};
use tracing::{debug, instrument};
use url::Url;

use crate::error::HttpError;

/// Redirect hops followed before giving up.
const MAX_REDIRECTS: usize = 10;

// ============================================================================
// Request / Response
// ============================================================================

/// One outbound GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Absolute URL to fetch.
    pub url: String,
    /// Header name/value pairs, sent in order.
    pub headers: Vec<(String, String)>,
    /// Deadline for the whole request, body included.
    pub timeout: Duration,
}

impl PageRequest {
    /// Creates a request with no headers.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            timeout,
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds several headers.
    #[must_use]
    pub fn headers<'a>(mut self, headers: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        self.headers
            .extend(headers.into_iter().map(|(n, v)| (n.to_string(), v.to_string())));
        self
    }

    /// Looks up a header value (case-insensitive name).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The user agent this request presents, if set.
    pub fn user_agent(&self) -> Option<&str> {
        self.header_value(USER_AGENT.as_str())
    }

    fn header_map(&self) -> Result<HeaderMap, HttpError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| HttpError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| HttpError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

/// A fetched response. Non-2xx statuses are returned, not raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// HTTP status code.
    pub status: u16,
    /// URL after redirects.
    pub final_url: String,
    /// `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Response body as text.
    pub body: String,
}

impl FetchedPage {
    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Best guess whether the body is an HTML document.
    pub fn looks_like_html(&self) -> bool {
        if self
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("text/html"))
        {
            return true;
        }
        let head: String = self.body.trim_start().chars().take(256).collect();
        let head = head.to_ascii_lowercase();
        head.starts_with("<!doctype html") || head.starts_with("<html") || head.contains("<head")
    }
}

// ============================================================================
// Page Fetcher
// ============================================================================

/// Transport used by strategies.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Performs a GET request and returns the page, whatever its status.
    async fn fetch(&self, request: &PageRequest) -> Result<FetchedPage, HttpError>;
}

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing and an optional domain allowlist.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    allowed_domains: Option<Vec<String>>,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built. This only happens when the
    /// TLS backend cannot initialize, which leaves nothing to fall back to.
    pub fn new() -> Self {
        Self::try_new().unwrap_or_else(|e| {
            panic!(
                "Failed to create HTTP client: {e}. \
                This usually indicates a broken TLS/SSL configuration."
            )
        })
    }

    /// Creates a new HTTP client, returning an error instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Request`] if the TLS backend fails to initialize.
    pub fn try_new() -> Result<Self, HttpError> {
        let client = Client::builder()
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self {
            inner: client,
            allowed_domains: None,
        })
    }

    /// Creates a new HTTP client with domain allowlist.
    ///
    /// Only requests to domains in the allowlist (or their subdomains) will
    /// be permitted.
    #[must_use]
    pub fn with_allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = Some(domains);
        self
    }

    /// Checks if a URL's domain is allowed.
    fn is_domain_allowed(&self, url: &str) -> Result<(), HttpError> {
        let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl(format!("{url}: {e}")))?;

        let Some(ref allowed) = self.allowed_domains else {
            return Ok(()); // No restrictions
        };

        let host = parsed
            .host_str()
            .ok_or_else(|| HttpError::InvalidUrl("No host in URL".to_string()))?;

        if allowed
            .iter()
            .any(|domain| vidsaver_core::url::host_matches(host, domain))
        {
            Ok(())
        } else {
            Err(HttpError::DomainNotAllowed(host.to_string()))
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(error: reqwest::Error, timeout: Duration) -> HttpError {
    if error.is_timeout() {
        HttpError::Timeout(timeout)
    } else {
        HttpError::Request(error)
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    #[instrument(skip(self, request), fields(url = %request.url, timeout = ?request.timeout))]
    async fn fetch(&self, request: &PageRequest) -> Result<FetchedPage, HttpError> {
        self.is_domain_allowed(&request.url)?;
        debug!("GET request");

        let response = self
            .inner
            .get(&request.url)
            .headers(request.header_map()?)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| classify(e, request.timeout))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .text()
            .await
            .map_err(|e| classify(e, request.timeout))?;

        debug!(status, final_url = %final_url, bytes = body.len(), "Response received");
        Ok(FetchedPage {
            status,
            final_url,
            content_type,
            body,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
