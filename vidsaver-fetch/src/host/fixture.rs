//! In-memory page fetcher for offline tests.
//!
//! Responses are keyed by exact URL. Every request is recorded so tests can
//! assert which strategies actually hit the network and with which headers.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::http::{FetchedPage, PageFetcher, PageRequest};
use crate::error::HttpError;

#[derive(Debug, Clone)]
enum Canned {
    Page(FetchedPage),
    Timeout,
    Network(String),
}

/// A [`PageFetcher`] that replays canned responses.
///
/// Unknown URLs fail with [`HttpError::Network`].
#[derive(Debug, Default)]
pub struct FixtureFetcher {
    responses: HashMap<String, Canned>,
    requests: Mutex<Vec<PageRequest>>,
}

impl FixtureFetcher {
    /// Creates an empty fixture set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves an HTML body with status 200.
    #[must_use]
    pub fn with_html(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_body(url, 200, "text/html; charset=utf-8", body)
    }

    /// Serves a JSON body with status 200.
    #[must_use]
    pub fn with_json(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_body(url, 200, "application/json", body)
    }

    /// Serves a body with an explicit status and content type.
    #[must_use]
    pub fn with_body(
        self,
        url: impl Into<String>,
        status: u16,
        content_type: &str,
        body: impl Into<String>,
    ) -> Self {
        let url = url.into();
        let page = FetchedPage {
            status,
            final_url: url.clone(),
            content_type: Some(content_type.to_string()),
            body: body.into(),
        };
        self.with_page(url, page)
    }

    /// Serves a fully specified page.
    #[must_use]
    pub fn with_page(mut self, url: impl Into<String>, page: FetchedPage) -> Self {
        self.responses.insert(url.into(), Canned::Page(page));
        self
    }

    /// Simulates a redirect: the request for `url` ends at `final_url`.
    #[must_use]
    pub fn with_redirect(
        self,
        url: impl Into<String>,
        final_url: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let page = FetchedPage {
            status: 200,
            final_url: final_url.into(),
            content_type: Some("text/html".to_string()),
            body: body.into(),
        };
        self.with_page(url, page)
    }

    /// Makes `url` time out.
    #[must_use]
    pub fn with_timeout(mut self, url: impl Into<String>) -> Self {
        self.responses.insert(url.into(), Canned::Timeout);
        self
    }

    /// Makes `url` fail at the connection level.
    #[must_use]
    pub fn with_network_error(mut self, url: impl Into<String>, reason: impl Into<String>) -> Self {
        self.responses
            .insert(url.into(), Canned::Network(reason.into()));
        self
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// URLs requested so far, in order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    /// Number of requests received.
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl PageFetcher for FixtureFetcher {
    async fn fetch(&self, request: &PageRequest) -> Result<FetchedPage, HttpError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        match self.responses.get(&request.url) {
            Some(Canned::Page(page)) => Ok(page.clone()),
            Some(Canned::Timeout) => Err(HttpError::Timeout(request.timeout)),
            Some(Canned::Network(reason)) => Err(HttpError::Network(reason.clone())),
            None => Err(HttpError::Network(format!("no fixture for {}", request.url))),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
