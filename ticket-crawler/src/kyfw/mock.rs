//! In-memory transport for exercising the client without network access.
//!
//! Responses are registered against URL fragments; every requested URL is
//! recorded, query string encoded, so tests can check which calls were (or
//! were not) made.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::error::FetchError;
use super::transport::{Query, RawResponse, Transport};

/// Mock transport that serves canned responses.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    /// (URL fragment, response) pairs, matched in insertion order.
    routes: Vec<(String, RawResponse)>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with `status` for any URL containing `fragment`.
    pub fn with_route(mut self, fragment: impl Into<String>, status: u16, body: &str) -> Self {
        self.routes
            .push((fragment.into(), RawResponse::new(status, body)));
        self
    }

    /// URLs requested so far, in order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }
}

impl Transport for MockTransport {
    /// Unmatched URLs get an empty 404.
    async fn get(&self, url: &str, query: &Query<'_>) -> Result<RawResponse, FetchError> {
        let url = request_url(url, query)?;
        self.requests.lock().await.push(url.clone());

        let response = self
            .routes
            .iter()
            .find(|(fragment, _)| url.contains(fragment.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| RawResponse::new(404, ""));

        Ok(response)
    }
}

/// The URL as `reqwest` would send it.
fn request_url(url: &str, query: &Query<'_>) -> Result<String, FetchError> {
    let parsed = if query.is_empty() {
        reqwest::Url::parse(url)
    } else {
        reqwest::Url::parse_with_params(url, query.iter().copied())
    };
    parsed
        .map(String::from)
        .map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))
}
