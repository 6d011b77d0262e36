//! HTTP transport used by the 12306 client.

use std::future::Future;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER, USER_AGENT};

use super::client::KyfwConfig;
use super::error::FetchError;

/// Status code and body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Query string parameters, unencoded. Transports encode them.
pub type Query<'a> = [(&'a str, &'a str)];

/// Trait for issuing GET requests.
///
/// This abstraction allows the client to be tested without network access.
pub trait Transport {
    /// Issue a GET for `url` with `query` appended and return the raw
    /// response, whatever its status.
    fn get(
        &self,
        url: &str,
        query: &Query<'_>,
    ) -> impl Future<Output = Result<RawResponse, FetchError>> + Send;
}

/// `reqwest`-backed transport sending the browser-like headers 12306 expects.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport from the client configuration.
    pub fn new(config: &KyfwConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value(&config.user_agent)?);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(REFERER, header_value(&config.referer)?);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http })
    }
}

fn header_value(value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value)
        .map_err(|e| FetchError::Config(format!("invalid header value {value:?}: {e}")))
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str, query: &Query<'_>) -> Result<RawResponse, FetchError> {
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}
