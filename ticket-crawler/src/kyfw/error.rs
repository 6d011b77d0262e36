//! 12306 client error types.

/// Errors from fetching and decoding 12306 responses.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with something other than 200
    #[error("unexpected status {status}")]
    Status { status: u16 },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Response parsed but lacked the expected payload
    #[error("no data in response: missing {0}")]
    MissingData(&'static str),

    /// Station name not present in the directory
    #[error("telecode not found for station {0}")]
    UnknownStation(String),

    /// Base URL and query did not form a valid URL
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// Client could not be built from its configuration
    #[error("invalid client configuration: {0}")]
    Config(String),
}
