//! Transport API error types.

/// Errors that can occur when talking to the transit provider.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by transport API")]
    RateLimited,

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Response parsed but could not be turned into domain types
    #[error("unexpected response: {0}")]
    Conversion(#[from] super::ConversionError),

    /// Mock data could not be loaded
    #[error("mock data error: {0}")]
    MockData(String),
}
