//! Error types for the Yahoo Finance client.

use jpfund_core::RetrievalError;
use thiserror::Error;

/// Errors that can occur when using the Yahoo Finance API.
#[derive(Debug, Error)]
pub enum YahooError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error.
    #[error("Yahoo Finance API error: {0}")]
    Api(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded. Too many requests to Yahoo Finance.")]
    RateLimitExceeded,

    /// Symbol not found; carries the provider's description.
    #[error("{0}")]
    NotFound(String),

    /// No data available.
    #[error("No data available for {0}")]
    NoData(String),

    /// Session crumb could not be obtained.
    #[error("Failed to obtain Yahoo crumb: {0}")]
    Crumb(String),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<YahooError> for RetrievalError {
    fn from(err: YahooError) -> Self {
        let message = err.to_string();
        match err {
            YahooError::Request(_) => Self::Network(message),
            YahooError::NotFound(_) | YahooError::NoData(_) => Self::NotFound(message),
            YahooError::Json(_) => Self::MalformedResponse(message),
            YahooError::Api(_)
            | YahooError::RateLimitExceeded
            | YahooError::Crumb(_)
            | YahooError::Config(_) => Self::Provider(message),
        }
    }
}
