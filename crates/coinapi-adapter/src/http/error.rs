/*
[INPUT]:  Error sources (HTTP, API status, serialization, URL, WebSocket, config)
[OUTPUT]: Structured error type shared by the REST and stream clients
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the CoinAPI adapter
#[derive(Error, Debug)]
pub enum CoinApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// WebSocket error
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoinApiError {
    /// Create an API error from status code and response body.
    ///
    /// CoinAPI reports failures as `{"error": "..."}`; when the body has that
    /// shape only the message is kept, otherwise the raw body is used.
    pub fn api_error(status: StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .and_then(|error| error.as_str())
                    .map(str::to_string)
            })
            .unwrap_or(body);

        CoinApiError::Api {
            code: status.as_u16(),
            message,
        }
    }

    /// HTTP status code, when the error came from a non-success response
    pub fn status(&self) -> Option<u16> {
        match self {
            CoinApiError::Api { code, .. } => Some(*code),
            CoinApiError::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for CoinApiError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        CoinApiError::WebSocket(err.to_string())
    }
}

/// Result type alias for CoinAPI operations
pub type Result<T> = std::result::Result<T, CoinApiError>;
