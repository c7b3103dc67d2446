//! Error types for the price server clients.

use thiserror::Error;

/// Failure while fetching or decoding a history response.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection refused, timeout, or the body could not be read.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The body was not valid JSON for a history response.
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
    /// Non-success HTTP status.
    #[error("HTTP {status} - {reason}")]
    Status { status: u16, reason: String },
    /// The server answered with an error envelope (`"s": "error"`).
    #[error("{message}")]
    Server { message: String },
    /// A required array is absent from a successful response.
    #[error("Response is missing field '{0}'")]
    MissingField(&'static str),
    /// The parallel arrays disagree on length.
    #[error("Field '{field}' has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Coarse classification of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The server could not be reached or its reply could not be read.
    Network,
    /// The server answered, but with an error or an unusable payload.
    Server,
}

impl FetchError {
    pub fn class(&self) -> ErrorClass {
        match self {
            FetchError::Network(_) | FetchError::Decode(_) | FetchError::InvalidUrl(_) => {
                ErrorClass::Network
            }
            FetchError::Status { .. }
            | FetchError::Server { .. }
            | FetchError::MissingField(_)
            | FetchError::LengthMismatch { .. } => ErrorClass::Server,
        }
    }
}

/// Failure on the stream relay connection.
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid subscription '{0}', expected SYMBOL:MILLIS")]
    InvalidSubscription(String),
}
