//! Unified error types.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum RatesError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Stream error: {0}")]
    Stream(#[from] StreamError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// REST failures: non-success status, transport failure, or a payload that
/// does not validate into domain types.
#[derive(Error, Debug)]
pub enum FetchError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl FetchError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::ServerError { status, .. } => Some(*status),
            FetchError::RateLimited => Some(429),
            FetchError::NotFound(_) => Some(404),
            FetchError::BadRequest(_) => Some(400),
            _ => None,
        }
    }
}

/// Connection-level failures of the streaming feed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StreamError {
    #[error("Not connected")]
    NotConnected,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Connection closed: code={code:?} reason={reason}")]
    Closed { code: Option<u16>, reason: String },
}

/// Malformed inbound streaming data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Malformed price message: {0}")]
    Message(String),

    #[error("Invalid price for {asset}: {value:?}")]
    Price { asset: String, value: String },
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        ParseError::Message(e.to_string())
    }
}

/// Invalid configuration values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid URL for {name}: {value} ({reason})")]
    InvalidUrl {
        name: &'static str,
        value: String,
        reason: String,
    },
}
