/*
[INPUT]:  Error sources (HTTP, API, serialization, auth, WebSocket)
[OUTPUT]: Structured error types with context
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Main error type for the EXIO adapter
#[derive(Error, Debug)]
pub enum ExioError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },

    /// Credential signing failed
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Feed socket could not be established
    #[error("WebSocket connect failed: {0}")]
    Connect(tungstenite::Error),

    /// Send/receive fault on a live feed connection
    #[error("WebSocket transport error: {0}")]
    Transport(tungstenite::Error),

    /// Parsed feed message with a type outside all known sets
    #[error("unrecognized message type {kind:?}: {raw}")]
    UnrecognizedMessage { kind: String, raw: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExioError {
    /// Check if the error is an in-loop stream fault (terminal for the
    /// connection, routed through the error hook rather than propagated)
    pub fn is_stream_fault(&self) -> bool {
        matches!(
            self,
            ExioError::Serialization(_)
                | ExioError::Transport(_)
                | ExioError::UnrecognizedMessage { .. }
        )
    }

    /// Check if the error indicates the socket could not be established
    pub fn is_connect_failure(&self) -> bool {
        matches!(self, ExioError::Connect(_))
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        ExioError::Api {
            code: status.as_u16() as i32,
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn auth(message: impl Into<String>) -> Self {
        ExioError::Authentication {
            message: message.into(),
        }
    }
}

/// Result type alias for EXIO operations
pub type Result<T> = std::result::Result<T, ExioError>;
