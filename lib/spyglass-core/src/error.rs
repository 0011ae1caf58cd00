//! Error types for the Spyglass client.

use derive_more::{Display, Error, From};

// ============================================================================
// Structured API Error
// ============================================================================

/// Structured error decoded from a non-2xx API response.
///
/// `status` always carries the HTTP status code; the message fields are
/// best-effort and may all be absent when the server returned an empty or
/// unrecognizable body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, serde::Deserialize)]
pub struct ApiError {
    /// HTTP status code. Never read from the body; always the status of the
    /// response that produced this error.
    #[serde(skip)]
    pub status: u16,
    /// Machine-readable error code or text from the body, or the raw body
    /// text when it was not valid JSON.
    #[serde(default)]
    pub error: Option<String>,
    /// Human-readable message from the body.
    #[serde(default)]
    pub message: Option<String>,
    /// Additional detail from the body.
    #[serde(default)]
    pub details: Option<String>,
}

impl ApiError {
    /// Decode a non-2xx response body into a structured error.
    ///
    /// Tries to parse the body as JSON; if that fails the raw body text
    /// becomes the error text, so no information is dropped.
    #[must_use]
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let mut decoded = serde_json::from_slice::<Self>(body).unwrap_or_else(|_| {
            let text = String::from_utf8_lossy(body).into_owned();
            Self {
                error: (!text.is_empty()).then_some(text),
                ..Self::default()
            }
        });
        decoded.status = status;
        decoded
    }

    fn display_text(&self) -> Option<&str> {
        // Message wins over error text, even when both are populated.
        self.message
            .as_deref()
            .filter(|text| !text.is_empty())
            .or_else(|| self.error.as_deref().filter(|text| !text.is_empty()))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.display_text() {
            Some(text) => write!(f, "status {}: {text}", self.status),
            None => write!(f, "status {}", self.status),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for Spyglass operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Network/connection errors from the transport.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// Request timeout, including caller-side cancellation surfaced by the
    /// transport.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Structured error from a non-2xx API response.
    #[display("{_0}")]
    #[from]
    Api(ApiError),

    /// Request body could not be encoded as JSON.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// Response body did not match the expected shape.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "logs[3].timestamp").
        path: String,
        /// Error message.
        message: String,
    },

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// Request rejected by local validation before it was sent.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the HTTP status code if this is an API error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(api) => Some(api.status),
            _ => None,
        }
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
