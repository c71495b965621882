//! Error types and HTTP response conversion
//!
//! Only the cursor codec produces request-level errors. Malformed `page`,
//! `size` or `sort` values are never errors: they fall back to defaults or
//! are dropped.

use std::fmt;

#[cfg(feature = "http")]
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the crate
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// Cursor data could not be serialized
    #[error("failed to encode cursor data: {0}")]
    Encoding(#[source] serde_json::Error),

    /// Cursor token is not valid URL-safe base64
    #[error("invalid cursor encoding: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),

    /// Cursor token decoded but does not hold a cursor payload
    #[error("invalid cursor data: {0}")]
    InvalidCursorData(#[source] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Tracing subscriber could not be installed
    #[error("Tracing error: {0}")]
    Tracing(String),
}

impl Error {
    /// Whether the error was caused by client-supplied input
    ///
    /// True for malformed cursor tokens, which a request layer should answer
    /// with a client error rather than silently falling back to page one.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidEncoding(_) | Self::InvalidCursorData(_))
    }

    /// Stable machine-readable code for this error
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Encoding(_) => "CURSOR_ENCODING_ERROR",
            Self::InvalidEncoding(_) | Self::InvalidCursorData(_) => "INVALID_CURSOR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Tracing(_) => "INTERNAL_ERROR",
        }
    }
}

// Manual From implementations for boxed errors
impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Optional error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// HTTP status code
    pub status: u16,
}

impl ErrorResponse {
    /// Create error response with a code
    pub fn with_code(status: u16, code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: Some(code.into()),
            status,
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

#[cfg(feature = "http")]
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            tracing::debug!(error = %self, "rejecting request with invalid cursor");
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!(error = %self, "pagination error");
            StatusCode::INTERNAL_SERVER_ERROR
        };

        // Internal details stay in the log
        let message = match &self {
            Error::InvalidEncoding(_) | Error::InvalidCursorData(_) => self.to_string(),
            Error::Encoding(_) => "Failed to build pagination cursor".to_string(),
            Error::Config(_) | Error::Tracing(_) => "Internal server error".to_string(),
        };

        let body = ErrorResponse::with_code(status.as_u16(), self.code(), message);
        (status, Json(body)).into_response()
    }
}
