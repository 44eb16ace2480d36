//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when talking to a remote service.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// No transport is available on this target.
    #[error("No HTTP transport available: {0}")]
    NoTransport(&'static str),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl FetchError {
    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
