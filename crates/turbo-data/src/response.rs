//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

/// Error payload returned by PostgREST-style stores.
#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a 200 response with a JSON body.
    pub fn json_ok(value: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self::new(200, headers, value.to_string().into_bytes())
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Get a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    ///
    /// Store error bodies (`{"message": ..., "code": ...}`) are unwrapped into
    /// the error message; anything else is passed through as text.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }

        let message = match serde_json::from_slice::<StoreErrorBody>(&self.body) {
            Ok(StoreErrorBody {
                message,
                code: Some(code),
            }) => format!("{} ({})", message, code),
            Ok(StoreErrorBody { message, .. }) => message,
            Err(_) => String::from_utf8_lossy(&self.body).into_owned(),
        };

        Err(FetchError::HttpError {
            status: self.status,
            message,
        })
    }
}
