//! Outbound request description.

use std::collections::HashMap;

/// A fully described outbound GET request, handed to an `HttpTransport`.
///
/// The store is only ever read, so requests carry no method or body.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub url: String,
    pub headers: HashMap<String, String>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Get a header value (case-insensitive).
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}
