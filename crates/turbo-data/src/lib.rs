//! HTTP and hosted table-store client for TurboCommerce.
//!
//! Provides a small builder API for outbound requests, a PostgREST-style
//! query builder, and a `StoreClient` that reads rows from a hosted store.
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_data::{StoreClient, TableQuery};
//!
//! let store = StoreClient::new("https://xyz.supabase.co", "anon-key");
//! let query = TableQuery::from("products")
//!     .select("*")
//!     .order("created_at", false);
//!
//! let rows: Vec<serde_json::Value> = store.select(&query).await?;
//! ```

mod error;
mod query;
mod request;
mod response;
mod store;
mod transport;

use std::collections::HashMap;
use std::rc::Rc;

pub use error::FetchError;
pub use query::{Order, TableQuery};
pub use request::RequestBuilder;
pub use response::Response;
pub use store::StoreClient;
#[cfg(target_arch = "wasm32")]
pub use transport::SpinTransport;
pub use transport::{HttpTransport, MockTransport, OfflineTransport};

/// HTTP client for making outbound requests.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    transport: Rc<dyn HttpTransport>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a client using the target's default transport.
    pub fn new() -> Self {
        Self::with_transport(transport::default_transport())
    }

    /// Create a client over an explicit transport.
    pub fn with_transport(transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            transport,
        }
    }

    /// Create a client with a base URL that will be prepended to relative paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Create a GET request. Relative paths are joined to the base URL.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            client: self,
            builder,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    client: &'a FetchClient,
    builder: RequestBuilder,
}

impl ClientRequestBuilder<'_> {
    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        self.client.transport.send(self.builder).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Order, Response, StoreClient, TableQuery};
}
