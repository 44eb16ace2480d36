//! Client for a hosted PostgREST-compatible table store.

use std::rc::Rc;

use serde::de::DeserializeOwned;

use crate::{FetchClient, FetchError, HttpTransport, TableQuery};

/// Reads rows from a hosted store using its public API key.
#[derive(Clone)]
pub struct StoreClient {
    client: FetchClient,
}

impl StoreClient {
    /// Create a client for the store at `url` with the target's default transport.
    pub fn new(url: impl Into<String>, anon_key: impl AsRef<str>) -> Self {
        Self::from_client(FetchClient::new(), url, anon_key)
    }

    /// Create a client over an explicit transport.
    pub fn with_transport(
        transport: Rc<dyn HttpTransport>,
        url: impl Into<String>,
        anon_key: impl AsRef<str>,
    ) -> Self {
        Self::from_client(FetchClient::with_transport(transport), url, anon_key)
    }

    fn from_client(client: FetchClient, url: impl Into<String>, anon_key: impl AsRef<str>) -> Self {
        let key = anon_key.as_ref();
        let client = client
            .with_base_url(url)
            .with_default_header("apikey", key)
            .with_default_header("Authorization", format!("Bearer {}", key))
            .with_default_header("Accept", "application/json");
        Self { client }
    }

    /// Run a read query and decode every row.
    pub async fn select<T: DeserializeOwned>(&self, query: &TableQuery) -> Result<Vec<T>, FetchError> {
        let response = self
            .client
            .get(query.to_path())
            .send()
            .await?
            .error_for_status()?;

        // An empty body means no rows.
        if response.body.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Vec::new());
        }
        response.json()
    }
}
