//! Where the grid reads its products from.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use async_trait::async_trait;
use edge_core::StoreConfig;
use turbo_commerce::{Product, RatingSummary, Review};
use turbo_data::{StoreClient, TableQuery};

use crate::error::GridError;

/// A read-only catalog.
///
/// Implementations return every product with its approved-review aggregate,
/// newest first.
#[async_trait(?Send)]
pub trait ProductSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, GridError>;
}

/// Key product rows carry the review aggregate under.
const REVIEWS_EMBED: &str = "reviews";

/// Build the catalog read: all product columns plus the average rating and
/// count of approved reviews, ordered by `created_at` descending.
///
/// A differently named reviews table is aliased back to `reviews` so rows
/// decode the same way.
pub fn catalog_query(config: &StoreConfig) -> TableQuery {
    let embed = if config.reviews_table == REVIEWS_EMBED {
        REVIEWS_EMBED.to_string()
    } else {
        format!("{}:{}", REVIEWS_EMBED, config.reviews_table)
    };
    TableQuery::from(config.products_table.as_str())
        .select(format!("*,{}(rating.avg(),count())", embed))
        .eq(format!("{}.approved", REVIEWS_EMBED), true)
        .order("created_at", false)
}

/// Catalog backed by the hosted store.
#[derive(Clone)]
pub struct StoreProductSource {
    store: StoreClient,
    query: TableQuery,
}

impl StoreProductSource {
    /// Source over an existing client.
    pub fn new(store: StoreClient, config: &StoreConfig) -> Self {
        Self {
            store,
            query: catalog_query(config),
        }
    }

    /// Source using the target's default transport.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(StoreClient::new(config.url.as_str(), &config.anon_key), config)
    }

    pub fn query(&self) -> &TableQuery {
        &self.query
    }
}

#[async_trait(?Send)]
impl ProductSource for StoreProductSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, GridError> {
        Ok(self.store.select(&self.query).await?)
    }
}

/// In-process catalog.
///
/// Computes the same aggregate the store does from raw review rows.
#[derive(Debug, Default)]
pub struct MemoryProductSource {
    products: RefCell<Vec<Product>>,
    reviews: RefCell<Vec<Review>>,
    failure: RefCell<Option<String>>,
    latency: Cell<Option<Duration>>,
    fetches: Cell<usize>,
}

impl MemoryProductSource {
    pub fn new(products: Vec<Product>, reviews: Vec<Review>) -> Self {
        Self {
            products: RefCell::new(products),
            reviews: RefCell::new(reviews),
            ..Self::default()
        }
    }

    /// Wait `latency` before answering.
    pub fn with_latency(self, latency: Duration) -> Self {
        self.latency.set(Some(latency));
        self
    }

    /// Fail every fetch with `reason` until cleared with `None`.
    pub fn set_failure(&self, reason: Option<&str>) {
        *self.failure.borrow_mut() = reason.map(str::to_string);
    }

    /// Replace the product rows.
    pub fn set_products(&self, products: Vec<Product>) {
        *self.products.borrow_mut() = products;
    }

    /// Number of fetches attempted.
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }

    fn snapshot(&self) -> Vec<Product> {
        let reviews = self.reviews.borrow();
        let mut products: Vec<Product> = self
            .products
            .borrow()
            .iter()
            .map(|product| {
                let summary = RatingSummary::for_product(&product.id, reviews.iter());
                Product {
                    average_rating: Some(summary.average_rating),
                    review_count: Some(summary.review_count),
                    ..product.clone()
                }
            })
            .collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        products
    }
}

#[async_trait(?Send)]
impl ProductSource for MemoryProductSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, GridError> {
        self.fetches.set(self.fetches.get() + 1);
        if let Some(latency) = self.latency.get() {
            tokio::time::sleep(latency).await;
        }
        if let Some(reason) = self.failure.borrow().clone() {
            return Err(GridError::Unavailable(reason));
        }
        Ok(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::rc::Rc;
    use turbo_commerce::ProductId;
    use turbo_data::{FetchError, MockTransport, Response};

    fn product(id: &str, day: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: id.to_uppercase(),
            price: 10.0,
            images: Vec::new(),
            stock: 1,
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            average_rating: None,
            review_count: None,
        }
    }

    fn review(product: &str, rating: u8, approved: bool) -> Review {
        Review {
            product_id: ProductId::new(product),
            rating,
            approved,
        }
    }

    #[test]
    fn test_catalog_query_path() {
        let config = StoreConfig::new("https://demo.supabase.co", "anon");
        assert_eq!(
            catalog_query(&config).to_path(),
            "/rest/v1/products?select=*,reviews(rating.avg(),count())&reviews.approved=eq.true&order=created_at.desc"
        );
    }

    #[tokio::test]
    async fn test_store_source_decodes_embedded_aggregate() {
        let mock = Rc::new(MockTransport::new());
        mock.push_json(serde_json::json!([
            {
                "id": "p-2",
                "name": "Taza",
                "price": 12.5,
                "images": ["https://cdn/taza.jpg"],
                "stock": 4,
                "created_at": "2024-02-01T00:00:00Z",
                "reviews": [{ "avg": 4.5, "count": 2 }]
            }
        ]));

        let config = StoreConfig::new("https://demo.supabase.co", "anon");
        let store = StoreClient::with_transport(mock.clone(), config.url.as_str(), &config.anon_key);
        let source = StoreProductSource::new(store, &config);

        let products = source.fetch_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].average_rating, Some(4.5));
        assert_eq!(products[0].review_count, Some(2));

        let sent = &mock.requests()[0];
        assert!(sent.url.starts_with("https://demo.supabase.co/rest/v1/products?"));
        assert_eq!(sent.header_value("apikey"), Some("anon"));
    }

    #[test]
    fn test_catalog_query_aliases_renamed_reviews_table() {
        let mut config = StoreConfig::new("https://demo.supabase.co", "anon");
        config.products_table = "catalog".to_string();
        config.reviews_table = "opiniones".to_string();
        assert_eq!(
            catalog_query(&config).to_path(),
            "/rest/v1/catalog?select=*,reviews:opiniones(rating.avg(),count())&reviews.approved=eq.true&order=created_at.desc"
        );
    }

    #[tokio::test]
    async fn test_renamed_reviews_table_keeps_ratings() {
        let mock = Rc::new(MockTransport::new());
        // The store answers under the alias requested in the select list.
        mock.push_json(serde_json::json!([
            {
                "id": "p-9",
                "name": "Cuaderno",
                "price": 4,
                "stock": 2,
                "created_at": "2024-02-01T00:00:00Z",
                "reviews": [{ "avg": 4.5, "count": 2 }]
            }
        ]));

        let mut config = StoreConfig::new("https://demo.supabase.co", "anon");
        config.reviews_table = "opiniones".to_string();
        let store = StoreClient::with_transport(mock.clone(), config.url.as_str(), &config.anon_key);

        let products = StoreProductSource::new(store, &config)
            .fetch_products()
            .await
            .unwrap();
        assert_eq!(products[0].average_rating, Some(4.5));
        assert_eq!(products[0].review_count, Some(2));
        assert!(mock.requests()[0].url.contains("select=*,reviews:opiniones("));
    }

    #[tokio::test]
    async fn test_store_source_surfaces_status() {
        let mock = Rc::new(MockTransport::new());
        mock.push(Ok(Response::new(503, Default::default(), b"{}".to_vec())));
        let config = StoreConfig::new("https://demo.supabase.co", "anon");
        let store = StoreClient::with_transport(mock, config.url.as_str(), &config.anon_key);

        let err = StoreProductSource::new(store, &config)
            .fetch_products()
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert!(matches!(err, GridError::Fetch(FetchError::HttpError { .. })));
    }

    #[tokio::test]
    async fn test_memory_source_aggregates_and_orders() {
        let source = MemoryProductSource::new(
            vec![product("old", 1), product("new", 20), product("mid", 10)],
            vec![
                review("new", 5, true),
                review("new", 4, true),
                review("new", 1, false),
                review("old", 3, false),
            ],
        );

        let products = source.fetch_products().await.unwrap();
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
        assert_eq!(products[0].average_rating, Some(4.5));
        assert_eq!(products[0].review_count, Some(2));
        assert_eq!(products[2].average_rating, Some(0.0));
        assert_eq!(products[2].review_count, Some(0));
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_memory_source_failure_switch() {
        let source = MemoryProductSource::new(vec![product("a", 1)], Vec::new());
        source.set_failure(Some("offline"));
        assert!(matches!(
            source.fetch_products().await,
            Err(GridError::Unavailable(reason)) if reason == "offline"
        ));

        source.set_failure(None);
        assert_eq!(source.fetch_products().await.unwrap().len(), 1);
    }
}
