//! Storefront product listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// A product as listed in the storefront, with its review aggregate.
///
/// Rows are owned by the store; this is a read-only copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "ProductRow")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the storefront currency.
    pub price: f64,
    /// Image URLs, primary first.
    pub images: Vec<String>,
    pub stock: i64,
    pub created_at: DateTime<Utc>,
    /// Mean of approved review ratings (0-5). `None` when the store sent none.
    pub average_rating: Option<f64>,
    /// Number of approved reviews.
    pub review_count: Option<u32>,
}

impl Product {
    /// URL of the first image.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Average rating with a missing value read as zero.
    pub fn rating(&self) -> f64 {
        self.average_rating.unwrap_or(0.0)
    }

    /// Review count with a missing value read as zero.
    pub fn reviews(&self) -> u32 {
        self.review_count.unwrap_or(0)
    }

    /// Whether at least one unit can be sold.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Price as `Money` in the given currency.
    pub fn price_in(&self, currency: Currency) -> Money {
        Money::from_decimal(self.price, currency)
    }
}

/// Aggregate embedded by the store for `reviews(rating.avg(),count())`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ReviewAggregate {
    #[serde(default)]
    pub avg: Option<f64>,
    #[serde(default)]
    pub count: u32,
}

/// Wire shape of a product row.
///
/// Stores either flatten the aggregate into `average_rating`/`review_count`
/// or embed it as a one-element `reviews` array; both are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub stock: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub reviews: Option<Vec<ReviewAggregate>>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        let embedded = row
            .reviews
            .as_ref()
            .and_then(|aggregates| aggregates.first().cloned());

        let (average_rating, review_count) = match (row.average_rating, row.review_count, embedded) {
            (None, None, Some(agg)) => (Some(agg.avg.unwrap_or(0.0)), Some(agg.count)),
            (avg, count, _) => (avg, count),
        };

        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            images: row.images.unwrap_or_default(),
            stock: row.stock,
            created_at: row.created_at,
            average_rating,
            review_count,
        }
    }
}
