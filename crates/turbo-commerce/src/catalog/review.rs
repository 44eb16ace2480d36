//! Review records and the per-product rating aggregate.

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;

/// A customer review. Only approved reviews count toward ratings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub product_id: ProductId,
    /// Star rating, 1-5.
    pub rating: u8,
    #[serde(default)]
    pub approved: bool,
}

/// Average rating and count over a product's approved reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatingSummary {
    /// Mean rating, 0 when there are no approved reviews.
    pub average_rating: f64,
    pub review_count: u32,
}

impl RatingSummary {
    /// Aggregate the approved reviews belonging to `product_id`.
    pub fn for_product<'a>(
        product_id: &ProductId,
        reviews: impl IntoIterator<Item = &'a Review>,
    ) -> Self {
        let (sum, count) = reviews
            .into_iter()
            .filter(|r| r.approved && &r.product_id == product_id)
            .fold((0u64, 0u32), |(sum, count), r| (sum + r.rating as u64, count + 1));

        if count == 0 {
            return Self::default();
        }

        Self {
            average_rating: sum as f64 / count as f64,
            review_count: count,
        }
    }
}
