//! Product catalog module.
//!
//! Contains the storefront product listing and review aggregate types.

mod product;
mod review;

pub use product::{Product, ProductRow, ReviewAggregate};
pub use review::{RatingSummary, Review};
