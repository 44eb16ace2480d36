//! Grid error types.

use edge_core::ConfigError;
use turbo_commerce::{CommerceError, ProductId};
use turbo_data::FetchError;

/// Errors raised by the product grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The store request failed (network, status or decode).
    #[error("Product fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// A non-HTTP source could not produce rows.
    #[error("Product source unavailable: {0}")]
    Unavailable(String),

    /// The cart rejected the item.
    #[error("Cart rejected item: {0}")]
    Cart(#[from] CommerceError),

    /// An action referenced a product that is not in the grid.
    #[error("Product not in grid: {0}")]
    UnknownProduct(ProductId),

    #[error("Invalid grid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl GridError {
    /// HTTP status of the failed store response, if the store answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            GridError::Fetch(e) => e.status(),
            _ => None,
        }
    }
}
