//! E-commerce domain types and logic for TurboCommerce.
//!
//! - **Catalog**: Products as listed in the storefront, with review aggregates
//! - **Cart**: Shopping cart with line items, and the `CartService` seam
//!   that storefront components call into
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_commerce::prelude::*;
//!
//! let cart = InMemoryCart::new(Currency::USD);
//! cart.add_item(&product, 1)?;
//! println!("Subtotal: {}", cart.snapshot().subtotal()?.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;

pub use cart::{Cart, CartService, InMemoryCart, LineItem};
pub use catalog::{Product, RatingSummary, Review};
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Product, RatingSummary, Review};

    // Cart
    pub use crate::cart::{Cart, CartService, InMemoryCart, LineItem};
}
