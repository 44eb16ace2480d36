//! Shopping cart module.
//!
//! Contains the cart aggregate and the service seam storefront components
//! use to enqueue items.

mod cart;
mod service;

pub use cart::{Cart, LineItem, MAX_QUANTITY_PER_ITEM};
pub use service::{CartService, InMemoryCart};
