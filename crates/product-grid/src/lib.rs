//! Storefront product grid.
//!
//! Loads the catalog with its approved-review ratings, keeps the view
//! state (`loading`, `error`, products), and renders product cards with a
//! five-star rating and an add-to-cart action.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use product_grid::prelude::*;
//!
//! let source = Rc::new(StoreProductSource::from_config(&config.store));
//! let cart = Rc::new(InMemoryCart::new(Currency::USD));
//! let mut grid = ProductGrid::from_config(source, cart, logger, &config)?;
//!
//! let _ = grid.mount().await;
//! let html = grid.render();
//! ```

pub mod card;
pub mod debounce;
pub mod error;
pub mod grid;
pub mod labels;
pub mod render;
pub mod source;
pub mod stars;
pub mod state;

pub use card::{add_to_cart, CardAction, CardOptions, ClickEvent, ProductCard, ADD_TO_CART_FIELD};
pub use debounce::{debounce, DebounceInput, Debounced};
pub use error::GridError;
pub use grid::ProductGrid;
pub use source::{catalog_query, MemoryProductSource, ProductSource, StoreProductSource};
pub use stars::{render_stars, star_glyphs, StarGlyph};
pub use state::{Phase, SortBy, ViewState};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::card::{CardOptions, ClickEvent};
    pub use crate::error::GridError;
    pub use crate::grid::ProductGrid;
    pub use crate::source::{MemoryProductSource, ProductSource, StoreProductSource};
    pub use crate::state::{Phase, ViewState};

    pub use turbo_commerce::{CartService, Currency, InMemoryCart, Product, ProductId};
}
