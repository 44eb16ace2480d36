//! Product card view and its add-to-cart action.

use edge_core::{ConfigError, GridConfig};
use turbo_commerce::{CartService, CommerceError, Currency, Product, ProductId};

use crate::labels;
use crate::render::escape_html;
use crate::stars::render_stars;

/// Form field carrying the product id of an add-to-cart submission.
pub const ADD_TO_CART_FIELD: &str = "product_id";

/// Per-grid card settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CardOptions {
    pub currency: Currency,
    /// Prefix of the product detail route; the product id is appended.
    pub detail_route_prefix: String,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            currency: Currency::USD,
            detail_route_prefix: "/product/".to_string(),
        }
    }
}

impl CardOptions {
    pub fn from_config(config: &GridConfig) -> Result<Self, ConfigError> {
        let currency = Currency::from_code(&config.currency).ok_or_else(|| ConfigError::Invalid {
            key: "currency",
            value: config.currency.clone(),
        })?;
        Ok(Self {
            currency,
            detail_route_prefix: config.detail_route_prefix.clone(),
        })
    }

    /// Detail page route for a product.
    pub fn detail_href(&self, id: &ProductId) -> String {
        format!("{}{}", self.detail_route_prefix, id)
    }
}

/// What a card offers below the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    AddToCart,
    OutOfStock,
}

/// Display-ready card for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: ProductId,
    pub href: String,
    pub image: Option<String>,
    pub name: String,
    /// Price with symbol and exactly two decimals.
    pub price: String,
    pub rating: Option<f64>,
    /// "(4.5) 2 reseñas" or "Sin calificaciones".
    pub rating_text: String,
    pub action: CardAction,
}

impl ProductCard {
    pub fn new(product: &Product, options: &CardOptions) -> Self {
        Self {
            id: product.id.clone(),
            href: options.detail_href(&product.id),
            image: product.primary_image().map(str::to_string),
            name: product.name.clone(),
            price: product.price_in(options.currency).display(),
            rating: product.average_rating,
            rating_text: labels::rating_summary(product.average_rating, product.review_count),
            action: if product.in_stock() {
                CardAction::AddToCart
            } else {
                CardAction::OutOfStock
            },
        }
    }

    pub fn render(&self) -> String {
        let image = match &self.image {
            Some(src) => format!(
                r#"<img src="{}" alt="{}" loading="lazy">"#,
                escape_html(src),
                escape_html(&self.name)
            ),
            None => r#"<div class="image-placeholder"></div>"#.to_string(),
        };

        let action = match self.action {
            CardAction::AddToCart => format!(
                r#"<form method="POST" class="add-to-cart-form">
        <input type="hidden" name="{}" value="{}">
        <button type="submit" class="add-to-cart" data-action="add-to-cart">{}</button>
    </form>"#,
                ADD_TO_CART_FIELD,
                escape_html(self.id.as_str()),
                labels::ADD_TO_CART
            ),
            CardAction::OutOfStock => format!(
                r#"<span class="out-of-stock">{}</span>"#,
                labels::OUT_OF_STOCK
            ),
        };

        format!(
            r#"<article class="product-card" data-product-id="{}">
    <a href="{}" class="product-link">
        <div class="product-image">{}</div>
        <div class="product-info">
            <h3 class="product-title">{}</h3>
            <div class="product-price">{}</div>
            <div class="product-rating">
                {}
                <span class="rating-summary">{}</span>
            </div>
        </div>
    </a>
    {}
</article>"#,
            escape_html(self.id.as_str()),
            escape_html(&self.href),
            image,
            escape_html(&self.name),
            self.price,
            render_stars(self.rating),
            escape_html(&self.rating_text),
            action
        )
    }
}

/// A click on a card control.
///
/// Handling the add-to-cart click cancels the browser default, so the card's
/// detail link is never followed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Handle the add-to-cart control of `product`'s card.
///
/// Always cancels navigation. Enqueues one unit when the product is in
/// stock and returns whether the cart was called.
pub fn add_to_cart(
    cart: &dyn CartService,
    product: &Product,
    event: &mut ClickEvent,
) -> Result<bool, CommerceError> {
    event.prevent_default();
    if !product.in_stock() {
        return Ok(false);
    }
    cart.add_item(product, 1)?;
    Ok(true)
}
