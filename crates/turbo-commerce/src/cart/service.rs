//! Cart service seam.

use std::cell::RefCell;

use crate::cart::Cart;
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::money::Currency;

/// External holder of the items a shopper intends to buy.
///
/// Storefront components receive an implementation explicitly instead of
/// reaching for a global store. Calls are synchronous.
pub trait CartService {
    /// Enqueue `quantity` units of `product`.
    fn add_item(&self, product: &Product, quantity: i64) -> Result<(), CommerceError>;
}

/// Process-local cart. Nothing is persisted.
#[derive(Debug)]
pub struct InMemoryCart {
    cart: RefCell<Cart>,
}

impl InMemoryCart {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            cart: RefCell::new(Cart::new(currency)),
        }
    }

    /// Copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.cart.borrow().clone()
    }
}

impl CartService for InMemoryCart {
    fn add_item(&self, product: &Product, quantity: i64) -> Result<(), CommerceError> {
        if !product.in_stock() {
            return Err(CommerceError::OutOfStock(product.id.to_string()));
        }
        let mut cart = self.cart.borrow_mut();
        let currency = cart.currency;
        cart.add_item(
            product.id.clone(),
            product.name.clone(),
            quantity,
            product.price_in(currency),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::money::Money;

    fn product(id: &str, price: f64, stock: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Producto {}", id),
            price,
            images: Vec::new(),
            stock,
            created_at: chrono::Utc::now(),
            average_rating: None,
            review_count: None,
        }
    }

    #[test]
    fn test_add_item_prices_in_cart_currency() {
        let cart = InMemoryCart::new(Currency::MXN);
        cart.add_item(&product("a", 12.5, 3), 1).unwrap();
        cart.add_item(&product("a", 12.5, 3), 1).unwrap();

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.item_count(), 2);
        assert_eq!(snapshot.subtotal().unwrap(), Money::new(2500, Currency::MXN));
    }

    #[test]
    fn test_out_of_stock_rejected() {
        let cart = InMemoryCart::new(Currency::USD);
        let result = cart.add_item(&product("b", 1.0, 0), 1);
        assert_eq!(result, Err(CommerceError::OutOfStock("b".to_string())));
        assert!(cart.snapshot().is_empty());
    }
}
