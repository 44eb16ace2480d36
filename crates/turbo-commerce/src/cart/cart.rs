//! Cart and line item types.

use crate::error::CommerceError;
use crate::ids::{CartId, LineItemId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Items in the cart.
    pub items: Vec<LineItem>,
    /// Cart currency.
    pub currency: Currency,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        let now = current_timestamp();
        Self {
            id: CartId::generate(),
            items: Vec::new(),
            currency,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add an item to the cart.
    ///
    /// Adding a product that is already present increases its quantity.
    /// Returns an error if:
    /// - Quantity is not positive
    /// - Adding would exceed MAX_QUANTITY_PER_ITEM
    /// - The unit price is in another currency
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Result<LineItemId, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: unit_price.currency.code().to_string(),
            });
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;

            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }

            existing.quantity = new_quantity;
            existing.update_total()?;
            self.updated_at = current_timestamp();
            return Ok(existing.id.clone());
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let item = LineItem::new(product_id, product_name, quantity, unit_price)?;
        let id = item.id.clone();
        self.items.push(item);
        self.updated_at = current_timestamp();
        Ok(id)
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the line for a product.
    pub fn get_item_by_product(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        Money::try_sum(self.items.iter().map(|i| &i.total_price), self.currency)
            .ok_or(CommerceError::Overflow)
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Unique line item identifier.
    pub id: LineItemId,
    /// Product ID.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub product_name: String,
    /// Quantity.
    pub quantity: i64,
    /// Unit price.
    pub unit_price: Money,
    /// Total price (unit_price * quantity).
    pub total_price: Money,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Result<Self, CommerceError> {
        let total_price = unit_price
            .try_multiply(quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(Self {
            id: LineItemId::generate(),
            product_id,
            product_name: product_name.into(),
            quantity,
            unit_price,
            total_price,
        })
    }

    /// Update the total price based on quantity.
    pub fn update_total(&mut self) -> Result<(), CommerceError> {
        self.total_price = self
            .unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(())
    }
}

fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
