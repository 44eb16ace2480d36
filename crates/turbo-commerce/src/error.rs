//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in e-commerce operations.
#[derive(Error, Debug, PartialEq)]
pub enum CommerceError {
    /// Product cannot be sold right now.
    #[error("Product out of stock: {0}")]
    OutOfStock(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),
}
