//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    MXN,
    ARS,
    COP,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::MXN => "MXN",
            Currency::ARS => "ARS",
            Currency::COP => "COP",
        }
    }

    /// Get the currency symbol as shown on storefront cards.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::USD | Currency::MXN | Currency::ARS | Currency::COP => "$",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "MXN" => Some(Currency::MXN),
            "ARS" => Some(Currency::ARS),
            "COP" => Some(Currency::COP),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Minor units per major unit. Every supported currency has two decimals.
const CENTS_PER_UNIT: i64 = 100;

/// A monetary value with currency.
///
/// Amounts are stored in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, rounding half away from zero.
    ///
    /// ```
    /// use turbo_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(9.999, Currency::USD);
    /// assert_eq!(price.amount_cents, 1000);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_cents = (amount * CENTS_PER_UNIT as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / CENTS_PER_UNIT as f64
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without symbol, always two decimals (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        let unit = CENTS_PER_UNIT as u64;
        format!("{}{}.{:02}", sign, abs / unit, abs % unit)
    }

    /// Try to add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values, returning None on mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal_rounds() {
        assert_eq!(Money::from_decimal(49.99, Currency::USD).amount_cents, 4999);
        assert_eq!(Money::from_decimal(9.999, Currency::USD).amount_cents, 1000);
    }

    #[test]
    fn test_display_always_two_decimals() {
        assert_eq!(Money::from_decimal(9.0, Currency::USD).display(), "$9.00");
        assert_eq!(Money::from_decimal(9.999, Currency::USD).display(), "$10.00");
        assert_eq!(Money::from_decimal(0.5, Currency::MXN).display(), "$0.50");
        assert_eq!(Money::new(5, Currency::USD).display_amount(), "0.05");
    }

    #[test]
    fn test_display_negative_and_symbols() {
        assert_eq!(Money::new(-150, Currency::USD).display_amount(), "-1.50");
        assert_eq!(Money::new(1200, Currency::EUR).display(), "\u{20ac}12.00");
    }

    #[test]
    fn test_to_decimal() {
        assert!((Money::new(4999, Currency::USD).to_decimal() - 49.99).abs() < 1e-9);
    }

    #[test]
    fn test_try_add_currency_mismatch() {
        let usd = Money::new(1000, Currency::USD);
        let eur = Money::new(1000, Currency::EUR);
        assert_eq!(usd.try_add(&eur), None);
    }

    #[test]
    fn test_try_multiply_overflow() {
        assert_eq!(Money::new(i64::MAX, Currency::USD).try_multiply(2), None);
        assert_eq!(
            Money::new(250, Currency::USD).try_multiply(3),
            Some(Money::new(750, Currency::USD))
        );
    }

    #[test]
    fn test_try_sum() {
        let items = [Money::new(100, Currency::USD), Money::new(250, Currency::USD)];
        assert_eq!(
            Money::try_sum(items.iter(), Currency::USD),
            Some(Money::new(350, Currency::USD))
        );
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("mxn"), Some(Currency::MXN));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
