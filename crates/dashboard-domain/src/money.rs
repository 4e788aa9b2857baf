//! Money type for representing monetary values.
//!
//! Amounts are integer minor units (cents), never floats.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
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

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Add, failing on currency mismatch or overflow.
    pub fn checked_add(&self, other: Money) -> Result<Money, DomainError> {
        self.ensure_same_currency(&other)?;
        let amount = self
            .amount_cents
            .checked_add(other.amount_cents)
            .ok_or(DomainError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, failing on overflow.
    pub fn checked_mul(&self, quantity: i64) -> Result<Money, DomainError> {
        let amount = self
            .amount_cents
            .checked_mul(quantity)
            .ok_or(DomainError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), DomainError> {
        if self.currency != other.currency {
            return Err(DomainError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        Ok(())
    }

    /// Format for display (e.g., "$49.99").
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places();
        if places == 0 {
            return format!("{}{}", self.currency.symbol(), self.amount_cents);
        }
        let divisor = 10_i64.pow(places);
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.abs();
        format!(
            "{}{}{}.{:0width$}",
            sign,
            self.currency.symbol(),
            abs / divisor,
            abs % divisor,
            width = places as usize
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
