//! Domain error types.

use thiserror::Error;

/// Errors that can occur in merchant domain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Unrecognised status or sort name.
    #[error("Unknown {field}: {value}")]
    UnknownValue { field: &'static str, value: String },
}
