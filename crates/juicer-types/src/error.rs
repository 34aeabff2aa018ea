//! Validation errors for value-type construction.
//!
//! Every fallible constructor in this crate returns [`ValidationError`]
//! through the standard [`Result`] type alias. The domain crate wraps
//! this into its own error enum.

use rust_decimal::Decimal;

/// Errors raised when a value type is constructed from malformed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A fruit size tag was not one of `small`, `medium`, `large`.
    #[error("unknown fruit size: {0}")]
    UnknownFruitSize(String),

    /// A ripeness tag was not one of `unripe`, `ripe`, `overripe`.
    #[error("unknown ripeness level: {0}")]
    UnknownRipeness(String),

    /// A fruit type tag was not one of `orange`, `lemon`, `grapefruit`.
    #[error("unknown fruit type: {0}")]
    UnknownFruitType(String),

    /// A juice volume was constructed with a negative milliliter amount.
    #[error("volume cannot be negative: {0} ml")]
    NegativeVolume(Decimal),

    /// A fruit was constructed with a zero or negative weight.
    #[error("fruit weight must be positive: {0} g")]
    NonPositiveWeight(Decimal),

    /// Checked decimal arithmetic overflowed.
    #[error("arithmetic overflow in value calculation")]
    ArithmeticOverflow,
}
