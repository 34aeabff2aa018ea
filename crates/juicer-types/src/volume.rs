//! The [`JuiceVolume`] quantity: non-negative milliliters with checked
//! arithmetic.
//!
//! A volume is rounded to two decimal places at construction and can
//! never be observed negative. Subtraction floors at zero rather than
//! failing, matching how a tank drains: you cannot pour out more than
//! is there.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A non-negative juice quantity in milliliters, precise to 2 decimal
/// places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct JuiceVolume(Decimal);

impl JuiceVolume {
    /// The empty volume.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a volume from a milliliter amount.
    ///
    /// The amount is rounded to 2 decimal places.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NegativeVolume`] if `milliliters` is
    /// negative.
    pub fn new(milliliters: Decimal) -> Result<Self, ValidationError> {
        if milliliters.is_sign_negative() && !milliliters.is_zero() {
            return Err(ValidationError::NegativeVolume(milliliters));
        }
        Ok(Self(milliliters.round_dp(2)))
    }

    /// The milliliter amount.
    pub const fn milliliters(self) -> Decimal {
        self.0
    }

    /// Whether this volume is exactly zero.
    pub const fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Add another volume.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ArithmeticOverflow`] if the checked
    /// addition fails.
    pub fn checked_add(self, other: Self) -> Result<Self, ValidationError> {
        let sum = self
            .0
            .checked_add(other.0)
            .ok_or(ValidationError::ArithmeticOverflow)?;
        Self::new(sum)
    }

    /// Subtract another volume, flooring at zero.
    ///
    /// A volume can never go negative; draining more than is present
    /// leaves the empty volume.
    pub fn saturating_sub(self, other: Self) -> Self {
        if other.0 >= self.0 {
            Self::ZERO
        } else {
            Self(self.0.saturating_sub(other.0))
        }
    }

    /// Scale this volume by a factor (e.g. a unit's efficiency).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ArithmeticOverflow`] if the checked
    /// multiplication fails, or [`ValidationError::NegativeVolume`] if
    /// the factor is negative.
    pub fn scale(self, factor: Decimal) -> Result<Self, ValidationError> {
        let scaled = self
            .0
            .checked_mul(factor)
            .ok_or(ValidationError::ArithmeticOverflow)?;
        Self::new(scaled)
    }
}

impl TryFrom<Decimal> for JuiceVolume {
    type Error = ValidationError;

    fn try_from(milliliters: Decimal) -> Result<Self, Self::Error> {
        Self::new(milliliters)
    }
}

impl From<JuiceVolume> for Decimal {
    fn from(volume: JuiceVolume) -> Self {
        volume.0
    }
}

impl core::fmt::Display for JuiceVolume {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ml", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn rejects_negative_amounts() {
        let result = JuiceVolume::new(dec!(-0.01));
        assert_eq!(result, Err(ValidationError::NegativeVolume(dec!(-0.01))));
    }

    #[test]
    fn rounds_to_two_decimal_places() {
        let volume = JuiceVolume::new(dec!(28.84615)).unwrap();
        assert_eq!(volume.milliliters(), dec!(28.85));
    }

    #[test]
    fn addition_accumulates() {
        let a = JuiceVolume::new(dec!(10.5)).unwrap();
        let b = JuiceVolume::new(dec!(2.25)).unwrap();
        assert_eq!(a.checked_add(b).unwrap().milliliters(), dec!(12.75));
    }

    #[test]
    fn subtraction_floors_at_zero() {
        let small = JuiceVolume::new(dec!(5)).unwrap();
        let large = JuiceVolume::new(dec!(9)).unwrap();
        assert_eq!(small.saturating_sub(large), JuiceVolume::ZERO);
        assert_eq!(large.saturating_sub(small).milliliters(), dec!(4));
    }

    #[test]
    fn scaling_applies_factor_and_rounds() {
        let volume = JuiceVolume::new(dec!(100)).unwrap();
        let scaled = volume.scale(dec!(0.999)).unwrap();
        assert_eq!(scaled.milliliters(), dec!(99.90));
    }

    #[test]
    fn displays_with_unit() {
        let volume = JuiceVolume::new(dec!(12.5)).unwrap();
        assert_eq!(volume.to_string(), "12.5 ml");
    }

    #[test]
    fn deserialization_rejects_negative_volume() {
        let result: Result<JuiceVolume, _> = serde_json::from_str("\"-3.5\"");
        assert!(result.is_err());
    }
}
