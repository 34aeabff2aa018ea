//! The waste bin: a bounded accumulator of peel and pulp in grams.
//!
//! Same protocol as the juice tank: capacity is pre-checked, nothing
//! is committed on a failed add. The bin additionally rejects
//! non-positive amounts -- a press always produces some waste, so a
//! zero here means the caller is broken.

use juicer_types::BinStatus;
use rust_decimal::Decimal;

use crate::error::JuicerError;

/// Bounded waste accumulator owned by the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WasteBin {
    capacity_grams: Decimal,
    current_waste_grams: Decimal,
    waste_count: u64,
}

impl WasteBin {
    /// Create an empty bin with the given capacity in grams.
    pub const fn new(capacity_grams: Decimal) -> Self {
        Self {
            capacity_grams,
            current_waste_grams: Decimal::ZERO,
            waste_count: 0,
        }
    }

    /// Add a waste amount in grams.
    ///
    /// # Errors
    ///
    /// - [`JuicerError::WasteNotPositive`] if `grams` is zero or
    ///   negative.
    /// - [`JuicerError::BinWouldOverflow`] if the post-add amount would
    ///   exceed capacity. The check runs before any mutation.
    pub fn add_waste(&mut self, grams: Decimal) -> Result<(), JuicerError> {
        if grams.is_sign_negative() || grams.is_zero() {
            return Err(JuicerError::WasteNotPositive(grams));
        }
        if self.would_overflow(grams) {
            return Err(JuicerError::BinWouldOverflow {
                pending_grams: grams,
                current_grams: self.current_waste_grams,
                capacity_grams: self.capacity_grams,
            });
        }
        self.current_waste_grams = self
            .current_waste_grams
            .checked_add(grams)
            .ok_or(JuicerError::ArithmeticOverflow)?;
        self.waste_count = self.waste_count.saturating_add(1);
        Ok(())
    }

    /// Whether adding `grams` would exceed the bin capacity.
    ///
    /// Arithmetic overflow counts as overflowing the bin.
    pub fn would_overflow(&self, grams: Decimal) -> bool {
        self.current_waste_grams
            .checked_add(grams)
            .is_none_or(|sum| sum > self.capacity_grams)
    }

    /// Empty the bin. The waste count is kept -- it tracks lifetime
    /// additions, not contents.
    pub const fn empty(&mut self) {
        self.current_waste_grams = Decimal::ZERO;
    }

    /// Whether the bin is at (or beyond) capacity.
    pub fn is_full(&self) -> bool {
        self.current_waste_grams >= self.capacity_grams
    }

    /// Fill level as a percentage, rounded to 2 decimal places.
    ///
    /// A zero-capacity bin reports 0.0 rather than dividing by zero.
    pub fn percentage_full(&self) -> Decimal {
        self.current_waste_grams
            .checked_div(self.capacity_grams)
            .and_then(|fraction| fraction.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(Decimal::ZERO, |percent| percent.round_dp(2))
    }

    /// Bin capacity in grams.
    pub const fn capacity_grams(&self) -> Decimal {
        self.capacity_grams
    }

    /// Current waste weight in grams.
    pub const fn current_waste_grams(&self) -> Decimal {
        self.current_waste_grams
    }

    /// Lifetime number of waste additions.
    pub const fn waste_count(&self) -> u64 {
        self.waste_count
    }

    /// Snapshot of the bin levels.
    pub fn status(&self) -> BinStatus {
        BinStatus {
            waste_grams: self.current_waste_grams,
            capacity_grams: self.capacity_grams,
            percentage: self.percentage_full(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn overflow_is_checked_before_mutation() {
        let mut bin = WasteBin::new(dec!(100));
        bin.add_waste(dec!(90)).unwrap();
        let err = bin.add_waste(dec!(10.01)).unwrap_err();
        assert_eq!(
            err,
            JuicerError::BinWouldOverflow {
                pending_grams: dec!(10.01),
                current_grams: dec!(90),
                capacity_grams: dec!(100),
            },
        );
        assert_eq!(bin.current_waste_grams(), dec!(90));
        assert_eq!(bin.waste_count(), 1);
    }

    #[test]
    fn rejects_non_positive_amounts() {
        let mut bin = WasteBin::new(dec!(100));
        assert_eq!(
            bin.add_waste(Decimal::ZERO),
            Err(JuicerError::WasteNotPositive(Decimal::ZERO)),
        );
        assert_eq!(
            bin.add_waste(dec!(-5)),
            Err(JuicerError::WasteNotPositive(dec!(-5))),
        );
    }

    #[test]
    fn zero_capacity_reports_zero_percent() {
        let bin = WasteBin::new(Decimal::ZERO);
        assert_eq!(bin.percentage_full(), Decimal::ZERO);
    }

    #[test]
    fn percentage_tracks_fill_level() {
        let mut bin = WasteBin::new(dec!(2000));
        bin.add_waste(dec!(55.5)).unwrap();
        assert_eq!(bin.percentage_full(), dec!(2.78));
        bin.empty();
        assert_eq!(bin.percentage_full(), Decimal::ZERO);
        assert_eq!(bin.waste_count(), 1);
    }
}
