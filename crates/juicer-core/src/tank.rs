//! The juice tank: a bounded accumulator of filtered juice.
//!
//! Overflow is checked before any mutation. The tank never holds more
//! than its capacity and is never rolled back, because nothing is
//! committed until the check has passed.

use juicer_types::{JuiceVolume, TankStatus};
use rust_decimal::Decimal;

use crate::error::JuicerError;

/// Bounded juice accumulator owned by the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JuiceTank {
    capacity: JuiceVolume,
    current_volume: JuiceVolume,
    juice_count: u64,
}

impl JuiceTank {
    /// Create an empty tank with the given capacity.
    pub const fn new(capacity: JuiceVolume) -> Self {
        Self {
            capacity,
            current_volume: JuiceVolume::ZERO,
            juice_count: 0,
        }
    }

    /// Add a volume of juice to the tank.
    ///
    /// # Errors
    ///
    /// Returns [`JuicerError::TankWouldOverflow`] if the post-add
    /// volume would exceed capacity. The check runs before any
    /// mutation.
    pub fn add_juice(&mut self, volume: JuiceVolume) -> Result<(), JuicerError> {
        if self.would_overflow(volume) {
            return Err(JuicerError::TankWouldOverflow {
                pending_ml: volume.milliliters(),
                current_ml: self.current_volume.milliliters(),
                capacity_ml: self.capacity.milliliters(),
            });
        }
        self.current_volume = self.current_volume.checked_add(volume)?;
        self.juice_count = self.juice_count.saturating_add(1);
        Ok(())
    }

    /// Whether adding `volume` would exceed the tank capacity.
    ///
    /// Arithmetic overflow counts as overflowing the tank.
    pub fn would_overflow(&self, volume: JuiceVolume) -> bool {
        self.current_volume
            .milliliters()
            .checked_add(volume.milliliters())
            .is_none_or(|sum| sum > self.capacity.milliliters())
    }

    /// Drain the tank completely. The juice count is kept -- it tracks
    /// lifetime additions, not contents.
    pub const fn empty(&mut self) {
        self.current_volume = JuiceVolume::ZERO;
    }

    /// Whether the tank is at (or beyond) capacity.
    pub fn is_full(&self) -> bool {
        self.current_volume.milliliters() >= self.capacity.milliliters()
    }

    /// Fill level as a percentage, rounded to 2 decimal places.
    ///
    /// A zero-capacity tank reports 0.0 rather than dividing by zero.
    pub fn percentage_full(&self) -> Decimal {
        self.current_volume
            .milliliters()
            .checked_div(self.capacity.milliliters())
            .and_then(|fraction| fraction.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(Decimal::ZERO, |percent| percent.round_dp(2))
    }

    /// Tank capacity.
    pub const fn capacity(&self) -> JuiceVolume {
        self.capacity
    }

    /// Current contents.
    pub const fn current_volume(&self) -> JuiceVolume {
        self.current_volume
    }

    /// Lifetime number of juice additions.
    pub const fn juice_count(&self) -> u64 {
        self.juice_count
    }

    /// Snapshot of the tank levels.
    pub fn status(&self) -> TankStatus {
        TankStatus {
            volume: self.current_volume,
            capacity: self.capacity,
            percentage: self.percentage_full(),
        }
    }
}
