//! The press unit: converts a fruit into raw juice and waste while
//! accumulating mechanical wear.
//!
//! Wear reduces efficiency linearly down to a floor of 50%. Maintenance
//! is a derived condition (press count or wear over the limit), checked
//! at entry -- it is not a persisted state the unit transitions into.
//!
//! The busy `Pressing` state is exited on both the success and failure
//! path of [`PressUnit::press`]; the unit can never be observed stuck.

use juicer_types::{Fruit, JuiceVolume, PressState, PressStatus};
use rust_decimal::Decimal;

use crate::error::JuicerError;

/// Presses at which the unit must be serviced.
const MAX_PRESS_COUNT: u64 = 1000;

/// Juice and waste produced by one press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PressOutput {
    /// Raw juice, already scaled by the press efficiency.
    pub juice: JuiceVolume,
    /// Waste in grams.
    pub waste: Decimal,
}

/// Stateful press unit owned by the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PressUnit {
    state: PressState,
    press_count: u64,
    wear_level: Decimal,
}

impl Default for PressUnit {
    fn default() -> Self {
        Self::new()
    }
}

impl PressUnit {
    /// Create a fresh press with no wear.
    pub const fn new() -> Self {
        Self {
            state: PressState::Idle,
            press_count: 0,
            wear_level: Decimal::ZERO,
        }
    }

    /// Press a fruit into raw juice and waste.
    ///
    /// Wear increases by 0.1 per press (clamped to 100) and the juice
    /// output is scaled by the resulting efficiency. The press count
    /// increments if and only if the operation returns successfully,
    /// and the unit always ends idle regardless of outcome.
    ///
    /// # Errors
    ///
    /// - [`JuicerError::PressNotIdle`] / [`JuicerError::PressFaulted`]
    ///   if the unit is busy or faulted.
    /// - [`JuicerError::MaintenanceRequired`] if the service life is
    ///   exceeded.
    /// - Any error from the fruit's juice/waste derivation.
    pub fn press(&mut self, fruit: &Fruit) -> Result<PressOutput, JuicerError> {
        match self.state {
            PressState::Idle => {}
            PressState::Pressing => return Err(JuicerError::PressNotIdle),
            PressState::Error => return Err(JuicerError::PressFaulted),
        }
        if self.needs_maintenance() {
            return Err(JuicerError::MaintenanceRequired { unit: "press" });
        }

        self.state = PressState::Pressing;
        let outcome = self.run_press(fruit);
        // The busy state is exited on both paths before any error
        // propagates; a failed press leaves the unit idle, not stuck.
        self.state = PressState::Idle;

        let output = outcome?;
        self.press_count = self.press_count.saturating_add(1);
        Ok(output)
    }

    fn run_press(&mut self, fruit: &Fruit) -> Result<PressOutput, JuicerError> {
        self.wear_level = clamp_level(self.wear_level.saturating_add(Decimal::new(1, 1)));
        let juice = fruit.potential_juice_volume()?;
        let waste = fruit.potential_waste()?;
        let juice = juice.scale(self.efficiency())?;
        Ok(PressOutput { juice, waste })
    }

    /// Whether the unit has exceeded its service life.
    pub fn needs_maintenance(&self) -> bool {
        self.press_count >= MAX_PRESS_COUNT || self.wear_level >= Decimal::ONE_HUNDRED
    }

    /// Current efficiency: `max(1 - wear/100, 0.5)`.
    pub fn efficiency(&self) -> Decimal {
        let penalty = self.wear_level.saturating_mul(Decimal::new(1, 2));
        Decimal::ONE.saturating_sub(penalty).max(Decimal::new(5, 1))
    }

    /// Current efficiency as a percentage (50.0 at full wear).
    pub fn efficiency_percentage(&self) -> Decimal {
        self.efficiency().saturating_mul(Decimal::ONE_HUNDRED)
    }

    /// Service the press: wear and press count reset to zero, state
    /// back to idle. The only way the counters ever decrease.
    pub const fn perform_maintenance(&mut self) {
        self.wear_level = Decimal::ZERO;
        self.press_count = 0;
        self.state = PressState::Idle;
    }

    /// Mark the unit faulted; only [`PressUnit::reset`] clears it.
    pub const fn trigger_error(&mut self) {
        self.state = PressState::Error;
    }

    /// Force the unit back to idle. Wear and press count are kept --
    /// a reset is operator recovery, not maintenance.
    pub const fn reset(&mut self) {
        self.state = PressState::Idle;
    }

    /// Current state.
    pub const fn state(&self) -> PressState {
        self.state
    }

    /// Lifetime press count.
    pub const fn press_count(&self) -> u64 {
        self.press_count
    }

    /// Mechanical wear, clamped to [0, 100].
    pub const fn wear_level(&self) -> Decimal {
        self.wear_level
    }

    /// Snapshot of this unit's condition.
    pub fn status(&self) -> PressStatus {
        PressStatus {
            state: self.state,
            press_count: self.press_count,
            wear_level: self.wear_level,
            efficiency_percentage: self.efficiency_percentage(),
        }
    }
}

/// Clamp a wear or clog level to the [0, 100] range.
pub(crate) fn clamp_level(level: Decimal) -> Decimal {
    level.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use juicer_types::{FruitSize, FruitType, RipenessLevel};
    use rust_decimal_macros::dec;

    use super::*;

    fn ripe_orange() -> Fruit {
        Fruit::new(
            FruitType::Orange,
            FruitSize::Medium,
            RipenessLevel::Ripe,
            dec!(150),
        )
        .unwrap()
    }

    #[test]
    fn press_scales_juice_by_efficiency() {
        let mut press = PressUnit::new();
        let output = press.press(&ripe_orange()).unwrap();
        // Raw 28.85 ml scaled by efficiency 0.999 after the first wear
        // increment.
        assert_eq!(output.juice.milliliters(), dec!(28.82));
        assert_eq!(output.waste, dec!(55.5));
        assert_eq!(press.press_count(), 1);
        assert_eq!(press.state(), PressState::Idle);
    }

    #[test]
    fn faulted_press_refuses_to_press() {
        let mut press = PressUnit::new();
        press.trigger_error();
        assert_eq!(press.press(&ripe_orange()), Err(JuicerError::PressFaulted));
        press.reset();
        assert_eq!(press.state(), PressState::Idle);
        assert!(press.press(&ripe_orange()).is_ok());
    }

    #[test]
    fn thousand_presses_wear_down_to_half_efficiency() {
        let mut press = PressUnit::new();
        let fruit = ripe_orange();
        for _ in 0..1000 {
            press.press(&fruit).unwrap();
        }
        assert_eq!(press.press_count(), 1000);
        assert_eq!(press.wear_level(), Decimal::ONE_HUNDRED);
        assert_eq!(press.efficiency_percentage(), dec!(50.0));
        // Service life is now exceeded; the next press is refused.
        assert_eq!(
            press.press(&fruit),
            Err(JuicerError::MaintenanceRequired { unit: "press" }),
        );
    }

    #[test]
    fn wear_is_clamped_at_one_hundred() {
        let mut press = PressUnit::new();
        press.wear_level = dec!(99.95);
        press.press(&ripe_orange()).unwrap();
        assert_eq!(press.wear_level(), dec!(100));
    }
}
