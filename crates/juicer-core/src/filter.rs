//! The filter unit: strains raw juice, accumulating clog and mesh wear.
//!
//! Clogging is sticky. A filter pass that pushes the clog level over
//! the threshold still succeeds, but leaves the unit in the `Clogged`
//! state until it is cleaned -- it does not return to idle on its own.
//! Mesh wear is separate from clog and is only reset by replacing the
//! filter.

use juicer_types::{FilterState, FilterStatus, JuiceVolume};
use rust_decimal::Decimal;

use crate::error::JuicerError;
use crate::press::clamp_level;

/// Filter passes at which the mesh must be replaced.
const MAX_FILTER_COUNT: u64 = 500;

/// Stateful filter unit owned by the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterUnit {
    state: FilterState,
    filter_count: u64,
    clog_level: Decimal,
    wear_level: Decimal,
}

impl Default for FilterUnit {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterUnit {
    /// Clog level at which the unit clogs and needs cleaning.
    const CLOG_THRESHOLD: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

    /// Create a fresh filter with no clog or wear.
    pub const fn new() -> Self {
        Self {
            state: FilterState::Idle,
            filter_count: 0,
            clog_level: Decimal::ZERO,
            wear_level: Decimal::ZERO,
        }
    }

    /// Filter a raw juice volume, returning the filtered volume.
    ///
    /// Each pass increments the filter count, adds 0.2 wear and 5 clog
    /// (both clamped to 100), and scales the volume by the filtration
    /// efficiency. If the clog level reaches the threshold the unit
    /// transitions to `Clogged` and stays there even though this call
    /// succeeds; otherwise it returns to idle.
    ///
    /// # Errors
    ///
    /// - [`JuicerError::FilterNotIdle`] / [`JuicerError::FilterClogged`]
    ///   if the unit is busy or clogged.
    /// - [`JuicerError::FilterWornOut`] if the mesh is past its service
    ///   life.
    pub fn filter(&mut self, juice: JuiceVolume) -> Result<JuiceVolume, JuicerError> {
        match self.state {
            FilterState::Idle => {}
            FilterState::Filtering => return Err(JuicerError::FilterNotIdle),
            FilterState::Clogged => return Err(JuicerError::FilterClogged),
        }
        if self.needs_replacement() {
            return Err(JuicerError::FilterWornOut);
        }

        self.state = FilterState::Filtering;
        let outcome = self.run_filter(juice);
        // Sticky clog: a pass that crosses the threshold parks the unit
        // in Clogged even on success. Anything else returns to idle.
        self.state = if self.needs_cleaning() {
            FilterState::Clogged
        } else {
            FilterState::Idle
        };
        outcome
    }

    fn run_filter(&mut self, juice: JuiceVolume) -> Result<JuiceVolume, JuicerError> {
        self.filter_count = self.filter_count.saturating_add(1);
        self.wear_level = clamp_level(self.wear_level.saturating_add(Decimal::new(2, 1)));
        let filtered = juice.scale(self.efficiency())?;
        self.clog_level = clamp_level(self.clog_level.saturating_add(Decimal::from(5)));
        Ok(filtered)
    }

    /// Filtration efficiency: `max(1 - wear/200, 0.8)`.
    pub fn efficiency(&self) -> Decimal {
        let penalty = self.wear_level.saturating_mul(Decimal::new(5, 3));
        Decimal::ONE.saturating_sub(penalty).max(Decimal::new(8, 1))
    }

    /// Whether the clog level has crossed the cleaning threshold.
    pub fn needs_cleaning(&self) -> bool {
        self.clog_level >= Self::CLOG_THRESHOLD
    }

    /// Whether the mesh has exceeded its service life.
    pub fn needs_replacement(&self) -> bool {
        self.filter_count >= MAX_FILTER_COUNT || self.wear_level >= Decimal::ONE_HUNDRED
    }

    /// Clear the clog and force the unit back to idle. Mesh wear and
    /// the filter count are kept.
    pub const fn clean(&mut self) {
        self.clog_level = Decimal::ZERO;
        self.state = FilterState::Idle;
    }

    /// Install a new mesh: wear, count, and clog all reset to zero.
    pub const fn replace_filter(&mut self) {
        self.wear_level = Decimal::ZERO;
        self.filter_count = 0;
        self.clog_level = Decimal::ZERO;
        self.state = FilterState::Idle;
    }

    /// Current state.
    pub const fn state(&self) -> FilterState {
        self.state
    }

    /// Lifetime filter count (reset only by replacement).
    pub const fn filter_count(&self) -> u64 {
        self.filter_count
    }

    /// Accumulated clog, clamped to [0, 100].
    pub const fn clog_level(&self) -> Decimal {
        self.clog_level
    }

    /// Mesh wear, clamped to [0, 100].
    pub const fn wear_level(&self) -> Decimal {
        self.wear_level
    }

    /// Snapshot of this unit's condition.
    pub fn status(&self) -> FilterStatus {
        FilterStatus {
            state: self.state,
            filter_count: self.filter_count,
            clog_level: self.clog_level,
            needs_cleaning: self.needs_cleaning(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn liter() -> JuiceVolume {
        JuiceVolume::new(dec!(1000)).unwrap()
    }

    #[test]
    fn filter_applies_efficiency_and_returns_to_idle() {
        let mut filter = FilterUnit::new();
        let filtered = filter.filter(liter()).unwrap();
        // Wear 0.2 -> efficiency 0.999.
        assert_eq!(filtered.milliliters(), dec!(999));
        assert_eq!(filter.state(), FilterState::Idle);
        assert_eq!(filter.filter_count(), 1);
        assert_eq!(filter.clog_level(), dec!(5));
    }

    #[test]
    fn sixteen_passes_clog_the_filter() {
        let mut filter = FilterUnit::new();
        for _ in 0..16 {
            filter.filter(liter()).unwrap();
        }
        // Clog 5 per pass: the 16th pass reaches 80 and sticks.
        assert_eq!(filter.clog_level(), dec!(80));
        assert_eq!(filter.state(), FilterState::Clogged);
        assert!(filter.needs_cleaning());
        // Sticky: the clog does not clear on its own.
        assert_eq!(filter.filter(liter()), Err(JuicerError::FilterClogged));
    }

    #[test]
    fn clean_clears_clog_but_keeps_wear() {
        let mut filter = FilterUnit::new();
        for _ in 0..16 {
            filter.filter(liter()).unwrap();
        }
        filter.clean();
        assert_eq!(filter.state(), FilterState::Idle);
        assert_eq!(filter.clog_level(), Decimal::ZERO);
        assert_eq!(filter.wear_level(), dec!(3.2));
        assert_eq!(filter.filter_count(), 16);
    }

    #[test]
    fn replacement_resets_everything() {
        let mut filter = FilterUnit::new();
        for _ in 0..16 {
            filter.filter(liter()).unwrap();
        }
        filter.replace_filter();
        assert_eq!(filter.filter_count(), 0);
        assert_eq!(filter.wear_level(), Decimal::ZERO);
        assert_eq!(filter.clog_level(), Decimal::ZERO);
    }

    #[test]
    fn worn_out_mesh_is_refused() {
        let mut filter = FilterUnit::new();
        filter.filter_count = MAX_FILTER_COUNT;
        assert_eq!(filter.filter(liter()), Err(JuicerError::FilterWornOut));
    }
}
