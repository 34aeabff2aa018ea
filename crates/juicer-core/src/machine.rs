//! The juicer machine: the aggregate root that couples press, filter,
//! tank, and bin into a gated production pipeline.
//!
//! The feed pipeline is all-or-nothing. Both accumulators are
//! pre-validated before either is touched, so a capacity failure
//! leaves tank, bin, and the processing counters exactly as they were.
//! Every failure inside the pipeline is recorded in the `errors`
//! counter exactly once and re-raised unchanged; the machine never
//! swallows an error.
//!
//! All operations are synchronous and run to completion. A service
//! layer that exposes one machine to concurrent callers must wrap each
//! operation in a single mutual-exclusion section, since the press
//! count commits before the tank and bin do.

use juicer_types::{
    FilterState, Fruit, JuiceVolume, MachineId, MachineMetrics, MachineState, MachineStatus,
    PressState,
};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::MachineCapacityConfig;
use crate::error::JuicerError;
use crate::filter::FilterUnit;
use crate::press::PressUnit;
use crate::tank::JuiceTank;
use crate::waste::WasteBin;

/// Juice and waste committed by one successful feed cycle.
///
/// The juice is the filtered volume -- the quantity actually added to
/// the tank and reported in metrics, not the raw press output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedOutcome {
    /// Filtered juice committed to the tank.
    pub juice: JuiceVolume,
    /// Waste in grams committed to the bin.
    pub waste: Decimal,
}

/// The top-level machine state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JuicerMachine {
    id: MachineId,
    state: MachineState,
    press_unit: PressUnit,
    filter_unit: FilterUnit,
    juice_tank: JuiceTank,
    waste_bin: WasteBin,
    metrics: MachineMetrics,
}

impl Default for JuicerMachine {
    fn default() -> Self {
        Self::new(&MachineCapacityConfig::default())
    }
}

impl JuicerMachine {
    /// Create an idle machine with fresh units and empty accumulators.
    ///
    /// A negative configured capacity is treated as zero: the
    /// accumulator exists but every add overflows.
    pub fn new(config: &MachineCapacityConfig) -> Self {
        let tank_capacity =
            JuiceVolume::new(config.tank_capacity_ml).unwrap_or(JuiceVolume::ZERO);
        Self {
            id: MachineId::new(),
            state: MachineState::Idle,
            press_unit: PressUnit::new(),
            filter_unit: FilterUnit::new(),
            juice_tank: JuiceTank::new(tank_capacity),
            waste_bin: WasteBin::new(config.bin_capacity_grams.max(Decimal::ZERO)),
            metrics: MachineMetrics::default(),
        }
    }

    /// Start the machine.
    ///
    /// # Errors
    ///
    /// Returns [`JuicerError::InvalidState`] unless the machine is
    /// idle.
    pub fn start(&mut self) -> Result<(), JuicerError> {
        if self.state != MachineState::Idle {
            return Err(JuicerError::InvalidState {
                operation: "start",
                state: self.state,
            });
        }
        self.state = MachineState::Running;
        info!(machine = %self.id, "machine started");
        Ok(())
    }

    /// Stop the machine.
    ///
    /// # Errors
    ///
    /// Returns [`JuicerError::InvalidState`] unless the machine is
    /// running.
    pub fn stop(&mut self) -> Result<(), JuicerError> {
        if self.state != MachineState::Running {
            return Err(JuicerError::InvalidState {
                operation: "stop",
                state: self.state,
            });
        }
        self.state = MachineState::Stopped;
        info!(machine = %self.id, "machine stopped");
        Ok(())
    }

    /// Feed one fruit through the press -> filter -> tank/bin pipeline.
    ///
    /// Guard failures (machine not running, press faulted, filter
    /// clogged) fail fast: no mutation, no metrics change. Any failure
    /// past the guards increments the `errors` counter exactly once and
    /// propagates unchanged. Tank and bin capacity are both validated
    /// before either commit, so `fruits_processed`, `total_juice_ml`,
    /// and `total_waste_grams` only move on a fully successful cycle.
    ///
    /// # Errors
    ///
    /// State, maintenance, overflow, or validation errors from the
    /// pipeline stages described above.
    pub fn feed_fruit(&mut self, fruit: &Fruit) -> Result<FeedOutcome, JuicerError> {
        if self.state != MachineState::Running {
            return Err(JuicerError::InvalidState {
                operation: "feed_fruit",
                state: self.state,
            });
        }
        if self.press_unit.state() == PressState::Error {
            return Err(JuicerError::PressFaulted);
        }
        if self.filter_unit.state() == FilterState::Clogged {
            return Err(JuicerError::FilterClogged);
        }

        let result = self.run_feed(fruit);
        if let Err(error) = &result {
            self.metrics.errors = self.metrics.errors.saturating_add(1);
            warn!(machine = %self.id, %error, "feed cycle failed");
        }
        result
    }

    fn run_feed(&mut self, fruit: &Fruit) -> Result<FeedOutcome, JuicerError> {
        // The press count commits here; nothing downstream does yet.
        let pressed = self.press_unit.press(fruit)?;
        let filtered = self.filter_unit.filter(pressed.juice)?;

        // Pre-validate both accumulators before touching either.
        if self.juice_tank.would_overflow(filtered) {
            return Err(JuicerError::TankWouldOverflow {
                pending_ml: filtered.milliliters(),
                current_ml: self.juice_tank.current_volume().milliliters(),
                capacity_ml: self.juice_tank.capacity().milliliters(),
            });
        }
        if self.waste_bin.would_overflow(pressed.waste) {
            return Err(JuicerError::BinWouldOverflow {
                pending_grams: pressed.waste,
                current_grams: self.waste_bin.current_waste_grams(),
                capacity_grams: self.waste_bin.capacity_grams(),
            });
        }

        self.juice_tank.add_juice(filtered)?;
        self.waste_bin.add_waste(pressed.waste)?;

        self.metrics.fruits_processed = self.metrics.fruits_processed.saturating_add(1);
        self.metrics.total_juice_ml = self
            .metrics
            .total_juice_ml
            .saturating_add(filtered.milliliters());
        self.metrics.total_waste_grams = self
            .metrics
            .total_waste_grams
            .saturating_add(pressed.waste);

        debug!(
            machine = %self.id,
            fruit = %fruit.id(),
            juice_ml = %filtered.milliliters(),
            waste_grams = %pressed.waste,
            "fruit processed"
        );

        Ok(FeedOutcome {
            juice: filtered,
            waste: pressed.waste,
        })
    }

    /// Run a cleaning cycle. Always succeeds, from any state.
    ///
    /// Empties tank and bin, clears the filter clog, resets the press,
    /// increments `cleaning_cycles`, and returns the machine to idle.
    pub fn clean(&mut self) {
        self.state = MachineState::Cleaning;
        self.juice_tank.empty();
        self.waste_bin.empty();
        self.filter_unit.clean();
        self.press_unit.reset();
        self.metrics.cleaning_cycles = self.metrics.cleaning_cycles.saturating_add(1);
        self.state = MachineState::Idle;
        info!(machine = %self.id, cycles = self.metrics.cleaning_cycles, "cleaning cycle complete");
    }

    /// Force the machine back to idle and reset the press, leaving
    /// tank, bin, and filter untouched.
    ///
    /// Operator recovery after a press fault without a full clean
    /// cycle.
    pub const fn reset_to_idle(&mut self) {
        self.state = MachineState::Idle;
        self.press_unit.reset();
    }

    /// Mark the press unit faulted (operator/diagnostic hook).
    pub const fn trigger_press_error(&mut self) {
        self.press_unit.trigger_error();
    }

    /// Service the press after its service life is exceeded: wear and
    /// press count reset to zero.
    pub fn service_press(&mut self) {
        self.press_unit.perform_maintenance();
        info!(machine = %self.id, "press serviced");
    }

    /// Install a new filter mesh: wear, count, and clog reset to zero.
    pub fn replace_filter(&mut self) {
        self.filter_unit.replace_filter();
        info!(machine = %self.id, "filter replaced");
    }

    /// Side-effect-free snapshot of the whole machine.
    pub fn status(&self) -> MachineStatus {
        MachineStatus {
            state: self.state,
            juice_tank: self.juice_tank.status(),
            waste_bin: self.waste_bin.status(),
            press_unit: self.press_unit.status(),
            filter_unit: self.filter_unit.status(),
            metrics: self.metrics.clone(),
        }
    }

    /// This machine's unique identifier.
    pub const fn id(&self) -> MachineId {
        self.id
    }

    /// Current machine state.
    pub const fn state(&self) -> MachineState {
        self.state
    }

    /// Read-only access to the lifetime counters.
    pub const fn metrics(&self) -> &MachineMetrics {
        &self.metrics
    }

    /// Read-only access to the press unit.
    pub const fn press_unit(&self) -> &PressUnit {
        &self.press_unit
    }

    /// Read-only access to the filter unit.
    pub const fn filter_unit(&self) -> &FilterUnit {
        &self.filter_unit
    }

    /// Read-only access to the juice tank.
    pub const fn juice_tank(&self) -> &JuiceTank {
        &self.juice_tank
    }

    /// Read-only access to the waste bin.
    pub const fn waste_bin(&self) -> &WasteBin {
        &self.waste_bin
    }
}
