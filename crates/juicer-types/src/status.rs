//! State enums, lifetime counters, and the read-only status snapshot.
//!
//! [`MachineStatus`] is the projection the HTTP and CLI front ends
//! serve; it is built by the machine and carries no behavior. The
//! counters in [`MachineMetrics`] are cumulative lifetime totals and
//! monotonically non-decreasing (`cleaning_cycles` only ever grows;
//! nothing is reset by a cleaning cycle).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::volume::JuiceVolume;

// ---------------------------------------------------------------------------
// State enums
// ---------------------------------------------------------------------------

/// Top-level state of the juicer machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineState {
    /// Ready to start; the initial state.
    Idle,
    /// Accepts fruit through the feed pipeline.
    Running,
    /// Transient state held while a cleaning cycle runs.
    Cleaning,
    /// Faulted; only `clean` or `reset_to_idle` leave this state.
    Error,
    /// Stopped by the operator; restart via `clean` then `start`.
    Stopped,
}

impl MachineState {
    /// Lowercase tag used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Cleaning => "cleaning",
            Self::Error => "error",
            Self::Stopped => "stopped",
        }
    }
}

impl core::fmt::Display for MachineState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of the press unit.
///
/// `Pressing` is only ever observable mid-operation; the press is
/// guaranteed to return to `Idle` on both the success and failure exit
/// of a press. `Error` is entered only through the operator fault hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressState {
    /// Ready to press.
    Idle,
    /// Busy pressing a fruit.
    Pressing,
    /// Faulted; cleared by a reset.
    Error,
}

impl PressState {
    /// Lowercase tag used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pressing => "pressing",
            Self::Error => "error",
        }
    }
}

impl core::fmt::Display for PressState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of the filter unit.
///
/// `Clogged` is sticky: a successful filter pass that crosses the clog
/// threshold leaves the unit clogged until it is cleaned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterState {
    /// Ready to filter.
    Idle,
    /// Busy filtering a volume.
    Filtering,
    /// Clogged; stays until cleaned.
    Clogged,
}

impl FilterState {
    /// Lowercase tag used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Filtering => "filtering",
            Self::Clogged => "clogged",
        }
    }
}

impl core::fmt::Display for FilterState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Cumulative lifetime counters owned by the machine.
///
/// `fruits_processed` increments only on a fully successful feed cycle
/// (both tank and bin commits succeeded). `total_juice_ml` accumulates
/// the filtered volume, not the raw press output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineMetrics {
    /// Fruits that completed the full feed pipeline.
    pub fruits_processed: u64,
    /// Filtered juice committed to the tank, in milliliters.
    pub total_juice_ml: Decimal,
    /// Waste committed to the bin, in grams.
    pub total_waste_grams: Decimal,
    /// Failed operations recorded by the machine's catch-and-record
    /// wrapper.
    pub errors: u64,
    /// Completed cleaning cycles.
    pub cleaning_cycles: u64,
}

// ---------------------------------------------------------------------------
// Status snapshot
// ---------------------------------------------------------------------------

/// Juice tank levels within a status snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TankStatus {
    /// Current tank contents.
    pub volume: JuiceVolume,
    /// Tank capacity.
    pub capacity: JuiceVolume,
    /// Fill level as a percentage, rounded to 2 decimal places.
    pub percentage: Decimal,
}

/// Waste bin levels within a status snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinStatus {
    /// Current waste weight in grams.
    pub waste_grams: Decimal,
    /// Bin capacity in grams.
    pub capacity_grams: Decimal,
    /// Fill level as a percentage, rounded to 2 decimal places.
    pub percentage: Decimal,
}

/// Press unit condition within a status snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressStatus {
    /// Current press state.
    pub state: PressState,
    /// Lifetime press count.
    pub press_count: u64,
    /// Mechanical wear, clamped to [0, 100].
    pub wear_level: Decimal,
    /// Current efficiency as a percentage (50.0 at full wear).
    pub efficiency_percentage: Decimal,
}

/// Filter unit condition within a status snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStatus {
    /// Current filter state.
    pub state: FilterState,
    /// Lifetime filter count (reset only by replacement).
    pub filter_count: u64,
    /// Accumulated clog, clamped to [0, 100].
    pub clog_level: Decimal,
    /// Whether the clog level has crossed the cleaning threshold.
    pub needs_cleaning: bool,
}

/// Side-effect-free snapshot of the whole machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineStatus {
    /// Top-level machine state.
    pub state: MachineState,
    /// Juice tank levels.
    pub juice_tank: TankStatus,
    /// Waste bin levels.
    pub waste_bin: BinStatus,
    /// Press unit condition.
    pub press_unit: PressStatus,
    /// Filter unit condition.
    pub filter_unit: FilterStatus,
    /// Lifetime counters.
    pub metrics: MachineMetrics,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn states_serialize_as_lowercase_tags() {
        let json = serde_json::to_string(&MachineState::Running).unwrap();
        assert_eq!(json, "\"running\"");
        let json = serde_json::to_string(&FilterState::Clogged).unwrap();
        assert_eq!(json, "\"clogged\"");
        assert_eq!(PressState::Pressing.to_string(), "pressing");
    }

    #[test]
    fn metrics_start_at_zero() {
        let metrics = MachineMetrics::default();
        assert_eq!(metrics.fruits_processed, 0);
        assert_eq!(metrics.total_juice_ml, Decimal::ZERO);
        assert_eq!(metrics.errors, 0);
    }
}
