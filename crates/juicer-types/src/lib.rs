//! Shared type definitions for the commercial juicer simulation.
//!
//! This crate holds the value types every other layer speaks in: fruit
//! descriptors with their factor tables, the non-negative [`JuiceVolume`]
//! quantity, typed identifiers, and the read-only status/metrics
//! projections served over the wire.
//!
//! All fractional quantities are [`rust_decimal::Decimal`] -- no floating
//! point anywhere in the domain. Amounts are rounded to two decimal
//! places at the point the domain rules say so, never later.
//!
//! # Modules
//!
//! - [`error`] -- [`ValidationError`] for malformed construction input.
//! - [`fruit`] -- [`FruitSize`], [`RipenessLevel`], [`FruitType`] and the
//!   immutable [`Fruit`] record with its juice/waste derivations.
//! - [`ids`] -- Type-safe UUID wrappers.
//! - [`status`] -- State enums, lifetime counters, and the machine
//!   status snapshot.
//! - [`volume`] -- The [`JuiceVolume`] quantity with checked arithmetic.

pub mod error;
pub mod fruit;
pub mod ids;
pub mod status;
pub mod volume;

// Re-export primary types at crate root.
pub use error::ValidationError;
pub use fruit::{Fruit, FruitSize, FruitType, RipenessLevel};
pub use ids::{FruitId, MachineId};
pub use status::{
    BinStatus, FilterState, FilterStatus, MachineMetrics, MachineState, MachineStatus, PressState,
    PressStatus, TankStatus,
};
pub use volume::JuiceVolume;
