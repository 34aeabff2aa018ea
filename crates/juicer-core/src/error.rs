//! Error types for the juicer domain layer.
//!
//! All fallible operations in this crate return [`JuicerError`]. Every
//! error is raised synchronously to the immediate caller; the machine
//! catches nothing except to record its `errors` counter before
//! re-raising. There are no retries anywhere -- failures are either
//! usage errors (fix the call) or physical-limit errors (an operator
//! must clean, maintain, or replace a part).

use juicer_types::{MachineState, ValidationError};
use rust_decimal::Decimal;

/// Errors that can occur during machine and unit operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JuicerError {
    /// A machine operation was invoked from a state that forbids it.
    #[error("machine cannot {operation} while {state}")]
    InvalidState {
        /// The operation that was attempted.
        operation: &'static str,
        /// The machine state at the time of the call.
        state: MachineState,
    },

    /// The press was asked to press while already busy.
    #[error("press unit not idle")]
    PressNotIdle,

    /// The press is faulted and must be reset before further use.
    #[error("press unit is faulted")]
    PressFaulted,

    /// A unit has exceeded its service life.
    #[error("{unit} unit requires maintenance")]
    MaintenanceRequired {
        /// Which unit needs service.
        unit: &'static str,
    },

    /// The filter was asked to filter while already busy.
    #[error("filter unit not idle")]
    FilterNotIdle,

    /// The filter is clogged and must be cleaned before further use.
    #[error("filter clogged")]
    FilterClogged,

    /// The filter mesh is worn out and must be replaced.
    #[error("filter worn out and must be replaced")]
    FilterWornOut,

    /// Adding the pending juice would exceed the tank capacity.
    #[error("tank would overflow: {pending_ml} ml pending with {current_ml}/{capacity_ml} ml")]
    TankWouldOverflow {
        /// Milliliters waiting to be added.
        pending_ml: Decimal,
        /// Current tank contents in milliliters.
        current_ml: Decimal,
        /// Tank capacity in milliliters.
        capacity_ml: Decimal,
    },

    /// Adding the pending waste would exceed the bin capacity.
    #[error("bin would overflow: {pending_grams} g pending with {current_grams}/{capacity_grams} g")]
    BinWouldOverflow {
        /// Grams waiting to be added.
        pending_grams: Decimal,
        /// Current bin contents in grams.
        current_grams: Decimal,
        /// Bin capacity in grams.
        capacity_grams: Decimal,
    },

    /// A waste amount fed to the bin was zero or negative.
    #[error("waste amount must be positive: {0} g")]
    WasteNotPositive(Decimal),

    /// Malformed value-type construction input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Checked decimal arithmetic overflowed.
    #[error("arithmetic overflow in machine calculation")]
    ArithmeticOverflow,
}

/// Coarse classification of a [`JuicerError`] for wire mapping.
///
/// Front ends translate these into their own formats (HTTP status
/// codes, CLI messages, metrics labels) without matching on every
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Operation invoked from a forbidden state.
    State,
    /// Malformed construction input.
    Validation,
    /// Tank or bin would exceed capacity.
    Overflow,
    /// A unit exceeded its service life.
    Maintenance,
    /// Unexpected internal failure.
    Internal,
}

impl ErrorKind {
    /// Label used for the errors-by-type metrics counter.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::State => "state_error",
            Self::Validation => "validation_error",
            Self::Overflow => "overflow_error",
            Self::Maintenance => "maintenance_error",
            Self::Internal => "internal_error",
        }
    }
}

impl JuicerError {
    /// Classify this error for wire mapping.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidState { .. }
            | Self::PressNotIdle
            | Self::PressFaulted
            | Self::FilterNotIdle
            | Self::FilterClogged => ErrorKind::State,
            Self::MaintenanceRequired { .. } | Self::FilterWornOut => ErrorKind::Maintenance,
            Self::TankWouldOverflow { .. } | Self::BinWouldOverflow { .. } => ErrorKind::Overflow,
            Self::WasteNotPositive(_) | Self::Validation(_) => ErrorKind::Validation,
            Self::ArithmeticOverflow => ErrorKind::Internal,
        }
    }
}
