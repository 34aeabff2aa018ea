//! Domain layer for the commercial juicer simulation.
//!
//! This crate models the production line: a press that converts fruit
//! into raw juice and waste while accumulating mechanical wear, a
//! filter that clogs with use, bounded tank and bin accumulators, and
//! the [`JuicerMachine`] state machine that couples them into an
//! all-or-nothing feed pipeline.
//!
//! The machine pre-validates every capacity limit before mutating any
//! accumulator; no operation leaves partial state behind on failure.
//!
//! # Modules
//!
//! - [`config`] -- YAML-backed configuration with serde defaults.
//! - [`error`] -- [`JuicerError`] and its wire-facing [`ErrorKind`]
//!   classification.
//! - [`filter`] -- [`FilterUnit`] with sticky clogging.
//! - [`machine`] -- The [`JuicerMachine`] aggregate root.
//! - [`press`] -- [`PressUnit`] with wear-driven efficiency decay.
//! - [`tank`] -- [`JuiceTank`] bounded juice accumulator.
//! - [`waste`] -- [`WasteBin`] bounded waste accumulator.

pub mod config;
pub mod error;
pub mod filter;
pub mod machine;
pub mod press;
pub mod tank;
pub mod waste;

// Re-export primary types at crate root.
pub use config::{ConfigError, JuicerConfig, MachineCapacityConfig};
pub use error::{ErrorKind, JuicerError};
pub use filter::FilterUnit;
pub use machine::{FeedOutcome, JuicerMachine};
pub use press::{PressOutput, PressUnit};
pub use tank::JuiceTank;
pub use waste::WasteBin;
