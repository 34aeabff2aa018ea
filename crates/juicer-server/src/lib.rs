//! Operator HTTP API for the juicer simulation.
//!
//! Fronts a single [`JuicerMachine`](juicer_core::JuicerMachine) with
//! the REST surface an operator panel expects: status and health
//! reads, the start/stop/clean/feed/reset actions, and a Prometheus
//! `/metrics` endpoint in text exposition format.
//!
//! The machine itself knows nothing about JSON or status codes; this
//! crate translates domain failures into wire responses and keeps the
//! metrics registry in sync.
//!
//! # Modules
//!
//! - [`error`] -- [`ApiError`](error::ApiError) with its
//!   `IntoResponse` mapping.
//! - [`handlers`] -- REST endpoint handlers and request/response
//!   envelopes.
//! - [`metrics`] -- Prometheus registry and exporter.
//! - [`router`] -- Route assembly, CORS, tracing, duration middleware.
//! - [`server`] -- TCP bind and serve lifecycle.
//! - [`state`] -- Shared application state.

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod server;
pub mod state;

pub use metrics::MetricsExporter;
pub use router::build_router;
pub use server::{ServerConfig, start_server};
pub use state::AppState;
