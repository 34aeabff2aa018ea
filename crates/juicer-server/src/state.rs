//! Shared application state for the juicer HTTP server.
//!
//! One machine instance is driven by one request at a time: mutating
//! handlers hold the write lock for the whole operation, so the feed
//! pipeline's intermediate commits are never observable to a
//! concurrent reader.

use juicer_core::JuicerMachine;
use tokio::sync::RwLock;

use crate::metrics::MetricsExporter;

/// State shared by all request handlers.
pub struct AppState {
    /// The single machine this server fronts.
    pub machine: RwLock<JuicerMachine>,
    /// Prometheus exporter.
    pub metrics: MetricsExporter,
}

impl AppState {
    /// Wrap a machine and a fresh metrics registry.
    ///
    /// # Errors
    ///
    /// Returns [`prometheus::Error`] if metric registration fails.
    pub fn new(machine: JuicerMachine) -> Result<Self, prometheus::Error> {
        Ok(Self {
            machine: RwLock::new(machine),
            metrics: MetricsExporter::new()?,
        })
    }
}
