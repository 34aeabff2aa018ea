//! Prometheus metrics for the juicer HTTP server.
//!
//! Counters are recorded as operations happen; gauges (machine state,
//! tank and bin fill levels) are refreshed from a fresh
//! [`MachineStatus`] at scrape time so the exporter never drifts from
//! the machine. Export uses the text exposition format.

use juicer_core::ErrorKind;
use juicer_types::{MachineState, MachineStatus};
use prometheus::{
    Gauge, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGaugeVec, Opts, Registry,
    core::Collector,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// All machine states, for the one-hot state gauge.
const MACHINE_STATES: [MachineState; 5] = [
    MachineState::Idle,
    MachineState::Running,
    MachineState::Cleaning,
    MachineState::Error,
    MachineState::Stopped,
];

/// Registry plus the individual juicer metrics.
#[derive(Clone)]
pub struct MetricsExporter {
    registry: Registry,
    fruits_processed: IntCounterVec,
    juice_produced_ml: prometheus::CounterVec,
    waste_produced_grams: prometheus::CounterVec,
    errors: IntCounterVec,
    cleaning_cycles: IntCounter,
    machine_state: IntGaugeVec,
    tank_percentage: Gauge,
    bin_percentage: Gauge,
    request_duration: Histogram,
}

impl MetricsExporter {
    /// Create a registry with all juicer metrics registered.
    ///
    /// # Errors
    ///
    /// Returns [`prometheus::Error`] if a metric cannot be created or
    /// registered.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let fruits_processed = IntCounterVec::new(
            Opts::new(
                "juicer_fruits_processed_total",
                "Total number of fruits processed",
            ),
            &["fruit_type"],
        )?;
        let juice_produced_ml = prometheus::CounterVec::new(
            Opts::new(
                "juicer_juice_produced_ml_total",
                "Total juice produced in milliliters",
            ),
            &["fruit_type"],
        )?;
        let waste_produced_grams = prometheus::CounterVec::new(
            Opts::new(
                "juicer_waste_produced_grams_total",
                "Total waste produced in grams",
            ),
            &["fruit_type"],
        )?;
        let errors = IntCounterVec::new(
            Opts::new("juicer_errors_total", "Total number of errors encountered"),
            &["error_type"],
        )?;
        let cleaning_cycles = IntCounter::new(
            "juicer_cleaning_cycles_total",
            "Total number of cleaning cycles completed",
        )?;
        let machine_state = IntGaugeVec::new(
            Opts::new("juicer_machine_state", "Current machine state (one-hot)"),
            &["state"],
        )?;
        let tank_percentage = Gauge::new(
            "juicer_juice_tank_percentage",
            "Current juice tank fill percentage",
        )?;
        let bin_percentage = Gauge::new(
            "juicer_waste_bin_percentage",
            "Current waste bin fill percentage",
        )?;
        let request_duration = Histogram::with_opts(HistogramOpts::new(
            "juicer_request_duration_seconds",
            "HTTP request duration in seconds",
        ))?;

        for collector in [
            Box::new(fruits_processed.clone()) as Box<dyn Collector>,
            Box::new(juice_produced_ml.clone()),
            Box::new(waste_produced_grams.clone()),
            Box::new(errors.clone()),
            Box::new(cleaning_cycles.clone()),
            Box::new(machine_state.clone()),
            Box::new(tank_percentage.clone()),
            Box::new(bin_percentage.clone()),
            Box::new(request_duration.clone()),
        ] {
            registry.register(collector)?;
        }

        Ok(Self {
            registry,
            fruits_processed,
            juice_produced_ml,
            waste_produced_grams,
            errors,
            cleaning_cycles,
            machine_state,
            tank_percentage,
            bin_percentage,
            request_duration,
        })
    }

    /// Record a successful feed cycle.
    pub fn record_feed(&self, fruit_type: &str, juice_ml: Decimal, waste_grams: Decimal) {
        self.fruits_processed.with_label_values(&[fruit_type]).inc();
        self.juice_produced_ml
            .with_label_values(&[fruit_type])
            .inc_by(decimal_to_f64(juice_ml));
        self.waste_produced_grams
            .with_label_values(&[fruit_type])
            .inc_by(decimal_to_f64(waste_grams));
    }

    /// Record a failed operation by error classification.
    pub fn record_error(&self, kind: ErrorKind) {
        self.errors.with_label_values(&[kind.as_str()]).inc();
    }

    /// Record a completed cleaning cycle.
    pub fn record_cleaning(&self) {
        self.cleaning_cycles.inc();
    }

    /// Observe one HTTP request's duration in seconds.
    pub fn observe_request_duration(&self, seconds: f64) {
        self.request_duration.observe(seconds);
    }

    /// Refresh the state and fill-level gauges from a status snapshot.
    pub fn refresh_gauges(&self, status: &MachineStatus) {
        for state in MACHINE_STATES {
            let value = i64::from(state == status.state);
            self.machine_state
                .with_label_values(&[state.as_str()])
                .set(value);
        }
        self.tank_percentage
            .set(decimal_to_f64(status.juice_tank.percentage));
        self.bin_percentage
            .set(decimal_to_f64(status.waste_bin.percentage));
    }

    /// Render all metrics in the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns [`prometheus::Error`] if encoding fails.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = prometheus::TextEncoder::new();
        encoder.encode_to_string(&self.registry.gather())
    }
}

/// Lossy conversion for gauge/counter values; metrics precision is not
/// a domain concern.
fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
