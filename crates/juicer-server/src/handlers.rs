//! REST endpoint handlers for the juicer server.
//!
//! The HTTP surface mirrors the operator's panel:
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/health` | Liveness probe |
//! | `GET` | `/status` | Full machine status snapshot |
//! | `GET` | `/metrics` | Prometheus text exposition |
//! | `POST` | `/start` | Start the machine |
//! | `POST` | `/stop` | Stop the machine |
//! | `POST` | `/clean` | Run a cleaning cycle |
//! | `POST` | `/feed` | Feed one fruit |
//! | `POST` | `/reset` | Reset to idle after a fault |
//!
//! Domain failures surface as 400 responses carrying the domain
//! message; every failure is also counted in the errors-by-type
//! metric.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse};
use chrono::{DateTime, Utc};
use juicer_core::JuicerError;
use juicer_types::{
    Fruit, FruitSize, FruitType, JuiceVolume, MachineMetrics, MachineState, MachineStatus,
    RipenessLevel,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response envelopes
// ---------------------------------------------------------------------------

/// Body of the `POST /feed` endpoint. Every field is optional; the
/// defaults are a medium ripe orange with a randomly drawn weight.
#[derive(Debug, Deserialize, Validate)]
pub struct FeedRequest {
    /// Kind of citrus (default orange).
    #[serde(default)]
    pub fruit_type: Option<FruitType>,
    /// Size class (default medium).
    #[serde(default)]
    pub size: Option<FruitSize>,
    /// Ripeness level (default ripe).
    #[serde(default)]
    pub ripeness: Option<RipenessLevel>,
    /// Weight in grams; drawn from the size's range when omitted.
    #[serde(default)]
    #[validate(custom(function = "validate_weight"))]
    pub weight_grams: Option<Decimal>,
}

fn validate_weight(weight: &Decimal) -> Result<(), validator::ValidationError> {
    if weight.is_sign_negative() || weight.is_zero() {
        return Err(validator::ValidationError::new("weight_must_be_positive"));
    }
    Ok(())
}

/// Response for the machine action endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionResponse {
    /// Whether the action succeeded (always true in a 200 response).
    pub success: bool,
    /// Human-readable outcome message.
    pub message: String,
    /// Machine state after the action.
    pub state: MachineState,
    /// Lifetime cleaning cycles, present on the clean endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaning_cycles: Option<u64>,
}

/// Response for the feed endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedResponse {
    /// Whether the feed succeeded (always true in a 200 response).
    pub success: bool,
    /// Human-readable outcome message.
    pub message: String,
    /// Filtered juice committed to the tank.
    pub juice: JuiceVolume,
    /// Waste in grams committed to the bin.
    pub waste_grams: Decimal,
    /// The machine's lifetime counters after the feed.
    pub metrics: MachineMetrics,
}

/// Response for the health endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Fixed liveness marker.
    pub status: String,
    /// Server time of the probe.
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Read endpoints
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing machine state and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let status = state.machine.read().await.status();
    let metrics = &status.metrics;

    Html(format!(
        r"<!DOCTYPE html>
<html lang=en>
<head><meta charset=utf-8><title>Juicer Operator Panel</title></head>
<body>
    <h1>Juicer Operator Panel</h1>
    <p>State: <strong>{state}</strong></p>
    <ul>
        <li>Tank: {tank} of {tank_cap} ({tank_pct}%)</li>
        <li>Bin: {bin} g of {bin_cap} g ({bin_pct}%)</li>
        <li>Fruits processed: {fruits}</li>
        <li>Cleaning cycles: {cycles}</li>
    </ul>
    <p>API: <a href=/status>/status</a> | <a href=/health>/health</a> |
       <a href=/metrics>/metrics</a></p>
</body>
</html>",
        state = status.state,
        tank = status.juice_tank.volume,
        tank_cap = status.juice_tank.capacity,
        tank_pct = status.juice_tank.percentage,
        bin = status.waste_bin.waste_grams,
        bin_cap = status.waste_bin.capacity_grams,
        bin_pct = status.waste_bin.percentage,
        fruits = metrics.fruits_processed,
        cycles = metrics.cleaning_cycles,
    ))
}

/// `GET /health` -- liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("healthy"),
        timestamp: Utc::now(),
    })
}

/// `GET /status` -- full machine status snapshot.
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<MachineStatus> {
    Json(state.machine.read().await.status())
}

/// `GET /metrics` -- Prometheus text exposition.
///
/// Gauges are refreshed from the live machine at scrape time.
pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let status = state.machine.read().await.status();
    state.metrics.refresh_gauges(&status);
    let body = state.metrics.export()?;
    Ok((
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        body,
    ))
}

// ---------------------------------------------------------------------------
// Action endpoints
// ---------------------------------------------------------------------------

/// `POST /start` -- start the machine.
pub async fn start(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ActionResponse>, ApiError> {
    let mut machine = state.machine.write().await;
    record_on_error(&state, machine.start())?;
    Ok(Json(ActionResponse {
        success: true,
        message: String::from("Juicer started successfully"),
        state: machine.state(),
        cleaning_cycles: None,
    }))
}

/// `POST /stop` -- stop the machine.
pub async fn stop(State(state): State<Arc<AppState>>) -> Result<Json<ActionResponse>, ApiError> {
    let mut machine = state.machine.write().await;
    record_on_error(&state, machine.stop())?;
    Ok(Json(ActionResponse {
        success: true,
        message: String::from("Juicer stopped successfully"),
        state: machine.state(),
        cleaning_cycles: None,
    }))
}

/// `POST /clean` -- run a cleaning cycle. Always succeeds.
pub async fn clean(State(state): State<Arc<AppState>>) -> Json<ActionResponse> {
    let mut machine = state.machine.write().await;
    machine.clean();
    state.metrics.record_cleaning();
    Json(ActionResponse {
        success: true,
        message: String::from("Machine cleaned successfully"),
        state: machine.state(),
        cleaning_cycles: Some(machine.metrics().cleaning_cycles),
    })
}

/// `POST /reset` -- operator recovery to idle. Always succeeds.
pub async fn reset(State(state): State<Arc<AppState>>) -> Json<ActionResponse> {
    let mut machine = state.machine.write().await;
    machine.reset_to_idle();
    Json(ActionResponse {
        success: true,
        message: String::from("Machine reset to idle"),
        state: machine.state(),
        cleaning_cycles: None,
    })
}

/// `POST /feed` -- feed one fruit through the pipeline.
pub async fn feed(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FeedRequest>,
) -> Result<Json<FeedResponse>, ApiError> {
    request
        .validate()
        .map_err(|err| ApiError::InvalidRequest(err.to_string()))?;

    let fruit_type = request.fruit_type.unwrap_or_default();
    let size = request.size.unwrap_or(FruitSize::Medium);
    let ripeness = request.ripeness.unwrap_or(RipenessLevel::Ripe);
    let fruit = match request.weight_grams {
        Some(weight) => record_on_error(
            &state,
            Fruit::new(fruit_type, size, ripeness, weight).map_err(JuicerError::from),
        )?,
        None => Fruit::with_random_weight(fruit_type, size, ripeness, &mut rand::rng()),
    };

    let mut machine = state.machine.write().await;
    let outcome = record_on_error(&state, machine.feed_fruit(&fruit))?;
    state
        .metrics
        .record_feed(fruit_type.as_str(), outcome.juice.milliliters(), outcome.waste);

    Ok(Json(FeedResponse {
        success: true,
        message: String::from("Fruit processed successfully"),
        juice: outcome.juice,
        waste_grams: outcome.waste,
        metrics: machine.metrics().clone(),
    }))
}

/// Count a domain failure in the errors-by-type metric, then let it
/// propagate unchanged.
fn record_on_error<T>(state: &AppState, result: Result<T, JuicerError>) -> Result<T, ApiError> {
    result.map_err(|err| {
        state.metrics.record_error(err.kind());
        ApiError::from(err)
    })
}
