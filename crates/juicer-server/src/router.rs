//! Axum router construction for the juicer server.
//!
//! Assembles all routes into a single [`Router`] with CORS for
//! cross-origin dashboards, request tracing, and a request-duration
//! histogram observed for every endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the juicer server.
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // Read API
        .route("/health", get(handlers::health))
        .route("/status", get(handlers::get_status))
        .route("/metrics", get(handlers::get_metrics))
        // Machine actions
        .route("/start", post(handlers::start))
        .route("/stop", post(handlers::stop))
        .route("/clean", post(handlers::clean))
        .route("/feed", post(handlers::feed))
        .route("/reset", post(handlers::reset))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            track_request_duration,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Observe every request's wall-clock duration in the metrics
/// histogram.
async fn track_request_duration(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let response = next.run(request).await;
    state
        .metrics
        .observe_request_duration(started.elapsed().as_secs_f64());
    response
}
