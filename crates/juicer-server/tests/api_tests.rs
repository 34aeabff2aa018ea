//! Integration tests for the juicer HTTP API.
//!
//! Tests drive the Axum `Router` directly via `tower::ServiceExt`
//! without starting a TCP server. This validates handler logic,
//! routing, and the error mapping without a live network connection.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use juicer_core::{JuicerMachine, MachineCapacityConfig};
use juicer_server::router::build_router;
use juicer_server::state::AppState;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tower::ServiceExt;

fn make_router(tank_capacity_ml: Decimal) -> Router {
    let config = MachineCapacityConfig {
        tank_capacity_ml,
        bin_capacity_grams: dec!(2000),
    };
    let machine = JuicerMachine::new(&config);
    let state = Arc::new(AppState::new(machine).unwrap());
    build_router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post(path: &str) -> Request<Body> {
    Request::post(path).body(Body::empty()).unwrap()
}

fn post_json(path: &str, body: &Value) -> Request<Body> {
    Request::post(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_healthy() {
    let router = make_router(dec!(5000));
    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn full_lifecycle_over_http() {
    let router = make_router(dec!(5000));

    // Start.
    let response = router.clone().oneshot(post("/start")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["state"], "running");

    // Feed a known fruit.
    let feed = json!({
        "fruit_type": "orange",
        "size": "medium",
        "ripeness": "ripe",
        "weight_grams": 150,
    });
    let response = router
        .clone()
        .oneshot(post_json("/feed", &feed))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["metrics"]["fruits_processed"], 1);
    let juice: Decimal = body["juice"].as_str().unwrap().parse().unwrap();
    assert!((juice - dec!(28.85)).abs() <= Decimal::ONE);

    // Status reflects the feed.
    let response = router
        .clone()
        .oneshot(Request::get("/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["state"], "running");
    assert_eq!(body["press_unit"]["press_count"], 1);

    // Metrics exposition includes the feed counter.
    let response = router
        .clone()
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("juicer_fruits_processed_total{fruit_type=\"orange\"} 1"));
    assert!(text.contains("juicer_machine_state{state=\"running\"} 1"));

    // Stop.
    let response = router.clone().oneshot(post("/stop")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["state"], "stopped");
}

#[tokio::test]
async fn feeding_an_idle_machine_is_a_state_error() {
    let router = make_router(dec!(5000));
    let response = router
        .oneshot(post_json("/feed", &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error_type"], "state_error");
}

#[tokio::test]
async fn unknown_fruit_type_is_rejected() {
    let router = make_router(dec!(5000));
    router.clone().oneshot(post("/start")).await.unwrap();
    let response = router
        .oneshot(post_json("/feed", &json!({"fruit_type": "banana"})))
        .await
        .unwrap();
    // The closed enum rejects the tag during body deserialization.
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn negative_weight_fails_validation() {
    let router = make_router(dec!(5000));
    router.clone().oneshot(post("/start")).await.unwrap();
    let response = router
        .oneshot(post_json("/feed", &json!({"weight_grams": -10})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error_type"], "validation_error");
}

#[tokio::test]
async fn tank_overflow_maps_to_overflow_error() {
    let router = make_router(dec!(100));
    router.clone().oneshot(post("/start")).await.unwrap();

    let big = json!({
        "fruit_type": "orange",
        "size": "large",
        "ripeness": "ripe",
        "weight_grams": 250,
    });
    let response = router
        .clone()
        .oneshot(post_json("/feed", &big))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(post_json("/feed", &big))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error_type"], "overflow_error");

    // The failed feed committed nothing.
    let response = router
        .oneshot(Request::get("/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["metrics"]["fruits_processed"], 1);
    assert_eq!(body["metrics"]["errors"], 1);
}

#[tokio::test]
async fn clean_reports_cycle_count_and_reset_recovers() {
    let router = make_router(dec!(5000));
    let response = router.clone().oneshot(post("/clean")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["state"], "idle");
    assert_eq!(body["cleaning_cycles"], 1);

    let response = router.oneshot(post("/reset")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["state"], "idle");
}
