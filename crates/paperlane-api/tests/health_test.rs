//! Health endpoint tests.

mod helpers;

use axum::http::StatusCode;
use helpers::{setup_test_app, Upstreams};
use serde_json::Value;

#[tokio::test]
async fn test_liveness() {
    let server = setup_test_app(&Upstreams::default());

    let response = server.get("/health/live").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"].as_str().unwrap(), "alive");
}

#[tokio::test]
async fn test_health_reports_configured_credentials() {
    let server = setup_test_app(&Upstreams::default());

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"].as_str().unwrap(), "healthy");
    assert_eq!(body["conversion"].as_str().unwrap(), "configured");
    assert_eq!(body["preview"].as_str().unwrap(), "configured");
}

#[tokio::test]
async fn test_health_reports_missing_preview_credential() {
    let server = setup_test_app(&Upstreams {
        preview_key: None,
        ..Default::default()
    });

    let response = server.get("/health").await;
    // Missing credential is degraded-but-alive, not down
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["conversion"].as_str().unwrap(), "configured");
    assert_eq!(body["preview"].as_str().unwrap(), "not_configured");
}
