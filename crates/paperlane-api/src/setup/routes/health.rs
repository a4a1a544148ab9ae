//! Health check handlers and response types.
//!
//! This service has no database or storage; health reports process liveness
//! plus whether each upstream credential is configured. A missing credential
//! is degraded-but-alive, so /health stays 200 and the field tells the story.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub conversion: String,
    pub preview: String,
}

fn credential_status(configured: bool) -> String {
    if configured {
        "configured".to_string()
    } else {
        "not_configured".to_string()
    }
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Full health check: upstream credential configuration state.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = HealthCheckResponse {
        status: "healthy".to_string(),
        conversion: credential_status(state.converter.is_configured()),
        preview: credential_status(state.previewer.is_configured()),
    };

    (StatusCode::OK, Json(response))
}
