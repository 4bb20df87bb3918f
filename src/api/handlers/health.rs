use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::{AppState, timestamp};

/// Health check endpoint response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime: f64,
    pub timestamp: String,
}

/// GET /health
///
/// Liveness probe. Always "healthy" while the process can answer, including
/// during the shutdown drain. Uptime is reported in fractional seconds.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        uptime: state.process.uptime().as_secs_f64(),
        timestamp: timestamp(),
    };

    (StatusCode::OK, Json(response))
}
