use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::{AppState, ErrorBody, timestamp};

/// Version reported by the greeting endpoint
pub const APP_VERSION: &str = "1.0.0";

/// `rustc --version` of the compiler that built the binary
pub const RUSTC_VERSION: &str = env!("PROBE_RUSTC_VERSION");

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexResponse {
    pub message: String,
    pub version: String,
    pub environment: String,
    pub timestamp: String,
    pub rust_version: String,
}

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    if state.process.is_shutting_down() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorBody::shutting_down()),
        )
            .into_response();
    }

    let response = IndexResponse {
        message: "Hello from Rust Docker base image!".to_string(),
        version: APP_VERSION.to_string(),
        environment: state.config.environment.clone(),
        timestamp: timestamp(),
        rust_version: RUSTC_VERSION.to_string(),
    };

    (StatusCode::OK, Json(response)).into_response()
}
