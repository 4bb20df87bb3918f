//! HTTP API module for the probe service
//!
//! Provides the probe, metrics and info endpoints, wrapped in a fixed
//! request pipeline.
//!
//! # Endpoints
//! - `GET /` — greeting, 503 while draining
//! - `GET /health` — liveness with uptime
//! - `GET /ready` — readiness, 503 while draining
//! - `GET /metrics` — Prometheus text metrics
//! - `GET /info` — runtime, process and host details
//!
//! Unknown paths answer 404 with the requested path echoed back.

pub mod handlers;
pub mod middleware;
mod state;

use axum::{Router, routing::get};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;

pub use state::AppState;

/// JSON body used for every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ErrorBody {
    pub fn internal() -> Self {
        Self {
            error: "Internal Server Error".to_string(),
            path: None,
        }
    }

    pub fn not_found(path: &str) -> Self {
        Self {
            error: "Not Found".to_string(),
            path: Some(path.to_string()),
        }
    }

    pub fn shutting_down() -> Self {
        Self {
            error: "Service shutting down".to_string(),
            path: None,
        }
    }
}

/// Current UTC time in ISO-8601 form
pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Creates the main Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_handler))
        .route("/info", get(handlers::info))
        .fallback(handlers::not_found);

    with_pipeline(routes).with_state(state)
}

/// Wraps every route with the request pipeline
///
/// Outermost first: security headers, forwarded-header resolution and
/// request log, panic catcher.
pub fn with_pipeline<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(middleware::panic_response))
        .layer(axum::middleware::from_fn(middleware::log_request))
        .layer(axum::middleware::from_fn(middleware::security_headers))
}
