use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::AppState;
use crate::error::Result;
use crate::metrics::{CPU_SAMPLE_WINDOW, exposition, sample_process};

/// GET /metrics
///
/// Takes a fresh sample on every scrape; the CPU window makes each call
/// last at least 100ms.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Result<Response> {
    let uptime = state.process.uptime();
    let snapshot = sample_process(CPU_SAMPLE_WINDOW).await?;
    tracing::debug!("/metrics sampled {:?}", snapshot);

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, exposition::CONTENT_TYPE)],
        exposition::render(uptime, &snapshot),
    )
        .into_response())
}
