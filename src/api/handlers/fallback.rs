use axum::{
    Json,
    http::{StatusCode, Uri},
    response::IntoResponse,
};

use crate::api::ErrorBody;

/// Fallback for any path without a route
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    tracing::debug!("No route for {}", uri.path());
    (StatusCode::NOT_FOUND, Json(ErrorBody::not_found(uri.path())))
}
