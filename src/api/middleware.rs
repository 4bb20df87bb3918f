// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Request pipeline steps applied to every route

use axum::{
    Json,
    extract::{ConnectInfo, Request},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::any::Any;
use std::net::SocketAddr;

use super::ErrorBody;

static X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
static X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");
static X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");

/// Security headers set on every response
pub const SECURITY_HEADERS: [(&str, &str); 4] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    (
        "strict-transport-security",
        "max-age=31536000; includeSubDomains",
    ),
];

/// Client details as seen through at most one trusted proxy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub remote_addr: String,
    pub scheme: String,
    pub host: Option<String>,
}

/// Right-most value of a comma separated forwarding header
///
/// That entry was appended by the proxy directly in front of us, the only
/// hop we trust.
fn last_hop<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers
        .get_all(name)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .last()
}

/// Resolves the client address, scheme and host for a request
pub fn resolve_client(headers: &HeaderMap, peer: Option<SocketAddr>) -> ClientInfo {
    let remote_addr = last_hop(headers, &X_FORWARDED_FOR)
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string());

    let scheme = last_hop(headers, &X_FORWARDED_PROTO)
        .unwrap_or("http")
        .to_ascii_lowercase();

    let host = last_hop(headers, &X_FORWARDED_HOST)
        .or_else(|| headers.get(header::HOST).and_then(|v| v.to_str().ok()))
        .map(str::to_string);

    ClientInfo {
        remote_addr,
        scheme,
        host,
    }
}

/// Resolves forwarding headers and logs the request before it is handled
pub async fn log_request(req: Request, next: Next) -> Response {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = resolve_client(req.headers(), peer);

    tracing::info!(
        method = %req.method(),
        path = %req.uri().path(),
        remote_addr = %client.remote_addr,
        "Request: {} {} from {}",
        req.method(),
        req.uri().path(),
        client.remote_addr
    );
    tracing::trace!(scheme = %client.scheme, host = ?client.host, "Resolved client");

    next.run(req).await
}

/// Adds the security headers to the handler's response
pub async fn security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    for (name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    response
}

/// Turns a handler panic into the generic 500 response
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!("Internal server error: handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::internal()),
    )
        .into_response()
}
