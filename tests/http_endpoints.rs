// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use probe_service::{
    AppState, Config, HealthResponse, InfoResponse, ProcessState, ReadyResponse,
    SECURITY_HEADERS, create_router,
};
use std::sync::Arc;
use tower::ServiceExt;

fn make_state() -> (Arc<AppState>, Arc<ProcessState>) {
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 9090,
        environment: "testing".to_string(),
        debug: false,
    };
    let process = Arc::new(ProcessState::new());
    (Arc::new(AppState::new(config, process.clone())), process)
}

async fn get(state: &Arc<AppState>, path: &str) -> Response {
    create_router(state.clone())
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(resp: Response) -> String {
    String::from_utf8(
        resp.into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec(),
    )
    .unwrap()
}

async fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(resp).await).unwrap()
}

fn assert_security_headers(resp: &Response) {
    for (name, value) in SECURITY_HEADERS {
        assert_eq!(
            resp.headers().get(name).and_then(|v| v.to_str().ok()),
            Some(value),
            "missing or wrong {name} on {}",
            resp.status()
        );
    }
}

// --- / endpoint ---

#[tokio::test]
async fn index_returns_greeting() {
    let (state, _) = make_state();
    let resp = get(&state, "/").await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "application/json");
    let json = body_json(resp).await;
    assert_eq!(json["version"], "1.0.0");
    assert_eq!(json["environment"], "testing");
    assert!(json["message"].as_str().unwrap().starts_with("Hello"));
    assert!(json["timestamp"].is_string());
    assert!(json["rust_version"].is_string());
}

#[tokio::test]
async fn rust_version_is_the_building_compiler() {
    let (state, _) = make_state();
    let greeting = body_json(get(&state, "/").await).await;
    let info = body_json(get(&state, "/info").await).await;

    let version = greeting["rust_version"].as_str().unwrap();
    assert!(version.starts_with("rustc "), "unexpected version {version}");
    assert_eq!(info["rust"]["version"], version);
}

#[tokio::test]
async fn index_returns_503_while_shutting_down() {
    let (state, process) = make_state();
    process.begin_shutdown();

    for _ in 0..3 {
        let resp = get(&state, "/").await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_security_headers(&resp);
        let json = body_json(resp).await;
        assert_eq!(json, serde_json::json!({ "error": "Service shutting down" }));
    }
}

// --- /health endpoint ---

#[tokio::test]
async fn health_reports_uptime() {
    let (state, _) = make_state();
    let resp = get(&state, "/health").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let health: HealthResponse = serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(health.status, "healthy");
    assert!(health.uptime >= 0.0);
    assert!(chrono::DateTime::parse_from_rfc3339(&health.timestamp).is_ok());
}

#[tokio::test]
async fn health_uptime_is_monotonic() {
    let (state, _) = make_state();

    let first = body_json(get(&state, "/health").await).await["uptime"]
        .as_f64()
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let second = body_json(get(&state, "/health").await).await["uptime"]
        .as_f64()
        .unwrap();

    assert!(first >= 0.0);
    assert!(second > first);
}

// --- /ready endpoint ---

#[tokio::test]
async fn ready_true_while_running() {
    let (state, _) = make_state();
    let resp = get(&state, "/ready").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["ready"], true);
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn ready_false_with_503_after_shutdown() {
    let (state, process) = make_state();
    process.begin_shutdown();

    let resp = get(&state, "/ready").await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let ready: ReadyResponse = serde_json::from_str(&body_text(resp).await).unwrap();
    assert!(!ready.ready);
}

#[tokio::test]
async fn other_routes_unaffected_by_shutdown() {
    let (state, process) = make_state();
    process.begin_shutdown();

    for path in ["/health", "/metrics", "/info"] {
        let resp = get(&state, path).await;
        assert_eq!(resp.status(), StatusCode::OK, "{path} should stay up");
    }
}

// --- /metrics endpoint ---

#[tokio::test]
async fn metrics_returns_text_exposition() {
    let (state, _) = make_state();
    let resp = get(&state, "/metrics").await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()["content-type"],
        "text/plain; charset=utf-8"
    );

    let body = body_text(resp).await;
    for family in [
        "process_uptime_seconds",
        "process_cpu_percent",
        "process_memory_bytes",
        "process_open_fds",
        "process_threads",
    ] {
        assert!(body.contains(&format!("# HELP {family} ")), "{family}");
        assert!(body.contains(&format!("# TYPE {family} gauge")), "{family}");
    }
}

#[tokio::test]
async fn metrics_values_are_sane() {
    let (state, _) = make_state();
    let body = body_text(get(&state, "/metrics").await).await;

    let samples: Vec<(&str, f64)> = body
        .lines()
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| {
            let (name, value) = l.rsplit_once(' ').unwrap();
            (name, value.parse::<f64>().unwrap())
        })
        .collect();

    let names: Vec<&str> = samples.iter().map(|(n, _)| *n).collect();
    assert_eq!(
        names,
        [
            "process_uptime_seconds",
            "process_cpu_percent",
            "process_memory_bytes{type=\"rss\"}",
            "process_memory_bytes{type=\"vms\"}",
            "process_open_fds",
            "process_threads",
        ]
    );

    let value = |name: &str| samples.iter().find(|(n, _)| *n == name).unwrap().1;
    assert!(value("process_uptime_seconds") >= 0.0);
    let cpu = value("process_cpu_percent");
    assert!(cpu >= 0.0);
    assert_eq!((cpu * 10.0).round() / 10.0, cpu, "cpu not rounded to tenths");
    assert!(value("process_memory_bytes{type=\"rss\"}") > 0.0);
    assert!(value("process_memory_bytes{type=\"vms\"}") > 0.0);
    assert!(value("process_threads") >= 1.0);
    #[cfg(target_os = "linux")]
    assert!(value("process_open_fds") >= 1.0);
}

// --- /info endpoint ---

#[tokio::test]
async fn info_reports_runtime_process_and_system() {
    let (state, _) = make_state();
    let resp = get(&state, "/info").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;

    assert!(json["rust"]["version"].is_string());
    assert!(json["rust"]["executable"].is_string());
    assert_eq!(json["rust"]["platform"], std::env::consts::OS);

    assert_eq!(json["process"]["pid"], std::process::id());
    assert!(json["process"]["user"].is_string());
    assert!(json["process"]["cwd"].is_string());

    assert!(json["system"]["cpu_count"].as_u64().unwrap() >= 1);
    let total = json["system"]["memory_total"].as_u64().unwrap();
    let available = json["system"]["memory_available"].as_u64().unwrap();
    assert!(total > 0);
    assert!(available <= total);
}

#[tokio::test]
async fn info_matches_typed_response() {
    let (state, _) = make_state();
    let resp = get(&state, "/info").await;

    let info: InfoResponse = serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(info.process.pid, std::process::id());
    assert_eq!(info.rust.platform, std::env::consts::OS);
    assert!(!info.process.cwd.is_empty());
}

// --- 404 for unknown routes ---

#[tokio::test]
async fn unknown_route_returns_404_with_path() {
    let (state, _) = make_state();
    let resp = get(&state, "/does-not-exist").await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_security_headers(&resp);
    let json = body_json(resp).await;
    assert_eq!(
        json,
        serde_json::json!({ "error": "Not Found", "path": "/does-not-exist" })
    );
}

#[tokio::test]
async fn unknown_route_404_ignores_query_string() {
    let (state, _) = make_state();
    let resp = get(&state, "/nested/missing?x=1").await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json = body_json(resp).await;
    assert_eq!(json["path"], "/nested/missing");
}

#[tokio::test]
async fn wrong_method_keeps_405_with_headers() {
    let (state, _) = make_state();
    let resp = create_router(state)
        .oneshot(Request::post("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_security_headers(&resp);
}

// --- security headers ---

#[tokio::test]
async fn every_route_carries_security_headers() {
    let (state, _) = make_state();
    for path in ["/", "/health", "/ready", "/metrics", "/info", "/nope"] {
        let resp = get(&state, path).await;
        assert_security_headers(&resp);
    }
}

#[tokio::test]
async fn forwarded_headers_do_not_change_responses() {
    let (state, _) = make_state();
    let resp = create_router(state)
        .oneshot(
            Request::get("/ready")
                .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
                .header("x-forwarded-proto", "https")
                .header("x-forwarded-host", "probe.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_security_headers(&resp);
}
