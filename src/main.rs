use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use probe_service::{
    AppState, CONNECTION_LINGER, Config, GRACE_PERIOD, ProcessState, Result, ShutdownSequencer,
    create_router, stop_deadline, stop_requested,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // DEBUG picks the default log level, so read configuration first
    let config = Config::from_env();
    setup_tracing(config.as_ref().map_or("info", Config::default_log_level));

    let config = config.map_err(|e| {
        tracing::error!("Failed to start application: {}", e);
        e
    })?;

    // Process state starts its clock here
    let process = Arc::new(ProcessState::new());

    tracing::info!("Starting application on {}", config.bind_addr());
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Debug mode: {}", config.debug);

    // Drain on SIGTERM/SIGINT, then stop the server
    let (sequencer, stop_rx) = ShutdownSequencer::new(process.clone(), GRACE_PERIOD);
    sequencer.spawn();

    let state = Arc::new(AppState::new(config.clone(), process));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .map_err(|e| {
            tracing::error!("Failed to start application: failed to bind address: {}", e);
            e
        })?;

    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Listening on {}", addr);
    }
    tracing::info!("Endpoints:");
    tracing::info!("  - GET /        - Greeting");
    tracing::info!("  - GET /health  - Liveness check");
    tracing::info!("  - GET /ready   - Readiness check");
    tracing::info!("  - GET /metrics - Prometheus metrics");
    tracing::info!("  - GET /info    - Runtime and host information");

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown({
        let stop_rx = stop_rx.clone();
        async move {
            stop_requested(stop_rx).await;
            tracing::info!("HTTP server shutting down");
        }
    })
    .into_future();

    // A stalled client must not keep the process alive past the drain
    tokio::select! {
        result = server => result.map_err(|e| {
            tracing::error!("Server error: {}", e);
            e
        })?,
        _ = stop_deadline(stop_rx, CONNECTION_LINGER) => {
            tracing::warn!("Closing connections still open after shutdown");
        }
    }

    Ok(())
}

fn setup_tracing(default_level: &str) {
    // RUST_LOG wins; otherwise "info", or "debug" when DEBUG=true
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // One JSON object per line on stdout: timestamp, level, message, fields
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_span_list(false)
                .with_target(false)
                .with_writer(std::io::stdout),
        )
        .init();
}
