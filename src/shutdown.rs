// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Graceful shutdown sequencing
//!
//! Running → Draining on the first termination signal: the shutdown flag is
//! set so `/` and `/ready` answer 503 while the server keeps serving.
//! Draining → Terminated once the fixed grace period elapses, at which point
//! the HTTP server is told to stop. Connections still open
//! [`CONNECTION_LINGER`] after that are dropped so the process always exits.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::state::ProcessState;

/// Time allotted for in-flight requests before the server stops
pub const GRACE_PERIOD: Duration = Duration::from_secs(2);

/// How long open connections may outlive the grace period
pub const CONNECTION_LINGER: Duration = Duration::from_millis(500);

/// Resolves once the sequencer has asked the server to stop
///
/// Never resolves if the sequencer went away without sending, so a failed
/// signal handler install does not take the server down.
pub async fn stop_requested(mut stop_rx: watch::Receiver<bool>) {
    if stop_rx.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Resolves `linger` after the stop request, bounding connection draining
pub async fn stop_deadline(stop_rx: watch::Receiver<bool>, linger: Duration) {
    stop_requested(stop_rx).await;
    tokio::time::sleep(linger).await;
}

/// Waits for SIGTERM or SIGINT and returns the signal name
#[cfg(unix)]
pub async fn wait_for_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    let mut interrupt = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = terminate.recv() => Ok("SIGTERM"),
        _ = interrupt.recv() => Ok("SIGINT"),
    }
}

/// Waits for Ctrl+C and returns the signal name
#[cfg(not(unix))]
pub async fn wait_for_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("Ctrl+C")
}

/// Drives the Running → Draining → Terminated transitions
pub struct ShutdownSequencer {
    process: Arc<ProcessState>,
    grace: Duration,
    stop_tx: watch::Sender<bool>,
}

impl ShutdownSequencer {
    /// Creates a sequencer and the receiver the HTTP server waits on
    pub fn new(process: Arc<ProcessState>, grace: Duration) -> (Self, watch::Receiver<bool>) {
        let (stop_tx, stop_rx) = watch::channel(false);
        (
            Self {
                process,
                grace,
                stop_tx,
            },
            stop_rx,
        )
    }

    /// Marks the process as draining, waits the grace period, then stops
    /// the server
    ///
    /// Only the first call does anything; later calls return immediately.
    pub async fn drain(&self, reason: &str) {
        if !self.process.begin_shutdown() {
            tracing::debug!("Ignoring {}, shutdown already in progress", reason);
            return;
        }

        tracing::info!("Received signal {}, starting graceful shutdown...", reason);
        tracing::info!("Waiting for in-flight requests to complete...");
        tokio::time::sleep(self.grace).await;
        tracing::info!("Shutdown complete");

        let _ = self.stop_tx.send(true);
    }

    /// Spawns the task that waits for a termination signal and drains
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            match wait_for_signal().await {
                Ok(name) => self.drain(name).await,
                Err(e) => tracing::error!("Failed to install signal handlers: {}", e),
            }
        })
    }
}
