// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! # Probe Service
//!
//! Example HTTP service demonstrating container health conventions.
//!
//! The service answers liveness (`/health`) and readiness (`/ready`) probes,
//! exposes process gauges in Prometheus text format (`/metrics`), adds
//! security headers to every response and drains for a fixed grace period
//! when asked to terminate.
//!
//! ## Main modules
//! - `api`: HTTP router, handlers and request pipeline
//! - `config`: configuration management
//! - `error`: error types
//! - `metrics`: process sampling and text exposition
//! - `shutdown`: termination signals and drain sequencing
//! - `state`: process lifecycle state
//! - `prelude`: commonly used types and traits

mod api;
mod config;
mod error;
mod metrics;
pub mod prelude;
mod shutdown;
mod state;

// Re-export commonly used types
/// Application configuration
pub use config::Config;

/// Application error and result type
pub use error::{AppError, Result};

/// HTTP API router and state
pub use api::{AppState, ErrorBody, create_router, with_pipeline};

/// Response bodies of the JSON endpoints
pub use api::handlers::{HealthResponse, IndexResponse, InfoResponse, ReadyResponse};

/// Client details resolved from forwarding headers
pub use api::middleware::{ClientInfo, SECURITY_HEADERS, resolve_client};

/// Process sampling and Prometheus text exposition
pub use metrics::{
    CPU_SAMPLE_WINDOW, ProcessSnapshot, SystemSnapshot, exposition, sample_process, sample_system,
};

/// Shutdown sequencing
pub use shutdown::{
    CONNECTION_LINGER, GRACE_PERIOD, ShutdownSequencer, stop_deadline, stop_requested,
    wait_for_signal,
};

/// Process lifecycle state
pub use state::ProcessState;
