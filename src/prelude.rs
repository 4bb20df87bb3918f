// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for convenient use.
//! Users of the library can import everything they need with:
//!
//! ```rust
//! use probe_service::prelude::*;
//! ```

// Core types
pub use crate::config::Config;
pub use crate::error::{AppError, Result};

// HTTP API
pub use crate::api::{AppState, ErrorBody, create_router};

// Lifecycle
pub use crate::shutdown::{GRACE_PERIOD, ShutdownSequencer};
pub use crate::state::ProcessState;

// Metrics
pub use crate::metrics::{ProcessSnapshot, SystemSnapshot};
