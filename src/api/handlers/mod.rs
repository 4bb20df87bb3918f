// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

mod fallback;
mod health;
mod index;
mod info;
mod metrics;
mod ready;

pub use fallback::not_found;
pub use health::{HealthResponse, health_check};
pub use index::{IndexResponse, index};
pub use info::{InfoResponse, info};
pub use metrics::metrics_handler;
pub use ready::{ReadyResponse, readiness_check};
