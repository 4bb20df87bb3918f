//! Application state shared across HTTP handlers

use std::sync::Arc;

use crate::config::Config;
use crate::state::ProcessState;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub process: Arc<ProcessState>,
}

impl AppState {
    pub fn new(config: Config, process: Arc<ProcessState>) -> Self {
        Self { config, process }
    }
}
