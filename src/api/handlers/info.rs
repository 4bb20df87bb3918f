use axum::Json;
use serde::{Deserialize, Serialize};

use super::index::RUSTC_VERSION;
use crate::error::Result;
use crate::metrics::sample_system;

#[derive(Debug, Serialize, Deserialize)]
pub struct RuntimeInfo {
    pub version: String,
    pub executable: String,
    pub platform: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub user: String,
    pub cwd: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemInfo {
    pub cpu_count: usize,
    pub memory_total: u64,
    pub memory_available: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InfoResponse {
    pub rust: RuntimeInfo,
    pub process: ProcessInfo,
    pub system: SystemInfo,
}

/// GET /info
pub async fn info() -> Result<Json<InfoResponse>> {
    let executable = std::env::current_exe()?;
    let cwd = std::env::current_dir()?;
    let system = sample_system();

    Ok(Json(InfoResponse {
        rust: RuntimeInfo {
            version: RUSTC_VERSION.to_string(),
            executable: executable.display().to_string(),
            platform: std::env::consts::OS.to_string(),
        },
        process: ProcessInfo {
            pid: std::process::id(),
            user: std::env::var("USER").unwrap_or_else(|_| "unknown".to_string()),
            cwd: cwd.display().to_string(),
        },
        system: SystemInfo {
            cpu_count: system.cpu_count,
            memory_total: system.memory_total,
            memory_available: system.memory_available,
        },
    }))
}
