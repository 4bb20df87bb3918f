//! Process and host statistics sampling

use std::time::{Duration, Instant};
use sysinfo::{
    CpuRefreshKind, MemoryRefreshKind, Pid, ProcessRefreshKind, ProcessesToUpdate, RefreshKind,
    System,
};

use crate::error::{AppError, Result};

/// Window over which process CPU usage is measured
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_millis(100);

/// Point-in-time statistics of the current process
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSnapshot {
    /// CPU usage over the sample window, relative to a single core
    pub cpu_percent: f32,
    pub rss_bytes: u64,
    pub vms_bytes: u64,
    pub open_fds: u64,
    pub threads: u64,
}

/// Host-wide CPU and memory figures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemSnapshot {
    pub cpu_count: usize,
    pub memory_total: u64,
    pub memory_available: u64,
}

fn current_pid() -> Result<Pid> {
    sysinfo::get_current_pid().map_err(|e| AppError::Metrics(e.to_string()))
}

/// Refreshes the process entry and returns its accumulated CPU time in ms
fn refresh_process(system: &mut System, pid: Pid) -> Result<u64> {
    system.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::nothing().with_cpu().with_memory(),
    );
    system
        .process(pid)
        .map(|p| p.accumulated_cpu_time())
        .ok_or_else(|| AppError::Metrics(format!("process {pid} not found")))
}

/// CPU time spent over wall time elapsed, in percent of one core
fn cpu_percent(cpu_ms: u64, wall: Duration) -> f32 {
    let wall_ms = wall.as_secs_f64() * 1000.0;
    if wall_ms <= 0.0 {
        return 0.0;
    }
    (cpu_ms as f64 / wall_ms * 100.0) as f32
}

/// Samples the current process
///
/// CPU usage is the CPU time consumed between two readings `window` apart,
/// divided by the wall time that actually elapsed. `Process::cpu_usage` is
/// not used: sysinfo skips refreshes closer together than its own minimum
/// interval, which is longer than the window.
pub async fn sample_process(window: Duration) -> Result<ProcessSnapshot> {
    let pid = current_pid()?;
    let mut system = System::new();

    let cpu_before = refresh_process(&mut system, pid)?;
    let started = Instant::now();
    tokio::time::sleep(window).await;
    let cpu_after = refresh_process(&mut system, pid)?;
    let elapsed = started.elapsed();

    let process = system
        .process(pid)
        .ok_or_else(|| AppError::Metrics(format!("process {pid} not found")))?;

    Ok(ProcessSnapshot {
        cpu_percent: cpu_percent(cpu_after.saturating_sub(cpu_before), elapsed),
        rss_bytes: process.memory(),
        vms_bytes: process.virtual_memory(),
        open_fds: count_entries("/proc/self/fd").unwrap_or(0),
        threads: count_entries("/proc/self/task").unwrap_or(1),
    })
}

/// Reads host CPU count and memory totals
pub fn sample_system() -> SystemSnapshot {
    let system = System::new_with_specifics(
        RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::nothing())
            .with_memory(MemoryRefreshKind::nothing().with_ram()),
    );

    let cpu_count = match system.cpus().len() {
        0 => std::thread::available_parallelism().map_or(1, |n| n.get()),
        n => n,
    };

    SystemSnapshot {
        cpu_count,
        memory_total: system.total_memory(),
        memory_available: system.available_memory(),
    }
}

// procfs lists one entry per open descriptor / per thread
#[cfg(target_os = "linux")]
fn count_entries(dir: &str) -> Option<u64> {
    std::fs::read_dir(dir)
        .ok()
        .map(|entries| entries.filter_map(|e| e.ok()).count() as u64)
}

#[cfg(not(target_os = "linux"))]
fn count_entries(_dir: &str) -> Option<u64> {
    None
}
