//! Prometheus text exposition for process gauges

use std::fmt::Write;
use std::time::Duration;

use super::process::ProcessSnapshot;

/// Content type served on `/metrics`
pub const CONTENT_TYPE: &str = "text/plain; charset=utf-8";

pub const UPTIME: &str = "process_uptime_seconds";
pub const CPU_PERCENT: &str = "process_cpu_percent";
pub const MEMORY_BYTES: &str = "process_memory_bytes";
pub const OPEN_FDS: &str = "process_open_fds";
pub const THREADS: &str = "process_threads";

fn family_header(out: &mut String, name: &str, help: &str) {
    let _ = writeln!(out, "# HELP {name} {help}");
    let _ = writeln!(out, "# TYPE {name} gauge");
}

// f32 widened to f64 carries noise digits; one decimal is enough for a percentage
fn round_tenths(value: f32) -> f64 {
    (f64::from(value) * 10.0).round() / 10.0
}

/// Renders the six process gauges
///
/// Families are separated by a blank line. Floats use their shortest
/// round-trip form with a trailing `.0` for whole numbers.
#[must_use]
pub fn render(uptime: Duration, process: &ProcessSnapshot) -> String {
    let mut out = String::with_capacity(768);

    family_header(&mut out, UPTIME, "Process uptime in seconds");
    let _ = writeln!(out, "{UPTIME} {:?}", uptime.as_secs_f64());
    out.push('\n');

    family_header(&mut out, CPU_PERCENT, "Process CPU usage percentage");
    let _ = writeln!(out, "{CPU_PERCENT} {:?}", round_tenths(process.cpu_percent));
    out.push('\n');

    family_header(&mut out, MEMORY_BYTES, "Process memory usage in bytes");
    let _ = writeln!(out, "{MEMORY_BYTES}{{type=\"rss\"}} {}", process.rss_bytes);
    let _ = writeln!(out, "{MEMORY_BYTES}{{type=\"vms\"}} {}", process.vms_bytes);
    out.push('\n');

    family_header(&mut out, OPEN_FDS, "Number of open file descriptors");
    let _ = writeln!(out, "{OPEN_FDS} {}", process.open_fds);
    out.push('\n');

    family_header(&mut out, THREADS, "Number of threads");
    let _ = writeln!(out, "{THREADS} {}", process.threads);

    out
}
