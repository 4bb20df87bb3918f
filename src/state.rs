// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Process lifecycle state shared between handlers and the shutdown path

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Start time and shutdown flag of the running process
///
/// The shutdown flag has a single writer (the shutdown sequencer) and any
/// number of readers (request handlers).
#[derive(Debug)]
pub struct ProcessState {
    started_at: Instant,
    shutting_down: AtomicBool,
}

impl Default for ProcessState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            shutting_down: AtomicBool::new(false),
        }
    }

    /// Time elapsed since the process state was created
    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    #[must_use]
    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::Acquire)
    }

    /// Marks the process as draining
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn begin_shutdown(&self) -> bool {
        !self.shutting_down.swap(true, Ordering::AcqRel)
    }
}
