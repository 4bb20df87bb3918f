// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Process metrics module for the probe service
//!
//! Samples the current process and host, and renders the Prometheus text
//! exposition served on `/metrics`.

pub mod exposition;
mod process;


/// Process and host sampling
pub use process::{
    CPU_SAMPLE_WINDOW, ProcessSnapshot, SystemSnapshot, sample_process, sample_system,
};
