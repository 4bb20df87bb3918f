// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Configuration module for the probe service
//!
//! Loads configuration once at startup from environment variables
//! (optionally seeded from a `.env` file). Values never change afterwards.

use crate::error::{AppError, Result};


/// Default configuration values
pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 8080;
    pub const ENVIRONMENT: &str = "production";
}

/// Environment variable names used by the application
pub mod env_vars {
    pub const HOST: &str = "HOST";
    pub const PORT: &str = "PORT";
    pub const ENVIRONMENT: &str = "FLASK_ENV";
    pub const DEBUG: &str = "DEBUG";
}

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: defaults::HOST.to_string(),
            port: defaults::PORT,
            environment: defaults::ENVIRONMENT.to_string(),
            debug: false,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup
    ///
    /// Missing variables fall back to [`defaults`]. A `PORT` that is not a
    /// valid `u16` is rejected rather than silently replaced.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(env_vars::HOST).unwrap_or_else(|| defaults::HOST.to_string());

        let port = match lookup(env_vars::PORT) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                AppError::Config(format!("invalid {} value '{}': {}", env_vars::PORT, raw, e))
            })?,
            None => defaults::PORT,
        };

        let environment =
            lookup(env_vars::ENVIRONMENT).unwrap_or_else(|| defaults::ENVIRONMENT.to_string());

        let debug = lookup(env_vars::DEBUG)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Config {
            host,
            port,
            environment,
            debug,
        })
    }

    /// Address string the HTTP listener binds to
    #[must_use]
    pub fn bind_addr(&self) -> String {
        // IPv6 literals need brackets to form a valid socket address
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Default log directive when `RUST_LOG` is not set
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}
