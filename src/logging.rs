// src/logging.rs

//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! The library itself only emits events (`debug!` for state construction and
//! transitions, `trace!` for engine steps). Applications embedding it can
//! call [`init_logging`] once at startup.
//!
//! Priority for determining the log level:
//! 1. the `level` argument (if provided)
//! 2. `FLOWSCHED_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Logs go to STDERR.

use anyhow::{Result, anyhow};
use tracing::Level;
use tracing_subscriber::fmt;

pub const LOG_ENV: &str = "FLOWSCHED_LOG";

/// Install the global fmt subscriber.
///
/// Errors if a global subscriber is already set.
pub fn init_logging(level: Option<Level>) -> Result<()> {
    let level = level.unwrap_or_else(|| {
        std::env::var(LOG_ENV)
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(Level::INFO)
    });

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

pub fn parse_level_str(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
