// src/logging.rs

//! Logging setup for `pgclone-shell` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. explicit level passed by the caller (usually `[logging].level`)
//! 2. `PGCLONE_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Logs are sent to STDERR so that stdout stays free for whatever the host
//! program prints.

use anyhow::Result;
use tracing_subscriber::fmt;

use crate::types::LogLevel;

/// Environment variable consulted when no explicit level is given.
pub const LOG_ENV_VAR: &str = "PGCLONE_LOG";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup. A second call is reported as an error
/// instead of panicking, since library hosts may already own a subscriber.
pub fn init_logging(level: Option<LogLevel>) -> Result<()> {
    let level = resolve_level(level, std::env::var(LOG_ENV_VAR).ok().as_deref());

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))?;

    Ok(())
}

fn resolve_level(explicit: Option<LogLevel>, env_value: Option<&str>) -> tracing::Level {
    match explicit {
        Some(lvl) => lvl.into(),
        None => env_value
            .and_then(|s| s.parse::<LogLevel>().ok())
            .unwrap_or_default()
            .into(),
    }
}
