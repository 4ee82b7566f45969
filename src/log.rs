// src/log.rs

//! Logger capability injected into the executor and the command runner.
//!
//! Components never look up a global logger themselves; they receive an
//! `Arc<dyn Logger>` at construction. Production code uses
//! [`TracingLogger`]; tests can provide their own implementation that
//! records entries (see the `pgclone-shell-test-utils` crate).

use std::sync::Arc;

use tracing::{error, info};

/// Sink for the output of commands and for failure reports.
///
/// Implementations must tolerate concurrent appends: several executor calls
/// may share one logger from different tasks.
pub trait Logger: Send + Sync {
    /// Informational entry, e.g. one line of child process output.
    fn info(&self, message: &str);

    /// Error entry, e.g. a failed in-process command.
    fn error(&self, message: &str);
}

/// Logger that forwards every entry to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    /// Convenience constructor returning the shared handle components expect.
    pub fn shared() -> Arc<dyn Logger> {
        Arc::new(TracingLogger)
    }
}

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "pgclone", "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: "pgclone", "{message}");
    }
}
