// src/lib.rs

//! Process execution and output capture for the pgclone snapshot/restore
//! tool.
//!
//! - [`exec`] runs dump/restore utilities through the shell and streams
//!   their output into a [`Logger`].
//! - [`management`] runs in-process commands with their output captured and
//!   flushed to the same logger.
//! - [`config`] and [`logging`] cover `Pgclone.toml` and subscriber setup.

pub mod config;
pub mod errors;
pub mod exec;
pub mod log;
pub mod logging;
pub mod management;
pub mod types;

use std::path::Path;
use std::sync::Arc;

pub use crate::errors::{Result, ShellError};
pub use crate::exec::{PipefailProbe, ProcessOutcome, ShellCommand, ShellExecutor};
pub use crate::log::{Logger, TracingLogger};
pub use crate::management::{CommandDispatch, CommandRegistry, CommandRunner};

use crate::config::{ConfigFile, load_and_validate};

/// Both components wired to one logger, as a host program uses them.
#[derive(Debug)]
pub struct Toolkit<D> {
    pub executor: ShellExecutor,
    pub runner: CommandRunner<D>,
}

impl<D: CommandDispatch> Toolkit<D> {
    pub fn new(cfg: &ConfigFile, dispatch: D, logger: Arc<dyn Logger>) -> Self {
        Self {
            executor: ShellExecutor::from_config(cfg, Arc::clone(&logger)),
            runner: CommandRunner::new(dispatch, logger),
        }
    }

    /// Load `path`, install the `tracing` subscriber and wire both
    /// components to a [`TracingLogger`].
    ///
    /// Meant for program start-up; call it once.
    pub fn init(path: impl AsRef<Path>, dispatch: D) -> anyhow::Result<Self> {
        let cfg = load_and_validate(path)?;
        logging::init_logging(cfg.logging.level)?;
        Ok(Self::new(&cfg, dispatch, TracingLogger::shared()))
    }
}
