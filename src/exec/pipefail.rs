// src/exec/pipefail.rs

//! Detection of `set -o pipefail` support in the active shell.
//!
//! The probe is best effort: every failure mode (option rejected, shell
//! missing, spawn error) means "unsupported", never an error. Commands then
//! simply run without the prefix.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::Command;
use tracing::debug;

use crate::exec::shell::resolve_shell;
use crate::types::Platform;

/// Prefix that turns on pipefail for the rest of a `-c` script.
pub const PIPEFAIL_PREFIX: &str = "set -o pipefail; ";

/// Future returned by [`ProbeLauncher::launch`]: the exit code of the probe.
pub type LaunchFuture<'a> = Pin<Box<dyn Future<Output = io::Result<i32>> + Send + 'a>>;

/// Trait abstracting how the probe process is started.
///
/// Production code uses [`ProcessProbeLauncher`]; tests can provide their own
/// implementation that records invocations without spawning anything.
pub trait ProbeLauncher: Send + Sync {
    /// Run `program` with `args`, output discarded, and return its exit code
    /// (`-1` when killed by a signal).
    fn launch<'a>(&'a self, program: &'a Path, args: &'a [&'a str]) -> LaunchFuture<'a>;
}

/// Launcher that spawns a real process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessProbeLauncher;

impl ProbeLauncher for ProcessProbeLauncher {
    fn launch<'a>(&'a self, program: &'a Path, args: &'a [&'a str]) -> LaunchFuture<'a> {
        Box::pin(async move {
            let status = Command::new(program)
                .args(args)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .kill_on_drop(true)
                .status()
                .await?;
            Ok(status.code().unwrap_or(-1))
        })
    }
}

/// Checks whether the shell accepts `set -o pipefail`.
///
/// Nothing is cached: every call to [`supports_pipefail`] launches a fresh
/// probe, so a changed `$SHELL` is picked up.
///
/// [`supports_pipefail`]: PipefailProbe::supports_pipefail
#[derive(Clone)]
pub struct PipefailProbe {
    launcher: Arc<dyn ProbeLauncher>,
    platform: Platform,
    shell: Option<PathBuf>,
}

impl PipefailProbe {
    pub fn new() -> Self {
        Self::with_launcher(Arc::new(ProcessProbeLauncher))
    }

    pub fn with_launcher(launcher: Arc<dyn ProbeLauncher>) -> Self {
        Self {
            launcher,
            platform: Platform::current(),
            shell: None,
        }
    }

    /// Override the detected platform.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Probe this shell instead of `$SHELL`.
    pub fn shell(mut self, shell: impl Into<PathBuf>) -> Self {
        self.shell = Some(shell.into());
        self
    }

    pub async fn supports_pipefail(&self) -> bool {
        if !self.platform.is_posix() {
            debug!("no POSIX shell on this platform; pipefail unsupported");
            return false;
        }

        let shell = resolve_shell(self.shell.as_deref());
        match self.launcher.launch(&shell, &["-c", "set -o pipefail"]).await {
            Ok(0) => true,
            Ok(code) => {
                debug!(
                    shell = %shell.display(),
                    exit_code = code,
                    "shell rejected pipefail option"
                );
                false
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(shell = %shell.display(), "shell binary not found; pipefail unsupported");
                false
            }
            Err(e) => {
                debug!(shell = %shell.display(), error = %e, "pipefail probe failed");
                false
            }
        }
    }
}

impl Default for PipefailProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PipefailProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipefailProbe")
            .field("platform", &self.platform)
            .field("shell", &self.shell)
            .finish_non_exhaustive()
    }
}
