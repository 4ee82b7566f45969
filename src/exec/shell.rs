// src/exec/shell.rs

//! Shell executor: run a command through the shell and stream its output
//! into the logger.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::process::Command;
use tracing::debug;

use crate::config::ConfigFile;
use crate::errors::{Result, ShellError};
use crate::exec::command::{ProcessOutcome, ShellCommand};
use crate::exec::output::{CombinedPipe, forward_lines};
use crate::exec::pipefail::{PIPEFAIL_PREFIX, PipefailProbe};
use crate::log::Logger;
use crate::types::Platform;

/// Environment variable naming the user's shell.
pub const SHELL_ENV_VAR: &str = "SHELL";

/// Shell used when neither an override nor `$SHELL` is available.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Pick the shell program: explicit override, then `$SHELL`, then `/bin/sh`.
pub fn resolve_shell(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => std::env::var_os(SHELL_ENV_VAR)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SHELL)),
    }
}

/// Runs shell commands, forwarding every output line to the logger.
///
/// Each call to [`execute`](Self::execute) owns its child process for the
/// whole run. Independent calls may run concurrently on separate tasks; the
/// logger is the only thing they share.
pub struct ShellExecutor {
    logger: Arc<dyn Logger>,
    probe: PipefailProbe,
    shell: Option<PathBuf>,
    default_env: BTreeMap<String, String>,
    default_pipefail: bool,
}

impl ShellExecutor {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            logger,
            probe: PipefailProbe::new(),
            shell: None,
            default_env: BTreeMap::new(),
            default_pipefail: false,
        }
    }

    /// Build an executor from the `[shell]` section of a validated config.
    pub fn from_config(cfg: &ConfigFile, logger: Arc<dyn Logger>) -> Self {
        let mut executor = Self::new(logger)
            .with_default_env(cfg.shell.env.clone())
            .with_default_pipefail(cfg.shell.pipefail);
        if let Some(program) = &cfg.shell.program {
            executor = executor.with_shell(program);
        }
        executor
    }

    /// Use this shell for commands and for the pipefail probe.
    pub fn with_shell(mut self, shell: impl Into<PathBuf>) -> Self {
        let shell = shell.into();
        self.probe = self.probe.shell(shell.clone());
        self.shell = Some(shell);
        self
    }

    /// Replace the pipefail probe. Keeps a shell override already set on the
    /// executor.
    pub fn with_probe(mut self, probe: PipefailProbe) -> Self {
        self.probe = match &self.shell {
            Some(shell) => probe.shell(shell.clone()),
            None => probe,
        };
        self
    }

    /// Overlay applied to every command before the command's own overlay.
    pub fn with_default_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.default_env = env;
        self
    }

    pub fn with_default_pipefail(mut self, pipefail: bool) -> Self {
        self.default_pipefail = pipefail;
        self
    }

    /// Start a [`ShellCommand`] carrying this executor's defaults.
    pub fn command(&self, command: impl Into<String>) -> ShellCommand {
        ShellCommand::new(command).pipefail(self.default_pipefail)
    }

    /// Run `command` to completion.
    ///
    /// Output lines are logged while the process runs. A nonzero exit code is
    /// an error unless the command ignores errors. Neither errors nor log
    /// entries produced here contain the command text.
    pub async fn execute(&self, command: &ShellCommand) -> Result<ProcessOutcome> {
        let script = self.prepare_script(command).await;

        let pipe = CombinedPipe::new()?;

        let mut cmd = self.shell_process(&script);
        cmd.envs(&self.default_env)
            .envs(command.effective_env())
            .stdout(pipe.stdout)
            .stderr(pipe.stderr)
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(ShellError::Spawn)?;
        // The builder still owns our copies of the write ends; EOF only
        // arrives once they are closed.
        drop(cmd);
        let pid = child.id();
        debug!(pid, "started shell command");

        // Drain before waiting: a child blocked on a full pipe never exits.
        let logger = Arc::clone(&self.logger);
        let reader = pipe.reader;
        tokio::task::spawn_blocking(move || forward_lines(reader, logger.as_ref()))
            .await
            .map_err(anyhow::Error::from)??;

        let status = child.wait().await?;
        let exit_code = status.code().unwrap_or(-1);
        debug!(pid, exit_code, success = status.success(), "shell command exited");

        if exit_code != 0 && !command.ignores_errors() {
            return Err(ShellError::CommandFailed { exit_code });
        }

        Ok(ProcessOutcome {
            exit_code,
            pid,
            status,
        })
    }

    async fn prepare_script(&self, command: &ShellCommand) -> String {
        if command.wants_pipefail() {
            if self.probe.supports_pipefail().await {
                debug!("enabling pipefail for shell command");
                return format!("{PIPEFAIL_PREFIX}{}", command.command());
            }
            debug!("pipefail requested but unsupported; running command as is");
        }
        command.command().to_string()
    }

    // Build a shell command appropriate for the platform.
    fn shell_process(&self, script: &str) -> Command {
        match Platform::current() {
            Platform::Windows => {
                let mut c = Command::new("cmd");
                c.arg("/C").arg(script);
                c
            }
            Platform::Posix => {
                let mut c = Command::new(resolve_shell(self.shell.as_deref()));
                c.arg("-c").arg(script);
                c
            }
        }
    }
}

impl std::fmt::Debug for ShellExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellExecutor")
            .field("probe", &self.probe)
            .field("shell", &self.shell)
            .field("default_env", &self.default_env.keys().collect::<Vec<_>>())
            .field("default_pipefail", &self.default_pipefail)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_shell_wins() {
        let shell = resolve_shell(Some(Path::new("/usr/bin/zsh")));
        assert_eq!(shell, PathBuf::from("/usr/bin/zsh"));
    }

    #[test]
    fn executor_command_carries_default_pipefail() {
        let executor = ShellExecutor::new(crate::log::TracingLogger::shared())
            .with_default_pipefail(true);
        assert!(executor.command("pg_dump app").wants_pipefail());
    }
}
