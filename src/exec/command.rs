// src/exec/command.rs

//! A single shell invocation and the result of running it.

use std::collections::BTreeMap;
use std::fmt;
use std::process::ExitStatus;

/// One command to run through the shell.
///
/// Built by the caller and consumed by [`ShellExecutor::execute`]. The
/// `Debug` output redacts the command text and the overlay values, since
/// both routinely carry credentials.
///
/// [`ShellExecutor::execute`]: crate::exec::ShellExecutor::execute
#[derive(Clone, Default)]
pub struct ShellCommand {
    command: String,
    ignore_errors: bool,
    env: BTreeMap<String, Option<String>>,
    pipefail: bool,
}

impl ShellCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    /// Return normally even if the command exits nonzero.
    pub fn ignore_errors(mut self, ignore: bool) -> Self {
        self.ignore_errors = ignore;
        self
    }

    /// Prefix the command with `set -o pipefail` when the shell supports it.
    pub fn pipefail(mut self, pipefail: bool) -> Self {
        self.pipefail = pipefail;
        self
    }

    /// Add one overlay entry. `None` entries are dropped at spawn time.
    pub fn env<K, V>(mut self, key: K, value: Option<V>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env.insert(key.into(), value.map(Into::into));
        self
    }

    pub fn envs<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in entries {
            self.env.insert(key.into(), value.map(Into::into));
        }
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn ignores_errors(&self) -> bool {
        self.ignore_errors
    }

    pub fn wants_pipefail(&self) -> bool {
        self.pipefail
    }

    /// Overlay entries that actually reach the child, i.e. those with a value.
    pub fn effective_env(&self) -> impl Iterator<Item = (&str, &str)> {
        self.env
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
    }
}

impl fmt::Debug for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellCommand")
            .field("command", &"<redacted>")
            .field("ignore_errors", &self.ignore_errors)
            .field("env", &self.env.keys().collect::<Vec<_>>())
            .field("pipefail", &self.pipefail)
            .finish()
    }
}

/// Outcome of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Exit code, or `-1` if the process was terminated by a signal.
    pub exit_code: i32,
    /// OS process id of the child, if the platform reported one at spawn.
    pub pid: Option<u32>,
    /// Raw status as reported by the OS.
    pub status: ExitStatus,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_values_are_not_effective() {
        let cmd = ShellCommand::new("pg_dump")
            .env("PGPASSWORD", Some("hunter2"))
            .env::<_, String>("PGSSLMODE", None);

        let env: Vec<_> = cmd.effective_env().collect();
        assert_eq!(env, vec![("PGPASSWORD", "hunter2")]);
    }

    #[test]
    fn debug_output_redacts_command_and_values() {
        let cmd = ShellCommand::new("psql postgres://u:secret@db/app")
            .env("PGPASSWORD", Some("hunter2"));
        let rendered = format!("{cmd:?}");

        assert!(!rendered.contains("secret"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("PGPASSWORD"));
    }

    #[test]
    fn later_overlay_entries_replace_earlier_ones() {
        let cmd = ShellCommand::new("true")
            .env("A", Some("1"))
            .envs([("A", Some("2")), ("B", None::<&str>)]);

        let env: Vec<_> = cmd.effective_env().collect();
        assert_eq!(env, vec![("A", "2")]);
    }
}
