// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running external commands (dump
//! and restore utilities) through the shell, using
//! `tokio::process::Command`, and forwarding their output to the injected
//! [`Logger`](crate::log::Logger).
//!
//! - [`command`] holds the per-call `ShellCommand` and its `ProcessOutcome`.
//! - [`shell`] owns the `ShellExecutor` and shell selection.
//! - [`output`] gives the child one pipe for stdout and stderr and forwards
//!   it line by line.
//! - [`pipefail`] provides the `PipefailProbe` and the `ProbeLauncher` trait,
//!   which tests can replace with a spy.

pub mod command;
pub mod output;
pub mod pipefail;
pub mod shell;

pub use command::{ProcessOutcome, ShellCommand};
pub use pipefail::{PipefailProbe, ProbeLauncher, ProcessProbeLauncher};
pub use shell::{ShellExecutor, resolve_shell};
