#![allow(dead_code)]

use std::sync::Arc;

use pgclone_shell::exec::ShellExecutor;
use pgclone_shell::exec::pipefail::PipefailProbe;
use pgclone_shell::types::Platform;

pub use pgclone_shell_test_utils::{
    init_tracing, with_timeout, RecordingLogger, Severity, SpyLauncher, SpyOutcome,
};

/// Executor on `/bin/sh` whose pipefail probe never reports support, so
/// tests do not depend on the caller's `$SHELL`.
pub fn sh_executor(logger: &RecordingLogger) -> ShellExecutor {
    let probe = PipefailProbe::with_launcher(Arc::new(SpyLauncher::new(SpyOutcome::Exit(1))))
        .platform(Platform::Posix);
    ShellExecutor::new(logger.shared())
        .with_shell("/bin/sh")
        .with_probe(probe)
}
