pub mod recording_logger;
pub mod spy_launcher;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

pub use recording_logger::{LogEntry, RecordingLogger, Severity};
pub use spy_launcher::{SpyLauncher, SpyOutcome};

static INIT: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
///
/// `RUST_LOG` picks the filter, `info` otherwise. Output is only shown for
/// failing tests.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Upper bound on how long a spawned shell may take in a test.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Await `f`, failing the test if it outlives [`TEST_TIMEOUT`].
///
/// Guards against a child whose output is never drained to EOF.
pub async fn with_timeout<F: Future>(f: F) -> F::Output {
    match tokio::time::timeout(TEST_TIMEOUT, f).await {
        Ok(out) => out,
        Err(_) => panic!("shell command still running after {TEST_TIMEOUT:?}"),
    }
}
