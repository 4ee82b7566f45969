#![cfg(unix)]

// No `init_tracing()` here: `Toolkit::init` installs the global subscriber
// itself and would fail if one were already set.

mod common;
use crate::common::{RecordingLogger, Severity};

use std::io::Write;
use tempfile::NamedTempFile;

use pgclone_shell::config::load_and_validate;
use pgclone_shell::{CommandRegistry, ShellCommand, Toolkit};

const CONFIG: &str = r#"
[shell]
program = "/bin/sh"

[shell.env]
PGCLONE_TEST_KIT = "wired"

[logging]
level = "debug"
"#;

fn config_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{CONFIG}").unwrap();
    file
}

fn registry() -> CommandRegistry {
    CommandRegistry::new().with("check", |_, out| {
        writeln!(out, "System check identified no issues")?;
        Ok(())
    })
}

#[tokio::test]
async fn both_components_report_to_the_same_logger() {
    let file = config_file();
    let cfg = load_and_validate(file.path()).unwrap();
    let logger = RecordingLogger::new();
    let kit = Toolkit::new(&cfg, registry(), logger.shared());

    kit.executor
        .execute(&ShellCommand::new("echo \"$PGCLONE_TEST_KIT\""))
        .await
        .unwrap();
    kit.runner.run_simple("check").unwrap();

    let entries = logger.entries();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.severity == Severity::Info));
    assert_eq!(entries[0].message, "wired");
    assert_eq!(entries[1].message, "System check identified no issues\n");
}

#[tokio::test]
async fn init_loads_config_and_installs_logging() {
    let file = config_file();

    let kit = Toolkit::init(file.path(), registry()).unwrap();

    let outcome = kit
        .executor
        .execute(&ShellCommand::new("echo \"$PGCLONE_TEST_KIT\""))
        .await
        .unwrap();
    assert_eq!(outcome.exit_code, 0);
    kit.runner.run_simple("check").unwrap();

    // The subscriber is process-wide; a second install is refused.
    assert!(Toolkit::init(file.path(), registry()).is_err());
}

#[test]
fn init_reports_a_missing_config_file() {
    let err = Toolkit::init("/no/such/Pgclone.toml", registry()).unwrap_err();

    assert!(err.to_string().contains("IO error"));
}
