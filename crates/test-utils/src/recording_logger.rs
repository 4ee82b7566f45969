use std::sync::{Arc, Mutex};

use pgclone_shell::Logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub severity: Severity,
    pub message: String,
}

/// A logger that:
/// - records every entry with its severity, in call order
/// - can be shared with the component under test via `Arc` clones.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to pass to components expecting `Arc<dyn Logger>`.
    pub fn shared(&self) -> Arc<dyn Logger> {
        Arc::new(self.clone())
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.messages(Severity::Info)
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(Severity::Error)
    }

    fn messages(&self, severity: Severity) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.severity == severity)
            .map(|e| e.message.clone())
            .collect()
    }

    fn push(&self, severity: Severity, message: &str) {
        self.entries.lock().unwrap().push(LogEntry {
            severity,
            message: message.to_string(),
        });
    }
}

impl Logger for RecordingLogger {
    fn info(&self, message: &str) {
        self.push(Severity::Info, message);
    }

    fn error(&self, message: &str) {
        self.push(Severity::Error, message);
    }
}
