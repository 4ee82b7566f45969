// src/management/capture.rs

//! Captured output of an in-process command.

use std::borrow::Cow;
use std::io;

use crate::log::Logger;

/// In-memory sink standing in for a command's stdout and stderr.
///
/// Both streams write into the same buffer, so their relative order is kept.
#[derive(Debug, Default)]
pub struct CapturedOutput {
    buffer: Vec<u8>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.buffer)
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    fn take(&mut self) -> String {
        let bytes = std::mem::take(&mut self.buffer);
        match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }
}

impl io::Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Owns a [`CapturedOutput`] for one invocation and hands its contents to the
/// logger exactly once.
///
/// Callers flush explicitly; if the scope is dropped unflushed (a handler
/// panicked), the drop flushes instead.
pub struct CaptureScope<'a> {
    logger: &'a dyn Logger,
    output: CapturedOutput,
    flushed: bool,
}

impl<'a> CaptureScope<'a> {
    pub fn new(logger: &'a dyn Logger) -> Self {
        Self {
            logger,
            output: CapturedOutput::new(),
            flushed: false,
        }
    }

    pub fn output(&mut self) -> &mut CapturedOutput {
        &mut self.output
    }

    /// Log everything captured so far as a single info entry.
    pub fn flush(&mut self) {
        if self.flushed {
            return;
        }
        self.flushed = true;
        let contents = self.output.take();
        self.logger.info(&contents);
    }
}

impl Drop for CaptureScope<'_> {
    fn drop(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Infos(Mutex<Vec<String>>);

    impl Logger for Infos {
        fn info(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }

        fn error(&self, _message: &str) {}
    }

    #[test]
    fn flushes_once_even_when_dropped_afterwards() {
        let logger = Infos::default();
        {
            let mut scope = CaptureScope::new(&logger);
            write!(scope.output(), "OK\n").unwrap();
            scope.flush();
        }
        assert_eq!(*logger.0.lock().unwrap(), vec!["OK\n".to_string()]);
    }

    #[test]
    fn drop_flushes_unflushed_output() {
        let logger = Infos::default();
        {
            let mut scope = CaptureScope::new(&logger);
            scope.output().write_all(b"partial").unwrap();
        }
        assert_eq!(*logger.0.lock().unwrap(), vec!["partial".to_string()]);
    }

    #[test]
    fn contents_shows_interleaved_writes() {
        let mut out = CapturedOutput::new();
        writeln!(out, "stdout line").unwrap();
        writeln!(out, "stderr line").unwrap();
        assert_eq!(out.contents(), "stdout line\nstderr line\n");
        assert!(!out.is_empty());
    }
}
