// src/exec/output.rs

//! Forwarding of child process output to the logger.

use std::io::{self, BufRead, BufReader, PipeReader, PipeWriter, Read};

use crate::log::Logger;

/// One pipe handed to the child as both stdout and stderr.
///
/// Both streams share a single write end, so the reader sees lines exactly
/// in the order the child wrote them.
pub struct CombinedPipe {
    pub reader: PipeReader,
    pub stdout: PipeWriter,
    pub stderr: PipeWriter,
}

impl CombinedPipe {
    pub fn new() -> io::Result<Self> {
        let (reader, stdout) = io::pipe()?;
        let stderr = stdout.try_clone()?;
        Ok(Self {
            reader,
            stdout,
            stderr,
        })
    }
}

/// Read `reader` to EOF, sending each line to `logger.info` as soon as it is
/// read.
///
/// Lines are decoded as lossy UTF-8 and right-trimmed. Blocking; the
/// executor runs it on tokio's blocking pool.
pub fn forward_lines<R: Read>(reader: R, logger: &dyn Logger) -> io::Result<()> {
    for segment in BufReader::new(reader).split(b'\n') {
        logger.info(&decode_line(&segment?));
    }
    Ok(())
}

fn decode_line(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Lines(Mutex<Vec<String>>);

    impl Logger for Lines {
        fn info(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }

        fn error(&self, _message: &str) {
            panic!("forward_lines never logs errors");
        }
    }

    #[test]
    fn forwards_lines_in_order_and_trimmed() {
        let logger = Lines::default();
        let output: &[u8] = b"first  \r\nsecond\n\nlast without newline";

        forward_lines(output, &logger).unwrap();

        let lines = logger.0.into_inner().unwrap();
        assert_eq!(lines, vec!["first", "second", "", "last without newline"]);
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let logger = Lines::default();
        let output: &[u8] = b"caf\xe9\n";

        forward_lines(output, &logger).unwrap();

        let lines = logger.0.into_inner().unwrap();
        assert_eq!(lines, vec!["caf\u{FFFD}"]);
    }

    #[test]
    fn writes_through_both_ends_keep_their_interleaving() {
        let logger = Lines::default();
        let CombinedPipe {
            reader,
            mut stdout,
            mut stderr,
        } = CombinedPipe::new().unwrap();

        for i in 0..20 {
            writeln!(stdout, "out{i}").unwrap();
            writeln!(stderr, "err{i}").unwrap();
        }
        drop(stdout);
        drop(stderr);

        forward_lines(reader, &logger).unwrap();

        let expected: Vec<String> = (0..20)
            .flat_map(|i| [format!("out{i}"), format!("err{i}")])
            .collect();
        assert_eq!(logger.0.into_inner().unwrap(), expected);
    }

    #[test]
    fn empty_stream_is_a_no_op() {
        let logger = Lines::default();
        forward_lines(io::empty(), &logger).unwrap();
        assert!(logger.0.into_inner().unwrap().is_empty());
    }
}
