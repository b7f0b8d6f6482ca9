//! `io::Write` adapter over a logger
//!
//! Bytes written to a [`LogWriter`] are buffered until a newline arrives;
//! every complete line becomes one log call at the writer's level. A
//! trailing partial line is logged on `flush` and when the writer drops.
//! Hand it to anything that wants a writer, e.g. a child process pipe.

use crate::core::fields::Fields;
use crate::core::logger::Logger;
use std::io::{self, Write};

pub struct LogWriter {
    logger: Logger,
    level: String,
    buffer: Vec<u8>,
}

impl LogWriter {
    pub fn new(logger: Logger, level: impl Into<String>) -> Self {
        Self {
            logger,
            level: level.into(),
            buffer: Vec::new(),
        }
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    fn emit(&self, line: &[u8]) {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        self.logger
            .log_with_fields(&self.level, line.to_vec(), Fields::new());
    }

    fn drain_partial(&mut self) {
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            self.emit(&rest);
        }
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.emit(&line[..pos]);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.drain_partial();
        self.logger.flush().map_err(io::Error::other)
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        self.drain_partial();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemorySink;
    use crate::core::error::LoggerError;
    use crate::core::sink::{complete, Completion, Sink, SinkTarget};
    use std::sync::Arc;

    fn writer(level: &str) -> (Arc<MemorySink>, LogWriter) {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::builder()
            .colors(false)
            .level("trace")
            .sink(SinkTarget::shared(sink.clone()))
            .build();
        (sink, logger.create_stream(level))
    }

    #[test]
    fn test_each_line_is_a_call() {
        let (sink, mut w) = writer("debug");
        w.write_all(b"first\nsec").expect("write");
        w.write_all(b"ond\r\n").expect("write");

        assert_eq!(sink.lines(), vec!["[DEBUG] first", "[DEBUG] second"]);
    }

    #[test]
    fn test_partial_line_flushed() {
        let (sink, mut w) = writer("warn");
        write!(w, "no newline").expect("write");
        assert!(sink.is_empty());

        w.flush().expect("flush");
        assert_eq!(sink.lines(), vec!["[WARN] no newline"]);
    }

    #[test]
    fn test_partial_line_logged_on_drop() {
        let (sink, mut w) = writer("info");
        write!(w, "tail").expect("write");
        drop(w);
        assert_eq!(sink.lines(), vec!["[INFO] tail"]);
    }

    struct UnflushableSink;

    impl Sink for UnflushableSink {
        fn write(&self, _data: &[u8], done: Option<Completion>) {
            complete(done, Ok(()));
        }

        fn flush(&self) -> crate::core::error::Result<()> {
            Err(LoggerError::sink("unflushable", "device gone"))
        }

        fn name(&self) -> &str {
            "unflushable"
        }
    }

    #[test]
    fn test_sink_flush_failure_surfaces_as_io_error() {
        let logger = Logger::builder()
            .colors(false)
            .sink(SinkTarget::writer(UnflushableSink))
            .build();
        let mut w = logger.create_stream("info");

        let err = w.flush().expect_err("flush should fail");
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert!(err.to_string().contains("device gone"));
    }

    #[test]
    fn test_unknown_level_defaults_to_info() {
        let (_sink, w) = writer("loud");
        assert_eq!(w.level(), "info");
    }
}
