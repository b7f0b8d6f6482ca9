//! Console sinks and the default per-level routing

use crate::core::log_level::{LevelTable, LogLevel};
use crate::core::sink::{complete, Completion, Sink, SinkTarget, Streams};
use crate::core::{LoggerError, Result};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

/// Writes chunks unchanged to stdout or stderr
#[derive(Debug)]
pub struct ConsoleSink {
    stream: ConsoleStream,
}

impl ConsoleSink {
    pub fn new(stream: ConsoleStream) -> Self {
        Self { stream }
    }

    pub fn stdout() -> Self {
        Self::new(ConsoleStream::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(ConsoleStream::Stderr)
    }

    pub fn stream(&self) -> ConsoleStream {
        self.stream
    }

    fn write_all(&self, data: &[u8]) -> std::io::Result<()> {
        match self.stream {
            ConsoleStream::Stdout => std::io::stdout().lock().write_all(data),
            ConsoleStream::Stderr => std::io::stderr().lock().write_all(data),
        }
    }
}

impl Sink for ConsoleSink {
    fn write(&self, data: &[u8], done: Option<Completion>) {
        let result = self
            .write_all(data)
            .map_err(|e| LoggerError::io_operation("writing to console", self.name(), e));
        complete(done, result);
    }

    fn flush(&self) -> Result<()> {
        match self.stream {
            ConsoleStream::Stdout => std::io::stdout().flush()?,
            ConsoleStream::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.stream {
            ConsoleStream::Stdout => "stdout",
            ConsoleStream::Stderr => "stderr",
        }
    }
}

/// Ranks at or below `warn` in severity go to stdout; fatal and error go
/// to stderr
pub fn default_streams(levels: &LevelTable) -> Streams {
    let stdout = SinkTarget::writer(ConsoleSink::stdout());
    let stderr = SinkTarget::writer(ConsoleSink::stderr());
    let warn = LogLevel::Warn.rank();

    Streams::per_level((0..levels.len()).map(|rank| {
        Some(if rank >= warn {
            stdout.clone()
        } else {
            stderr.clone()
        })
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routing() {
        let streams = default_streams(&LevelTable::default());

        let names: Vec<&str> = (0..6)
            .map(|rank| streams.for_rank(rank).map(SinkTarget::name).unwrap_or("none"))
            .collect();
        assert_eq!(names, vec!["stderr", "stderr", "stdout", "stdout", "stdout", "stdout"]);
    }

    #[test]
    fn test_default_routing_follows_table_length() {
        let levels = LevelTable::new(["a", "b", "c", "d"]).expect("Failed to build table");
        let streams = default_streams(&levels);

        assert!(streams.for_rank(3).is_some());
        assert!(streams.for_rank(4).is_none());
    }

    #[test]
    fn test_console_write_completes() {
        let sink = ConsoleSink::stdout();
        let (tx, rx) = std::sync::mpsc::channel();
        sink.write(b"", Some(Box::new(move |r| tx.send(r.is_ok()).unwrap_or(()))));
        assert_eq!(rx.recv().ok(), Some(true));
        assert!(sink.flush().is_ok());
    }
}
