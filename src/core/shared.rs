//! A logger shared between owners
//!
//! One logger is built at startup and handed to every consumer as a
//! `SharedLogger`. Logging takes the read lock so calls from many threads
//! proceed together; setters take the write lock.

use super::fields::Fields;
use super::log_level::LevelRef;
use super::logger::Logger;
use super::message::{Arg, LogArgs};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SharedLogger {
    inner: Arc<RwLock<Logger>>,
}

impl SharedLogger {
    pub fn new(logger: Logger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(logger)),
        }
    }

    pub fn log(&self, level: &str, message: impl Into<Arg>) {
        self.inner.read().log(level, message);
    }

    pub fn log_with_fields(&self, level: &str, message: impl Into<Arg>, fields: Fields) {
        self.inner.read().log_with_fields(level, message, fields);
    }

    pub fn log_args(&self, level: &str, args: LogArgs) {
        self.inner.read().log_args(level, args);
    }

    pub fn fatal(&self, message: impl Into<Arg>) {
        self.inner.read().fatal(message);
    }

    pub fn error(&self, message: impl Into<Arg>) {
        self.inner.read().error(message);
    }

    pub fn warn(&self, message: impl Into<Arg>) {
        self.inner.read().warn(message);
    }

    pub fn info(&self, message: impl Into<Arg>) {
        self.inner.read().info(message);
    }

    pub fn debug(&self, message: impl Into<Arg>) {
        self.inner.read().debug(message);
    }

    pub fn trace(&self, message: impl Into<Arg>) {
        self.inner.read().trace(message);
    }

    pub fn set_level(&self, level: impl Into<LevelRef>) {
        self.inner.write().set_level(level);
    }

    pub fn set_fields(&self, fields: Fields) {
        self.inner.write().set_fields(fields);
    }

    /// Independent child of the current configuration
    pub fn child(&self, fields: Fields) -> Logger {
        self.inner.read().child(fields)
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Logger> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Logger> {
        self.inner.write()
    }
}

impl From<Logger> for SharedLogger {
    fn from(logger: Logger) -> Self {
        Self::new(logger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemorySink;
    use crate::core::sink::SinkTarget;
    use std::thread;

    #[test]
    fn test_shared_across_threads() {
        let sink = Arc::new(MemorySink::new());
        let shared = SharedLogger::new(
            Logger::builder()
                .colors(false)
                .sink(SinkTarget::shared(sink.clone()))
                .build(),
        );

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let logger = shared.clone();
                thread::spawn(move || {
                    for j in 0..10 {
                        logger.info(format!("thread {} message {}", i, j));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("Thread panicked");
        }

        assert_eq!(sink.len(), 40);
    }

    #[test]
    fn test_setters_visible_to_all_handles() {
        let sink = Arc::new(MemorySink::new());
        let shared = SharedLogger::new(
            Logger::builder()
                .colors(false)
                .sink(SinkTarget::shared(sink.clone()))
                .build(),
        );
        let other = shared.clone();

        shared.set_level("error");
        other.warn("dropped");
        other.error("kept");

        assert_eq!(sink.lines(), vec!["[ERROR] kept"]);
        assert_eq!(other.read().get_level(), Some("error"));
    }
}
