//! # Rust Field Logger
//!
//! A leveled, structured line logger. Each call carries a level, a message
//! and optional fields; the logger filters by threshold, merges contextual
//! fields, renders the record with a formatter and writes the result to the
//! sink bound to that level.
//!
//! ## Features
//!
//! - **Custom level tables** with rank-based thresholds
//! - **Per-level sinks**: console, file, in-memory, or any function
//! - **Formatters**: colored console (`cli`), `json` and `logfmt`, or your own
//! - **Child loggers** carrying extra contextual fields
//! - **Secret redaction** and line layout (prefix, suffix, indentation)
//!
//! ```
//! use rust_field_logger::prelude::*;
//!
//! let logger = Logger::builder()
//!     .level("debug")
//!     .field("service", "billing")
//!     .build();
//!
//! logger.info("service started");
//! logger.info_with_fields("charge created", Fields::new().with_field("amount", 1250));
//!
//! let request = logger.child(Fields::new().with_field("request_id", "r-81"));
//! request.debug("loading customer");
//! ```
//!
//! There is no global instance: build one logger at startup and pass it
//! (or a [`SharedLogger`]) to whatever needs it.

pub mod appenders;
pub mod core;
pub mod formatters;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleSink, FileSink, LogWriter, MemorySink};
    pub use crate::core::{
        BuiltinFormatter, Failure, FieldValue, Fields, Formatter, FormatterContext,
        FormatterFactory, FormatterKind, FormatterOptions, LevelRef, LevelTable, LogArgs,
        LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics, LoggerOptions, Record,
        Rendered, Result, SharedLogger, Sink, SinkTarget, Streams,
    };
}

pub use appenders::{ConsoleSink, FileSink, LogWriter, MemorySink};
pub use core::{
    serialize_error, Arg, BuiltinFormatter, Completion, Failure, FieldValue, Fields, Formatter,
    FormatterContext, FormatterFactory, FormatterKind, FormatterOptions, LevelRef, LevelTable,
    LogArgs, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics, LoggerOptions, Record,
    Rendered, Result, SecretSet, SharedLogger, Sink, SinkTarget, Streams, TimestampFormat,
};
