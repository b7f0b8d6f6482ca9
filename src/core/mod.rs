//! Core logger types and traits

pub mod ansi;
pub mod error;
pub mod failure;
pub mod fields;
pub mod formatter;
pub mod layout;
pub mod log_level;
pub mod logger;
pub mod message;
pub mod metrics;
pub mod options;
pub mod record;
pub mod secrets;
pub mod shared;
pub mod sink;
pub mod timestamp;

pub use ansi::{strip_ansi, visible_len};
pub use error::{LoggerError, Result};
pub use failure::{serialize_error, Failure};
pub use fields::{FieldValue, Fields, CODE_KEY, ERROR_KEY, MSG_KEY};
pub use formatter::{
    BuiltinFormatter, Formatter, FormatterContext, FormatterFactory, FormatterKind,
    FormatterOptions, Rendered,
};
pub use layout::Layout;
pub use log_level::{LevelRef, LevelTable, LogLevel};
pub use logger::{Logger, LoggerBuilder};
pub use message::{Arg, LogArgs, Message, NormalizedCall};
pub use metrics::LoggerMetrics;
pub use options::LoggerOptions;
pub use record::Record;
pub use secrets::SecretSet;
pub use shared::SharedLogger;
pub use sink::{complete, Completion, Sink, SinkFn, SinkTarget, Streams};
pub use timestamp::TimestampFormat;
