//! Main logger implementation
//!
//! A `log` call runs entirely on the caller's thread: the level is checked
//! against the threshold, the arguments are normalized, contextual fields
//! are merged, secrets are redacted, the formatter renders the record and
//! the result is handed to the sink bound to the level. Nothing on this
//! path returns an error or panics out to the caller.

use super::error::{LoggerError, Result};
use super::fields::{FieldValue, Fields, CODE_KEY, MSG_KEY};
use super::failure::serialize_error;
use super::formatter::{
    BuiltinFormatter, Formatter, FormatterContext, FormatterFactory, FormatterKind,
    FormatterOptions, Rendered,
};
use super::layout::Layout;
use super::log_level::{LevelRef, LevelTable, LogLevel};
use super::message::{Arg, LogArgs, Message, NormalizedCall};
use super::metrics::LoggerMetrics;
use super::options::LoggerOptions;
use super::record::Record;
use super::secrets::SecretSet;
use super::sink::{complete, Completion, SinkTarget, Streams};
use crate::appenders::console::default_streams;
use crate::appenders::writer::LogWriter;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

pub struct Logger {
    levels: LevelTable,
    streams: Streams,
    threshold: usize,
    fields: Fields,
    secrets: SecretSet,
    layout: Layout,
    enforce_lines_separation: bool,
    trim: bool,
    skip_empty_msg: bool,
    formatter_kind: FormatterKind,
    formatter_options: FormatterOptions,
    formatter: Arc<dyn Formatter>,
    date_start: DateTime<Utc>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Logger with the default options, cli formatter and console sinks
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn from_options(options: LoggerOptions) -> Self {
        LoggerBuilder::new().options(options).build()
    }

    // ---- logging ----------------------------------------------------------

    pub fn log(&self, level: &str, message: impl Into<Arg>) {
        self.log_args(level, LogArgs::from_parts(message.into(), None, None));
    }

    pub fn log_with_fields(&self, level: &str, message: impl Into<Arg>, fields: Fields) {
        self.log_args(level, LogArgs::from_parts(message.into(), Some(fields), None));
    }

    /// `done` runs once the write was issued, or immediately when an empty
    /// message is skipped. It is dropped uncalled when the level is filtered.
    pub fn log_with_callback<F>(&self, level: &str, message: impl Into<Arg>, fields: Fields, done: F)
    where
        F: FnOnce(Result<()>) + Send + 'static,
    {
        let done: Completion = Box::new(done);
        self.log_args(
            level,
            LogArgs::from_parts(message.into(), Some(fields), Some(done)),
        );
    }

    /// Log with positional arguments in any of the accepted call shapes
    pub fn log_args(&self, level: &str, args: LogArgs) {
        let Some(sink) = self.accepts(level) else {
            self.metrics.record_filtered();
            return;
        };
        self.dispatch(level, sink, args.normalize());
    }

    pub fn fatal(&self, message: impl Into<Arg>) {
        self.log(LogLevel::Fatal.as_str(), message);
    }

    pub fn error(&self, message: impl Into<Arg>) {
        self.log(LogLevel::Error.as_str(), message);
    }

    pub fn warn(&self, message: impl Into<Arg>) {
        self.log(LogLevel::Warn.as_str(), message);
    }

    pub fn info(&self, message: impl Into<Arg>) {
        self.log(LogLevel::Info.as_str(), message);
    }

    pub fn debug(&self, message: impl Into<Arg>) {
        self.log(LogLevel::Debug.as_str(), message);
    }

    pub fn trace(&self, message: impl Into<Arg>) {
        self.log(LogLevel::Trace.as_str(), message);
    }

    pub fn error_with_fields(&self, message: impl Into<Arg>, fields: Fields) {
        self.log_with_fields(LogLevel::Error.as_str(), message, fields);
    }

    pub fn warn_with_fields(&self, message: impl Into<Arg>, fields: Fields) {
        self.log_with_fields(LogLevel::Warn.as_str(), message, fields);
    }

    pub fn info_with_fields(&self, message: impl Into<Arg>, fields: Fields) {
        self.log_with_fields(LogLevel::Info.as_str(), message, fields);
    }

    /// Whether a call at `level` would reach a sink
    pub fn is_enabled(&self, level: &str) -> bool {
        self.accepts(level).is_some()
    }

    fn accepts(&self, level: &str) -> Option<&SinkTarget> {
        let rank = self.levels.rank_of(level)?;
        if rank > self.threshold {
            return None;
        }
        self.streams.for_rank(rank)
    }

    fn dispatch(&self, level: &str, sink: &SinkTarget, call: NormalizedCall) {
        let NormalizedCall {
            message,
            fields,
            done,
        } = call;

        let mut record = Record::merged(&self.fields, fields);

        let mut msg = match message {
            Message::Text(text) => text,
            Message::Failure(failure) => {
                if let Some(code) = failure.code() {
                    record.insert(CODE_KEY, code.clone());
                }
                serialize_error(&failure)
            }
            // fall back to a `msg` carried by the fields themselves
            Message::Other(value) => match (record.get(MSG_KEY), value) {
                (Some(existing), _) => existing.to_string(),
                (None, Some(value)) => value.to_string(),
                (None, None) => String::new(),
            },
        };

        if self.trim {
            msg = msg.trim().to_string();
        }
        if self.skip_empty_msg && msg.is_empty() {
            self.metrics.record_skipped_empty();
            complete(done, Ok(()));
            return;
        }

        record.set_msg(msg);
        self.secrets.redact_record(&mut record);

        let formatter = Arc::clone(&self.formatter);
        let now = Utc::now();
        let rendered = match catch_unwind(AssertUnwindSafe(|| formatter.format(&now, level, &record))) {
            Ok(rendered) => rendered,
            Err(_) => {
                eprintln!("[LOGGER ERROR] Formatter panicked while rendering a '{}' record", level);
                complete(done, Err(LoggerError::other("formatter panicked")));
                return;
            }
        };

        let rendered = match rendered {
            Rendered::Text(text) if !self.layout.is_identity() => Rendered::Text(self.layout.apply(&text)),
            other => other,
        };

        match rendered {
            Rendered::Text(text) if self.enforce_lines_separation => {
                self.write_lines(sink, &text, done);
            }
            Rendered::Text(text) => self.write_whole(sink, text.as_bytes(), done),
            Rendered::Bytes(bytes) => self.write_whole(sink, &bytes, done),
        }
    }

    /// One write per non-blank line; `done` fires after the last write was
    /// issued and carries the first failure reported by then
    fn write_lines(&self, sink: &SinkTarget, text: &str, done: Option<Completion>) {
        let first_error: Arc<Mutex<Option<LoggerError>>> = Arc::new(Mutex::new(None));
        let mut lines = 0u64;

        for line in text.split('\n') {
            if line.trim().is_empty() {
                continue;
            }
            let mut data = String::with_capacity(line.len() + 1);
            data.push_str(line);
            data.push('\n');

            let metrics = Arc::clone(&self.metrics);
            let slot = Arc::clone(&first_error);
            let on_line: Completion = Box::new(move |result| {
                if let Err(e) = result {
                    metrics.record_sink_failure();
                    slot.lock().get_or_insert(e);
                }
            });
            Self::write_guarded(sink, data.as_bytes(), Some(on_line));
            lines += 1;
        }

        if lines > 0 {
            self.metrics.record_written(lines);
        }
        let result = match first_error.lock().take() {
            Some(e) => Err(e),
            None => Ok(()),
        };
        complete(done, result);
    }

    fn write_whole(&self, sink: &SinkTarget, data: &[u8], done: Option<Completion>) {
        let metrics = Arc::clone(&self.metrics);
        let on_write: Completion = Box::new(move |result| {
            if result.is_err() {
                metrics.record_sink_failure();
            }
            complete(done, result);
        });
        Self::write_guarded(sink, data, Some(on_write));
        self.metrics.record_written(1);
    }

    /// A panicking sink must not unwind into the caller
    fn write_guarded(sink: &SinkTarget, data: &[u8], done: Option<Completion>) {
        if catch_unwind(AssertUnwindSafe(|| sink.write(data, done))).is_err() {
            eprintln!("[LOGGER ERROR] Sink '{}' panicked during write", sink.name());
        }
    }

    // ---- configuration ----------------------------------------------------

    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    pub fn set_fields(&mut self, fields: Fields) -> &Fields {
        self.fields = fields;
        self.rebuild_formatter();
        &self.fields
    }

    pub fn get_fields(&self) -> &Fields {
        &self.fields
    }

    pub fn set_secrets<I, S>(&mut self, secrets: I) -> &SecretSet
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secrets.set_secrets(secrets);
        &self.secrets
    }

    pub fn add_secret(&mut self, secret: impl Into<String>) -> bool {
        self.secrets.add_secret(secret)
    }

    pub fn delete_secret(&mut self, secret: &str) -> bool {
        self.secrets.delete_secret(secret)
    }

    pub fn has_secret(&self, secret: &str) -> bool {
        self.secrets.has_secret(secret)
    }

    pub fn secrets(&self) -> &SecretSet {
        &self.secrets
    }

    /// Set the threshold; a name missing from the level table is ignored
    pub fn set_level(&mut self, level: impl Into<LevelRef>) {
        if let Some(rank) = self.levels.resolve(&level.into()) {
            self.threshold = rank;
            self.rebuild_formatter();
        }
    }

    /// Name of the threshold level, if the threshold maps to one
    pub fn get_level(&self) -> Option<&str> {
        self.levels.name_of(self.threshold)
    }

    pub fn get_level_index(&self) -> usize {
        self.threshold
    }

    /// Allow more verbose output; only ever raises the threshold rank
    pub fn min_level(&mut self, level: impl Into<LevelRef>) -> bool {
        match self.levels.resolve(&level.into()) {
            Some(rank) if rank > self.threshold => {
                self.threshold = rank;
                self.rebuild_formatter();
                true
            }
            _ => false,
        }
    }

    /// Restrict output; only ever lowers the threshold rank
    pub fn max_level(&mut self, level: impl Into<LevelRef>) -> bool {
        match self.levels.resolve(&level.into()) {
            Some(rank) if rank < self.threshold => {
                self.threshold = rank;
                self.rebuild_formatter();
                true
            }
            _ => false,
        }
    }

    pub fn set_indentation(&mut self, indentation: usize) {
        self.layout.set_indentation(indentation);
        self.rebuild_formatter();
    }

    pub fn get_indentation(&self) -> usize {
        self.layout.indentation()
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.layout.set_prefix(prefix);
        self.rebuild_formatter();
    }

    pub fn get_prefix(&self) -> &str {
        self.layout.prefix()
    }

    pub fn set_suffix(&mut self, suffix: impl Into<String>) {
        self.layout.set_suffix(suffix);
        self.rebuild_formatter();
    }

    pub fn get_suffix(&self) -> &str {
        self.layout.suffix()
    }

    pub fn set_indent_multiline(&mut self, enabled: bool) {
        self.layout.set_indent_multiline(enabled);
        self.rebuild_formatter();
    }

    pub fn set_indent_multiline_padding(&mut self, enabled: bool) {
        self.layout.set_indent_multiline_padding(enabled);
        self.rebuild_formatter();
    }

    pub fn set_prefix_multiline(&mut self, enabled: bool) {
        self.layout.set_prefix_multiline(enabled);
        self.rebuild_formatter();
    }

    pub fn set_suffix_multiline(&mut self, enabled: bool) {
        self.layout.set_suffix_multiline(enabled);
        self.rebuild_formatter();
    }

    pub fn set_enforce_lines_separation(&mut self, enabled: bool) {
        self.enforce_lines_separation = enabled;
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn get_date_start(&self) -> DateTime<Utc> {
        self.date_start
    }

    pub fn set_date_start(&mut self, date_start: DateTime<Utc>) -> DateTime<Utc> {
        self.date_start = date_start;
        self.rebuild_formatter();
        self.date_start
    }

    /// The formatter was built from a snapshot of the configuration;
    /// setters that change what the snapshot holds call this
    fn rebuild_formatter(&mut self) {
        self.formatter = self.formatter_kind.build(&FormatterContext {
            levels: &self.levels,
            threshold: self.threshold,
            fields: &self.fields,
            layout: &self.layout,
            date_start: self.date_start,
            options: &self.formatter_options,
        });
    }

    pub fn formatter_kind(&self) -> &FormatterKind {
        &self.formatter_kind
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Snapshot of the current configuration as serializable options
    pub fn options(&self) -> LoggerOptions {
        LoggerOptions {
            levels: self.levels.clone(),
            level: LevelRef::Rank(self.threshold),
            formatter: match self.formatter_kind {
                FormatterKind::Builtin(builtin) => builtin,
                FormatterKind::Custom(_) => BuiltinFormatter::default(),
            },
            formatter_options: self.formatter_options.clone(),
            fields: self.fields.clone(),
            secrets: self.secrets.iter().map(str::to_string).collect(),
            secrets_hide_chars_count: self.secrets.hide_chars_count(),
            secrets_string_substitution: self.secrets.string_substitution().to_string(),
            secrets_repeat_char_substitution: self.secrets.repeat_char_substitution().to_string(),
            enforce_lines_separation: self.enforce_lines_separation,
            indentation: self.layout.indentation(),
            indent_multiline: self.layout.indent_multiline(),
            indent_multiline_padding: self.layout.indent_multiline_padding(),
            prefix_multiline: self.layout.prefix_multiline(),
            suffix_multiline: self.layout.suffix_multiline(),
            prefix: self.layout.prefix().to_string(),
            suffix: self.layout.suffix().to_string(),
            trim: self.trim,
            skip_empty_msg: self.skip_empty_msg,
        }
    }

    // ---- derived loggers --------------------------------------------------

    /// Independent logger with this logger's configuration and `fields`
    /// merged over its contextual fields
    #[must_use]
    pub fn child(&self, fields: Fields) -> Logger {
        self.child_builder(fields).build()
    }

    /// Builder seeded like [`Logger::child`], for overriding more options
    #[must_use]
    pub fn child_builder(&self, fields: Fields) -> LoggerBuilder {
        let mut merged = self.fields.clone();
        merged.merge(fields);
        LoggerBuilder::new()
            .options(self.options())
            .fields(merged)
            .streams(self.streams.clone())
            .formatter_kind(self.formatter_kind.clone())
            .date_start(self.date_start)
    }

    /// `io::Write` adapter that logs each written line at `level`
    pub fn create_stream(&self, level: impl Into<LevelRef>) -> LogWriter {
        let level = self
            .levels
            .resolve(&level.into())
            .and_then(|rank| self.levels.name_of(rank))
            .unwrap_or(LogLevel::Info.as_str())
            .to_string();
        LogWriter::new(self.child(Fields::new()), level)
    }

    /// Flush every bound sink
    pub fn flush(&self) -> Result<()> {
        self.streams.flush_all()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush sinks on drop: {}", e);
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("levels", &self.levels)
            .field("threshold", &self.threshold)
            .field("fields", &self.fields)
            .field("formatter", &self.formatter_kind)
            .field("streams", &self.streams)
            .finish()
    }
}

/// Builder for [`Logger`]
///
/// Serializable options come from [`LoggerOptions`]; sinks, custom
/// formatters and the date start are set here.
pub struct LoggerBuilder {
    options: LoggerOptions,
    streams: Option<Streams>,
    sink_overrides: Vec<(LevelRef, SinkTarget)>,
    formatter_kind: Option<FormatterKind>,
    date_start: Option<DateTime<Utc>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            options: LoggerOptions::default(),
            streams: None,
            sink_overrides: Vec::new(),
            formatter_kind: None,
            date_start: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn options(mut self, options: LoggerOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn levels(mut self, levels: LevelTable) -> Self {
        self.options.levels = levels;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: impl Into<LevelRef>) -> Self {
        self.options.level = level.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn fields(mut self, fields: Fields) -> Self {
        self.options.fields = fields;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.options.fields.insert(key, value);
        self
    }

    /// Use one sink for every level
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, target: SinkTarget) -> Self {
        self.streams = Some(Streams::broadcast(target));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn streams(mut self, streams: Streams) -> Self {
        self.streams = Some(streams);
        self
    }

    /// Bind a sink to one level on top of the other streams
    #[must_use = "builder methods return a new value"]
    pub fn sink_for(mut self, level: impl Into<LevelRef>, target: SinkTarget) -> Self {
        self.sink_overrides.push((level.into(), target));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: BuiltinFormatter) -> Self {
        self.options.formatter = formatter;
        self.formatter_kind = None;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter_kind(mut self, kind: FormatterKind) -> Self {
        self.formatter_kind = Some(kind);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn custom_formatter<F: FormatterFactory + 'static>(self, factory: F) -> Self {
        self.formatter_kind(FormatterKind::custom(factory))
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter_options(mut self, options: FormatterOptions) -> Self {
        self.options.formatter_options = options;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.options.formatter_options.colors = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn secrets<I, S>(mut self, secrets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.secrets = secrets.into_iter().map(Into::into).collect();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn secrets_hide_chars_count(mut self, hide: bool) -> Self {
        self.options.secrets_hide_chars_count = hide;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn enforce_lines_separation(mut self, enabled: bool) -> Self {
        self.options.enforce_lines_separation = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn indentation(mut self, indentation: usize) -> Self {
        self.options.indentation = indentation;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.prefix = prefix.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.options.suffix = suffix.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn trim(mut self, enabled: bool) -> Self {
        self.options.trim = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn skip_empty_msg(mut self, enabled: bool) -> Self {
        self.options.skip_empty_msg = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn date_start(mut self, date_start: DateTime<Utc>) -> Self {
        self.date_start = Some(date_start);
        self
    }

    pub fn build(self) -> Logger {
        let LoggerBuilder {
            options,
            streams,
            sink_overrides,
            formatter_kind,
            date_start,
        } = self;

        let levels = options.levels;
        let threshold = levels
            .resolve(&options.level)
            .unwrap_or_else(|| LogLevel::Info.rank());

        let mut streams = streams.unwrap_or_else(|| default_streams(&levels));
        for (level, target) in sink_overrides {
            match levels.resolve(&level) {
                Some(rank) => streams.bind(rank, target, levels.len()),
                None => eprintln!("[LOGGER ERROR] Ignoring sink for unknown level {:?}", level),
            }
        }

        let mut secrets = SecretSet::new(options.secrets);
        secrets.set_hide_chars_count(options.secrets_hide_chars_count);
        secrets.set_string_substitution(options.secrets_string_substitution);
        secrets.set_repeat_char_substitution(options.secrets_repeat_char_substitution);

        let mut layout = Layout::new();
        layout.set_indentation(options.indentation);
        layout.set_prefix(options.prefix);
        layout.set_suffix(options.suffix);
        layout.set_indent_multiline(options.indent_multiline);
        layout.set_indent_multiline_padding(options.indent_multiline_padding);
        layout.set_prefix_multiline(options.prefix_multiline);
        layout.set_suffix_multiline(options.suffix_multiline);

        let date_start = date_start.unwrap_or_else(Utc::now);
        let formatter_kind = formatter_kind.unwrap_or(FormatterKind::Builtin(options.formatter));
        let formatter_options = options.formatter_options;
        let fields = options.fields;

        let formatter = formatter_kind.build(&FormatterContext {
            levels: &levels,
            threshold,
            fields: &fields,
            layout: &layout,
            date_start,
            options: &formatter_options,
        });

        Logger {
            levels,
            streams,
            threshold,
            fields,
            secrets,
            layout,
            enforce_lines_separation: options.enforce_lines_separation,
            trim: options.trim,
            skip_empty_msg: options.skip_empty_msg,
            formatter_kind,
            formatter_options,
            formatter,
            date_start,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemorySink;
    use crate::core::failure::Failure;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn capture() -> (Arc<MemorySink>, LoggerBuilder) {
        let sink = Arc::new(MemorySink::new());
        let builder = Logger::builder()
            .colors(false)
            .sink(SinkTarget::shared(sink.clone()));
        (sink, builder)
    }

    #[test]
    fn test_threshold_filters() {
        let (sink, builder) = capture();
        let logger = builder.level("warn").build();

        logger.info("hidden");
        logger.warn("shown");
        logger.error("also shown");

        assert_eq!(sink.lines(), vec!["[WARN] shown", "[ERROR] also shown"]);
        assert_eq!(logger.metrics().filtered_count(), 1);
    }

    #[test]
    fn test_unknown_level_is_noop() {
        let (sink, builder) = capture();
        let logger = builder.build();

        logger.log("bogus-level", "hello");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_missing_sink_drops_message() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::builder()
            .colors(false)
            .streams(Streams::per_level(vec![None, Some(SinkTarget::shared(sink.clone()))]))
            .build();

        logger.fatal("nowhere");
        logger.error("somewhere");
        assert_eq!(sink.lines(), vec!["[ERROR] somewhere"]);
    }

    #[test]
    fn test_min_and_max_level() {
        let (_sink, builder) = capture();
        let mut logger = builder.build();
        assert_eq!(logger.get_level_index(), 3);

        assert!(!logger.min_level("warn"));
        assert!(logger.min_level("debug"));
        assert_eq!(logger.get_level(), Some("debug"));

        assert!(!logger.max_level("trace"));
        assert!(logger.max_level(LogLevel::Error));
        assert_eq!(logger.get_level_index(), 1);

        assert!(!logger.min_level("nope"));
        assert!(!logger.max_level("nope"));
        logger.set_level("nope");
        assert_eq!(logger.get_level_index(), 1);
    }

    #[test]
    fn test_lines_written_separately() {
        let (sink, builder) = capture();
        let logger = builder.build();

        logger.info("line1\nline2");
        assert_eq!(sink.writes(), vec!["[INFO] line1\n", "line2\n"]);
    }

    #[test]
    fn test_single_write_without_separation() {
        let (sink, builder) = capture();
        let logger = builder.enforce_lines_separation(false).build();

        logger.info("line1\nline2");
        assert_eq!(sink.writes(), vec!["[INFO] line1\nline2\n"]);
    }

    #[test]
    fn test_blank_lines_dropped() {
        let (sink, builder) = capture();
        let logger = builder.trim(false).build();

        logger.info("first\n\n   \nlast");
        assert_eq!(sink.writes(), vec!["[INFO] first\n", "last\n"]);
    }

    #[test]
    fn test_skip_empty_message_calls_done() {
        let (sink, builder) = capture();
        let logger = builder.build();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        logger.log_with_callback("info", "   ", Fields::new(), move |result| {
            assert!(result.is_ok());
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(sink.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(logger.metrics().skipped_empty(), 1);
    }

    #[test]
    fn test_empty_message_kept_when_not_skipping() {
        let (sink, builder) = capture();
        let logger = builder.skip_empty_msg(false).build();

        logger.info("");
        assert_eq!(sink.writes(), vec!["[INFO] \n"]);
    }

    #[test]
    fn test_failure_message_serialized_with_code() {
        let (sink, builder) = capture();
        let logger = builder.build();

        logger.error(Failure::new("IoError", "disk full").with_code("ENOSPC"));

        let out = sink.contents();
        assert!(out.contains("IoError: disk full"));
        assert!(out.contains("code=ENOSPC"));
    }

    #[test]
    fn test_elapsed_time_follows_date_start() {
        use crate::core::timestamp::TimestampFormat;

        let (sink, builder) = capture();
        let mut logger = builder
            .formatter(BuiltinFormatter::Json)
            .formatter_options(FormatterOptions {
                colors: false,
                timestamp_format: TimestampFormat::Elapsed,
                ..FormatterOptions::default()
            })
            .build();

        logger.set_date_start(Utc::now() - chrono::Duration::hours(1));
        logger.info("tick");

        let line: serde_json::Value =
            serde_json::from_str(&sink.lines()[0]).expect("Failed to parse JSON line");
        let time = line["time"].as_str().expect("time is a string");
        assert!(time.starts_with("+3600."), "unexpected elapsed time {}", time);
    }

    #[test]
    fn test_fields_only_call_is_skipped_as_empty() {
        let (sink, builder) = capture();
        let logger = builder.build();

        logger.log_args(
            "info",
            LogArgs::new().arg(Fields::new().with_field("msg", "from fields")),
        );
        assert!(sink.is_empty());
        assert_eq!(logger.metrics().skipped_empty(), 1);
    }

    #[test]
    fn test_layout_prefix_and_indentation() {
        let (sink, builder) = capture();
        let logger = builder.prefix("> ").indentation(2).build();

        logger.info("hello");
        assert_eq!(sink.writes(), vec!["  > [INFO] hello\n"]);
    }

    #[test]
    fn test_secrets_redacted() {
        let (sink, builder) = capture();
        let mut logger = builder.secrets(["hunter2"]).build();
        assert!(logger.has_secret("hunter2"));

        logger.info_with_fields("password is hunter2", Fields::new().with_field("pw", "hunter2"));
        let out = sink.contents();
        assert!(!out.contains("hunter2"));
        assert!(out.contains("password is *******"));

        assert!(logger.delete_secret("hunter2"));
        logger.info("hunter2");
        assert!(sink.contents().contains("[INFO] hunter2"));
    }

    #[test]
    fn test_sink_failure_reaches_callback() {
        let logger = Logger::builder()
            .colors(false)
            .sink(SinkTarget::func(|_, done| {
                complete(done, Err(LoggerError::sink("broken", "pipe closed")));
            }))
            .build();

        let failed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&failed);
        logger.log_with_callback("info", "hello", Fields::new(), move |result| {
            if result.is_err() {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        assert_eq!(failed.load(Ordering::SeqCst), 1);
        assert_eq!(logger.metrics().sink_failures(), 1);
    }

    #[test]
    fn test_child_snapshot() {
        let (sink, builder) = capture();
        let mut parent = builder.field("svc", "api").build();
        let child = parent.child(Fields::new().with_field("req", 7));

        parent.set_fields(Fields::new().with_field("svc", "changed"));
        child.info("from child");

        assert_eq!(sink.lines(), vec!["[INFO] from child\u{3000}svc=api\u{3000}req=7"]);
        assert_eq!(child.get_level_index(), parent.get_level_index());
    }

    #[test]
    fn test_options_snapshot_roundtrip() {
        let (_sink, builder) = capture();
        let logger = builder.level("debug").suffix(" <").build();
        let options = logger.options();

        assert_eq!(options.level, LevelRef::Rank(4));
        assert_eq!(options.suffix, " <");
    }
}
