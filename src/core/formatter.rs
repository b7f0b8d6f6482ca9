//! Formatter contract
//!
//! A formatter turns `(timestamp, level name, record)` into output. It is
//! produced once per logger by a factory that receives a read-only snapshot
//! of the owning logger's configuration.

use super::error::{LoggerError, Result};
use super::fields::Fields;
use super::layout::Layout;
use super::log_level::LevelTable;
use super::record::Record;
use super::timestamp::TimestampFormat;
use crate::formatters::{CliFormatter, JsonFormatter, LogfmtFormatter};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Formatter output; only text takes part in line splitting and layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Text(String),
    Bytes(Vec<u8>),
}

impl From<String> for Rendered {
    fn from(s: String) -> Self {
        Rendered::Text(s)
    }
}

impl From<Vec<u8>> for Rendered {
    fn from(bytes: Vec<u8>) -> Self {
        Rendered::Bytes(bytes)
    }
}

pub trait Formatter: Send + Sync {
    fn format(&self, timestamp: &DateTime<Utc>, level: &str, record: &Record) -> Rendered;
}

impl<F> Formatter for F
where
    F: Fn(&DateTime<Utc>, &str, &Record) -> Rendered + Send + Sync,
{
    fn format(&self, timestamp: &DateTime<Utc>, level: &str, record: &Record) -> Rendered {
        self(timestamp, level, record)
    }
}

/// Read-only view of the logger a formatter is built for
///
/// The logger rebuilds its formatter from a fresh view whenever a setter
/// changes the level, fields, layout or date start.
#[derive(Debug, Clone, Copy)]
pub struct FormatterContext<'a> {
    pub levels: &'a LevelTable,
    pub threshold: usize,
    pub fields: &'a Fields,
    pub layout: &'a Layout,
    pub date_start: DateTime<Utc>,
    pub options: &'a FormatterOptions,
}

pub trait FormatterFactory: Send + Sync {
    fn build(&self, ctx: &FormatterContext<'_>) -> Arc<dyn Formatter>;
}

impl<F> FormatterFactory for F
where
    F: Fn(&FormatterContext<'_>) -> Arc<dyn Formatter> + Send + Sync,
{
    fn build(&self, ctx: &FormatterContext<'_>) -> Arc<dyn Formatter> {
        self(ctx)
    }
}

/// Formatters shipped with the crate, selectable by name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinFormatter {
    #[default]
    #[serde(alias = "default")]
    Cli,
    Json,
    Logfmt,
}

impl BuiltinFormatter {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinFormatter::Cli => "cli",
            BuiltinFormatter::Json => "json",
            BuiltinFormatter::Logfmt => "logfmt",
        }
    }
}

impl FromStr for BuiltinFormatter {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "cli" | "default" => Ok(BuiltinFormatter::Cli),
            "json" => Ok(BuiltinFormatter::Json),
            "logfmt" => Ok(BuiltinFormatter::Logfmt),
            _ => Err(LoggerError::config(
                "formatter",
                format!("unknown formatter '{}'", s),
            )),
        }
    }
}

/// A built-in formatter or a caller-supplied factory
#[derive(Clone)]
pub enum FormatterKind {
    Builtin(BuiltinFormatter),
    Custom(Arc<dyn FormatterFactory>),
}

impl FormatterKind {
    pub fn custom<F: FormatterFactory + 'static>(factory: F) -> Self {
        FormatterKind::Custom(Arc::new(factory))
    }

    /// Resolve a built-in formatter by name
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse::<BuiltinFormatter>().map(FormatterKind::Builtin)
    }

    pub fn name(&self) -> &str {
        match self {
            FormatterKind::Builtin(builtin) => builtin.as_str(),
            FormatterKind::Custom(_) => "custom",
        }
    }

    pub fn build(&self, ctx: &FormatterContext<'_>) -> Arc<dyn Formatter> {
        match self {
            FormatterKind::Builtin(BuiltinFormatter::Cli) => Arc::new(CliFormatter::new(ctx)),
            FormatterKind::Builtin(BuiltinFormatter::Json) => Arc::new(JsonFormatter::new(ctx)),
            FormatterKind::Builtin(BuiltinFormatter::Logfmt) => {
                Arc::new(LogfmtFormatter::new(ctx))
            }
            FormatterKind::Custom(factory) => factory.build(ctx),
        }
    }
}

impl Default for FormatterKind {
    fn default() -> Self {
        FormatterKind::Builtin(BuiltinFormatter::default())
    }
}

impl From<BuiltinFormatter> for FormatterKind {
    fn from(builtin: BuiltinFormatter) -> Self {
        FormatterKind::Builtin(builtin)
    }
}

impl fmt::Debug for FormatterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FormatterKind").field(&self.name()).finish()
    }
}

/// Built-in level colors shared by the tag and message color lookups
pub fn builtin_level_colors() -> IndexMap<String, String> {
    [
        ("fatal", "red"),
        ("error", "red"),
        ("warn", "yellow"),
        ("info", "cyan"),
        ("debug", "blue"),
    ]
    .into_iter()
    .map(|(level, color)| (level.to_string(), color.to_string()))
    .collect()
}

/// Options consumed by the built-in formatters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatterOptions {
    /// Apply ANSI colors (cli)
    pub colors: bool,
    /// Fallback when a configured color name is not recognized (cli)
    pub default_color: String,
    pub level_color_by_level: IndexMap<String, String>,
    pub msg_color_by_level: IndexMap<String, String>,
    /// Levels whose attached failure stack is appended (cli)
    pub error_levels: Vec<String>,
    /// Render the `[LEVEL]` tag (cli)
    pub display_level: bool,
    pub fields_color: String,
    /// Placed before every `key=value` pair (cli)
    pub separator: String,
    /// `time` rendering (json, logfmt)
    pub timestamp_format: TimestampFormat,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            colors: true,
            default_color: "white".to_string(),
            level_color_by_level: builtin_level_colors(),
            msg_color_by_level: builtin_level_colors(),
            error_levels: vec!["error".to_string(), "fatal".to_string()],
            display_level: true,
            fields_color: "white".to_string(),
            separator: "\u{3000}".to_string(),
            timestamp_format: TimestampFormat::default(),
        }
    }
}
