//! Logfmt formatter
//!
//! `time=... level=info msg="..." key=value`, one line per record.

use crate::core::fields::FieldValue;
use crate::core::formatter::{Formatter, FormatterContext, Rendered};
use crate::core::record::Record;
use crate::core::timestamp::TimestampFormat;
use chrono::{DateTime, Utc};

pub struct LogfmtFormatter {
    timestamp_format: TimestampFormat,
    date_start: DateTime<Utc>,
}

impl LogfmtFormatter {
    pub fn new(ctx: &FormatterContext<'_>) -> Self {
        Self::with_timestamp(ctx.options.timestamp_format.clone(), ctx.date_start)
    }

    pub fn with_timestamp(timestamp_format: TimestampFormat, date_start: DateTime<Utc>) -> Self {
        Self {
            timestamp_format,
            date_start,
        }
    }
}

/// Keys keep only characters logfmt parsers accept unquoted
fn escape_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '.')
        .collect()
}

fn escape_value(value: &str) -> String {
    if value.is_empty() || value.chars().any(|c| c.is_whitespace() || c == '"' || c == '=') {
        quote(value)
    } else {
        value.to_string()
    }
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

impl Formatter for LogfmtFormatter {
    fn format(&self, timestamp: &DateTime<Utc>, level: &str, record: &Record) -> Rendered {
        let mut parts = vec![
            format!(
                "time={}",
                escape_value(&self.timestamp_format.render(timestamp, &self.date_start))
            ),
            format!("level={}", escape_value(level)),
            format!("msg={}", quote(record.msg())),
        ];

        for (key, value) in record.extra_fields() {
            let rendered = match value {
                FieldValue::String(s) => escape_value(s),
                other => other.to_string(),
            };
            parts.push(format!("{}={}", escape_key(key), rendered));
        }
        if let Some(failure) = record.error() {
            parts.push(format!("err={}", quote(&failure.stack())));
        }

        let mut line = parts.join(" ");
        line.push('\n');
        Rendered::Text(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::failure::Failure;
    use crate::core::fields::Fields;

    fn render(record: &Record, level: &str) -> String {
        let formatter = LogfmtFormatter::with_timestamp(TimestampFormat::Elapsed, Utc::now());
        match formatter.format(&Utc::now(), level, record) {
            Rendered::Text(s) => s,
            Rendered::Bytes(_) => panic!("logfmt formatter renders text"),
        }
    }

    #[test]
    fn test_basic_line() {
        let record = Record::new(
            "user logged in",
            Fields::new().with_field("user", "alice").with_field("attempts", 2),
        );
        let line = render(&record, "info");

        assert!(line.starts_with("time="));
        assert!(line.contains(" level=info "));
        assert!(line.contains("msg=\"user logged in\""));
        assert!(line.contains("user=alice"));
        assert!(line.ends_with("attempts=2\n"));
    }

    #[test]
    fn test_values_needing_quotes() {
        let record = Record::new(
            "x",
            Fields::new()
                .with_field("query", "a=b")
                .with_field("note", "two words")
                .with_field("empty", ""),
        );
        let line = render(&record, "debug");

        assert!(line.contains("query=\"a=b\""));
        assert!(line.contains("note=\"two words\""));
        assert!(line.contains("empty=\"\""));
    }

    #[test]
    fn test_error_is_single_line() {
        let record = Record::new(
            "boom",
            Fields::new().with_error(Failure::new("Panic", "bad state").with_cause("inner")),
        );
        let line = render(&record, "fatal");

        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.contains(r#"err="Panic: bad state\n    Caused by: inner""#));
    }

    #[test]
    fn test_key_escaping() {
        assert_eq!(escape_key("user id"), "userid");
        assert_eq!(escape_key("http.status"), "http.status");
    }
}
