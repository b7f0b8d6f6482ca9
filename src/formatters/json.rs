//! JSON lines formatter
//!
//! One object per record: `time`, `level` and `msg` first, then the record's
//! fields in insertion order. An attached failure is rendered as its stack
//! under `err`.

use crate::core::fields::{ERROR_KEY, MSG_KEY};
use crate::core::formatter::{Formatter, FormatterContext, Rendered};
use crate::core::record::Record;
use crate::core::timestamp::TimestampFormat;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

pub struct JsonFormatter {
    timestamp_format: TimestampFormat,
    date_start: DateTime<Utc>,
}

impl JsonFormatter {
    pub fn new(ctx: &FormatterContext<'_>) -> Self {
        Self::with_timestamp(ctx.options.timestamp_format.clone(), ctx.date_start)
    }

    pub fn with_timestamp(timestamp_format: TimestampFormat, date_start: DateTime<Utc>) -> Self {
        Self {
            timestamp_format,
            date_start,
        }
    }

    fn to_object(&self, timestamp: &DateTime<Utc>, level: &str, record: &Record) -> Map<String, Value> {
        let mut obj = Map::new();
        obj.insert(
            "time".to_string(),
            self.timestamp_format.to_json(timestamp, &self.date_start),
        );
        obj.insert("level".to_string(), Value::String(level.to_string()));
        obj.insert(MSG_KEY.to_string(), Value::String(record.msg().to_string()));

        for (key, value) in record.extra_fields() {
            obj.insert(key.to_string(), value.to_json_value());
        }
        if let Some(failure) = record.error() {
            obj.insert(ERROR_KEY.to_string(), Value::String(failure.stack()));
        }
        obj
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, timestamp: &DateTime<Utc>, level: &str, record: &Record) -> Rendered {
        let obj = self.to_object(timestamp, level, record);
        match serde_json::to_string(&Value::Object(obj)) {
            Ok(mut line) => {
                line.push('\n');
                Rendered::Text(line)
            }
            Err(e) => {
                eprintln!("[LOGGER ERROR] Failed to serialize record: {}", e);
                Rendered::Text(String::new())
            }
        }
    }
}
