//! Timestamp rendering for machine-readable formatters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the `time` field of a json or logfmt line is rendered
///
/// # Examples
///
/// ```
/// use rust_field_logger::core::TimestampFormat;
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let text = TimestampFormat::Iso8601.render(&now, &now);
/// assert!(text.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,
    /// `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,
    /// Milliseconds since the Unix epoch
    UnixMillis,
    /// Seconds since the logger's date start, e.g. `+12.045s`
    Elapsed,
    /// Any strftime-compatible pattern
    Custom(String),
}

impl TimestampFormat {
    /// Render `at`; `date_start` is only consulted by [`TimestampFormat::Elapsed`]
    #[must_use]
    pub fn render(&self, at: &DateTime<Utc>, date_start: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => at.to_rfc3339(),
            TimestampFormat::UnixMillis => at.timestamp_millis().to_string(),
            TimestampFormat::Elapsed => {
                let elapsed = at.signed_duration_since(*date_start);
                format!("+{:.3}s", elapsed.num_milliseconds() as f64 / 1000.0)
            }
            TimestampFormat::Custom(pattern) => at.format(pattern).to_string(),
        }
    }

    /// JSON value for `at`: numeric for epoch millis, a string otherwise
    #[must_use]
    pub fn to_json(&self, at: &DateTime<Utc>, date_start: &DateTime<Utc>) -> serde_json::Value {
        match self {
            TimestampFormat::UnixMillis => serde_json::Value::Number(at.timestamp_millis().into()),
            _ => serde_json::Value::String(self.render(at, date_start)),
        }
    }
}
