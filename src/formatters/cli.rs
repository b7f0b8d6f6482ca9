//! Colored console formatter
//!
//! Renders `[LEVEL] message<sep>key=value<sep>key=value\n`. The level tag is
//! underlined in the level color, the message block is painted in the
//! message color of its level, and the trailing fields in the fields color.
//! For error levels the stack of an attached failure follows the message.

use crate::core::formatter::{Formatter, FormatterContext, FormatterOptions, Rendered};
use crate::core::record::Record;
use chrono::{DateTime, Utc};
use colored::{Color, Colorize};
use indexmap::IndexMap;

/// Wraps a string in JSON quotes when it contains whitespace or quotes
pub fn escape_string(s: &str) -> String {
    if s.chars().any(|c| c.is_whitespace() || c == '"') {
        serde_json::to_string(s).unwrap_or_else(|_| s.to_string())
    } else {
        s.to_string()
    }
}

/// A color to apply, or none for passthrough
#[derive(Debug, Clone, Copy, PartialEq)]
struct Paint(Option<Color>);

impl Paint {
    fn apply(self, text: &str) -> String {
        match self.0 {
            Some(color) if !text.is_empty() => text.color(color).to_string(),
            _ => text.to_string(),
        }
    }

    fn apply_underlined(self, text: &str) -> String {
        match self.0 {
            Some(color) => text.color(color).underline().to_string(),
            None => text.to_string(),
        }
    }

    /// Paint each line on its own so split lines stay self-contained
    fn apply_lines(self, text: &str) -> String {
        if self.0.is_none() {
            return text.to_string();
        }
        text.split('\n')
            .map(|line| self.apply(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub struct CliFormatter {
    colors: bool,
    default_color: Option<Color>,
    level_colors: IndexMap<String, String>,
    msg_colors: IndexMap<String, String>,
    error_levels: Vec<String>,
    display_level: bool,
    fields_paint: Paint,
    separator: String,
}

impl CliFormatter {
    pub fn new(ctx: &FormatterContext<'_>) -> Self {
        Self::from_options(ctx.options)
    }

    pub fn from_options(options: &FormatterOptions) -> Self {
        let default_color = options.default_color.parse::<Color>().ok();
        let mut formatter = Self {
            colors: options.colors,
            default_color,
            level_colors: options.level_color_by_level.clone(),
            msg_colors: options.msg_color_by_level.clone(),
            error_levels: options.error_levels.clone(),
            display_level: options.display_level,
            fields_paint: Paint(None),
            separator: options.separator.clone(),
        };
        formatter.fields_paint = formatter.paint_for(Some(&options.fields_color));
        formatter
    }

    /// Named color, falling back to the default color, then to passthrough
    fn paint_for(&self, name: Option<&str>) -> Paint {
        if !self.colors {
            return Paint(None);
        }
        let color = name
            .and_then(|n| n.parse::<Color>().ok())
            .or(self.default_color);
        Paint(color)
    }

    fn level_paint(&self, colors: &IndexMap<String, String>, level: &str) -> Paint {
        let name = colors.get(level).map(String::as_str).or_else(|| builtin_color(level));
        self.paint_for(name)
    }

    fn render_fields(&self, record: &Record) -> String {
        let mut out = String::new();
        for (key, value) in record.extra_fields() {
            out.push_str(&self.separator);
            out.push_str(&escape_string(key));
            out.push('=');
            out.push_str(&escape_string(&value.to_string()));
        }
        out
    }
}

fn builtin_color(level: &str) -> Option<&'static str> {
    match level {
        "fatal" | "error" => Some("red"),
        "warn" => Some("yellow"),
        "info" => Some("cyan"),
        "debug" => Some("blue"),
        _ => None,
    }
}

impl Formatter for CliFormatter {
    fn format(&self, _timestamp: &DateTime<Utc>, level: &str, record: &Record) -> Rendered {
        let mut out = String::new();

        if self.display_level {
            let tag = format!("[{}]", level.to_uppercase());
            out.push_str(&self.level_paint(&self.level_colors, level).apply_underlined(&tag));
            out.push(' ');
        }

        let msg = record.msg();
        let mut lines: Vec<String> = msg.split('\n').map(str::to_string).collect();
        let first_line = lines.first().cloned().unwrap_or_default();

        if self.error_levels.iter().any(|l| l == level) {
            if let Some(failure) = record.error() {
                // the stack repeats the message; keep only its first line there
                let stack = failure.stack().replacen(msg, &first_line, 1);
                lines.extend(stack.split('\n').map(str::to_string));
            }
        }

        let block = lines.join("\n");
        out.push_str(&self.level_paint(&self.msg_colors, level).apply_lines(&block));
        out.push_str(&self.fields_paint.apply(&self.render_fields(record)));
        out.push('\n');

        Rendered::Text(out)
    }
}
