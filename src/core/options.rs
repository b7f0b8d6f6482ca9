//! Serializable logger configuration
//!
//! Every option that can be expressed as data lives here. Sinks and custom
//! formatter factories are layered on top by [`LoggerBuilder`].
//!
//! [`LoggerBuilder`]: super::logger::LoggerBuilder

use super::error::Result;
use super::fields::Fields;
use super::formatter::{BuiltinFormatter, FormatterOptions};
use super::log_level::{LevelRef, LevelTable};
use super::secrets::{DEFAULT_REPEAT_CHAR_SUBSTITUTION, DEFAULT_STRING_SUBSTITUTION};
use serde::{Deserialize, Serialize};

/// # Example
///
/// ```
/// use rust_field_logger::LoggerOptions;
///
/// let options = LoggerOptions::from_json(r#"{"level":"debug","skipEmptyMsg":false}"#).unwrap();
/// assert!(!options.skip_empty_msg);
/// assert!(options.trim);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerOptions {
    pub levels: LevelTable,
    pub level: LevelRef,
    pub formatter: BuiltinFormatter,
    pub formatter_options: FormatterOptions,
    pub fields: Fields,
    pub secrets: Vec<String>,
    pub secrets_hide_chars_count: bool,
    #[serde(alias = "secretsStringSubstition")]
    pub secrets_string_substitution: String,
    #[serde(alias = "secretsRepeatCharSubstition")]
    pub secrets_repeat_char_substitution: String,
    pub enforce_lines_separation: bool,
    pub indentation: usize,
    pub indent_multiline: bool,
    pub indent_multiline_padding: bool,
    pub prefix_multiline: bool,
    pub suffix_multiline: bool,
    pub prefix: String,
    pub suffix: String,
    pub trim: bool,
    pub skip_empty_msg: bool,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            levels: LevelTable::default(),
            level: LevelRef::default(),
            formatter: BuiltinFormatter::default(),
            formatter_options: FormatterOptions::default(),
            fields: Fields::new(),
            secrets: Vec::new(),
            secrets_hide_chars_count: false,
            secrets_string_substitution: DEFAULT_STRING_SUBSTITUTION.to_string(),
            secrets_repeat_char_substitution: DEFAULT_REPEAT_CHAR_SUBSTITUTION.to_string(),
            enforce_lines_separation: true,
            indentation: 0,
            indent_multiline: false,
            indent_multiline_padding: false,
            prefix_multiline: false,
            suffix_multiline: false,
            prefix: String::new(),
            suffix: String::new(),
            trim: true,
            skip_empty_msg: true,
        }
    }
}

impl LoggerOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
