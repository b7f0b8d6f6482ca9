//! Built-in formatters

pub mod cli;
pub mod json;
pub mod logfmt;

pub use cli::{escape_string, CliFormatter};
pub use json::JsonFormatter;
pub use logfmt::LogfmtFormatter;
