//! Failure values and their textual serialization
//!
//! A `Failure` is an owned snapshot of an error: its kind, message, optional
//! code, the chain of underlying causes and, if captured, a backtrace.

use super::error::LoggerError;
use super::fields::FieldValue;
use serde::{Deserialize, Serialize};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    kind: String,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    causes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    backtrace: Option<String>,
}

impl Failure {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            code: None,
            causes: Vec::new(),
            backtrace: None,
        }
    }

    /// Snapshot a typed error, walking its `source()` chain
    pub fn from_error<E: StdError + 'static>(err: &E) -> Self {
        let mut failure = Self::new(short_type_name::<E>(), err.to_string());
        failure.causes = cause_chain(err.source());
        failure
    }

    /// Snapshot a type-erased error
    pub fn from_dyn(err: &(dyn StdError + 'static)) -> Self {
        let mut failure = Self::new("Error", err.to_string());
        failure.causes = cause_chain(err.source());
        failure
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<FieldValue>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// Attach the current backtrace when the environment enables capture
    #[must_use]
    pub fn capture_backtrace(mut self) -> Self {
        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            self.backtrace = Some(backtrace.to_string());
        }
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<&FieldValue> {
        self.code.as_ref()
    }

    pub fn causes(&self) -> &[String] {
        &self.causes
    }

    /// Rewrite every piece of text the stack renders
    pub(crate) fn redact_text(&mut self, redact: impl Fn(&str) -> String) {
        self.kind = redact(&self.kind);
        self.message = redact(&self.message);
        for cause in &mut self.causes {
            *cause = redact(cause);
        }
        if let Some(backtrace) = self.backtrace.as_mut() {
            *backtrace = redact(backtrace);
        }
        if let Some(FieldValue::String(code)) = self.code.as_mut() {
            *code = redact(code);
        }
    }

    /// Multi-line rendering: `Kind: message`, one `Caused by:` line per
    /// cause, then the backtrace if one was captured
    pub fn stack(&self) -> String {
        let mut out = if self.message.is_empty() {
            self.kind.clone()
        } else {
            format!("{}: {}", self.kind, self.message)
        };
        for cause in &self.causes {
            out.push_str("\n    Caused by: ");
            out.push_str(cause);
        }
        if let Some(ref backtrace) = self.backtrace {
            out.push('\n');
            out.push_str(backtrace.trim_end());
        }
        out
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for Failure {}

impl From<std::io::Error> for Failure {
    fn from(err: std::io::Error) -> Self {
        let code = format!("{:?}", err.kind());
        Failure::from_error(&err).with_code(code)
    }
}

impl From<LoggerError> for Failure {
    fn from(err: LoggerError) -> Self {
        Failure::from_error(&err)
    }
}

/// Textual rendering of a failure used as the log message
pub fn serialize_error(failure: &Failure) -> String {
    failure.stack()
}

fn cause_chain(mut source: Option<&(dyn StdError + 'static)>) -> Vec<String> {
    let mut causes = Vec::new();
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }
    causes
}

fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_contains_message_and_causes() {
        let failure = Failure::new("DbError", "query failed")
            .with_cause("connection reset")
            .with_cause("broken pipe");

        assert_eq!(
            failure.stack(),
            "DbError: query failed\n    Caused by: connection reset\n    Caused by: broken pipe"
        );
    }

    #[test]
    fn test_from_io_error_sets_code() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");
        let failure = Failure::from(io_err);

        assert_eq!(failure.kind(), "Error");
        assert_eq!(failure.message(), "config.toml missing");
        assert_eq!(failure.code(), Some(&FieldValue::from("NotFound")));
    }

    #[test]
    fn test_from_error_walks_source_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("opening sink", "cannot open", io_err);
        let failure = Failure::from_error(&err);

        assert_eq!(failure.kind(), "LoggerError");
        assert_eq!(failure.causes(), &["access denied".to_string()]);
        assert!(serialize_error(&failure).contains("opening sink"));
    }

    #[test]
    fn test_empty_message_renders_kind_only() {
        assert_eq!(Failure::new("Timeout", "").stack(), "Timeout");
    }
}
