//! Positional call arguments and their normalization
//!
//! `log` accepts a message and optional fields. Older call sites also pass
//! the fields first and the message second, or a completion callback in
//! place of the fields. `LogArgs` records the arguments as given and
//! `normalize` folds every accepted shape into one `NormalizedCall` before
//! the logger looks at them.

use super::failure::Failure;
use super::fields::{FieldValue, Fields};
use super::sink::Completion;
use std::fmt;

/// One positional argument of a log call
pub enum Arg {
    Text(String),
    Bytes(Vec<u8>),
    Failure(Failure),
    Value(FieldValue),
    Fields(Fields),
    Done(Completion),
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Arg::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            Arg::Failure(e) => f.debug_tuple("Failure").field(e).finish(),
            Arg::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Arg::Fields(x) => f.debug_tuple("Fields").field(x).finish(),
            Arg::Done(_) => f.write_str("Done(..)"),
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Text(s)
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Arg::Text(s.clone())
    }
}

impl From<Vec<u8>> for Arg {
    fn from(bytes: Vec<u8>) -> Self {
        Arg::Bytes(bytes)
    }
}

impl From<&[u8]> for Arg {
    fn from(bytes: &[u8]) -> Self {
        Arg::Bytes(bytes.to_vec())
    }
}

impl From<Failure> for Arg {
    fn from(failure: Failure) -> Self {
        Arg::Failure(failure)
    }
}

impl From<std::io::Error> for Arg {
    fn from(err: std::io::Error) -> Self {
        Arg::Failure(err.into())
    }
}

impl From<FieldValue> for Arg {
    fn from(value: FieldValue) -> Self {
        Arg::Value(value)
    }
}

impl From<Fields> for Arg {
    fn from(fields: Fields) -> Self {
        Arg::Fields(fields)
    }
}

/// The message after normalization
#[derive(Debug)]
pub enum Message {
    Text(String),
    Failure(Failure),
    /// Not textual; resolved from the record's own `msg` field
    Other(Option<FieldValue>),
}

/// A call folded into the single `(message, fields, done)` shape
pub struct NormalizedCall {
    pub message: Message,
    pub fields: Fields,
    pub done: Option<Completion>,
}

/// Up to two positional arguments plus an optional completion callback
///
/// ```
/// use rust_field_logger::{Fields, LogArgs};
///
/// // message first
/// let args = LogArgs::new().arg("user created").arg(Fields::new().with_field("id", 7));
/// // fields first, message second
/// let legacy = LogArgs::new().arg(Fields::new().with_field("id", 7)).arg("user created");
/// # let _ = (args, legacy);
/// ```
#[derive(Default)]
pub struct LogArgs {
    message: Option<Arg>,
    extra: Option<Arg>,
    done: Option<Completion>,
}

impl fmt::Debug for LogArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogArgs")
            .field("message", &self.message)
            .field("extra", &self.extra)
            .field("done", &self.done.is_some())
            .finish()
    }
}

impl LogArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the next positional argument; a third one is ignored
    #[must_use]
    pub fn arg(mut self, arg: impl Into<Arg>) -> Self {
        if self.message.is_none() {
            self.message = Some(arg.into());
        } else if self.extra.is_none() {
            self.extra = Some(arg.into());
        }
        self
    }

    #[must_use]
    pub fn done<F>(mut self, done: F) -> Self
    where
        F: FnOnce(super::error::Result<()>) + Send + 'static,
    {
        self.done = Some(Box::new(done));
        self
    }

    pub(crate) fn from_parts(message: Arg, fields: Option<Fields>, done: Option<Completion>) -> Self {
        Self {
            message: Some(message),
            extra: fields.map(Arg::Fields),
            done,
        }
    }

    /// Fold the accepted call shapes into one
    pub fn normalize(self) -> NormalizedCall {
        let LogArgs {
            mut message,
            mut extra,
            mut done,
        } = self;

        let swap = matches!(extra, Some(Arg::Text(_))) || matches!(message, Some(Arg::Fields(_)));
        if swap {
            std::mem::swap(&mut message, &mut extra);
        }

        let mut fields = Fields::new();
        match extra {
            Some(Arg::Fields(f)) => fields = f,
            Some(Arg::Failure(failure)) => fields.set_error(Some(failure)),
            Some(Arg::Done(callback)) => {
                if done.is_none() {
                    done = Some(callback);
                }
            }
            // stray scalars in the fields position carry no field names
            Some(Arg::Text(_)) | Some(Arg::Bytes(_)) | Some(Arg::Value(_)) | None => {}
        }

        let message = match message {
            None => Message::Text(String::new()),
            Some(Arg::Text(s)) => Message::Text(s),
            Some(Arg::Bytes(bytes)) => Message::Text(String::from_utf8_lossy(&bytes).into_owned()),
            Some(Arg::Failure(failure)) => Message::Failure(failure),
            Some(Arg::Value(value)) => Message::Other(Some(value)),
            Some(Arg::Fields(_)) => Message::Other(None),
            Some(Arg::Done(callback)) => {
                if done.is_none() {
                    done = Some(callback);
                }
                Message::Text(String::new())
            }
        };

        NormalizedCall {
            message,
            fields,
            done,
        }
    }
}
