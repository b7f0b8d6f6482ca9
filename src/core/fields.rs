//! Structured key-value fields
//!
//! This module provides:
//! - `FieldValue`: a single structured value
//! - `Fields`: an insertion-ordered field mapping, optionally carrying a
//!   failure under the reserved `err` key

use super::failure::Failure;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key reserved for the rendered message
pub const MSG_KEY: &str = "msg";
/// Key reserved for an attached failure value
pub const ERROR_KEY: &str = "err";
/// Key copied from a failure's code
pub const CODE_KEY: &str = "code";

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// Insertion-ordered field mapping
///
/// Inserting an existing key replaces its value but keeps its position,
/// so contextual fields keep their order when a call overrides them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fields {
    #[serde(rename = "err", default, skip_serializing_if = "Option::is_none")]
    error: Option<Failure>,
    #[serde(flatten)]
    values: IndexMap<String, FieldValue>,
}

impl Fields {
    pub fn new() -> Self {
        Self {
            error: None,
            values: IndexMap::new(),
        }
    }

    /// Add a field (builder style)
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.insert(key, value);
        self
    }

    /// Attach a failure under the reserved `err` key
    pub fn with_error(mut self, failure: impl Into<Failure>) -> Self {
        self.error = Some(failure.into());
        self
    }

    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.values.insert(key.into(), value.into());
    }

    pub fn set_error(&mut self, failure: Option<Failure>) {
        self.error = failure;
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.values.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn error(&self) -> Option<&Failure> {
        self.error.as_ref()
    }

    pub(crate) fn error_mut(&mut self) -> Option<&mut Failure> {
        self.error.as_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = (&String, &mut FieldValue)> {
        self.values.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when there are no values and no attached failure
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.error.is_none()
    }

    /// Overlay `other` on top of `self`; `other` wins on key collision
    pub fn merge(&mut self, other: Fields) {
        if other.error.is_some() {
            self.error = other.error;
        }
        self.values.extend(other.values);
    }

    /// Format fields as space-separated key=value pairs
    pub fn format_fields(&self) -> String {
        self.values
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}
