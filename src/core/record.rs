//! The normalized record handed to formatters

use super::failure::Failure;
use super::fields::{FieldValue, Fields, MSG_KEY};

/// Merged fields for one log call, always carrying a `msg` string once
/// normalization has finished
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Fields,
}

impl Record {
    /// Contextual fields first, then call fields on top
    pub fn merged(context: &Fields, extra: Fields) -> Self {
        let mut fields = context.clone();
        fields.merge(extra);
        Self { fields }
    }

    /// Build a record directly, mostly useful for exercising formatters
    pub fn new(msg: impl Into<String>, fields: Fields) -> Self {
        let mut record = Self { fields };
        record.set_msg(msg.into());
        record
    }

    pub fn msg(&self) -> &str {
        self.fields
            .get(MSG_KEY)
            .and_then(FieldValue::as_str)
            .unwrap_or("")
    }

    pub(crate) fn set_msg(&mut self, msg: String) {
        self.fields.insert(MSG_KEY, msg);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub(crate) fn insert(&mut self, key: &str, value: FieldValue) {
        self.fields.insert(key, value);
    }

    /// The failure attached under the reserved `err` key
    pub fn error(&self) -> Option<&Failure> {
        self.fields.error()
    }

    /// Every entry including `msg`
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter()
    }

    /// Entries a formatter renders as trailing fields: everything except
    /// `msg` (the failure is never part of the value map)
    pub fn extra_fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().filter(|(k, _)| *k != MSG_KEY)
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub(crate) fn fields_mut(&mut self) -> &mut Fields {
        &mut self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_extra_overrides_context() {
        let context = Fields::new().with_field("a", 1).with_field("svc", "api");
        let record = Record::merged(&context, Fields::new().with_field("a", 2));

        assert_eq!(record.get("a"), Some(&FieldValue::Int(2)));
        assert_eq!(record.get("svc"), Some(&FieldValue::from("api")));
    }

    #[test]
    fn test_msg_excluded_from_extra_fields() {
        let record = Record::new("hello", Fields::new().with_field("k", "v"));

        assert_eq!(record.msg(), "hello");
        let keys: Vec<&str> = record.extra_fields().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["k"]);
    }

    #[test]
    fn test_msg_defaults_to_empty() {
        let record = Record::merged(&Fields::new(), Fields::new());
        assert_eq!(record.msg(), "");
    }
}
