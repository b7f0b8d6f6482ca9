//! Secret redaction
//!
//! Runs after fields are merged and the message is normalized, before the
//! formatter sees the record. Every occurrence of a registered secret in the
//! message, in a string field value or in the text of an attached failure is
//! replaced. An empty set leaves records untouched.

use super::fields::FieldValue;
use super::record::Record;
use indexmap::IndexSet;

pub const DEFAULT_STRING_SUBSTITUTION: &str = "***";
pub const DEFAULT_REPEAT_CHAR_SUBSTITUTION: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretSet {
    secrets: IndexSet<String>,
    hide_chars_count: bool,
    string_substitution: String,
    repeat_char_substitution: String,
}

impl Default for SecretSet {
    fn default() -> Self {
        Self {
            secrets: IndexSet::new(),
            hide_chars_count: false,
            string_substitution: DEFAULT_STRING_SUBSTITUTION.to_string(),
            repeat_char_substitution: DEFAULT_REPEAT_CHAR_SUBSTITUTION.to_string(),
        }
    }
}

impl SecretSet {
    pub fn new<I, S>(secrets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        set.set_secrets(secrets);
        set
    }

    /// Replace the whole set; duplicates and empty strings are discarded
    pub fn set_secrets<I, S>(&mut self, secrets: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secrets = secrets
            .into_iter()
            .map(Into::into)
            .filter(|s: &String| !s.is_empty())
            .collect();
    }

    /// Returns true if the secret was not already present
    pub fn add_secret(&mut self, secret: impl Into<String>) -> bool {
        let secret = secret.into();
        if secret.is_empty() {
            return false;
        }
        self.secrets.insert(secret)
    }

    /// Returns true if the secret was present
    pub fn delete_secret(&mut self, secret: &str) -> bool {
        self.secrets.shift_remove(secret)
    }

    pub fn has_secret(&self, secret: &str) -> bool {
        self.secrets.contains(secret)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.secrets.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    pub fn set_hide_chars_count(&mut self, hide: bool) {
        self.hide_chars_count = hide;
    }

    pub fn hide_chars_count(&self) -> bool {
        self.hide_chars_count
    }

    pub fn set_string_substitution(&mut self, substitution: impl Into<String>) {
        self.string_substitution = substitution.into();
    }

    pub fn string_substitution(&self) -> &str {
        &self.string_substitution
    }

    pub fn set_repeat_char_substitution(&mut self, substitution: impl Into<String>) {
        self.repeat_char_substitution = substitution.into();
    }

    pub fn repeat_char_substitution(&self) -> &str {
        &self.repeat_char_substitution
    }

    fn mask(&self, secret: &str) -> String {
        if self.hide_chars_count {
            self.string_substitution.clone()
        } else {
            self.repeat_char_substitution.repeat(secret.chars().count())
        }
    }

    /// Redact every secret occurring in `text`
    pub fn redact(&self, text: &str) -> String {
        let mut out = text.to_string();
        // longest first so a secret containing another is masked whole
        let mut secrets: Vec<&String> = self.secrets.iter().collect();
        secrets.sort_by_key(|s| std::cmp::Reverse(s.len()));
        for secret in secrets {
            if out.contains(secret.as_str()) {
                out = out.replace(secret.as_str(), &self.mask(secret));
            }
        }
        out
    }

    /// Redact the message, every string field and the attached failure of
    /// `record` in place
    pub fn redact_record(&self, record: &mut Record) {
        if self.secrets.is_empty() {
            return;
        }
        let fields = record.fields_mut();
        for (_, value) in fields.values_mut() {
            if let FieldValue::String(s) = value {
                *s = self.redact(s);
            }
        }
        if let Some(failure) = fields.error_mut() {
            failure.redact_text(|text| self.redact(text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::failure::Failure;
    use crate::core::fields::Fields;

    #[test]
    fn test_set_is_deduplicated() {
        let set = SecretSet::new(["token", "token", "pw", ""]);
        assert_eq!(set.len(), 2);
        assert!(set.has_secret("token"));
        assert!(!set.has_secret(""));
    }

    #[test]
    fn test_add_and_delete() {
        let mut set = SecretSet::default();
        assert!(set.add_secret("hunter2"));
        assert!(!set.add_secret("hunter2"));
        assert!(set.delete_secret("hunter2"));
        assert!(!set.delete_secret("hunter2"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_redact_repeats_char_per_secret_char() {
        let set = SecretSet::new(["hunter2"]);
        assert_eq!(set.redact("password is hunter2"), "password is *******");
    }

    #[test]
    fn test_redact_hiding_length() {
        let mut set = SecretSet::new(["hunter2"]);
        set.set_hide_chars_count(true);
        assert_eq!(set.redact("password is hunter2"), "password is ***");
    }

    #[test]
    fn test_overlapping_secrets_longest_first() {
        let set = SecretSet::new(["abc", "abcdef"]);
        assert_eq!(set.redact("x abcdef y"), "x ****** y");
    }

    #[test]
    fn test_redact_record_message_and_fields() {
        let mut record = Record::new(
            "login with s3cret",
            Fields::new().with_field("auth", "Bearer s3cret").with_field("n", 1),
        );
        SecretSet::new(["s3cret"]).redact_record(&mut record);

        assert_eq!(record.msg(), "login with ******");
        assert_eq!(record.get("auth"), Some(&FieldValue::from("Bearer ******")));
        assert_eq!(record.get("n"), Some(&FieldValue::Int(1)));
    }

    #[test]
    fn test_redact_record_attached_failure() {
        let mut record = Record::new(
            "login failed",
            Fields::new().with_error(
                Failure::new("AuthError", "bad password hunter2")
                    .with_code("E_hunter2")
                    .with_cause("rejected hunter2"),
            ),
        );
        SecretSet::new(["hunter2"]).redact_record(&mut record);

        let failure = record.error().expect("failure kept");
        assert_eq!(failure.message(), "bad password *******");
        assert_eq!(failure.causes().to_vec(), vec!["rejected *******".to_string()]);
        assert_eq!(failure.code(), Some(&FieldValue::from("E_*******")));
        assert!(!failure.stack().contains("hunter2"));
    }
}
