//! ANSI escape sequence helpers

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// CSI sequences (colors, cursor movement) and OSC sequences (hyperlinks, titles)
static ANSI_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)")
        .expect("Invalid ANSI pattern regex")
});

/// Remove every ANSI escape sequence from `s`
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    ANSI_PATTERN.replace_all(s, "")
}

/// Number of visible characters once escape sequences are removed
pub fn visible_len(s: &str) -> usize {
    strip_ansi(s).chars().count()
}
