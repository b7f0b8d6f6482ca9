//! Text layout applied to rendered output before it reaches a sink
//!
//! The first line of a rendered message is decorated as
//! `indentation + prefix + line + suffix`. Continuation lines are decorated
//! according to the multiline toggles. Blank lines are left untouched so
//! line separation can still drop them.

use super::ansi::visible_len;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    indentation: usize,
    indentation_string: String,
    indent_multiline: bool,
    indent_multiline_padding: bool,
    indentation_padding: String,
    prefix_multiline: bool,
    suffix_multiline: bool,
    prefix: String,
    suffix: String,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_indentation(&mut self, indentation: usize) {
        self.indentation = indentation;
        self.indentation_string = " ".repeat(indentation);
    }

    pub fn indentation(&self) -> usize {
        self.indentation
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
        self.refresh_padding();
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn set_suffix(&mut self, suffix: impl Into<String>) {
        self.suffix = suffix.into();
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn set_indent_multiline(&mut self, enabled: bool) {
        self.indent_multiline = enabled;
    }

    pub fn indent_multiline(&self) -> bool {
        self.indent_multiline
    }

    pub fn set_indent_multiline_padding(&mut self, enabled: bool) {
        self.indent_multiline_padding = enabled;
        self.refresh_padding();
    }

    pub fn indent_multiline_padding(&self) -> bool {
        self.indent_multiline_padding
    }

    pub fn set_prefix_multiline(&mut self, enabled: bool) {
        self.prefix_multiline = enabled;
    }

    pub fn prefix_multiline(&self) -> bool {
        self.prefix_multiline
    }

    pub fn set_suffix_multiline(&mut self, enabled: bool) {
        self.suffix_multiline = enabled;
    }

    pub fn suffix_multiline(&self) -> bool {
        self.suffix_multiline
    }

    /// Spaces matching the prefix's visible width, used to align
    /// continuation lines under the first line's text
    pub fn padding(&self) -> &str {
        &self.indentation_padding
    }

    fn refresh_padding(&mut self) {
        self.indentation_padding = if self.indent_multiline_padding && !self.prefix.is_empty() {
            " ".repeat(visible_len(&self.prefix))
        } else {
            String::new()
        };
    }

    /// True when `apply` would return its input unchanged
    pub fn is_identity(&self) -> bool {
        self.indentation == 0 && self.prefix.is_empty() && self.suffix.is_empty()
    }

    pub fn apply(&self, text: &str) -> String {
        if self.is_identity() {
            return text.to_string();
        }

        let (body, trailing_newline) = match text.strip_suffix('\n') {
            Some(body) => (body, true),
            None => (text, false),
        };

        let mut out = String::with_capacity(text.len() + 16);
        for (i, line) in body.split('\n').enumerate() {
            if i > 0 {
                out.push('\n');
            }
            if line.trim().is_empty() {
                out.push_str(line);
                continue;
            }
            if i == 0 {
                out.push_str(&self.indentation_string);
                out.push_str(&self.prefix);
                out.push_str(line);
                out.push_str(&self.suffix);
                continue;
            }
            if self.indent_multiline {
                out.push_str(&self.indentation_string);
            }
            if self.prefix_multiline {
                out.push_str(&self.prefix);
            } else {
                out.push_str(&self.indentation_padding);
            }
            out.push_str(line);
            if self.suffix_multiline {
                out.push_str(&self.suffix);
            }
        }
        if trailing_newline {
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        let layout = Layout::new();
        assert!(layout.is_identity());
        assert_eq!(layout.apply("a\nb\n"), "a\nb\n");
    }

    #[test]
    fn test_first_line_decoration() {
        let mut layout = Layout::new();
        layout.set_indentation(2);
        layout.set_prefix("> ");
        layout.set_suffix(" <");

        assert_eq!(layout.apply("first\nsecond\n"), "  > first <\nsecond\n");
    }

    #[test]
    fn test_multiline_toggles() {
        let mut layout = Layout::new();
        layout.set_indentation(2);
        layout.set_prefix("> ");
        layout.set_suffix(" <");
        layout.set_indent_multiline(true);
        layout.set_prefix_multiline(true);
        layout.set_suffix_multiline(true);

        assert_eq!(layout.apply("first\nsecond"), "  > first <\n  > second <");
    }

    #[test]
    fn test_padding_uses_visible_prefix_width() {
        let mut layout = Layout::new();
        layout.set_prefix("\x1b[32m[app]\x1b[0m ");
        layout.set_indent_multiline_padding(true);

        assert_eq!(layout.padding(), "      ");
        let out = layout.apply("first\nsecond\n");
        assert!(out.ends_with("\n      second\n"));
    }

    #[test]
    fn test_padding_requires_prefix() {
        let mut layout = Layout::new();
        layout.set_indent_multiline_padding(true);
        assert_eq!(layout.padding(), "");
    }

    #[test]
    fn test_blank_lines_untouched() {
        let mut layout = Layout::new();
        layout.set_prefix("> ");
        layout.set_prefix_multiline(true);

        assert_eq!(layout.apply("a\n\nb"), "> a\n\n> b");
    }
}
