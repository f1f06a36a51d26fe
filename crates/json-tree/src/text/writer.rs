//! [`TextWriter`] — a [`TokenSink`] producing compact JSON text.
//!
//! Tracks nesting so separators are inserted between entries; layout beyond
//! that (indentation, spacing) is out of scope.

use crate::number::JsonNumber;
use crate::token::TokenSink;

pub struct TextWriter {
    out: String,
    /// One flag per open container: whether an entry has been written.
    stack: Vec<bool>,
    /// A field name was just written; the next value takes no separator.
    field_pending: bool,
}

impl Default for TextWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextWriter {
    pub fn new() -> TextWriter {
        TextWriter {
            out: String::new(),
            stack: Vec::new(),
            field_pending: false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn finish(self) -> String {
        self.out
    }

    /// Insert a `,` if an entry precedes this one at the current level.
    fn before_entry(&mut self) {
        if let Some(written) = self.stack.last_mut() {
            if *written {
                self.out.push(',');
            } else {
                *written = true;
            }
        }
    }

    fn before_value(&mut self) {
        if self.field_pending {
            self.field_pending = false;
            return;
        }
        self.before_entry();
    }

    fn push_escaped(&mut self, s: &str) {
        // Fast path: printable ASCII without quotes or backslashes.
        let plain = s
            .bytes()
            .all(|b| (32..=126).contains(&b) && b != b'"' && b != b'\\');
        if plain {
            self.out.push('"');
            self.out.push_str(s);
            self.out.push('"');
            return;
        }
        match serde_json::to_string(s) {
            Ok(quoted) => self.out.push_str(&quoted),
            Err(_) => self.out.push_str("\"\""),
        }
    }
}

impl TokenSink for TextWriter {
    fn begin_array(&mut self) {
        self.before_value();
        self.out.push('[');
        self.stack.push(false);
    }

    fn end_array(&mut self) {
        self.stack.pop();
        self.out.push(']');
    }

    fn begin_object(&mut self) {
        self.before_value();
        self.out.push('{');
        self.stack.push(false);
    }

    fn end_object(&mut self) {
        self.stack.pop();
        self.out.push('}');
    }

    fn write_field_name(&mut self, name: &str) {
        self.before_entry();
        self.push_escaped(name);
        self.out.push(':');
        self.field_pending = true;
    }

    fn write_str(&mut self, s: &str) {
        self.before_value();
        self.push_escaped(s);
    }

    fn write_number(&mut self, n: &JsonNumber) {
        self.before_value();
        self.out.push_str(n.literal());
    }

    fn write_bool(&mut self, b: bool) {
        self.before_value();
        self.out.push_str(if b { "true" } else { "false" });
    }

    fn write_null(&mut self) {
        self.before_value();
        self.out.push_str("null");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_between_entries() {
        let mut w = TextWriter::new();
        w.begin_array();
        w.write_bool(true);
        w.write_null();
        w.begin_object();
        w.write_field_name("a");
        w.write_str("x");
        w.write_field_name("b");
        w.begin_array();
        w.end_array();
        w.end_object();
        w.end_array();
        assert_eq!(w.finish(), r#"[true,null,{"a":"x","b":[]}]"#);
    }

    #[test]
    fn escapes_strings() {
        let mut w = TextWriter::new();
        w.write_str("plain");
        assert_eq!(w.as_str(), r#""plain""#);

        let mut w = TextWriter::new();
        w.write_str("a\"b\\c\nd");
        assert_eq!(w.as_str(), r#""a\"b\\c\nd""#);

        let mut w = TextWriter::new();
        w.write_str("héllo");
        // serde_json leaves non-ASCII unescaped; it must survive verbatim.
        assert_eq!(w.as_str(), "\"héllo\"");
    }

    #[test]
    fn numbers_written_verbatim() {
        let mut w = TextWriter::new();
        w.write_number(&JsonNumber::from_literal("123456789012345678901234567890.5").unwrap());
        assert_eq!(w.as_str(), "123456789012345678901234567890.5");
    }
}
