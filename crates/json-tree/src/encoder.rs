//! Streaming encoder: one [`Value`] in, token events out.

use std::fmt;

use crate::text::TextWriter;
use crate::token::TokenSink;
use crate::value::Value;

/// Emit `value` as a token sequence, by structural recursion.
///
/// `Null` and `Undefined` both emit a null token: the two are
/// indistinguishable on the wire, only the in-memory model separates
/// "absent field" from "explicit null". Numbers are emitted from their
/// stored exact-decimal literal, never through a binary float.
pub fn encode<S: TokenSink>(value: &Value, sink: &mut S) {
    match value {
        Value::Null | Value::Undefined => sink.write_null(),
        Value::Bool(b) => sink.write_bool(*b),
        Value::Number(n) => sink.write_number(n),
        Value::Str(s) => sink.write_str(s),
        Value::Array(items) => {
            sink.begin_array();
            for item in items {
                encode(item, sink);
            }
            sink.end_array();
        }
        Value::Object(fields) => {
            sink.begin_object();
            for (name, field_value) in fields {
                sink.write_field_name(name);
                encode(field_value, sink);
            }
            sink.end_object();
        }
    }
}

/// Render `value` as compact JSON text.
pub fn to_string(value: &Value) -> String {
    let mut writer = TextWriter::new();
    encode(value, &mut writer);
    writer.finish()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_string(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::JsonNumber;

    fn num(lit: &str) -> Value {
        Value::Number(JsonNumber::from_literal(lit).unwrap())
    }

    #[test]
    fn scalars_and_containers() {
        assert_eq!(to_string(&Value::Null), "null");
        assert_eq!(to_string(&Value::Bool(false)), "false");
        assert_eq!(to_string(&num("3.14")), "3.14");
        assert_eq!(to_string(&Value::Str("hi".into())), "\"hi\"");
        assert_eq!(to_string(&Value::array([])), "[]");
        assert_eq!(to_string(&Value::object::<&str, _>([])), "{}");

        let value = Value::object([
            ("a", num("1")),
            ("b", Value::array([Value::Bool(true), Value::Null])),
        ]);
        assert_eq!(to_string(&value), r#"{"a":1,"b":[true,null]}"#);
    }

    #[test]
    fn undefined_encodes_as_null() {
        assert_eq!(to_string(&Value::Undefined), "null");
        let value = Value::object([("gone", Value::Undefined)]);
        assert_eq!(to_string(&value), r#"{"gone":null}"#);
    }

    #[test]
    fn key_order_is_insertion_order() {
        let value = Value::object([("z", num("1")), ("a", num("2")), ("m", num("3"))]);
        assert_eq!(to_string(&value), r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn numbers_keep_exact_literals() {
        let value = num("123456789012345678901234567890.5");
        assert_eq!(to_string(&value), "123456789012345678901234567890.5");
    }

    #[test]
    fn display_matches_to_string() {
        let value = Value::object([("k", Value::Str("v".into()))]);
        assert_eq!(format!("{value}"), to_string(&value));
    }
}
