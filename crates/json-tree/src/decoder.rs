//! Streaming decoder: token sequence in, one [`Value`] out.
//!
//! The decoder drives an explicit, heap-allocated stack of in-progress
//! container builders, so nesting depth is bounded by available memory
//! rather than by native call-stack depth.

use log::trace;

use crate::error::{Error, StructureError, StructureErrorKind, TypeMismatchError};
use crate::token::{Position, Token, TokenCursor, TokenSource};
use crate::value::{insert_field, Value, ValueKind};

/// One in-progress container on the decoder's context stack.
enum Context {
    /// An open array accumulating completed elements.
    Array(Vec<Value>),
    /// An open object awaiting a field name or the closing brace.
    Object(Vec<(String, Value)>),
    /// An open object that has captured a field name and awaits its value.
    ObjectKey(Vec<(String, Value)>, String),
}

impl Context {
    /// Route a completed value into this context, yielding the successor
    /// context. A value arriving on an object with no captured field name
    /// is structurally invalid.
    fn add_value(self, value: Value, pos: Position) -> Result<Context, StructureError> {
        match self {
            Context::Array(mut items) => {
                items.push(value);
                Ok(Context::Array(items))
            }
            Context::Object(_) => Err(StructureError::new(
                StructureErrorKind::ValueWithoutFieldName,
                pos,
            )),
            Context::ObjectKey(mut fields, name) => {
                // Last write wins on duplicate keys.
                insert_field(&mut fields, name, value);
                Ok(Context::Object(fields))
            }
        }
    }
}

/// Decode exactly one value from a token source.
///
/// Fails with a [`StructureError`] on unbalanced brackets, a value where a
/// field name was expected, a field name outside an object, trailing tokens
/// after a complete top-level value, or a token stream that ends early.
/// Lexical failures from the source propagate as-is.
pub fn decode<S: TokenSource>(source: S) -> Result<Value, Error> {
    let mut tokens = TokenCursor::new(source);
    tokens.advance()?;
    let mut stack: Vec<Context> = Vec::new();

    loop {
        let pos = tokens.position();
        let Some(token) = tokens.take() else {
            // Empty input, or the stream ended inside an open container.
            return Err(StructureError::new(StructureErrorKind::UnexpectedEnd, pos).into());
        };

        let produced = match token {
            Token::Null => Some(Value::Null),
            Token::Bool(b) => Some(Value::Bool(b)),
            Token::Number(n) => Some(Value::Number(n)),
            Token::Str(s) => Some(Value::Str(s)),
            Token::StartArray => {
                stack.push(Context::Array(Vec::new()));
                trace!("open array, depth {}", stack.len());
                None
            }
            Token::StartObject => {
                stack.push(Context::Object(Vec::new()));
                trace!("open object, depth {}", stack.len());
                None
            }
            Token::EndArray => match stack.pop() {
                Some(Context::Array(items)) => Some(Value::Array(items)),
                _ => {
                    return Err(StructureError::new(
                        StructureErrorKind::UnbalancedArrayClose,
                        pos,
                    )
                    .into())
                }
            },
            Token::EndObject => match stack.pop() {
                Some(Context::Object(fields)) => Some(Value::Object(fields)),
                _ => {
                    return Err(StructureError::new(
                        StructureErrorKind::UnbalancedObjectClose,
                        pos,
                    )
                    .into())
                }
            },
            Token::FieldName(name) => match stack.pop() {
                Some(Context::Object(fields)) => {
                    stack.push(Context::ObjectKey(fields, name));
                    None
                }
                _ => {
                    return Err(StructureError::new(
                        StructureErrorKind::FieldNameOutsideObject,
                        pos,
                    )
                    .into())
                }
            },
        };

        // Read ahead before deciding whether the document is complete.
        tokens.advance()?;

        if let Some(value) = produced {
            match stack.pop() {
                Some(top) => stack.push(top.add_value(value, pos)?),
                None => {
                    return if tokens.at_end() {
                        Ok(value)
                    } else {
                        Err(StructureError::new(
                            StructureErrorKind::TrailingContent,
                            tokens.position(),
                        )
                        .into())
                    };
                }
            }
        }
    }
}

/// Binding-boundary entry point: decode, then require the root to have the
/// requested shape.
pub fn decode_as<S: TokenSource>(source: S, expected: ValueKind) -> Result<Value, Error> {
    let value = decode(source)?;
    let actual = value.kind();
    if actual != expected {
        return Err(TypeMismatchError { expected, actual }.into());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LexicalError, LexicalErrorKind};
    use crate::number::JsonNumber;
    use crate::token::TokenEvent;

    /// Token source over a fixed sequence, with synthetic positions.
    struct Tokens {
        seq: std::vec::IntoIter<Token>,
        offset: usize,
    }

    impl Tokens {
        fn new(seq: Vec<Token>) -> Tokens {
            Tokens {
                seq: seq.into_iter(),
                offset: 0,
            }
        }
    }

    impl TokenSource for Tokens {
        fn next_token(&mut self) -> Result<TokenEvent, LexicalError> {
            match self.seq.next() {
                Some(token) => {
                    self.offset += 1;
                    Ok(TokenEvent::Token(
                        token,
                        Position {
                            line: 1,
                            column: self.offset as u32,
                            offset: self.offset,
                        },
                    ))
                }
                None => Ok(TokenEvent::End),
            }
        }
    }

    /// A source that reports it would block.
    struct Blocking;

    impl TokenSource for Blocking {
        fn next_token(&mut self) -> Result<TokenEvent, LexicalError> {
            Ok(TokenEvent::Pending)
        }
    }

    fn num(lit: &str) -> Token {
        Token::Number(JsonNumber::from_literal(lit).unwrap())
    }

    fn structure_kind(err: Error) -> StructureErrorKind {
        match err {
            Error::Structure(e) => e.kind,
            other => panic!("expected structure error, got {other:?}"),
        }
    }

    #[test]
    fn decodes_scalars() {
        assert_eq!(decode(Tokens::new(vec![Token::Null])).unwrap(), Value::Null);
        assert_eq!(
            decode(Tokens::new(vec![Token::Bool(true)])).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            decode(Tokens::new(vec![Token::Str("hi".into())])).unwrap(),
            Value::Str("hi".into())
        );
    }

    #[test]
    fn decodes_nested_containers() {
        // {"a": [1, {"b": null}]}
        let tokens = vec![
            Token::StartObject,
            Token::FieldName("a".into()),
            Token::StartArray,
            num("1"),
            Token::StartObject,
            Token::FieldName("b".into()),
            Token::Null,
            Token::EndObject,
            Token::EndArray,
            Token::EndObject,
        ];
        let value = decode(Tokens::new(tokens)).unwrap();
        assert_eq!(value.get("a").index(0).as_i64(), Some(1));
        assert!(value.get("a").index(1).get("b").is_null());
    }

    #[test]
    fn duplicate_keys_last_write_wins() {
        let tokens = vec![
            Token::StartObject,
            Token::FieldName("a".into()),
            num("1"),
            Token::FieldName("a".into()),
            num("2"),
            Token::EndObject,
        ];
        let value = decode(Tokens::new(tokens)).unwrap();
        assert_eq!(value.get("a").as_i64(), Some(2));
        assert_eq!(value.entries().len(), 1);
    }

    #[test]
    fn empty_input_is_unexpected_end() {
        let err = decode(Tokens::new(vec![])).unwrap_err();
        assert_eq!(structure_kind(err), StructureErrorKind::UnexpectedEnd);
    }

    #[test]
    fn unterminated_container_is_unexpected_end() {
        let err = decode(Tokens::new(vec![Token::StartArray, num("1")])).unwrap_err();
        assert_eq!(structure_kind(err), StructureErrorKind::UnexpectedEnd);
    }

    #[test]
    fn trailing_token_after_complete_value() {
        let err = decode(Tokens::new(vec![Token::Null, Token::Null])).unwrap_err();
        assert_eq!(structure_kind(err), StructureErrorKind::TrailingContent);
    }

    #[test]
    fn extra_array_close_is_trailing_content() {
        // [1] ] — the close after a complete document is trailing content.
        let tokens = vec![Token::StartArray, num("1"), Token::EndArray, Token::EndArray];
        let err = decode(Tokens::new(tokens)).unwrap_err();
        assert_eq!(structure_kind(err), StructureErrorKind::TrailingContent);
    }

    #[test]
    fn bare_close_is_unbalanced() {
        let err = decode(Tokens::new(vec![Token::EndArray])).unwrap_err();
        assert_eq!(structure_kind(err), StructureErrorKind::UnbalancedArrayClose);

        let err = decode(Tokens::new(vec![Token::EndObject])).unwrap_err();
        assert_eq!(
            structure_kind(err),
            StructureErrorKind::UnbalancedObjectClose
        );
    }

    #[test]
    fn mismatched_close_is_unbalanced() {
        let err = decode(Tokens::new(vec![Token::StartArray, Token::EndObject])).unwrap_err();
        assert_eq!(
            structure_kind(err),
            StructureErrorKind::UnbalancedObjectClose
        );

        let err = decode(Tokens::new(vec![Token::StartObject, Token::EndArray])).unwrap_err();
        assert_eq!(structure_kind(err), StructureErrorKind::UnbalancedArrayClose);
    }

    #[test]
    fn value_in_object_without_field_name() {
        let err = decode(Tokens::new(vec![Token::StartObject, num("1")])).unwrap_err();
        assert_eq!(
            structure_kind(err),
            StructureErrorKind::ValueWithoutFieldName
        );
    }

    #[test]
    fn field_name_outside_object() {
        let err = decode(Tokens::new(vec![
            Token::StartArray,
            Token::FieldName("a".into()),
        ]))
        .unwrap_err();
        assert_eq!(
            structure_kind(err),
            StructureErrorKind::FieldNameOutsideObject
        );

        let err = decode(Tokens::new(vec![Token::FieldName("a".into())])).unwrap_err();
        assert_eq!(
            structure_kind(err),
            StructureErrorKind::FieldNameOutsideObject
        );
    }

    #[test]
    fn pending_source_fails_fast() {
        let err = decode(Blocking).unwrap_err();
        match err {
            Error::Lexical(e) => assert_eq!(e.kind, LexicalErrorKind::NonBlockingSource),
            other => panic!("expected lexical error, got {other:?}"),
        }
    }

    #[test]
    fn decode_as_checks_root_shape() {
        let value = decode_as(
            Tokens::new(vec![Token::StartArray, Token::EndArray]),
            ValueKind::Array,
        )
        .unwrap();
        assert!(value.is_array());

        let err = decode_as(Tokens::new(vec![num("1")]), ValueKind::Object).unwrap_err();
        match err {
            Error::TypeMismatch(e) => {
                assert_eq!(e.expected, ValueKind::Object);
                assert_eq!(e.actual, ValueKind::Number);
            }
            other => panic!("expected type mismatch, got {other:?}"),
        }
    }

    #[test]
    fn deep_nesting_uses_no_call_stack() {
        let depth = 100_000;
        let mut tokens = Vec::with_capacity(depth * 2 + 1);
        for _ in 0..depth {
            tokens.push(Token::StartArray);
        }
        tokens.push(num("1"));
        for _ in 0..depth {
            tokens.push(Token::EndArray);
        }
        let mut value = decode(Tokens::new(tokens)).unwrap();
        for _ in 0..depth {
            match value {
                Value::Array(mut items) => {
                    assert_eq!(items.len(), 1);
                    value = items.pop().unwrap();
                }
                other => panic!("expected array, got {other:?}"),
            }
        }
        assert_eq!(value.as_i64(), Some(1));
    }
}
