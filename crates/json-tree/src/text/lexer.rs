//! [`Lexer`] — a pull-based [`TokenSource`] over JSON text.
//!
//! A hand-rolled byte scanner. Punctuation (commas, colons) is validated and
//! consumed here; strings in key position become [`Token::FieldName`].
//! Bracket matching is deliberately *not* judged here: close tokens are
//! emitted as-is so the decoder's context stack can classify mismatches as
//! structure errors, and a non-string token in key position flows through so
//! the decoder reports "value without preceding field name".

use log::trace;

use crate::error::{LexicalError, LexicalErrorKind};
use crate::number::JsonNumber;
use crate::token::{Position, Token, TokenEvent, TokenSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Array,
    Object,
}

/// What the grammar allows at the current point of the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// Document start, or after a complete top-level value.
    TopLevel,
    /// Right after `[`: a value or the closing bracket.
    FirstElement,
    /// After a comma in an array: a value.
    Element,
    CommaOrEndArray,
    /// Right after `{`: a key or the closing brace.
    FirstKey,
    /// After a comma in an object: a key.
    Key,
    /// After a key's colon: a value.
    FieldValue,
    CommaOrEndObject,
}

pub struct Lexer<'a> {
    data: &'a [u8],
    x: usize,
    line: u32,
    line_start: usize,
    scopes: Vec<Scope>,
    expect: Expect,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Lexer<'a> {
        Lexer::from_slice(text.as_bytes())
    }

    pub fn from_slice(data: &'a [u8]) -> Lexer<'a> {
        Lexer {
            data,
            x: 0,
            line: 1,
            line_start: 0,
            scopes: Vec::new(),
            expect: Expect::TopLevel,
        }
    }

    fn position(&self) -> Position {
        Position {
            line: self.line,
            column: (self.x - self.line_start + 1) as u32,
            offset: self.x,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.x < self.data.len() {
            match self.data[self.x] {
                b' ' | b'\t' | b'\r' => self.x += 1,
                b'\n' => {
                    self.x += 1;
                    self.line += 1;
                    self.line_start = self.x;
                }
                _ => break,
            }
        }
    }

    /// The expectation after a value completes, derived from the enclosing
    /// scope.
    fn after_value(&self) -> Expect {
        match self.scopes.last() {
            None => Expect::TopLevel,
            Some(Scope::Array) => Expect::CommaOrEndArray,
            Some(Scope::Object) => Expect::CommaOrEndObject,
        }
    }

    fn close_scope(&mut self) {
        self.scopes.pop();
        self.expect = self.after_value();
    }

    /// Decode the character at the cursor for error reporting.
    fn current_char(&self) -> char {
        std::str::from_utf8(&self.data[self.x..])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn err(&self, kind: LexicalErrorKind, pos: Position) -> LexicalError {
        trace!("lexical error: {kind} at {pos}");
        LexicalError::new(kind, pos)
    }

    fn lex_value(&mut self, pos: Position) -> Result<TokenEvent, LexicalError> {
        let token = match self.data[self.x] {
            b'"' => {
                let s = self.read_string(pos)?;
                self.expect = self.after_value();
                Token::Str(s)
            }
            b'[' => {
                self.x += 1;
                self.scopes.push(Scope::Array);
                self.expect = Expect::FirstElement;
                Token::StartArray
            }
            b'{' => {
                self.x += 1;
                self.scopes.push(Scope::Object);
                self.expect = Expect::FirstKey;
                Token::StartObject
            }
            b't' => {
                self.read_literal(b"true", pos)?;
                self.expect = self.after_value();
                Token::Bool(true)
            }
            b'f' => {
                self.read_literal(b"false", pos)?;
                self.expect = self.after_value();
                Token::Bool(false)
            }
            b'n' => {
                self.read_literal(b"null", pos)?;
                self.expect = self.after_value();
                Token::Null
            }
            b'-' | b'0'..=b'9' => {
                let n = self.read_number(pos)?;
                self.expect = self.after_value();
                Token::Number(n)
            }
            _ => {
                return Err(self.err(
                    LexicalErrorKind::UnexpectedCharacter(self.current_char()),
                    pos,
                ))
            }
        };
        Ok(TokenEvent::Token(token, pos))
    }

    /// A key slot: a string becomes a field name (with its colon consumed);
    /// anything else is lexed as an ordinary token for the decoder to judge.
    fn lex_key_slot(&mut self, pos: Position) -> Result<TokenEvent, LexicalError> {
        if self.data[self.x] != b'"' {
            return self.lex_value(pos);
        }
        let name = self.read_string(pos)?;
        self.skip_whitespace();
        if self.x >= self.data.len() || self.data[self.x] != b':' {
            return Err(self.err(LexicalErrorKind::ExpectedColon, self.position()));
        }
        self.x += 1;
        self.expect = Expect::FieldValue;
        Ok(TokenEvent::Token(Token::FieldName(name), pos))
    }

    fn read_literal(&mut self, literal: &[u8], pos: Position) -> Result<(), LexicalError> {
        if self.x + literal.len() > self.data.len()
            || &self.data[self.x..self.x + literal.len()] != literal
        {
            return Err(self.err(LexicalErrorKind::InvalidLiteral, pos));
        }
        self.x += literal.len();
        Ok(())
    }

    fn read_number(&mut self, pos: Position) -> Result<JsonNumber, LexicalError> {
        let data = self.data;
        let len = data.len();
        let start = self.x;
        let mut x = self.x;

        // Span the literal: sign, digits, fraction, exponent. Validation of
        // the spanned text is left to `JsonNumber::from_literal`.
        if x < len && data[x] == b'-' {
            x += 1;
        }
        while x < len && data[x].is_ascii_digit() {
            x += 1;
        }
        if x < len && data[x] == b'.' {
            x += 1;
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
        }
        if x < len && (data[x] == b'e' || data[x] == b'E') {
            x += 1;
            if x < len && (data[x] == b'+' || data[x] == b'-') {
                x += 1;
            }
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
        }
        self.x = x;

        std::str::from_utf8(&data[start..x])
            .ok()
            .and_then(JsonNumber::from_literal)
            .ok_or_else(|| self.err(LexicalErrorKind::InvalidNumber, pos))
    }

    /// Read a quoted string starting at the cursor, returning its decoded
    /// body. `pos` is the position of the opening quote.
    fn read_string(&mut self, pos: Position) -> Result<String, LexicalError> {
        let data = self.data;
        self.x += 1; // opening quote
        let start = self.x;
        let mut has_escape = false;
        loop {
            if self.x >= data.len() {
                return Err(self.err(LexicalErrorKind::UnterminatedString, pos));
            }
            match data[self.x] {
                b'"' => break,
                b'\\' => {
                    has_escape = true;
                    self.x += 2;
                }
                b if b < 0x20 => {
                    return Err(
                        self.err(LexicalErrorKind::ControlCharacterInString, self.position())
                    );
                }
                _ => self.x += 1,
            }
        }
        let body = &data[start..self.x];
        self.x += 1; // closing quote
        decode_string_body(body, has_escape).map_err(|kind| self.err(kind, pos))
    }
}

impl TokenSource for Lexer<'_> {
    fn next_token(&mut self) -> Result<TokenEvent, LexicalError> {
        loop {
            self.skip_whitespace();
            if self.x >= self.data.len() {
                return Ok(TokenEvent::End);
            }
            let pos = self.position();
            let ch = self.data[self.x];
            match self.expect {
                Expect::TopLevel => {
                    // Stray closes after a complete document flow through so
                    // the decoder can reject them as trailing content.
                    if ch == b']' {
                        self.x += 1;
                        return Ok(TokenEvent::Token(Token::EndArray, pos));
                    }
                    if ch == b'}' {
                        self.x += 1;
                        return Ok(TokenEvent::Token(Token::EndObject, pos));
                    }
                    return self.lex_value(pos);
                }
                Expect::FirstElement => {
                    if ch == b']' {
                        self.x += 1;
                        self.close_scope();
                        return Ok(TokenEvent::Token(Token::EndArray, pos));
                    }
                    return self.lex_value(pos);
                }
                Expect::Element | Expect::FieldValue => return self.lex_value(pos),
                Expect::CommaOrEndArray => {
                    if ch == b']' {
                        self.x += 1;
                        self.close_scope();
                        return Ok(TokenEvent::Token(Token::EndArray, pos));
                    }
                    if ch == b',' {
                        self.x += 1;
                        self.expect = Expect::Element;
                        continue;
                    }
                    return Err(self.err(LexicalErrorKind::ExpectedComma, pos));
                }
                Expect::FirstKey => {
                    if ch == b'}' {
                        self.x += 1;
                        self.close_scope();
                        return Ok(TokenEvent::Token(Token::EndObject, pos));
                    }
                    return self.lex_key_slot(pos);
                }
                Expect::Key => return self.lex_key_slot(pos),
                Expect::CommaOrEndObject => {
                    if ch == b'}' {
                        self.x += 1;
                        self.close_scope();
                        return Ok(TokenEvent::Token(Token::EndObject, pos));
                    }
                    if ch == b',' {
                        self.x += 1;
                        self.expect = Expect::Key;
                        continue;
                    }
                    return Err(self.err(LexicalErrorKind::ExpectedComma, pos));
                }
            }
        }
    }
}

/// Decode a string body (between the quotes). Fast path when no backslash
/// was seen; otherwise re-quote and let serde_json handle the escapes.
fn decode_string_body(bytes: &[u8], has_escape: bool) -> Result<String, LexicalErrorKind> {
    if !has_escape {
        return std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| LexicalErrorKind::InvalidUtf8);
    }
    if std::str::from_utf8(bytes).is_err() {
        return Err(LexicalErrorKind::InvalidUtf8);
    }
    let mut quoted = Vec::with_capacity(bytes.len() + 2);
    quoted.push(b'"');
    quoted.extend_from_slice(bytes);
    quoted.push(b'"');
    serde_json::from_slice(&quoted).map_err(|_| LexicalErrorKind::InvalidEscape)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Result<Vec<Token>, LexicalError> {
        let mut lexer = Lexer::new(text);
        let mut out = Vec::new();
        loop {
            match lexer.next_token()? {
                TokenEvent::Token(token, _) => out.push(token),
                TokenEvent::End => return Ok(out),
                TokenEvent::Pending => unreachable!(),
            }
        }
    }

    fn kind(text: &str) -> LexicalErrorKind {
        let err = tokens(text).unwrap_err();
        err.kind
    }

    fn num(lit: &str) -> Token {
        Token::Number(JsonNumber::from_literal(lit).unwrap())
    }

    #[test]
    fn lexes_scalars() {
        assert_eq!(tokens("null").unwrap(), vec![Token::Null]);
        assert_eq!(tokens(" true ").unwrap(), vec![Token::Bool(true)]);
        assert_eq!(tokens("false").unwrap(), vec![Token::Bool(false)]);
        assert_eq!(tokens("-1.5e3").unwrap(), vec![num("-1.5e3")]);
        assert_eq!(tokens(r#""hi""#).unwrap(), vec![Token::Str("hi".into())]);
        assert_eq!(tokens("").unwrap(), vec![]);
    }

    #[test]
    fn lexes_array_with_punctuation() {
        assert_eq!(
            tokens("[1, 2,3]").unwrap(),
            vec![
                Token::StartArray,
                num("1"),
                num("2"),
                num("3"),
                Token::EndArray
            ]
        );
        assert_eq!(
            tokens("[]").unwrap(),
            vec![Token::StartArray, Token::EndArray]
        );
    }

    #[test]
    fn lexes_object_keys_as_field_names() {
        assert_eq!(
            tokens(r#"{"a": 1, "b": [true]}"#).unwrap(),
            vec![
                Token::StartObject,
                Token::FieldName("a".into()),
                num("1"),
                Token::FieldName("b".into()),
                Token::StartArray,
                Token::Bool(true),
                Token::EndArray,
                Token::EndObject,
            ]
        );
        assert_eq!(
            tokens("{}").unwrap(),
            vec![Token::StartObject, Token::EndObject]
        );
    }

    #[test]
    fn non_string_key_flows_through() {
        // The decoder, not the lexer, reports this as a structure error.
        assert_eq!(
            tokens("{1}").unwrap(),
            vec![Token::StartObject, num("1"), Token::EndObject]
        );
    }

    #[test]
    fn stray_close_flows_through_at_top_level() {
        assert_eq!(
            tokens("[1]]").unwrap(),
            vec![Token::StartArray, num("1"), Token::EndArray, Token::EndArray]
        );
    }

    #[test]
    fn string_escapes() {
        assert_eq!(
            tokens(r#""a\"b\\c\nd""#).unwrap(),
            vec![Token::Str("a\"b\\c\nd".into())]
        );
        assert_eq!(
            tokens(r#""é€""#).unwrap(),
            vec![Token::Str("é€".into())]
        );
        // Surrogate pair.
        assert_eq!(
            tokens(r#""😀""#).unwrap(),
            vec![Token::Str("😀".into())]
        );
        // Raw UTF-8 passes through.
        assert_eq!(tokens(r#""héllo""#).unwrap(), vec![Token::Str("héllo".into())]);
    }

    #[test]
    fn punctuation_errors() {
        assert_eq!(kind("[1 2]"), LexicalErrorKind::ExpectedComma);
        assert_eq!(kind(r#"{"a" 1}"#), LexicalErrorKind::ExpectedColon);
        assert_eq!(kind(r#"{"a": 1 "b": 2}"#), LexicalErrorKind::ExpectedComma);
        assert_eq!(kind("[1,]"), LexicalErrorKind::UnexpectedCharacter(']'));
        assert_eq!(kind(r#"{"a": 1,}"#), LexicalErrorKind::UnexpectedCharacter('}'));
    }

    #[test]
    fn malformed_scalars() {
        assert_eq!(kind("tru"), LexicalErrorKind::InvalidLiteral);
        assert_eq!(kind("nul"), LexicalErrorKind::InvalidLiteral);
        assert_eq!(kind("01"), LexicalErrorKind::InvalidNumber);
        assert_eq!(kind("1."), LexicalErrorKind::InvalidNumber);
        assert_eq!(kind("-"), LexicalErrorKind::InvalidNumber);
        assert_eq!(kind("1e+"), LexicalErrorKind::InvalidNumber);
        assert_eq!(kind(r#""abc"#), LexicalErrorKind::UnterminatedString);
        assert_eq!(kind("\"a\nb\""), LexicalErrorKind::ControlCharacterInString);
        assert_eq!(kind(r#""\q""#), LexicalErrorKind::InvalidEscape);
        assert_eq!(kind("@"), LexicalErrorKind::UnexpectedCharacter('@'));
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let mut lexer = Lexer::new("{\n  \"a\": 42\n}");
        let mut positions = Vec::new();
        loop {
            match lexer.next_token().unwrap() {
                TokenEvent::Token(_, pos) => positions.push((pos.line, pos.column)),
                TokenEvent::End => break,
                TokenEvent::Pending => unreachable!(),
            }
        }
        // {, "a", 42, }
        assert_eq!(positions, vec![(1, 1), (2, 3), (2, 8), (3, 1)]);
    }

    #[test]
    fn error_positions_are_precise() {
        let err = tokens("[1 2]").unwrap_err();
        assert_eq!(err.pos.line, 1);
        assert_eq!(err.pos.column, 4);
        assert_eq!(err.pos.offset, 3);
    }
}
