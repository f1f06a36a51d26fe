//! The token vocabulary shared by the decoder and encoder, and the traits
//! that bound the external tokenizer and emitter.

use std::fmt;

use crate::error::{Error, LexicalError, LexicalErrorKind};
use crate::number::JsonNumber;

/// Source position of a token, for diagnostics. Line and column are
/// 1-based; the column counts bytes within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: usize,
}

impl Position {
    pub fn start() -> Position {
        Position {
            line: 1,
            column: 1,
            offset: 0,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// One lexical token of a JSON text stream.
///
/// `Number` covers both integer and float literals; the exact class is
/// recoverable from the carried [`JsonNumber`].
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    StartArray,
    EndArray,
    StartObject,
    EndObject,
    /// An object key. Always followed by the value it names.
    FieldName(String),
    Str(String),
    Number(JsonNumber),
    Bool(bool),
    Null,
}

/// What a [`TokenSource`] produced for one pull.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenEvent {
    /// A token and its source position.
    Token(Token, Position),
    /// End of input.
    End,
    /// The source would block. The decoder does not support non-blocking
    /// sources and fails fast on this.
    Pending,
}

/// A pull-based producer of lexical tokens.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<TokenEvent, LexicalError>;
}

/// Peek-current / advance buffering over a [`TokenSource`].
pub struct TokenCursor<S> {
    source: S,
    current: Option<(Token, Position)>,
    ended: bool,
    pos: Position,
}

impl<S: TokenSource> TokenCursor<S> {
    pub fn new(source: S) -> TokenCursor<S> {
        TokenCursor {
            source,
            current: None,
            ended: false,
            pos: Position::start(),
        }
    }

    /// The buffered current token, if any.
    pub fn current(&self) -> Option<&Token> {
        self.current.as_ref().map(|(token, _)| token)
    }

    /// Take the buffered current token without pulling the next one.
    pub fn take(&mut self) -> Option<Token> {
        self.current.take().map(|(token, pos)| {
            self.pos = pos;
            token
        })
    }

    /// Position of the current token, or of the last token seen.
    pub fn position(&self) -> Position {
        match &self.current {
            Some((_, pos)) => *pos,
            None => self.pos,
        }
    }

    /// Whether the source is exhausted and nothing is buffered.
    pub fn at_end(&self) -> bool {
        self.ended && self.current.is_none()
    }

    /// Pull the next token into the buffer, replacing the current one.
    pub fn advance(&mut self) -> Result<(), Error> {
        if self.ended {
            self.current = None;
            return Ok(());
        }
        match self.source.next_token()? {
            TokenEvent::Token(token, pos) => {
                self.current = Some((token, pos));
            }
            TokenEvent::End => {
                self.current = None;
                self.ended = true;
            }
            TokenEvent::Pending => {
                self.current = None;
                return Err(
                    LexicalError::new(LexicalErrorKind::NonBlockingSource, self.pos).into(),
                );
            }
        }
        Ok(())
    }
}

/// A push-based acceptor of token events, fed by the encoder.
///
/// Field names are always immediately followed by the value they name, so
/// the sink never sees a dangling key.
pub trait TokenSink {
    fn begin_array(&mut self);
    fn end_array(&mut self);
    fn begin_object(&mut self);
    fn end_object(&mut self);
    fn write_field_name(&mut self, name: &str);
    fn write_str(&mut self, s: &str);
    fn write_number(&mut self, n: &JsonNumber);
    fn write_bool(&mut self, b: bool);
    fn write_null(&mut self);
}
