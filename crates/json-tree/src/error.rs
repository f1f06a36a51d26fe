//! Error taxonomy for decoding, encoding and coercion.
//!
//! Every error is fatal for the single call that raised it: no retry, no
//! partial tree, no default-value substitution. Decode-side errors carry the
//! source position of the offending token.

use thiserror::Error;

use crate::token::Position;
use crate::value::ValueKind;

/// Top-level error for all fallible operations in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    #[error(transparent)]
    Structure(#[from] StructureError),
    #[error(transparent)]
    Coercion(#[from] CoercionError),
    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatchError),
}

impl Error {
    /// Source position of the failure, when one is available.
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Lexical(e) => Some(e.pos),
            Error::Structure(e) => Some(e.pos),
            Error::Coercion(_) | Error::TypeMismatch(_) => None,
        }
    }
}

/// The token source produced an invalid or unsupported token.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} at {pos}")]
pub struct LexicalError {
    pub kind: LexicalErrorKind,
    pub pos: Position,
}

impl LexicalError {
    pub fn new(kind: LexicalErrorKind, pos: Position) -> Self {
        LexicalError { kind, pos }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorKind {
    #[error("invalid literal")]
    InvalidLiteral,
    #[error("invalid number")]
    InvalidNumber,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("unescaped control character in string")]
    ControlCharacterInString,
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    #[error("expected ',' between entries")]
    ExpectedComma,
    #[error("expected ':' after object key")]
    ExpectedColon,
    #[error("non-blocking token source is not supported")]
    NonBlockingSource,
}

/// The token sequence is well lexed but structurally invalid.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} at {pos}")]
pub struct StructureError {
    pub kind: StructureErrorKind,
    pub pos: Position,
}

impl StructureError {
    pub fn new(kind: StructureErrorKind, pos: Position) -> Self {
        StructureError { kind, pos }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureErrorKind {
    #[error("unbalanced array close")]
    UnbalancedArrayClose,
    #[error("unbalanced object close")]
    UnbalancedObjectClose,
    #[error("value without preceding field name")]
    ValueWithoutFieldName,
    #[error("field name outside object")]
    FieldNameOutsideObject,
    #[error("trailing content after a complete value")]
    TrailingContent,
    #[error("unexpected end of input")]
    UnexpectedEnd,
}

/// A native value with no JSON representation was lifted into the tree.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot convert {type_name} value {detail} to JSON")]
pub struct CoercionError {
    /// Name of the offending native type.
    pub type_name: &'static str,
    pub detail: String,
}

impl CoercionError {
    pub(crate) fn non_finite(type_name: &'static str, value: f64) -> Self {
        CoercionError {
            type_name,
            detail: format!("{}", value),
        }
    }
}

/// The decoded root value does not match the shape the caller requested.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("expected {expected} but decoded {actual}")]
pub struct TypeMismatchError {
    pub expected: ValueKind,
    pub actual: ValueKind,
}
