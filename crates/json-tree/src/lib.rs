//! Immutable JSON value tree with a bidirectional token-stream codec.
//!
//! A [`Value`] models one JSON document as a closed tagged union. The
//! decoder rebuilds a tree from a pull-based [`TokenSource`] using an
//! explicit heap-allocated context stack (nesting depth bounded by memory,
//! not the call stack); the encoder re-emits a tree as events on a
//! [`TokenSink`]. Numbers keep their exact decimal literal and objects keep
//! insertion order, so decode → encode is lossless.
//!
//! The [`text`] module provides the standard-JSON source and sink, wired up
//! by [`parse`] and [`to_string`]:
//!
//! ```
//! use json_tree::Value;
//!
//! let value = json_tree::parse(r#"{"pets":[{"name":"Rover"},{"name":"Kitty"}]}"#)?;
//! let names: Vec<&str> = value
//!     .get("pets")
//!     .iter()
//!     .filter_map(|pet| pet.get("name").as_str())
//!     .collect();
//! assert_eq!(names, ["Rover", "Kitty"]);
//! assert_eq!(
//!     json_tree::to_string(&value),
//!     r#"{"pets":[{"name":"Rover"},{"name":"Kitty"}]}"#
//! );
//! # Ok::<(), json_tree::Error>(())
//! ```
//!
//! Trees are immutable once built and may be shared freely across threads.

mod coerce;
mod decoder;
mod encoder;
mod error;
mod number;
pub mod text;
mod token;
mod value;

pub use decoder::{decode, decode_as};
pub use encoder::{encode, to_string};
pub use error::{
    CoercionError, Error, LexicalError, LexicalErrorKind, StructureError, StructureErrorKind,
    TypeMismatchError,
};
pub use number::JsonNumber;
pub use token::{Position, Token, TokenCursor, TokenEvent, TokenSink, TokenSource};
pub use value::{Value, ValueIter, ValueKind};

/// Decode one value from JSON text.
pub fn parse(input: &str) -> Result<Value, Error> {
    decoder::decode(text::Lexer::new(input))
}

/// Decode one value from JSON text, requiring the root to have the given
/// shape.
pub fn parse_as(input: &str, expected: ValueKind) -> Result<Value, Error> {
    decoder::decode_as(text::Lexer::new(input), expected)
}
