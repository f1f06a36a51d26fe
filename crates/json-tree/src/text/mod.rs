//! Reference token source and sink over JSON text.
//!
//! The codec itself is defined against the [`TokenSource`] and [`TokenSink`]
//! traits; this module supplies the standard-JSON implementations of both so
//! the crate round-trips text end to end. No extensions: no comments, no
//! trailing commas, no unquoted keys.
//!
//! [`TokenSource`]: crate::token::TokenSource
//! [`TokenSink`]: crate::token::TokenSink

mod lexer;
mod writer;

pub use lexer::Lexer;
pub use writer::TextWriter;
