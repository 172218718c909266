#![deny(missing_docs)]

//! This crate provides a reader for the Hy programming language, turning a
//! sequence of tokens into a syntax tree of forms.
//!
//! Each form is a [`Datum`]: a [`Value`] paired with the [`Span`] of source
//! text it was read from. Compound values hold their elements as `Datum`s as
//! well, so location information is available for every nested form.
//!
//! # Reading
//!
//! The easiest way to read Hy source is [`from_str`], which lexes the input
//! and returns all top-level forms:
//!
//! ```
//! use hy_reader::Value;
//!
//! let forms = hy_reader::from_str("(setv x 1/2) #_ ignored :done").unwrap();
//! assert_eq!(forms.len(), 2);
//! assert_eq!(forms[0].to_string(), "(setv x (fraction 1 2))");
//! assert_eq!(forms[1].value(), &Value::keyword("done"));
//! ```
//!
//! The reader itself only consumes [`Token`]s, so a token sequence produced by
//! some other lexer can be read via [`Reader::read`] or [`from_tokens`]. The
//! [`lex`] module contains the lexer used by [`from_str`].
//!
//! # Names
//!
//! Symbols are mangled as they are read, so that every name is a valid
//! identifier in the host language: `foo-bar` is read as `foo_bar`, `valid?`
//! as `is_valid`. See the [`mangle`](mod@mangle) module for the details.
//!
//! # Printing
//!
//! The [`print`] module writes forms back out as Hy source, which reads back
//! as equal forms. `Value` and `Datum` implement `Display` using the default
//! printer options.
//!
//! # Errors
//!
//! Reading fails with an [`Error`], which carries the location of the problem
//! where there is one. An error for which [`Error::is_eof`] holds indicates
//! that the input was cut short, which an interactive caller may handle by
//! asking for more input.
//!
//! ```
//! let err = hy_reader::from_str("(print \"hi\"").unwrap_err();
//! assert!(err.is_eof());
//!
//! let err = hy_reader::from_str("(a . b . c)").unwrap_err();
//! assert!(err.is_syntax());
//! assert_eq!(err.to_string(), "Malformed dotted list at line 1 column 4");
//! ```

mod cons;
mod value;

pub mod classify;
pub mod datum;
pub mod lex;
pub mod mangle;
pub mod number;
pub mod parse;
pub mod print;
pub mod token;

#[doc(inline)]
pub use self::parse::{from_str, from_str_custom, from_tokens, Error, Reader, Result};

#[doc(inline)]
pub use self::print::{
    to_string, to_string_custom, to_vec, to_vec_custom, to_writer, to_writer_custom, Printer,
};

#[doc(inline)]
pub use self::mangle::{mangle, unmangle};

#[doc(inline)]
pub use cons::{Cons, Iter, ListIter};

#[doc(inline)]
pub use datum::{Datum, Position, Span};

#[doc(inline)]
pub use token::{Token, TokenKind};

#[doc(inline)]
pub use value::Value;

#[cfg(test)]
mod tests;
