//! Forms including their source location.

use std::fmt;
use std::ops::Deref;

use crate::{Token, Value};

/// A one-based line and column in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    line: usize,
    column: usize,
}

impl Position {
    /// Constructs a position from a line and a column number.
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }

    /// One-based line number.
    ///
    /// Characters before the first newline character are in line 1.
    pub fn line(&self) -> usize {
        self.line
    }

    /// One-based column number, counted in characters.
    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The start and end for a span of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    start: Position,
    end: Position,
}

impl Span {
    /// Constructs a span from its start and end positions.
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Get the starting line/column in the source text for this span.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Get the ending line/column in the source text for this span.
    pub fn end(&self) -> Position {
        self.end
    }

    /// Span of a form read from a single token.
    pub(crate) fn token(token: &Token) -> Self {
        Span::new(token.position(), token.end())
    }

    /// Span of a form enclosed by an opening and a closing token.
    pub(crate) fn delimited(open: &Token, close: &Token) -> Self {
        Span::new(open.position(), close.position())
    }

    /// Span of a form introduced by a prefix marker and ending with the
    /// (already spanned) form it wraps.
    pub(crate) fn prefixed(marker: Span, inner: Span) -> Self {
        Span::new(marker.start, inner.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Combines a value with the span of text it was read from.
///
/// Compound values own the `Datum`s of their elements, so location
/// information is available for every form, recursively.
///
/// Two datums compare equal when their values are equal; spans are not taken
/// into account. Use [`Datum::span`] to compare locations.
///
/// ```
/// let forms = hy_reader::from_str("(print :end \"\")").unwrap();
/// let args = forms[0].as_slice().unwrap();
/// assert_eq!(args[1].as_keyword(), Some("end"));
/// assert_eq!(args[1].span().start().column(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct Datum {
    value: Value,
    span: Span,
}

impl Datum {
    /// Constructs a datum from a value and its span.
    pub fn new(value: Value, span: Span) -> Self {
        Datum { value, span }
    }

    /// Returns a reference to the contained value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the span of the complete form.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Discards the span, returning the value.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Builds the call form `(head args...)`, as produced by the quoting and
    /// dispatch reader macros.
    ///
    /// The head symbol gets the span of the marker it stands for; the whole
    /// form ends where its last argument ends.
    pub(crate) fn call(head: &str, marker: Span, args: Vec<Datum>) -> Self {
        let span = match args.last() {
            Some(last) => Span::prefixed(marker, last.span),
            None => marker,
        };
        let mut elements = Vec::with_capacity(args.len() + 1);
        elements.push(Datum::new(Value::symbol(head), marker));
        elements.extend(args);
        Datum::new(Value::Expression(elements), span)
    }
}

impl PartialEq for Datum {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Deref for Datum {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<Datum> for Value {
    fn from(datum: Datum) -> Self {
        datum.value
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}
