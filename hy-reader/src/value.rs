//! The Hy syntax tree.
use std::fmt;

use num_bigint::BigInt;
use num_complex::Complex64;

use crate::{print, Cons, Datum};

/// A form as produced by the reader.
///
/// Compound variants own their elements as [`Datum`]s, so that each element
/// keeps its source span. There is no dedicated fraction variant: a literal
/// like `1/2` is read as the expression `(fraction 1 2)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A symbol, holding its mangled name.
    Symbol(Box<str>),
    /// A keyword; the name excludes the leading colon.
    Keyword(Box<str>),
    /// An integer of arbitrary size.
    Integer(BigInt),
    /// A double-precision floating point number.
    Float(f64),
    /// A complex number.
    Complex(Complex64),
    /// A Unicode string.
    String {
        /// The decoded contents.
        text: Box<str>,
        /// The delimiter of a bracket string literal; `None` for strings
        /// written with double quotes.
        brackets: Option<Box<str>>,
    },
    /// A byte string.
    Bytes(Box<[u8]>),
    /// A parenthesized form, `(...)`.
    Expression(Vec<Datum>),
    /// A bracketed form, `[...]`.
    List(Vec<Datum>),
    /// A braced form, `{...}`, holding alternating keys and values.
    Dict(Vec<Datum>),
    /// A set, `#{...}`.
    Set(Vec<Datum>),
    /// A dotted pair.
    Cons(Cons),
}

impl Value {
    /// Constructs a symbol from an already mangled name.
    pub fn symbol(name: impl Into<Box<str>>) -> Self {
        Value::Symbol(name.into())
    }

    /// Constructs a keyword.
    ///
    /// The leading colon is not part of the name:
    ///
    /// ```
    /// # use hy_reader::Value;
    /// assert_eq!(Value::keyword("foo").to_string(), ":foo");
    /// ```
    pub fn keyword(name: impl Into<Box<str>>) -> Self {
        Value::Keyword(name.into())
    }

    /// Constructs a string, as written with double quotes.
    pub fn string(text: impl Into<Box<str>>) -> Self {
        Value::String {
            text: text.into(),
            brackets: None,
        }
    }

    /// Constructs a string written as a bracket string with the given
    /// delimiter.
    pub fn bracket_string(text: impl Into<Box<str>>, delimiter: impl Into<Box<str>>) -> Self {
        Value::String {
            text: text.into(),
            brackets: Some(delimiter.into()),
        }
    }

    /// Constructs a byte string.
    pub fn bytes(bytes: impl Into<Box<[u8]>>) -> Self {
        Value::Bytes(bytes.into())
    }

    /// Returns true if the value is a symbol.
    pub fn is_symbol(&self) -> bool {
        self.as_symbol().is_some()
    }

    /// If the value is a symbol, returns its (mangled) name.
    ///
    /// ```
    /// let forms = hy_reader::from_str("valid?").unwrap();
    /// assert_eq!(forms[0].as_symbol(), Some("is_valid"));
    /// ```
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true if the value is a symbol with the given name.
    pub fn is_symbol_named(&self, name: &str) -> bool {
        self.as_symbol() == Some(name)
    }

    /// If the value is a symbol, returns an iterator over the dot-separated
    /// segments of its name.
    ///
    /// ```
    /// let forms = hy_reader::from_str("os.path.join").unwrap();
    /// let segments: Vec<_> = forms[0].symbol_segments().unwrap().collect();
    /// assert_eq!(segments, ["os", "path", "join"]);
    /// ```
    pub fn symbol_segments(&self) -> Option<std::str::Split<'_, char>> {
        self.as_symbol().map(|name| name.split('.'))
    }

    /// Returns true for the bare `.` symbol.
    pub(crate) fn is_dot(&self) -> bool {
        self.is_symbol_named(".")
    }

    /// Returns true if the value is a keyword.
    pub fn is_keyword(&self) -> bool {
        self.as_keyword().is_some()
    }

    /// If the value is a keyword, returns its name, without the leading colon.
    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Value::Keyword(name) => Some(name),
            _ => None,
        }
    }

    /// If the value is an integer, returns a reference to it.
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }

    /// If the value is a float, returns it.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a complex number, returns it.
    pub fn as_complex(&self) -> Option<Complex64> {
        match self {
            Value::Complex(c) => Some(*c),
            _ => None,
        }
    }

    /// Returns true if the value is a string, regardless of how it was
    /// delimited.
    pub fn is_string(&self) -> bool {
        self.as_str().is_some()
    }

    /// If the value is a string, returns its contents.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String { text, .. } => Some(text),
            _ => None,
        }
    }

    /// If the value is a bracket string, returns its delimiter.
    ///
    /// ```
    /// let forms = hy_reader::from_str("#[x[foo]x] \"bar\"").unwrap();
    /// assert_eq!(forms[0].brackets(), Some("x"));
    /// assert_eq!(forms[1].brackets(), None);
    /// ```
    pub fn brackets(&self) -> Option<&str> {
        match self {
            Value::String {
                brackets: Some(delimiter),
                ..
            } => Some(delimiter),
            _ => None,
        }
    }

    /// If the value is a byte string, returns its contents.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the elements of an expression, list, dict or set. Returns
    /// `None` otherwise.
    pub fn as_slice(&self) -> Option<&[Datum]> {
        match self {
            Value::Expression(elements)
            | Value::List(elements)
            | Value::Dict(elements)
            | Value::Set(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns true if the value is a parenthesized expression.
    pub fn is_expression(&self) -> bool {
        matches!(self, Value::Expression(_))
    }

    /// If the value is a cons cell, returns a reference to it.
    pub fn as_cons(&self) -> Option<&Cons> {
        match self {
            Value::Cons(cell) => Some(cell),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = print::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::Integer(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Complex64> for Value {
    fn from(c: Complex64) -> Self {
        Value::Complex(c)
    }
}

impl From<Cons> for Value {
    fn from(cell: Cons) -> Self {
        Value::Cons(cell)
    }
}
