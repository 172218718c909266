//! Deciding what an identifier denotes.
//!
//! An identifier token is tried, in order, as an integer, a fraction, a float,
//! a complex number and a keyword. Anything else is a symbol.

use num_bigint::BigInt;
use num_complex::Complex64;

use crate::number::{parse_complex, parse_float, parse_integer};
use crate::{Datum, Span, Value};

/// A literal denoted by an identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// An integer, e.g. `0x10`.
    Integer(BigInt),
    /// A fraction written `numerator/denominator`.
    Fraction(BigInt, BigInt),
    /// A float, e.g. `1e3` or `NaN`.
    Float(f64),
    /// A complex number, e.g. `1+2j`.
    Complex(Complex64),
    /// A keyword; the name does not include the colon.
    Keyword(Box<str>),
}

/// Classifies identifier text. Returns `None` when the text denotes a symbol.
///
/// ```
/// # use hy_reader::classify::{classify, Literal};
/// assert_eq!(classify(":foo"), Some(Literal::Keyword("foo".into())));
/// assert_eq!(classify("foo"), None);
/// assert_eq!(classify("j"), None);
/// ```
pub fn classify(text: &str) -> Option<Literal> {
    if let Some(n) = parse_integer(text) {
        return Some(Literal::Integer(n));
    }
    if let Some((numerator, denominator)) = fraction(text) {
        return Some(Literal::Fraction(numerator, denominator));
    }
    if let Some(f) = parse_float(text) {
        return Some(Literal::Float(f));
    }
    if text != "j" {
        if let Some(c) = parse_complex(text) {
            return Some(Literal::Complex(c));
        }
    }
    match text.strip_prefix(':') {
        Some(name) if !text.contains('.') => Some(Literal::Keyword(name.into())),
        _ => None,
    }
}

fn fraction(text: &str) -> Option<(BigInt, BigInt)> {
    let (numerator, denominator) = text.split_once('/')?;
    if denominator.contains('/') {
        return None;
    }
    Some((parse_integer(numerator)?, parse_integer(denominator)?))
}

/// Returns true if the part of `text` before its first dot is a literal.
///
/// Attribute access is only available on names, so identifiers like `1.foo`
/// or `:a.b` are rejected by the reader. The check applies to identifiers
/// which [`classify`] did not already accept as a whole, such as `1.5`.
pub fn is_attribute_on_literal(text: &str) -> bool {
    match text.split_once('.') {
        Some((head, _)) => classify(head).is_some(),
        None => false,
    }
}

impl Literal {
    /// Converts the literal into a datum spanning `span`.
    ///
    /// A fraction turns into the expression `(fraction numerator
    /// denominator)`, all of whose elements share `span`.
    pub fn into_datum(self, span: Span) -> Datum {
        let value = match self {
            Literal::Integer(n) => Value::Integer(n),
            Literal::Float(f) => Value::Float(f),
            Literal::Complex(c) => Value::Complex(c),
            Literal::Keyword(name) => Value::Keyword(name),
            Literal::Fraction(numerator, denominator) => Value::Expression(vec![
                Datum::new(Value::symbol("fraction"), span),
                Datum::new(Value::Integer(numerator), span),
                Datum::new(Value::Integer(denominator), span),
            ]),
        };
        Datum::new(value, span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_come_first() {
        assert_eq!(classify("10"), Some(Literal::Integer(10.into())));
        assert_eq!(classify("-1_0"), Some(Literal::Integer((-10).into())));
    }

    #[test]
    fn fractions() {
        assert_eq!(
            classify("1/2"),
            Some(Literal::Fraction(1.into(), 2.into()))
        );
        assert_eq!(
            classify("-3/0x4"),
            Some(Literal::Fraction((-3).into(), 4.into()))
        );
        assert_eq!(classify("1/2/3"), None);
        assert_eq!(classify("1/a"), None);
        assert_eq!(classify("/"), None);
        assert_eq!(classify("1.0/2"), None);
    }

    #[test]
    fn floats_and_complex() {
        assert_eq!(classify("1.5"), Some(Literal::Float(1.5)));
        assert_eq!(classify("Inf"), Some(Literal::Float(f64::INFINITY)));
        assert_eq!(classify("inf"), None);
        assert_eq!(
            classify("3j"),
            Some(Literal::Complex(Complex64::new(0.0, 3.0)))
        );
        assert_eq!(
            classify("J"),
            Some(Literal::Complex(Complex64::new(0.0, 1.0)))
        );
        assert_eq!(classify("j"), None);
        assert_eq!(
            classify("-j"),
            Some(Literal::Complex(Complex64::new(0.0, -1.0)))
        );
    }

    #[test]
    fn keywords() {
        assert_eq!(classify(":a-b"), Some(Literal::Keyword("a-b".into())));
        assert_eq!(classify(":"), Some(Literal::Keyword("".into())));
        assert_eq!(classify(":a.b"), None);
        assert_eq!(classify("a:b"), None);
    }

    #[test]
    fn symbols() {
        for text in &["foo", "+", "-", "...", "1+", "0x", "1e", "a/b"] {
            assert_eq!(classify(text), None, "{}", text);
        }
    }

    #[test]
    fn attribute_access_on_literals() {
        assert!(is_attribute_on_literal("1.foo.bar"));
        assert!(is_attribute_on_literal(":kw.attr"));
        assert!(is_attribute_on_literal("1/2.x"));
        assert!(!is_attribute_on_literal("foo.bar"));
        assert!(!is_attribute_on_literal(".attr"));
        assert!(!is_attribute_on_literal("foo"));
    }
}
