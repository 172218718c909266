//! Numeric literal syntax.
//!
//! Integers are unsigned in the `0x`, `0o` and `0b` bases and optionally
//! signed in decimal. Floats follow the usual decimal notation and also accept
//! `Inf`, `Infinity` and `NaN`, which must be capitalized that way. Complex
//! literals end in `j` or `J`, optionally preceded by a real part.
//!
//! Digit separators (`_` and `,`) may appear anywhere after the first
//! character and are ignored.

use std::borrow::Cow;

use num_bigint::BigInt;
use num_complex::Complex64;

/// Parses an integer literal.
///
/// ```
/// # use hy_reader::number::parse_integer;
/// # use num_bigint::BigInt;
/// assert_eq!(parse_integer("1_000"), Some(BigInt::from(1000)));
/// assert_eq!(parse_integer("0xff"), Some(BigInt::from(255)));
/// assert_eq!(parse_integer("-0xff"), None);
/// ```
pub fn parse_integer(text: &str) -> Option<BigInt> {
    let text = strip_digit_separators(text);
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            return parse_digits(digits, radix);
        }
    }
    let (negative, digits) = split_sign(&text);
    let magnitude = parse_digits(digits, 10)?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Parses a float literal.
pub fn parse_float(text: &str) -> Option<f64> {
    float_literal(&strip_digit_separators(text))
}

/// Parses a complex literal.
///
/// A lone `j` is accepted here and denotes `1j`; the reader treats it as a
/// symbol before getting this far.
///
/// ```
/// # use hy_reader::number::parse_complex;
/// # use num_complex::Complex64;
/// assert_eq!(parse_complex("1+2j"), Some(Complex64::new(1.0, 2.0)));
/// assert_eq!(parse_complex("-3.5J"), Some(Complex64::new(0.0, -3.5)));
/// ```
pub fn parse_complex(text: &str) -> Option<Complex64> {
    let text = strip_digit_separators(text);
    let body = text.strip_suffix(|c: char| c == 'j' || c == 'J')?;
    let (real, imag) = body.split_at(imaginary_start(body));
    let re = if real.is_empty() {
        0.0
    } else {
        float_literal(real)?
    };
    let im = match imag {
        "" | "+" => 1.0,
        "-" => -1.0,
        _ => float_literal(imag)?,
    };
    Some(Complex64::new(re, im))
}

/// Removes digit separators everywhere but at the first character.
fn strip_digit_separators(text: &str) -> Cow<'_, str> {
    let is_separator = |c: char| c == '_' || c == ',';
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if chars.as_str().contains(is_separator) => {
            let mut stripped = String::with_capacity(text.len());
            stripped.push(first);
            stripped.extend(chars.filter(|&c| !is_separator(c)));
            Cow::Owned(stripped)
        }
        _ => Cow::Borrowed(text),
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else {
        (false, text.strip_prefix('+').unwrap_or(text))
    }
}

fn parse_digits(digits: &str, radix: u32) -> Option<BigInt> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    BigInt::parse_bytes(digits.as_bytes(), radix)
}

fn float_literal(text: &str) -> Option<f64> {
    let (negative, body) = split_sign(text);
    let magnitude = match body {
        "Inf" | "Infinity" => f64::INFINITY,
        "NaN" => f64::NAN,
        _ if is_decimal(body) => body.parse().ok()?,
        _ => return None,
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// Checks for `digits [. [digits]] [exponent]` or `. digits [exponent]`.
fn is_decimal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    let mut mantissa_digits = skip_digits(bytes, &mut i);
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        mantissa_digits += skip_digits(bytes, &mut i);
    }
    if mantissa_digits == 0 {
        return false;
    }
    if let Some(b'e' | b'E') = bytes.get(i) {
        i += 1;
        if let Some(b'+' | b'-') = bytes.get(i) {
            i += 1;
        }
        if skip_digits(bytes, &mut i) == 0 {
            return false;
        }
    }
    i == bytes.len()
}

fn skip_digits(bytes: &[u8], i: &mut usize) -> usize {
    let start = *i;
    while bytes.get(*i).map_or(false, u8::is_ascii_digit) {
        *i += 1;
    }
    *i - start
}

/// Finds where the imaginary part of a complex literal (without the trailing
/// `j`) starts: at the last sign that is not part of an exponent.
fn imaginary_start(body: &str) -> usize {
    let bytes = body.as_bytes();
    (1..bytes.len())
        .rev()
        .find(|&i| matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E'))
        .unwrap_or(0)
}
