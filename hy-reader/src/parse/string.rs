//! Decoding of string literal tokens.
//!
//! A string token consists of optional prefix letters (any of `u`, `r` and
//! `b`), a double-quoted body and nothing else. `b` makes the literal a byte
//! string, `r` disables escape processing. Bracket strings are taken
//! verbatim.

use std::iter::Peekable;
use std::str::Chars;

use super::error::{Error, ErrorCode, Result};
use crate::{Token, Value};

/// Decodes a `STRING` token into a string or byte string value.
pub(crate) fn string(token: &Token) -> Result<Value> {
    let fail = |code: ErrorCode| Error::syntax(code, token.position());
    let text = token.text();
    let (prefix, quoted) = text
        .split_once('"')
        .filter(|(prefix, _)| prefix.chars().all(|c| "urb".contains(c)))
        .ok_or_else(|| fail(ErrorCode::MalformedString))?;
    let body = quoted
        .strip_suffix('"')
        .ok_or_else(|| fail(ErrorCode::MalformedString))?;
    let raw = prefix.contains('r');
    if prefix.contains('b') {
        if !body.is_ascii() {
            return Err(fail(ErrorCode::NonAsciiBytes));
        }
        let bytes = if raw {
            body.as_bytes().to_vec()
        } else {
            let mut bytes = Vec::with_capacity(body.len());
            unescape(body, &mut bytes).map_err(fail)?;
            bytes
        };
        Ok(Value::bytes(bytes))
    } else {
        let text = if raw {
            body.to_owned()
        } else {
            let mut text = String::with_capacity(body.len());
            unescape(body, &mut text).map_err(fail)?;
            text
        };
        Ok(Value::string(text))
    }
}

/// Decodes a `BRACKETSTRING` token, `#[delim[contents]delim]`.
///
/// The contents are taken verbatim, except that a single newline directly
/// after the opening bracket is dropped.
pub(crate) fn bracket_string(token: &Token) -> Result<Value> {
    let malformed = || Error::syntax(ErrorCode::MalformedString, token.position());
    let rest = token.text().strip_prefix("#[").ok_or_else(malformed)?;
    let (delimiter, rest) = rest.split_once('[').ok_or_else(malformed)?;
    if delimiter.contains(']') {
        return Err(malformed());
    }
    let closing = format!("]{}]", delimiter);
    let contents = rest.strip_suffix(closing.as_str()).ok_or_else(malformed)?;
    let contents = contents.strip_prefix('\n').unwrap_or(contents);
    Ok(Value::bracket_string(contents, delimiter))
}

/// Receives the decoded contents of a string literal.
trait Sink {
    /// Whether `\u`, `\U` and `\N` escapes are recognized.
    const UNICODE_ESCAPES: bool;

    fn push_char(&mut self, c: char);

    /// Pushes the result of a numeric escape.
    fn push_code(&mut self, code: u32) -> std::result::Result<(), ErrorCode>;
}

impl Sink for String {
    const UNICODE_ESCAPES: bool = true;

    fn push_char(&mut self, c: char) {
        self.push(c);
    }

    fn push_code(&mut self, code: u32) -> std::result::Result<(), ErrorCode> {
        let c = char::from_u32(code).ok_or(ErrorCode::InvalidUnicodeCodePoint)?;
        self.push(c);
        Ok(())
    }
}

impl Sink for Vec<u8> {
    const UNICODE_ESCAPES: bool = false;

    // Only reached with ASCII input.
    fn push_char(&mut self, c: char) {
        let mut buf = [0; 4];
        self.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }

    fn push_code(&mut self, code: u32) -> std::result::Result<(), ErrorCode> {
        let byte = u8::try_from(code).map_err(|_| ErrorCode::InvalidEscape)?;
        self.push(byte);
        Ok(())
    }
}

fn unescape<S: Sink>(body: &str, sink: &mut S) -> std::result::Result<(), ErrorCode> {
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            sink.push_char(c);
            continue;
        }
        let escape = match chars.next() {
            Some(escape) => escape,
            None => {
                sink.push_char('\\');
                break;
            }
        };
        match escape {
            // Line continuation.
            '\n' => {}
            '\\' => sink.push_char('\\'),
            '\'' => sink.push_char('\''),
            '"' => sink.push_char('"'),
            'a' => sink.push_char('\x07'),
            'b' => sink.push_char('\x08'),
            'f' => sink.push_char('\x0c'),
            'n' => sink.push_char('\n'),
            'r' => sink.push_char('\r'),
            't' => sink.push_char('\t'),
            'v' => sink.push_char('\x0b'),
            '0'..='7' => {
                let mut code = escape as u32 - '0' as u32;
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                sink.push_code(code)?;
            }
            'x' => sink.push_code(hex_escape(&mut chars, 2)?)?,
            'u' if S::UNICODE_ESCAPES => sink.push_code(hex_escape(&mut chars, 4)?)?,
            'U' if S::UNICODE_ESCAPES => sink.push_code(hex_escape(&mut chars, 8)?)?,
            // Named characters would require the Unicode name database.
            'N' if S::UNICODE_ESCAPES => return Err(ErrorCode::InvalidEscape),
            _ => {
                sink.push_char('\\');
                sink.push_char(escape);
            }
        }
    }
    Ok(())
}

/// Reads exactly `len` hex digits.
fn hex_escape(chars: &mut Peekable<Chars<'_>>, len: usize) -> std::result::Result<u32, ErrorCode> {
    let mut code = 0;
    for _ in 0..len {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or(ErrorCode::InvalidEscape)?;
        code = code * 16 + digit;
    }
    Ok(code)
}
