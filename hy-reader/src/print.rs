//! Converting forms back into Hy source text.
//!
//! The printed text reads back as an equal form: numbers, strings and bytes
//! are written in a syntax the reader accepts, and dotted lists are written
//! flat, as in `(a b . c)`. Symbols are printed in their mangled spelling by
//! default; see [`SymbolStyle`].
//!
//! One exception: earmuffs around literal text are stripped when reading, so
//! `*1*` reads as the symbol `1`, which prints as `1` and reads back as an
//! integer. Likewise `*1e5*` and `*:a*` come back as a float and a keyword.

use std::io;

use crate::mangle::unmangle;
use crate::{Datum, Value};

/// How symbols are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolStyle {
    /// Print the name as stored, e.g. `is_valid`.
    Mangled,
    /// Unmangle each dot-separated segment, e.g. `valid?`.
    Unmangled,
}

/// Options for printing forms.
#[derive(Debug, Clone)]
pub struct Options {
    symbol_style: SymbolStyle,
}

impl Options {
    /// Construct the default options.
    pub fn new() -> Self {
        Options {
            symbol_style: SymbolStyle::Mangled,
        }
    }

    /// Set the style used for printing symbols.
    pub fn with_symbol_style(mut self, style: SymbolStyle) -> Self {
        self.symbol_style = style;
        self
    }

    /// The style used for printing symbols.
    pub fn symbol_style(&self) -> SymbolStyle {
        self.symbol_style
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

/// A printer for Hy forms.
#[derive(Debug)]
pub struct Printer<W> {
    writer: W,
    options: Options,
}

impl<W> Printer<W>
where
    W: io::Write,
{
    /// Creates a printer with the default options.
    pub fn new(writer: W) -> Self {
        Printer::with_options(writer, Options::default())
    }

    /// Creates a printer with the given options.
    pub fn with_options(writer: W, options: Options) -> Self {
        Printer { writer, options }
    }

    /// Unwrap the `Writer` from the `Printer`.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Output the representation of `value` to the underlying writer.
    pub fn print(&mut self, value: &Value) -> io::Result<()> {
        match value {
            Value::Symbol(name) => self.write_symbol(name),
            Value::Keyword(name) => write!(self.writer, ":{}", name),
            Value::Integer(n) => write!(self.writer, "{}", n),
            Value::Float(f) => write_float(&mut self.writer, *f),
            Value::Complex(c) => {
                if c.re == 0.0 && c.re.is_sign_positive() {
                    write_float(&mut self.writer, c.im)?;
                } else {
                    write_float(&mut self.writer, c.re)?;
                    if c.im.is_sign_negative() && !c.im.is_nan() {
                        self.writer.write_all(b"-")?;
                        write_float(&mut self.writer, -c.im)?;
                    } else {
                        self.writer.write_all(b"+")?;
                        write_float(&mut self.writer, c.im)?;
                    }
                }
                self.writer.write_all(b"j")
            }
            Value::String {
                text,
                brackets: Some(delimiter),
            } if reads_back_bracketed(text, delimiter) => {
                let newline = if text.starts_with('\n') { "\n" } else { "" };
                write!(
                    self.writer,
                    "#[{}[{}{}]{}]",
                    delimiter, newline, text, delimiter
                )
            }
            Value::String { text, .. } => write_escaped_str(&mut self.writer, text),
            Value::Bytes(bytes) => write_escaped_bytes(&mut self.writer, bytes),
            Value::Expression(elements) => self.write_sequence("(", elements, ")"),
            Value::List(elements) => self.write_sequence("[", elements, "]"),
            Value::Dict(elements) => self.write_sequence("{", elements, "}"),
            Value::Set(elements) => self.write_sequence("#{", elements, "}"),
            Value::Cons(cell) => {
                let (items, rest) = cell.to_ref_vec();
                self.writer.write_all(b"(")?;
                for item in items {
                    self.print(item)?;
                    self.writer.write_all(b" ")?;
                }
                self.writer.write_all(b". ")?;
                self.print(rest)?;
                self.writer.write_all(b")")
            }
        }
    }

    fn write_symbol(&mut self, name: &str) -> io::Result<()> {
        match self.options.symbol_style {
            SymbolStyle::Mangled => self.writer.write_all(name.as_bytes()),
            SymbolStyle::Unmangled => {
                let segments: Vec<_> = name.split('.').map(unmangle).collect();
                self.writer.write_all(segments.join(".").as_bytes())
            }
        }
    }

    fn write_sequence(&mut self, open: &str, elements: &[Datum], close: &str) -> io::Result<()> {
        self.writer.write_all(open.as_bytes())?;
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                self.writer.write_all(b" ")?;
            }
            self.print(element)?;
        }
        self.writer.write_all(close.as_bytes())
    }
}

impl<W> io::Write for Printer<W>
where
    W: io::Write,
{
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

fn write_float<W: io::Write + ?Sized>(writer: &mut W, f: f64) -> io::Result<()> {
    if f.is_nan() {
        writer.write_all(b"NaN")
    } else if f.is_infinite() {
        let text = if f > 0.0 { "Inf" } else { "-Inf" };
        writer.write_all(text.as_bytes())
    } else {
        let mut buffer = ryu::Buffer::new();
        writer.write_all(buffer.format_finite(f).as_bytes())
    }
}

/// Checks that the first closing delimiter in the printed text is the final
/// one.
fn reads_back_bracketed(text: &str, delimiter: &str) -> bool {
    let closing = format!("]{}]", delimiter);
    !delimiter.contains(|c: char| c == '[' || c == ']')
        && format!("{}{}", text, closing).find(&closing) == Some(text.len())
}

fn write_escaped_str<W: io::Write + ?Sized>(writer: &mut W, value: &str) -> io::Result<()> {
    writer.write_all(b"\"")?;
    let mut start = 0;
    for (i, c) in value.char_indices() {
        let escape = match c {
            '"' => "\\\"",
            '\\' => "\\\\",
            '\n' => "\\n",
            '\t' => "\\t",
            '\r' => "\\r",
            c if c.is_control() => "",
            _ => continue,
        };
        writer.write_all(value[start..i].as_bytes())?;
        if escape.is_empty() {
            write!(writer, "\\x{:02x}", c as u32)?;
        } else {
            writer.write_all(escape.as_bytes())?;
        }
        start = i + c.len_utf8();
    }
    writer.write_all(value[start..].as_bytes())?;
    writer.write_all(b"\"")
}

fn write_escaped_bytes<W: io::Write + ?Sized>(writer: &mut W, bytes: &[u8]) -> io::Result<()> {
    writer.write_all(b"b\"")?;
    for &byte in bytes {
        match byte {
            b'"' => writer.write_all(b"\\\"")?,
            b'\\' => writer.write_all(b"\\\\")?,
            b'\n' => writer.write_all(b"\\n")?,
            b'\t' => writer.write_all(b"\\t")?,
            b'\r' => writer.write_all(b"\\r")?,
            0x20..=0x7e => writer.write_all(&[byte])?,
            _ => write!(writer, "\\x{:02x}", byte)?,
        }
    }
    writer.write_all(b"\"")
}

/// Print `value` into the IO stream, using the default printer options.
#[inline]
pub fn to_writer<W: io::Write>(writer: W, value: &Value) -> io::Result<()> {
    Printer::new(writer).print(value)
}

/// Print `value` into the IO stream.
#[inline]
pub fn to_writer_custom<W: io::Write>(
    writer: W,
    value: &Value,
    options: Options,
) -> io::Result<()> {
    Printer::with_options(writer, options).print(value)
}

/// Print `value` into a byte vector, using the default printer options.
#[inline]
pub fn to_vec(value: &Value) -> io::Result<Vec<u8>> {
    to_vec_custom(value, Options::default())
}

/// Print `value` into a byte vector.
#[inline]
pub fn to_vec_custom(value: &Value, options: Options) -> io::Result<Vec<u8>> {
    let mut writer = Vec::with_capacity(128);
    to_writer_custom(&mut writer, value, options)?;
    Ok(writer)
}

/// Print `value` into a string, using the default printer options.
///
/// ```
/// let forms = hy_reader::from_str("(a b . c)").unwrap();
/// assert_eq!(hy_reader::to_string(forms[0].value()).unwrap(), "(a b . c)");
/// ```
#[inline]
pub fn to_string(value: &Value) -> io::Result<String> {
    to_string_custom(value, Options::default())
}

/// Print `value` into a string.
#[inline]
pub fn to_string_custom(value: &Value, options: Options) -> io::Result<String> {
    let vec = to_vec_custom(value, options)?;
    String::from_utf8(vec).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests;
