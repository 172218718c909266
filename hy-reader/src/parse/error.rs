//! When reading Hy source goes wrong.

use std::error;
use std::fmt::{self, Debug, Display};
use std::io;
use std::result;

use thiserror::Error as ThisError;

use crate::{Position, TokenKind};

/// This type represents the possible errors when lexing or reading Hy source.
pub struct Error {
    /// Boxed to keep `Result<T, Error>` small.
    err: Box<ErrorImpl>,
}

/// Alias for a `Result` with the error type `hy_reader::Error`.
pub type Result<T> = result::Result<T, Error>;

impl Error {
    /// Location of the error in the input.
    ///
    /// Errors caused by running out of input carry no location.
    pub fn location(&self) -> Option<Position> {
        self.err.location
    }

    /// The error message, without location information.
    pub fn message(&self) -> String {
        self.err.code.to_string()
    }

    /// Categorizes the cause of this error.
    ///
    /// - `Category::Syntax` - input that is not syntactically valid Hy
    /// - `Category::Eof` - input that ends before the forms it starts are
    ///   complete
    pub fn classify(&self) -> Category {
        match self.err.code {
            ErrorCode::PrematureEndOfInput | ErrorCode::EofWhileParsingString => Category::Eof,
            ErrorCode::UnexpectedToken(_)
            | ErrorCode::MalformedDottedList
            | ErrorCode::TooManyStars
            | ErrorCode::AttributeOnLiteral
            | ErrorCode::InvalidEscape
            | ErrorCode::InvalidUnicodeCodePoint
            | ErrorCode::NonAsciiBytes
            | ErrorCode::MalformedString
            | ErrorCode::UnrecognizedToken
            | ErrorCode::RecursionLimitExceeded => Category::Syntax,
        }
    }

    /// Returns true if this error was caused by input that is not
    /// syntactically valid.
    pub fn is_syntax(&self) -> bool {
        self.classify() == Category::Syntax
    }

    /// Returns true if this error was caused by prematurely reaching the end of
    /// the input.
    ///
    /// An interactive caller may want to read another line and retry.
    pub fn is_eof(&self) -> bool {
        self.classify() == Category::Eof
    }
}

/// Categorizes the cause of a `hy_reader::Error`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Category {
    /// The input is not syntactically valid.
    Syntax,

    /// The input ended while a form was still open.
    Eof,
}

impl From<Error> for io::Error {
    /// Convert a `hy_reader::Error` into an `io::Error`.
    ///
    /// Syntax errors are turned into `InvalidData` IO errors. EOF errors are
    /// turned into `UnexpectedEof` IO errors.
    fn from(err: Error) -> Self {
        match err.classify() {
            Category::Syntax => io::Error::new(io::ErrorKind::InvalidData, err),
            Category::Eof => io::Error::new(io::ErrorKind::UnexpectedEof, err),
        }
    }
}

impl Error {
    pub(crate) fn syntax(code: ErrorCode, position: Position) -> Self {
        Error {
            err: Box::new(ErrorImpl {
                code,
                location: Some(position),
            }),
        }
    }

    pub(crate) fn eof(code: ErrorCode) -> Self {
        Error {
            err: Box::new(ErrorImpl {
                code,
                location: None,
            }),
        }
    }

    pub(crate) fn unexpected(kind: TokenKind, position: Position) -> Self {
        Error::syntax(ErrorCode::UnexpectedToken(kind), position)
    }
}

struct ErrorImpl {
    code: ErrorCode,
    location: Option<Position>,
}

#[derive(Debug, ThisError)]
pub(crate) enum ErrorCode {
    #[error("Ran into a {0} where it wasn't expected.")]
    UnexpectedToken(TokenKind),

    #[error("Premature end of input")]
    PrematureEndOfInput,

    #[error("Premature end of input while reading a string")]
    EofWhileParsingString,

    #[error("Malformed dotted list")]
    MalformedDottedList,

    #[error(
        "Too many stars in `#*` construct (if you want to unpack a symbol \
         beginning with a star, separate it with whitespace)"
    )]
    TooManyStars,

    #[error(
        "Cannot access attribute on anything other than a name (in order to \
         get attributes of expressions, use `(. <expression> <attr>)` or \
         `(.<attr> <expression>)`)"
    )]
    AttributeOnLiteral,

    #[error("invalid escape")]
    InvalidEscape,

    #[error("invalid unicode code point")]
    InvalidUnicodeCodePoint,

    #[error("bytes can only contain ASCII literal characters")]
    NonAsciiBytes,

    #[error("malformed string literal")]
    MalformedString,

    #[error("Could not identify the next token.")]
    UnrecognizedToken,

    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
}

impl error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&*self.err, f)
    }
}

impl Display for ErrorImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = self.location {
            write!(
                f,
                "{} at line {} column {}",
                self.code,
                loc.line(),
                loc.column()
            )
        } else {
            Display::fmt(&self.code, f)
        }
    }
}

// Humans often end up seeing this representation because it is what unwrap()
// shows.
impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = self.err.location {
            write!(
                f,
                "Error({:?}, line: {}, column: {})",
                self.err.code.to_string(),
                loc.line(),
                loc.column(),
            )
        } else {
            write!(f, "Error({:?})", self.err.code.to_string())
        }
    }
}
