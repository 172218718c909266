//! Tokens consumed by the reader.
//!
//! The reader does not look at source text itself; it is driven by a sequence
//! of [`Token`]s, each tagged with a [`TokenKind`], carrying its raw text and
//! the position of its first character. The [`lex`](crate::lex) module
//! produces such a sequence from a string, but any other token source works
//! just as well.

use std::fmt;

use crate::datum::Position;

/// The terminal symbols of the reader grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A symbol, number or keyword, e.g. `foo-bar`, `1/2` or `:key`.
    Identifier,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LCurly,
    /// `}`
    RCurly,
    /// `#{`, the opening of a set.
    HLCurly,
    /// A complete string literal, including prefix letters and quotes.
    String,
    /// A string literal cut off by the end of input.
    PartialString,
    /// A `#[delim[...]delim]` string.
    BracketString,
    /// `'`
    Quote,
    /// `` ` ``
    Quasiquote,
    /// `~`
    Unquote,
    /// `~@`
    UnquoteSplice,
    /// `#_`
    Discard,
    /// `#*`, `#**`, or any longer run of stars.
    HashStars,
    /// `#tag`, a tag macro dispatch.
    HashOther,
}

impl TokenKind {
    /// Name of the terminal, as used in error messages.
    pub fn name(self) -> &'static str {
        use TokenKind::*;
        match self {
            Identifier => "IDENTIFIER",
            LParen => "LPAREN",
            RParen => "RPAREN",
            LBracket => "LBRACKET",
            RBracket => "RBRACKET",
            LCurly => "LCURLY",
            RCurly => "RCURLY",
            HLCurly => "HLCURLY",
            String => "STRING",
            PartialString => "PARTIAL_STRING",
            BracketString => "BRACKETSTRING",
            Quote => "QUOTE",
            Quasiquote => "QUASIQUOTE",
            Unquote => "UNQUOTE",
            UnquoteSplice => "UNQUOTE_SPLICE",
            Discard => "DISCARD",
            HashStars => "HASHSTARS",
            HashOther => "HASHOTHER",
        }
    }

    /// Returns true for the tokens closing a collection.
    pub fn is_closing(self) -> bool {
        matches!(
            self,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RCurly
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token: its kind, its raw text and where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: Box<str>,
    position: Position,
}

impl Token {
    /// Constructs a token starting at `position`.
    ///
    /// ```
    /// # use hy_reader::{Position, Token, TokenKind};
    /// let token = Token::new(TokenKind::Identifier, "foo", Position::new(1, 4));
    /// assert_eq!(token.end(), Position::new(1, 7));
    /// ```
    pub fn new(kind: TokenKind, text: impl Into<Box<str>>, position: Position) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }

    /// The kind of this token.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The raw text of this token.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position of the first character of the token.
    pub fn position(&self) -> Position {
        self.position
    }

    /// End position, derived from the start position and the length of the
    /// text in characters.
    ///
    /// The text is assumed to be on a single line.
    pub fn end(&self) -> Position {
        Position::new(
            self.position.line(),
            self.position.column() + self.text.chars().count(),
        )
    }
}
