//! Token-driven reader and options.
//!
//! The reader consumes [`Token`]s and builds [`Datum`]s according to the
//! following grammar:
//!
//! ```text
//! main          := list_contents? $end
//! list_contents := term list_contents?
//!                | DISCARD term list_contents?
//! term          := identifier | string | paren | list | dict | set
//!                | QUOTE term | QUASIQUOTE term | UNQUOTE term
//!                | UNQUOTE_SPLICE term | HASHSTARS term | HASHOTHER term
//!                | DISCARD term term
//! paren         := LPAREN list_contents? RPAREN
//! list          := LBRACKET list_contents? RBRACKET
//! dict          := LCURLY list_contents? RCURLY
//! set           := HLCURLY list_contents? RCURLY
//! ```
//!
//! Reader macros expand into call forms: `'x` reads as `(quote x)`, `#*x` as
//! `(unpack_iterable x)`, `#**x` as `(unpack_mapping x)`, and `#tag x` as
//! `(dispatch_tag_macro "tag" x)`. A discarded term is dropped along with its
//! `#_` marker.

use log::{debug, trace};

use crate::classify::{classify, is_attribute_on_literal};
use crate::lex::Lexer;
use crate::{mangle, Cons, Datum, Span, Token, TokenKind, Value};

use error::ErrorCode;

#[doc(inline)]
pub use error::{Category, Error, Result};

/// Options influencing reader behavior.
#[derive(Debug, Clone)]
pub struct Options {
    max_depth: usize,
}

impl Options {
    /// Construct the default options.
    pub fn new() -> Self {
        Options { max_depth: 128 }
    }

    /// Set the maximum nesting depth of forms.
    ///
    /// A top-level atom has depth 1, the elements of a top-level collection
    /// have depth 2, and so on. Reader macros count as a level as well, so
    /// `'x` has depth 2. Exceeding the limit is a syntax error.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// The maximum nesting depth of forms.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a complete token sequence into a vector of top-level forms.
///
/// A `Reader` holds no state besides its options, so a single instance can be
/// shared between threads.
///
/// ```
/// # use hy_reader::{parse, Reader};
/// let reader = Reader::with_options(parse::Options::new().with_max_depth(16));
/// let forms = reader.read_str("(defn add [a b] (+ a b)) (add 1 2)").unwrap();
/// assert_eq!(forms.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Reader {
    options: Options,
}

impl Reader {
    /// Construct a reader with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a reader with the given options.
    pub fn with_options(options: Options) -> Self {
        Reader { options }
    }

    /// The options of this reader.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Reads all forms from a token sequence.
    ///
    /// An empty sequence yields an empty vector.
    pub fn read<I>(&self, tokens: I) -> Result<Vec<Datum>>
    where
        I: IntoIterator<Item = Token>,
    {
        self.read_all(Parser::with_options(
            tokens.into_iter().map(Ok),
            &self.options,
        ))
    }

    /// Lexes and reads all forms from a string.
    ///
    /// Tokens are produced on demand, so a syntax error is reported before a
    /// lexical error further on in the input.
    pub fn read_str(&self, s: &str) -> Result<Vec<Datum>> {
        self.read_all(Parser::with_options(Lexer::new(s), &self.options))
    }

    fn read_all<I>(&self, mut parser: Parser<I>) -> Result<Vec<Datum>>
    where
        I: Iterator<Item = Result<Token>>,
    {
        debug!(max_depth = self.options.max_depth; "read started");
        let mut forms = Vec::new();
        loop {
            match parser.parse() {
                Ok(Some(datum)) => forms.push(datum),
                Ok(None) => break,
                Err(e) => {
                    debug!(category:? = e.classify(), tokens = parser.consumed; "read failed: {}", e);
                    return Err(e);
                }
            }
        }
        debug!(forms = forms.len(), tokens = parser.consumed; "read complete");
        Ok(forms)
    }
}

/// Reader for a stream of tokens, producing one top-level form at a time.
///
/// The token source yields `Result`s, so that a lexer can report errors as it
/// goes; [`Lexer`] is such a source.
///
/// ```
/// # use hy_reader::{lex::Lexer, parse::Parser};
/// let mut parser = Parser::new(Lexer::new("foo #_ bar (baz)"));
/// assert_eq!(parser.parse().unwrap().unwrap().as_symbol(), Some("foo"));
/// assert!(parser.parse().unwrap().unwrap().is_expression());
/// assert!(parser.parse().unwrap().is_none());
/// ```
pub struct Parser<I> {
    tokens: I,
    peeked: Option<Token>,
    remaining_depth: usize,
    consumed: usize,
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token>>,
{
    /// Create a parser with the default options.
    pub fn new(tokens: I) -> Self {
        Parser::with_options(tokens, &Options::default())
    }

    /// Create a parser with the given options.
    pub fn with_options(tokens: I, options: &Options) -> Self {
        Parser {
            tokens,
            peeked: None,
            remaining_depth: options.max_depth,
            consumed: 0,
        }
    }

    /// Reads the next top-level form.
    ///
    /// Returns `Ok(None)` once the input is exhausted. Discarded forms are
    /// skipped, so trailing `#_` forms also lead to `Ok(None)`.
    pub fn parse(&mut self) -> Result<Option<Datum>> {
        match self.peek()? {
            None => return Ok(None),
            Some(token) if token.kind().is_closing() => return Err(unexpected(token)),
            Some(_) => {}
        }
        match self.parse_term()? {
            Some(datum) => Ok(Some(datum)),
            None => match self.peek()? {
                None => Ok(None),
                Some(token) => Err(unexpected(token)),
            },
        }
    }

    fn peek(&mut self) -> Result<Option<&Token>> {
        if self.peeked.is_none() {
            self.peeked = self.tokens.next().transpose()?;
        }
        Ok(self.peeked.as_ref())
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        let token = match self.peeked.take() {
            Some(token) => Some(token),
            None => self.tokens.next().transpose()?,
        };
        if let Some(token) = &token {
            self.consumed += 1;
            trace!(kind:% = token.kind(), position:% = token.position(); "{:?}", token.text());
        }
        Ok(token)
    }

    fn expect_token(&mut self) -> Result<Token> {
        self.next_token()?
            .ok_or_else(|| Error::eof(ErrorCode::PrematureEndOfInput))
    }

    fn peek_starts_term(&mut self) -> Result<bool> {
        Ok(matches!(self.peek()?, Some(token) if !token.kind().is_closing()))
    }

    /// Parses a term, which may turn out to be nothing more than discarded
    /// forms. In that case, `None` is returned, and the next token does not
    /// start a term.
    fn parse_term(&mut self) -> Result<Option<Datum>> {
        let token = self.expect_token()?;
        if self.remaining_depth == 0 {
            return Err(Error::syntax(
                ErrorCode::RecursionLimitExceeded,
                token.position(),
            ));
        }
        self.remaining_depth -= 1;
        let ret = self.parse_token(token);
        self.remaining_depth += 1;
        ret
    }

    fn parse_token(&mut self, token: Token) -> Result<Option<Datum>> {
        let datum = match token.kind() {
            TokenKind::Identifier => identifier(&token)?,
            TokenKind::LParen => {
                let (contents, span) = self.parse_sequence(&token, TokenKind::RParen)?;
                paren(contents, span)?
            }
            TokenKind::LBracket => self.collection(&token, TokenKind::RBracket, Value::List)?,
            TokenKind::LCurly => self.collection(&token, TokenKind::RCurly, Value::Dict)?,
            TokenKind::HLCurly => self.collection(&token, TokenKind::RCurly, Value::Set)?,
            TokenKind::String => Datum::new(string::string(&token)?, Span::token(&token)),
            TokenKind::BracketString => {
                Datum::new(string::bracket_string(&token)?, Span::token(&token))
            }
            TokenKind::PartialString => return Err(Error::eof(ErrorCode::EofWhileParsingString)),
            TokenKind::Quote => self.prefixed(&token, "quote")?,
            TokenKind::Quasiquote => self.prefixed(&token, "quasiquote")?,
            TokenKind::Unquote => self.prefixed(&token, "unquote")?,
            TokenKind::UnquoteSplice => self.prefixed(&token, "unquote_splice")?,
            TokenKind::HashStars => self.unpack(&token)?,
            TokenKind::HashOther => self.tag_dispatch(&token)?,
            TokenKind::Discard => return self.discard(),
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RCurly => {
                return Err(unexpected(&token))
            }
        };
        Ok(Some(datum))
    }

    /// Parses a term that must produce a form.
    fn expect_term(&mut self) -> Result<Datum> {
        match self.parse_term()? {
            Some(datum) => Ok(datum),
            None => match self.peek()? {
                Some(token) => Err(unexpected(token)),
                None => Err(Error::eof(ErrorCode::PrematureEndOfInput)),
            },
        }
    }

    /// Called after a `#_` marker has been consumed.
    fn discard(&mut self) -> Result<Option<Datum>> {
        loop {
            let discarded = self.expect_term()?;
            trace!(span:% = discarded.span(); "discarded {}", discarded);
            match self.peek()? {
                Some(token) if token.kind() == TokenKind::Discard => {
                    self.next_token()?;
                }
                Some(token) if !token.kind().is_closing() => return self.parse_term(),
                _ => return Ok(None),
            }
        }
    }

    fn parse_sequence(&mut self, open: &Token, close: TokenKind) -> Result<(Vec<Datum>, Span)> {
        let mut contents = Vec::new();
        while self.peek_starts_term()? {
            match self.parse_term()? {
                Some(datum) => contents.push(datum),
                None => break,
            }
        }
        match self.next_token()? {
            Some(token) if token.kind() == close => Ok((contents, Span::delimited(open, &token))),
            Some(token) => Err(unexpected(&token)),
            None => Err(Error::eof(ErrorCode::PrematureEndOfInput)),
        }
    }

    fn collection(
        &mut self,
        open: &Token,
        close: TokenKind,
        make: fn(Vec<Datum>) -> Value,
    ) -> Result<Datum> {
        let (contents, span) = self.parse_sequence(open, close)?;
        Ok(Datum::new(make(contents), span))
    }

    fn prefixed(&mut self, marker: &Token, head: &str) -> Result<Datum> {
        let operand = self.expect_term()?;
        Ok(Datum::call(head, Span::token(marker), vec![operand]))
    }

    fn unpack(&mut self, marker: &Token) -> Result<Datum> {
        let operand = self.expect_term()?;
        let head = match marker.text().chars().filter(|&c| c == '*').count() {
            1 => "unpack_iterable",
            2 => "unpack_mapping",
            _ => {
                return Err(Error::syntax(
                    ErrorCode::TooManyStars,
                    marker.position(),
                ))
            }
        };
        Ok(Datum::call(head, Span::token(marker), vec![operand]))
    }

    fn tag_dispatch(&mut self, marker: &Token) -> Result<Datum> {
        let operand = self.expect_term()?;
        let span = Span::token(marker);
        let text = marker.text();
        let tag = text.strip_prefix('#').unwrap_or(text);
        trace!(tag, span:% = span; "tag dispatch");
        Ok(Datum::call(
            "dispatch_tag_macro",
            span,
            vec![Datum::new(Value::string(tag), span), operand],
        ))
    }
}

fn unexpected(token: &Token) -> Error {
    Error::unexpected(token.kind(), token.position())
}

/// Reads an `IDENTIFIER` token as a number, keyword or symbol.
///
/// ```
/// # use hy_reader::{parse::identifier, Position, Token, TokenKind};
/// let token = Token::new(TokenKind::Identifier, "*out*", Position::new(1, 1));
/// assert_eq!(identifier(&token).unwrap().as_symbol(), Some("OUT"));
/// ```
pub fn identifier(token: &Token) -> Result<Datum> {
    let text = token.text();
    let span = Span::token(token);
    if let Some(literal) = classify(text) {
        return Ok(literal.into_datum(span));
    }
    if is_attribute_on_literal(text) {
        return Err(Error::syntax(
            ErrorCode::AttributeOnLiteral,
            token.position(),
        ));
    }
    Ok(Datum::new(Value::symbol(mangle(text)), span))
}

/// Builds the form for a parenthesized sequence: an expression, or a chain of
/// cons cells if the next to last element is a bare `.` symbol.
fn paren(mut contents: Vec<Datum>, span: Span) -> Result<Datum> {
    let len = contents.len();
    if len >= 3 && contents[len - 2].is_dot() {
        reject_spurious_dots(contents[..len - 2].iter().chain(&contents[len - 1..]))?;
        trace!(span:% = span, items = len - 2; "dotted list");
        let tail = contents.swap_remove(len - 1);
        contents.truncate(len - 2);
        let list = contents.into_iter().rev().fold(tail, |cdr, car| {
            Datum::new(Value::Cons(Cons::new(car, cdr)), span)
        });
        return Ok(list);
    }
    // The head may be a dot, as in `(. obj attr)`.
    reject_spurious_dots(contents.iter().skip(1))?;
    Ok(Datum::new(Value::Expression(contents), span))
}

fn reject_spurious_dots<'a>(items: impl IntoIterator<Item = &'a Datum>) -> Result<()> {
    match items.into_iter().find(|item| item.is_dot()) {
        Some(dot) => Err(Error::syntax(
            ErrorCode::MalformedDottedList,
            dot.span().start(),
        )),
        None => Ok(()),
    }
}

/// Reads all forms from a string, using the default options.
///
/// ```
/// let forms = hy_reader::from_str("(setv x 1) 'x").unwrap();
/// assert_eq!(forms[1].to_string(), "(quote x)");
/// ```
pub fn from_str(s: &str) -> Result<Vec<Datum>> {
    from_str_custom(s, Options::default())
}

/// Reads all forms from a string.
pub fn from_str_custom(s: &str, options: Options) -> Result<Vec<Datum>> {
    Reader::with_options(options).read_str(s)
}

/// Reads all forms from a token sequence, using the default options.
pub fn from_tokens<I>(tokens: I) -> Result<Vec<Datum>>
where
    I: IntoIterator<Item = Token>,
{
    Reader::new().read(tokens)
}

pub mod error;
mod string;
