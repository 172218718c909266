//! Turning Hy source text into tokens.
//!
//! At each position, whitespace and `;` comments are skipped, and the token
//! rules are tried in a fixed order, the first match winning:
//!
//! | Rule | Kind |
//! |---|---|
//! | `(` `)` `[` `]` `{` `}` | the corresponding bracket |
//! | `#{` | `HLCURLY` |
//! | `'`, unless followed by whitespace or a closer | `QUOTE` |
//! | `` ` ``, same condition | `QUASIQUOTE` |
//! | `~@`, same condition | `UNQUOTE_SPLICE` |
//! | `~`, same condition | `UNQUOTE` |
//! | `#_` | `DISCARD` |
//! | `#` and one or more `*` | `HASHSTARS` |
//! | `#[delim[...]delim]` | `BRACKETSTRING` |
//! | `#` and identifier characters | `HASHOTHER` |
//! | optional `u`/`r`/`b` prefix and a quoted string | `STRING` |
//! | string without closing quote | `PARTIAL_STRING` |
//! | identifier characters | `IDENTIFIER` |
//!
//! Identifier characters are all characters but whitespace, brackets,
//! quotes and `;`. A bracket string without its closing delimiter is also
//! lexed as `PARTIAL_STRING`.

use crate::parse::error::{Error, ErrorCode, Result};
use crate::{Position, Token, TokenKind};

/// Iterator over the tokens of a string.
///
/// After an error, the iterator is exhausted.
///
/// ```
/// # use hy_reader::{lex::Lexer, TokenKind};
/// let kinds: Vec<_> = Lexer::new("'(a)")
///     .map(|token| token.map(|token| token.kind()))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(
///     kinds,
///     [TokenKind::Quote, TokenKind::LParen, TokenKind::Identifier, TokenKind::RParen]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a lexer for `src`, starting at line 1, column 1.
    pub fn new(src: &'a str) -> Self {
        Lexer {
            src,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.offset..]
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn advance(&mut self, len: usize) {
        for c in self.src[self.offset..self.offset + len].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset += len;
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            let len = if trimmed.starts_with(';') {
                let comment = trimmed
                    .find(|c: char| c == '\n' || c == '\r')
                    .unwrap_or(trimmed.len());
                rest.len() - trimmed.len() + comment
            } else {
                rest.len() - trimmed.len()
            };
            if len == 0 {
                return;
            }
            self.advance(len);
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        self.skip_whitespace_and_comments();
        let rest = self.rest();
        if rest.is_empty() {
            return Ok(None);
        }
        let position = self.current_position();
        match scan(rest) {
            Some((kind, len)) => {
                let token = Token::new(kind, &rest[..len], position);
                self.advance(len);
                Ok(Some(token))
            }
            None => {
                self.offset = self.src.len();
                Err(Error::syntax(ErrorCode::UnrecognizedToken, position))
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Lexes all of `src`.
pub fn tokenize(src: &str) -> Result<Vec<Token>> {
    Lexer::new(src).collect()
}

/// Returns true for characters that may appear in identifiers.
pub fn is_identifier_char(c: char) -> bool {
    !c.is_whitespace() && !"()[]{}'\";".contains(c)
}

/// Matches the token at the start of `rest`, returning its kind and length in
/// bytes.
fn scan(rest: &str) -> Option<(TokenKind, usize)> {
    let mut chars = rest.chars();
    let first = chars.next()?;
    let after_first = chars.as_str();
    let single = match first {
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        '[' => Some(TokenKind::LBracket),
        ']' => Some(TokenKind::RBracket),
        '{' => Some(TokenKind::LCurly),
        '}' => Some(TokenKind::RCurly),
        _ => None,
    };
    if let Some(kind) = single {
        return Some((kind, 1));
    }
    if rest.starts_with("#{") {
        return Some((TokenKind::HLCurly, 2));
    }
    if first == '\'' && quotes_a_form(after_first) {
        return Some((TokenKind::Quote, 1));
    }
    if first == '`' && quotes_a_form(after_first) {
        return Some((TokenKind::Quasiquote, 1));
    }
    if let Some(after) = rest.strip_prefix("~@") {
        if quotes_a_form(after) {
            return Some((TokenKind::UnquoteSplice, 2));
        }
    }
    if first == '~' && quotes_a_form(after_first) {
        return Some((TokenKind::Unquote, 1));
    }
    if first == '#' {
        if after_first.starts_with('_') {
            return Some((TokenKind::Discard, 2));
        }
        let stars = after_first.len() - after_first.trim_start_matches('*').len();
        if stars > 0 {
            return Some((TokenKind::HashStars, 1 + stars));
        }
        if after_first.starts_with('[') {
            if let Some(token) = bracket_string(rest) {
                return Some(token);
            }
        }
        let tag = identifier_len(after_first);
        if tag > 0 {
            return Some((TokenKind::HashOther, 1 + tag));
        }
    }
    if let Some(token) = string(rest) {
        return Some(token);
    }
    match identifier_len(rest) {
        0 => None,
        len => Some((TokenKind::Identifier, len)),
    }
}

/// Quoting markers only apply when directly followed by a form.
fn quotes_a_form(after: &str) -> bool {
    match after.chars().next() {
        Some(c) => !c.is_whitespace() && !")]}".contains(c),
        None => true,
    }
}

fn identifier_len(s: &str) -> usize {
    s.find(|c: char| !is_identifier_char(c)).unwrap_or(s.len())
}

/// Matches `#[delim[...]delim]`. Input ending before the closing delimiter
/// yields a partial string.
fn bracket_string(rest: &str) -> Option<(TokenKind, usize)> {
    let after = &rest[2..];
    let end = after.find(|c: char| c == '[' || c == ']');
    match end {
        Some(i) if after[i..].starts_with('[') => {
            let delimiter = &after[..i];
            let contents_start = 2 + i + 1;
            let closing = format!("]{}]", delimiter);
            match rest[contents_start..].find(&closing) {
                Some(j) => Some((
                    TokenKind::BracketString,
                    contents_start + j + closing.len(),
                )),
                None => Some((TokenKind::PartialString, rest.len())),
            }
        }
        Some(_) => None,
        None => Some((TokenKind::PartialString, rest.len())),
    }
}

/// Matches a possibly prefixed string literal.
fn string(rest: &str) -> Option<(TokenKind, usize)> {
    const PREFIXES: [&str; 8] = ["", "u", "r", "ur", "ru", "b", "br", "rb"];
    let prefix = PREFIXES.iter().find(|prefix| {
        rest.strip_prefix(**prefix)
            .map_or(false, |after| after.starts_with('"'))
    })?;
    let body_start = prefix.len() + 1;
    let mut chars = rest[body_start..].char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((TokenKind::String, body_start + i + 1)),
            '\\' => {
                chars.next();
            }
            _ => {}
        }
    }
    Some((TokenKind::PartialString, rest.len()))
}
