//! Token model consumed by the rule parser.

use std::fmt;

/// A 1-based position in the stylesheet source.
///
/// Locations order by line, then column, which is the final tie-break of
/// the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub column: u32,
}

impl SourceLocation {
    /// Create a location from a line and column.
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A bare identifier such as `Layer` or `line-width`.
    Identifier,
    /// A `#` followed by a name, e.g. `#roads` or `#336699`.
    HashLiteral,
    /// A quoted string; the text keeps its quotes.
    String,
    /// A numeric literal.
    Number,
    /// A `url(...)` literal.
    Uri,
    /// A single punctuation character.
    Char,
    /// A run of whitespace.
    Whitespace,
    /// A comment.
    Comment,
    /// Anything the stylesheet grammar has no use for.
    Other,
}

impl TokenKind {
    /// Whitespace and comments are transparent to the parser.
    pub fn is_transparent(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::HashLiteral => "hash",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Uri => "URI",
            TokenKind::Char => "character",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comment => "comment",
            TokenKind::Other => "token",
        };
        f.write_str(name)
    }
}

/// A single lexical token with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lexical category.
    pub kind: TokenKind,
    /// Literal source text.
    pub text: String,
    /// Where the token starts.
    pub location: SourceLocation,
}

impl Token {
    /// Create a token.
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            location: SourceLocation::new(line, column),
        }
    }

    /// Create a token at an existing location.
    pub fn at(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    /// Line of the token start (1-indexed).
    pub fn line(&self) -> u32 {
        self.location.line
    }

    /// Column of the token start (1-indexed).
    pub fn column(&self) -> u32 {
        self.location.column
    }

    /// True for a [`TokenKind::Char`] token holding exactly `c`.
    pub fn is_char(&self, c: char) -> bool {
        self.kind == TokenKind::Char && self.text.len() == c.len_utf8() && self.text.starts_with(c)
    }

    /// True for an identifier token with exactly this text.
    pub fn is_ident(&self, text: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == text
    }

    /// See [`TokenKind::is_transparent`].
    pub fn is_transparent(&self) -> bool {
        self.kind.is_transparent()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\"", self.kind, self.text)
    }
}
