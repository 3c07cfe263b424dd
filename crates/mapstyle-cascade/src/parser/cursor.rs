use super::{SourceLocation, Token, TokenKind};

/// Single-token lookahead over a token stream.
///
/// Remembers the location of the last token handed out so that
/// end-of-input errors can point at where the stream stopped.
pub(crate) struct TokenCursor<I> {
    tokens: I,
    pushed_back: Option<Token>,
    last: SourceLocation,
}

impl<I: Iterator<Item = Token>> TokenCursor<I> {
    pub(crate) fn new(tokens: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            tokens: tokens.into_iter(),
            pushed_back: None,
            last: SourceLocation::new(1, 1),
        }
    }

    /// Next token, whitespace and comments included.
    pub(crate) fn next_raw(&mut self) -> Option<Token> {
        let token = self.pushed_back.take().or_else(|| self.tokens.next())?;
        self.last = token.location;
        Some(token)
    }

    /// Next token that is not whitespace or a comment.
    pub(crate) fn next_significant(&mut self) -> Option<Token> {
        loop {
            let token = self.next_raw()?;
            if !token.is_transparent() {
                return Some(token);
            }
        }
    }

    /// Next token that is not a comment. Whitespace is returned.
    pub(crate) fn next_skipping_comments(&mut self) -> Option<Token> {
        loop {
            let token = self.next_raw()?;
            if token.kind != TokenKind::Comment {
                return Some(token);
            }
        }
    }

    /// Return a token so the next read yields it again.
    pub(crate) fn push_back(&mut self, token: Token) {
        debug_assert!(self.pushed_back.is_none(), "only one token of lookahead");
        self.pushed_back = Some(token);
    }

    /// Location of the most recently read token.
    pub(crate) fn last_location(&self) -> SourceLocation {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> Vec<Token> {
        vec![
            Token::new(TokenKind::Identifier, "a", 1, 1),
            Token::new(TokenKind::Whitespace, " ", 1, 2),
            Token::new(TokenKind::Comment, "/**/", 1, 3),
            Token::new(TokenKind::Identifier, "b", 1, 7),
        ]
    }

    #[test]
    fn skips_transparent_tokens() {
        let mut cursor = TokenCursor::new(tokens());
        assert_eq!(cursor.next_significant().unwrap().text, "a");
        assert_eq!(cursor.next_significant().unwrap().text, "b");
        assert!(cursor.next_significant().is_none());
        assert_eq!(cursor.last_location(), SourceLocation::new(1, 7));
    }

    #[test]
    fn push_back_replays() {
        let mut cursor = TokenCursor::new(tokens());
        let first = cursor.next_raw().unwrap();
        cursor.push_back(first);
        assert_eq!(cursor.next_raw().unwrap().text, "a");
        assert_eq!(cursor.next_raw().unwrap().kind, TokenKind::Whitespace);
    }

    #[test]
    fn comments_skipped_whitespace_kept() {
        let mut cursor = TokenCursor::new(vec![
            Token::new(TokenKind::Comment, "/**/", 1, 1),
            Token::new(TokenKind::Whitespace, " ", 1, 5),
            Token::new(TokenKind::Comment, "/**/", 1, 6),
            Token::new(TokenKind::Char, "=", 1, 10),
        ]);
        assert_eq!(cursor.next_skipping_comments().unwrap().kind, TokenKind::Whitespace);
        assert!(cursor.next_skipping_comments().unwrap().is_char('='));
        assert!(cursor.next_skipping_comments().is_none());
    }
}
