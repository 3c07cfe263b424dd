//! Stylesheet tokenizer built on the `cssparser` crate.
//!
//! `cssparser` hands back nested blocks as single tokens; the rule parser
//! wants a flat stream with explicit bracket characters, so blocks are
//! walked recursively and their delimiters re-emitted as [`TokenKind::Char`]
//! tokens. A closing bracket is only emitted when the source actually has
//! one.

use cssparser::{ParseError, Parser, ParserInput, SourcePosition, Token as CssToken};

use super::{SourceLocation, Token, TokenKind};

/// Split stylesheet source into a flat token stream.
///
/// Whitespace and comments are kept. Anything the stylesheet grammar has
/// no use for (dimensions, percentages, functions other than `url()`)
/// comes through as [`TokenKind::Other`].
///
/// # Example
///
/// ```
/// use mapstyle_cascade::parser::{TokenKind, tokenize};
///
/// let tokens = tokenize("Layer { line-width: 2; }");
/// assert_eq!(tokens[0].kind, TokenKind::Identifier);
/// assert!(tokens.last().unwrap().is_char('}'));
/// ```
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut input = ParserInput::new(source);
    let mut parser = Parser::new(&mut input);
    let mut tokens = Vec::new();

    collect_tokens(&mut parser, &mut tokens);
    tokens
}

fn location_of(parser: &Parser<'_, '_>) -> SourceLocation {
    let location = parser.current_source_location();
    SourceLocation::new(location.line + 1, location.column)
}

/// Drain `parser` into `out`, returning where the stream stopped.
fn collect_tokens<'i>(
    parser: &mut Parser<'i, '_>,
    out: &mut Vec<Token>,
) -> (SourcePosition, SourceLocation) {
    loop {
        let start = parser.position();
        let location = location_of(parser);
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => return (start, location),
        };

        let (kind, text) = match token {
            CssToken::Ident(name) => (TokenKind::Identifier, name.to_string()),
            CssToken::Hash(name) | CssToken::IDHash(name) => {
                (TokenKind::HashLiteral, format!("#{name}"))
            }
            CssToken::QuotedString(value) => (TokenKind::String, format!("\"{value}\"")),
            CssToken::Number { .. } => (TokenKind::Number, parser.slice_from(start).to_string()),
            CssToken::UnquotedUrl(_) => (TokenKind::Uri, parser.slice_from(start).to_string()),
            CssToken::Delim(c) => (TokenKind::Char, c.to_string()),
            CssToken::Colon => (TokenKind::Char, ":".to_string()),
            CssToken::Semicolon => (TokenKind::Char, ";".to_string()),
            CssToken::Comma => (TokenKind::Char, ",".to_string()),
            CssToken::CloseCurlyBracket => (TokenKind::Char, "}".to_string()),
            CssToken::CloseSquareBracket => (TokenKind::Char, "]".to_string()),
            CssToken::CloseParenthesis => (TokenKind::Char, ")".to_string()),
            CssToken::WhiteSpace(_) => (TokenKind::Whitespace, parser.slice_from(start).to_string()),
            CssToken::Comment(_) => (TokenKind::Comment, parser.slice_from(start).to_string()),
            CssToken::CurlyBracketBlock => {
                collect_block(parser, ('{', '}'), location, out);
                continue;
            }
            CssToken::SquareBracketBlock => {
                collect_block(parser, ('[', ']'), location, out);
                continue;
            }
            CssToken::ParenthesisBlock => {
                collect_block(parser, ('(', ')'), location, out);
                continue;
            }
            CssToken::Function(name) => {
                // The arguments are swallowed either way.
                let _ = parser.parse_nested_block(|nested| {
                    while nested.next_including_whitespace_and_comments().is_ok() {}
                    Ok::<(), ParseError<'i, ()>>(())
                });
                let kind = if name.eq_ignore_ascii_case("url") {
                    TokenKind::Uri
                } else {
                    TokenKind::Other
                };
                (kind, parser.slice_from(start).to_string())
            }
            _ => (TokenKind::Other, parser.slice_from(start).to_string()),
        };

        out.push(Token::at(kind, text, location));
    }
}

fn collect_block<'i>(
    parser: &mut Parser<'i, '_>,
    (open, close): (char, char),
    location: SourceLocation,
    out: &mut Vec<Token>,
) {
    out.push(Token::at(TokenKind::Char, open.to_string(), location));

    let mut inner_end = None;
    let _ = parser.parse_nested_block(|nested| {
        inner_end = Some(collect_tokens(nested, out));
        Ok::<(), ParseError<'i, ()>>(())
    });

    // An unclosed block leaves the parser where the contents stopped.
    if let Some((end, closer)) = inner_end
        && parser.position() != end
    {
        out.push(Token::at(TokenKind::Char, close.to_string(), closer));
    }
}
