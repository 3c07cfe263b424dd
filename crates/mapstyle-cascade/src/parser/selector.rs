//! Selector grammar shared by both parser entry points.

use super::cursor::TokenCursor;
use super::{SourceLocation, Token, TokenKind};
use crate::config::ParserConfig;
use crate::selector::{AttributeTest, AttributeValue, Operator, Selector, SelectorElement, SelectorName};
use crate::types::strip_quotes;
use crate::{Error, Result, SelectorError};

/// Parse one selector, stopping after a `,` or `{`.
///
/// The terminator is returned so the caller can tell a selector group
/// from the start of a block; `None` means the tokens ran out. The
/// selector's zoom shorthand is converted before it is returned.
pub(crate) fn parse_selector<I: Iterator<Item = Token>>(
    cursor: &mut TokenCursor<I>,
    config: ParserConfig,
) -> Result<(Selector, Option<Token>)> {
    let mut elements: Vec<SelectorElement> = Vec::new();
    let mut start = None;

    let terminator = loop {
        let Some(token) = cursor.next_significant() else {
            break None;
        };
        if token.is_char(',') || token.is_char('{') {
            break Some(token);
        }
        start.get_or_insert(token.location);

        match token.kind {
            // An identifier always starts a new element.
            TokenKind::Identifier => {
                elements.push(SelectorElement::with_name(SelectorName::Tag(token.text)));
            }
            TokenKind::HashLiteral => current(&mut elements).add_name(SelectorName::parse(&token.text)),
            TokenKind::Char if token.is_char('*') => {
                current(&mut elements).add_name(SelectorName::Universal);
            }
            TokenKind::Char if token.is_char('.') => {
                let Some(name) = cursor.next_skipping_comments() else {
                    return Err(Error::unexpected_end("after \".\" in selector", cursor.last_location()));
                };
                if name.kind != TokenKind::Identifier {
                    return Err(Error::unexpected(&name, "after \".\" in selector"));
                }
                current(&mut elements).add_name(SelectorName::Class(name.text));
            }
            TokenKind::Char if token.is_char('[') => {
                let Some(element) = elements.last_mut() else {
                    return Err(Error::unexpected(&token, "before any selector name"));
                };
                element.add_test(parse_attribute(cursor)?);
            }
            _ => return Err(Error::unexpected(&token, "in selector")),
        }
    };

    let location = start
        .or_else(|| terminator.as_ref().map(|t| t.location))
        .unwrap_or_else(|| cursor.last_location());
    let selector = build_selector(elements, config, location)?;

    Ok((selector, terminator))
}

/// Turn the tokens collected for one selector into a [`Selector`].
///
/// `end` is where the selector was terminated, used when there are no
/// tokens to point at.
pub(crate) fn postprocess_selector(
    tokens: Vec<Token>,
    config: ParserConfig,
    end: SourceLocation,
) -> Result<Selector> {
    if tokens.iter().all(Token::is_transparent) {
        return Err(Error::selector("", SelectorError::Empty, end));
    }

    let mut cursor = TokenCursor::new(tokens);
    match parse_selector(&mut cursor, config)? {
        (selector, None) => Ok(selector),
        (_, Some(token)) => Err(Error::unexpected(&token, "in selector")),
    }
}

fn current(elements: &mut Vec<SelectorElement>) -> &mut SelectorElement {
    if elements.is_empty() {
        elements.push(SelectorElement::new());
    }
    let last = elements.len() - 1;
    &mut elements[last]
}

fn build_selector(
    elements: Vec<SelectorElement>,
    config: ParserConfig,
    location: SourceLocation,
) -> Result<Selector> {
    let text = elements
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");

    let mut selector = Selector::new(elements).map_err(|e| Error::selector(&text, e, location))?;
    selector
        .convert_zoom_tests(config.mercator)
        .map_err(|e| Error::selector(&text, e, location))?;

    Ok(selector)
}

/// Parse the inside of `[...]`, after the opening bracket.
///
/// Exactly one name, one operator and one number or string, then `]`.
pub(crate) fn parse_attribute<I: Iterator<Item = Token>>(
    cursor: &mut TokenCursor<I>,
) -> Result<AttributeTest> {
    let name = expect_significant(cursor)?;
    if name.kind != TokenKind::Identifier {
        return Err(Error::unexpected(&name, "where an attribute name was expected"));
    }

    let op_token = expect_significant(cursor)?;
    let op = match op_token.text.as_str() {
        _ if op_token.kind != TokenKind::Char => None,
        "=" => Some(Operator::Eq),
        "<" => Some(or_equal(cursor, Operator::Lt, Operator::Le)),
        ">" => Some(or_equal(cursor, Operator::Gt, Operator::Ge)),
        "!" => match cursor.next_skipping_comments() {
            Some(eq) if eq.is_char('=') => Some(Operator::Ne),
            Some(other) => return Err(Error::unexpected(&other, "after \"!\" in attribute test")),
            None => None,
        },
        _ => None,
    };
    let Some(op) = op else {
        return Err(Error::unexpected(&op_token, "where an attribute operator was expected"));
    };

    let scalar = expect_significant(cursor)?;
    let value = match scalar.kind {
        TokenKind::Number => scalar
            .text
            .parse::<f64>()
            .map(AttributeValue::Number)
            .map_err(|_| Error::unexpected(&scalar, "in attribute test"))?,
        TokenKind::String => AttributeValue::String(strip_quotes(&scalar.text).to_string()),
        _ => return Err(Error::unexpected(&scalar, "where a number or string was expected")),
    };

    let close = expect_significant(cursor)?;
    if !close.is_char(']') {
        return Err(Error::unexpected(&close, "where \"]\" was expected"));
    }

    Ok(AttributeTest::new(name.text, op, value))
}

/// `<` and `>` take an immediately following `=`; only comments may come between.
fn or_equal<I: Iterator<Item = Token>>(
    cursor: &mut TokenCursor<I>,
    strict: Operator,
    inclusive: Operator,
) -> Operator {
    match cursor.next_skipping_comments() {
        Some(token) if token.is_char('=') => inclusive,
        Some(token) => {
            cursor.push_back(token);
            strict
        }
        None => strict,
    }
}

fn expect_significant<I: Iterator<Item = Token>>(cursor: &mut TokenCursor<I>) -> Result<Token> {
    cursor
        .next_significant()
        .ok_or_else(|| Error::unexpected_end("inside attribute test", cursor.last_location()))
}
