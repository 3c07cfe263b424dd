//! Conversion of raw declaration tokens into typed values.

use crate::parser::{SourceLocation, Token, TokenKind};
use crate::properties::{Property, PropertyDescriptor};
use crate::{Error, Result};

use super::{Color, Number, PropertyValue, Value};

/// Validate the value tokens of a declaration against its property.
///
/// `tokens` must already be free of whitespace and comments. Failures
/// are reported at `location`, the position of the declaration.
pub fn postprocess_value(
    property: &Property,
    tokens: &[Token],
    important: bool,
    location: SourceLocation,
) -> Result<Value> {
    let fail = |message: &str| Error::invalid_value(property.name(), message, location);

    let data = match property.descriptor() {
        PropertyDescriptor::NumberList => parse_number_list(tokens).ok_or_else(|| {
            fail("Value should be a comma-delimited list of numbers")
        })?,
        PropertyDescriptor::Unsupported => {
            return Err(fail("No value is supported"));
        }
        descriptor => {
            let [token] = tokens else {
                return Err(fail("Single value only"));
            };
            parse_single(descriptor, token).map_err(|message| fail(message))?
        }
    };

    Ok(Value::new(data, important))
}

fn parse_single(
    descriptor: PropertyDescriptor,
    token: &Token,
) -> std::result::Result<PropertyValue, &'static str> {
    match descriptor {
        PropertyDescriptor::Integer => {
            if token.kind != TokenKind::Number {
                return Err("Number value only");
            }
            token
                .text
                .parse::<i64>()
                .map(PropertyValue::Integer)
                .map_err(|_| "Integer value only")
        }
        PropertyDescriptor::Float => {
            if token.kind != TokenKind::Number {
                return Err("Number value only");
            }
            match Number::parse(&token.text) {
                Some(number) => Ok(PropertyValue::Float(number.as_f64())),
                None => Err("Number value only"),
            }
        }
        PropertyDescriptor::String => {
            if token.kind != TokenKind::String {
                return Err("String value only");
            }
            Ok(PropertyValue::String(strip_quotes(&token.text).to_string()))
        }
        PropertyDescriptor::Color => {
            if token.kind != TokenKind::HashLiteral {
                return Err("Hash value only");
            }
            parse_color(token)
        }
        PropertyDescriptor::ColorOrTransparent => {
            if token.is_ident("transparent") {
                Ok(PropertyValue::Transparent)
            } else if token.kind == TokenKind::HashLiteral {
                parse_color(token)
            } else {
                Err("Hash or transparent value only")
            }
        }
        PropertyDescriptor::Boolean => match token.kind {
            TokenKind::Identifier if token.text == "true" => Ok(PropertyValue::Boolean(true)),
            TokenKind::Identifier if token.text == "false" => Ok(PropertyValue::Boolean(false)),
            _ => Err("true/false value only"),
        },
        PropertyDescriptor::Uri => {
            if token.kind != TokenKind::Uri {
                return Err("URI value only");
            }
            strip_url(&token.text)
                .map(|address| PropertyValue::Uri(address.to_string()))
                .ok_or("Malformed URI value")
        }
        PropertyDescriptor::Enum(allowed) => {
            if token.kind != TokenKind::Identifier {
                return Err("Identifier value only");
            }
            if !allowed.contains(&token.text.as_str()) {
                return Err("Unrecognized value");
            }
            Ok(PropertyValue::Keyword(token.text.clone()))
        }
        PropertyDescriptor::NumberList | PropertyDescriptor::Unsupported => {
            Err("Single value not accepted")
        }
    }
}

fn parse_color(token: &Token) -> std::result::Result<PropertyValue, &'static str> {
    Color::from_hex(&token.text)
        .map(PropertyValue::Color)
        .ok_or("Unrecognized color value")
}

pub(crate) fn strip_quotes(text: &str) -> &str {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(close)) if open == close && (open == '"' || open == '\'') => chars.as_str(),
        _ => text,
    }
}

/// Recover the address from `url("...")`, `url('...')` or `url(...)`.
///
/// Whitespace just inside the parentheses is ignored. Anything else left
/// around the address makes the wrapper malformed.
fn strip_url(raw: &str) -> Option<&str> {
    let (function, rest) = raw.split_at_checked(4)?;
    if !function.eq_ignore_ascii_case("url(") {
        return None;
    }
    let inner = rest.strip_suffix(')')?.trim_matches(|c: char| c.is_ascii_whitespace());

    let address = match inner.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let address = inner.strip_prefix(quote)?.strip_suffix(quote)?;
            if address.contains(quote) {
                return None;
            }
            address
        }
        _ => {
            if inner.contains(|c: char| c == '"' || c == '\'' || c.is_ascii_whitespace()) {
                return None;
            }
            inner
        }
    };

    (!address.is_empty()).then_some(address)
}

/// Numbers alternating with commas; other tokens are ignored.
fn parse_number_list(tokens: &[Token]) -> Option<PropertyValue> {
    let relevant: Vec<&Token> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Number || t.is_char(','))
        .collect();

    if relevant.len() % 2 == 0 {
        // Empty, or ends with a comma.
        return None;
    }

    let mut numbers = Vec::with_capacity(relevant.len() / 2 + 1);
    for (i, token) in relevant.iter().enumerate() {
        match (i % 2, token.kind) {
            (0, TokenKind::Number) => numbers.push(Number::parse(&token.text)?),
            (1, TokenKind::Char) => {}
            _ => return None,
        }
    }

    Some(PropertyValue::Numbers(numbers))
}
