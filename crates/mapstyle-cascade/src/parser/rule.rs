//! Rule-at-a-time parsing straight into declarations.

use std::sync::Arc;

use super::cursor::TokenCursor;
use super::selector::parse_selector;
use super::{Token, TokenKind, tokenize};
use crate::config::ParserConfig;
use crate::properties::PropertyRegistry;
use crate::resolve::sort_declarations;
use crate::rules::{Declaration, PropertyDeclaration};
use crate::types::postprocess_value;
use crate::{Error, Result};

/// Recursive-descent parser yielding the declarations of one rule at a time.
///
/// # Example
///
/// ```
/// use mapstyle_cascade::parser::{RuleParser, tokenize};
/// use mapstyle_cascade::{ParserConfig, PropertyRegistry};
///
/// let tokens = tokenize("Map { map-bgcolor: #fff; } Layer { line-width: 1; }");
/// let mut parser = RuleParser::new(tokens, PropertyRegistry::standard(), ParserConfig::default());
///
/// assert_eq!(parser.parse_rule()?.map(|d| d.len()), Some(1));
/// assert_eq!(parser.parse_rule()?.map(|d| d.len()), Some(1));
/// assert!(parser.parse_rule()?.is_none());
/// # Ok::<(), mapstyle_cascade::Error>(())
/// ```
pub struct RuleParser<'r, I> {
    cursor: TokenCursor<I>,
    registry: &'r PropertyRegistry,
    config: ParserConfig,
}

impl<'r, I: Iterator<Item = Token>> RuleParser<'r, I> {
    /// Create a parser over a token stream.
    pub fn new(
        tokens: impl IntoIterator<IntoIter = I>,
        registry: &'r PropertyRegistry,
        config: ParserConfig,
    ) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            registry,
            config,
        }
    }

    /// Parse the next `selectors { block }` unit.
    ///
    /// Returns one declaration per (selector, block entry) pair,
    /// selector-major, or `None` once only whitespace and comments remain.
    pub fn parse_rule(&mut self) -> Result<Option<Vec<Declaration>>> {
        let Some(first) = self.cursor.next_significant() else {
            return Ok(None);
        };
        self.cursor.push_back(first);

        let mut selectors = Vec::new();
        loop {
            match parse_selector(&mut self.cursor, self.config)? {
                (selector, Some(end)) if end.is_char(',') => selectors.push(Arc::new(selector)),
                (selector, Some(_)) => {
                    selectors.push(Arc::new(selector));
                    break;
                }
                (_, None) => {
                    return Err(Error::unexpected_end(
                        "inside a selector",
                        self.cursor.last_location(),
                    ));
                }
            }
        }

        let block = self.parse_block()?;
        let declarations = selectors
            .iter()
            .flat_map(|selector| {
                block.iter().map(move |entry| {
                    Declaration::new(
                        Arc::clone(selector),
                        entry.property,
                        entry.value.clone(),
                        entry.location,
                    )
                })
            })
            .collect();

        Ok(Some(declarations))
    }

    /// Parse every remaining rule and sort the result into cascade order.
    #[tracing::instrument(skip_all, target = "mapstyle_cascade::parser", level = "debug")]
    pub fn parse_stylesheet(mut self) -> Result<Vec<Declaration>> {
        let mut declarations = Vec::new();
        let mut rules = 0usize;

        while let Some(rule) = self.parse_rule()? {
            declarations.extend(rule);
            rules += 1;
        }

        sort_declarations(&mut declarations);
        tracing::debug!(
            target: crate::targets::PARSER,
            rules,
            declarations = declarations.len(),
            "parsed stylesheet declarations"
        );
        Ok(declarations)
    }

    /// Block contents after the opening `{`, through the closing `}`.
    fn parse_block(&mut self) -> Result<Vec<PropertyDeclaration>> {
        let mut entries = Vec::new();

        loop {
            let token = self.expect("inside a declaration block")?;

            if token.is_char('}') {
                return Ok(entries);
            }
            if token.kind != TokenKind::Identifier {
                return Err(Error::unexpected(&token, "while looking for a property"));
            }

            let colon = self.expect("inside a declaration")?;
            if !colon.is_char(':') {
                return Err(Error::unexpected(&colon, "where \":\" was expected"));
            }

            let property = self
                .registry
                .property(&token.text)
                .map_err(|_| Error::unknown_property(token.text.as_str(), token.location))?;
            let (tokens, important) = self.parse_value()?;
            let value = postprocess_value(&property, &tokens, important, token.location)?;

            entries.push(PropertyDeclaration {
                property,
                value,
                location: token.location,
            });
        }
    }

    /// Value tokens through the terminating `;`, and whether `! important` preceded it.
    fn parse_value(&mut self) -> Result<(Vec<Token>, bool)> {
        let mut tokens = Vec::new();

        loop {
            let token = self.expect("inside a declaration")?;

            if token.is_char(';') {
                return Ok((tokens, false));
            }
            if token.is_char('!') {
                let marker = self.expect("inside a declaration")?;
                if !marker.is_ident("important") {
                    return Err(Error::unexpected(&marker, "after \"!\""));
                }
                let end = self.expect("inside a declaration")?;
                if !end.is_char(';') {
                    return Err(Error::unexpected(&end, "after \"!important\""));
                }
                return Ok((tokens, true));
            }
            if token.is_char('{') || token.is_char('}') {
                return Err(Error::unexpected(&token, "in declaration value"));
            }

            tokens.push(token);
        }
    }

    fn expect(&mut self, context: &str) -> Result<Token> {
        self.cursor
            .next_significant()
            .ok_or_else(|| Error::unexpected_end(context, self.cursor.last_location()))
    }
}

/// Tokenize `source` and parse it rule by rule into sorted declarations.
pub fn stylesheet_declarations(
    source: &str,
    registry: &PropertyRegistry,
    config: ParserConfig,
) -> Result<Vec<Declaration>> {
    RuleParser::new(tokenize(source), registry, config).parse_stylesheet()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SourceLocation;
    use crate::selector::Specificity;
    use crate::types::PropertyValue;

    fn parse(source: &str) -> Result<Vec<Declaration>> {
        stylesheet_declarations(source, PropertyRegistry::standard(), ParserConfig::MERCATOR)
    }

    fn summary(declarations: &[Declaration]) -> Vec<(String, &'static str)> {
        declarations
            .iter()
            .map(|d| (d.selector.to_string(), d.property.name()))
            .collect()
    }

    #[test]
    fn one_rule_at_a_time() {
        let tokens = tokenize("#a, #b { line-width: 1; line-opacity: 0.5; } Map { map-bgcolor: #000; }");
        let mut parser = RuleParser::new(tokens, PropertyRegistry::standard(), ParserConfig::default());

        let first = parser.parse_rule().unwrap().unwrap();
        assert_eq!(
            summary(&first),
            [
                ("#a".to_string(), "line-width"),
                ("#a".to_string(), "line-opacity"),
                ("#b".to_string(), "line-width"),
                ("#b".to_string(), "line-opacity"),
            ]
        );

        let second = parser.parse_rule().unwrap().unwrap();
        assert_eq!(summary(&second), [("Map".to_string(), "map-bgcolor")]);

        assert!(parser.parse_rule().unwrap().is_none());
    }

    #[test]
    fn long_selector_groups() {
        let group = (0..2000).map(|i| format!(".c{i}")).collect::<Vec<_>>().join(", ");
        let declarations = parse(&format!("{group} {{ line-width: 1; }}")).unwrap();
        assert_eq!(declarations.len(), 2000);
    }

    #[test]
    fn stylesheet_is_sorted() {
        let declarations = parse(
            "#roads { line-width: 3; }\n\
             Layer { line-width: 1 !important; }\n\
             Layer { line-width: 2; }",
        )
        .unwrap();

        let widths: Vec<&PropertyValue> = declarations.iter().map(|d| &d.value.data).collect();
        assert_eq!(
            widths,
            [
                &PropertyValue::Float(2.0),
                &PropertyValue::Float(3.0),
                &PropertyValue::Float(1.0),
            ]
        );
        assert_eq!(declarations[1].sort_key.specificity, Specificity(1, 0, 0));
    }

    #[test]
    fn declaration_sort_keys() {
        let declarations = parse("Layer[zoom>=10] {\n  line-width: 2;\n}").unwrap();
        let key = declarations[0].sort_key;

        assert_eq!(key.importance, 0);
        assert_eq!(key.specificity, Specificity(0, 1, 1));
        assert_eq!(key.position, SourceLocation::new(2, 3));
    }

    #[test]
    fn errors() {
        assert!(matches!(parse("Map { line-width: 1 }"), Err(Error::Syntax { .. })));
        assert!(matches!(parse("Map { line-width: 1;"), Err(Error::Syntax { .. })));
        assert!(matches!(parse("Map"), Err(Error::Syntax { .. })));
        assert!(matches!(parse("Map { 1: 2; }"), Err(Error::Syntax { .. })));
        assert!(matches!(
            parse("Map { nonsense: 2; }"),
            Err(Error::UnknownProperty { .. })
        ));
        assert!(matches!(
            parse("Map { line-width: 1 !important }"),
            Err(Error::Syntax { .. })
        ));
    }
}
