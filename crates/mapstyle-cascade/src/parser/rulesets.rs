//! Whole-stylesheet parsing into rulesets.
//!
//! An explicit state machine fed one token at a time. It keeps the
//! comma-grouped selectors of a rule together with their block, leaving
//! the cross product to the cascade.

use std::sync::Arc;

use super::selector::postprocess_selector;
use super::{SourceLocation, Token, TokenKind, tokenize};
use crate::config::ParserConfig;
use crate::properties::{Property, PropertyRegistry};
use crate::rules::{PropertyDeclaration, Ruleset};
use crate::types::postprocess_value;
use crate::{Error, Result};

/// Parse a token stream into rulesets, in source order.
#[tracing::instrument(skip_all, target = "mapstyle_cascade::parser", level = "debug")]
pub fn parse_rulesets(
    tokens: impl IntoIterator<Item = Token>,
    registry: &PropertyRegistry,
    config: ParserConfig,
) -> Result<Vec<Ruleset>> {
    let mut machine = RulesetMachine::new(registry, config);
    let mut last = SourceLocation::new(1, 1);

    for token in tokens {
        last = token.location;
        machine.feed(token)?;
    }

    let rulesets = machine.finish(last)?;
    tracing::debug!(
        target: crate::targets::PARSER,
        rulesets = rulesets.len(),
        "parsed stylesheet rulesets"
    );
    Ok(rulesets)
}

/// Tokenize `source` and parse it into rulesets.
pub fn stylesheet_rulesets(
    source: &str,
    registry: &PropertyRegistry,
    config: ParserConfig,
) -> Result<Vec<Ruleset>> {
    parse_rulesets(tokenize(source), registry, config)
}

/// Where the machine is within a rule.
enum Context {
    /// Between rules.
    SeekingSelector,
    /// Collecting the tokens of the current selector.
    InSelectorGroup { pending: Vec<Token> },
    /// Inside a block, between declarations.
    SeekingProperty,
    /// Inside a declaration, from its property name on.
    InDeclaration(PendingDeclaration),
}

impl Context {
    fn describe(&self) -> &'static str {
        match self {
            Context::SeekingSelector => "while looking for a selector",
            Context::InSelectorGroup { .. } => "inside a selector",
            Context::SeekingProperty => "inside a declaration block",
            Context::InDeclaration(_) => "inside a declaration",
        }
    }
}

struct PendingDeclaration {
    name: Token,
    /// Set once the `:` after the name has been seen.
    property: Option<Property>,
    value: Vec<Token>,
    marker: Marker,
}

/// Progress through a trailing `! important`.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Marker {
    None,
    Bang,
    Important,
}

struct RulesetMachine<'r> {
    registry: &'r PropertyRegistry,
    config: ParserConfig,
    context: Context,
    current: Ruleset,
    rulesets: Vec<Ruleset>,
}

impl<'r> RulesetMachine<'r> {
    fn new(registry: &'r PropertyRegistry, config: ParserConfig) -> Self {
        Self {
            registry,
            config,
            context: Context::SeekingSelector,
            current: Ruleset::default(),
            rulesets: Vec::new(),
        }
    }

    fn feed(&mut self, token: Token) -> Result<()> {
        let context = std::mem::replace(&mut self.context, Context::SeekingSelector);
        self.context = match context {
            Context::SeekingSelector => self.seek_selector(token)?,
            Context::InSelectorGroup { pending } => self.in_selector_group(pending, token)?,
            Context::SeekingProperty => self.seek_property(token)?,
            Context::InDeclaration(pending) => self.in_declaration(pending, token)?,
        };
        Ok(())
    }

    fn finish(self, last: SourceLocation) -> Result<Vec<Ruleset>> {
        match self.context {
            Context::SeekingSelector => Ok(self.rulesets),
            context => Err(Error::unexpected_end(context.describe(), last)),
        }
    }

    fn seek_selector(&mut self, token: Token) -> Result<Context> {
        if token.is_transparent() {
            return Ok(Context::SeekingSelector);
        }

        let starts_selector = match token.kind {
            TokenKind::Identifier | TokenKind::HashLiteral => true,
            TokenKind::Char => ["*", ".", "["].contains(&token.text.as_str()),
            _ => false,
        };
        if !starts_selector {
            return Err(Error::unexpected(&token, Context::SeekingSelector.describe()));
        }

        Ok(Context::InSelectorGroup {
            pending: vec![token],
        })
    }

    fn in_selector_group(&mut self, mut pending: Vec<Token>, token: Token) -> Result<Context> {
        let opens_block = token.is_char('{');
        if !opens_block && !token.is_char(',') {
            if token.kind != TokenKind::Comment {
                pending.push(token);
            }
            return Ok(Context::InSelectorGroup { pending });
        }

        let selector = postprocess_selector(pending, self.config, token.location)?;
        self.current.selectors.push(Arc::new(selector));

        Ok(if opens_block {
            Context::SeekingProperty
        } else {
            Context::InSelectorGroup { pending: Vec::new() }
        })
    }

    fn seek_property(&mut self, token: Token) -> Result<Context> {
        if token.is_transparent() {
            return Ok(Context::SeekingProperty);
        }

        if token.is_char('}') {
            self.rulesets.push(std::mem::take(&mut self.current));
            return Ok(Context::SeekingSelector);
        }

        if token.kind != TokenKind::Identifier {
            return Err(Error::unexpected(&token, "while looking for a property"));
        }

        Ok(Context::InDeclaration(PendingDeclaration {
            name: token,
            property: None,
            value: Vec::new(),
            marker: Marker::None,
        }))
    }

    fn in_declaration(&mut self, mut pending: PendingDeclaration, token: Token) -> Result<Context> {
        if token.is_transparent() {
            return Ok(Context::InDeclaration(pending));
        }

        let Some(property) = pending.property else {
            if !token.is_char(':') {
                return Err(Error::unexpected(&token, "where \":\" was expected"));
            }
            let name = &pending.name;
            let property = self
                .registry
                .property(&name.text)
                .map_err(|_| Error::unknown_property(name.text.as_str(), name.location))?;
            pending.property = Some(property);
            return Ok(Context::InDeclaration(pending));
        };

        match pending.marker {
            Marker::None if token.is_char(';') => self.complete(pending, property, false),
            Marker::None if token.is_char('!') => {
                pending.marker = Marker::Bang;
                Ok(Context::InDeclaration(pending))
            }
            Marker::None if token.is_char('{') || token.is_char('}') => {
                Err(Error::unexpected(&token, "in declaration value"))
            }
            Marker::None => {
                pending.value.push(token);
                Ok(Context::InDeclaration(pending))
            }
            Marker::Bang if token.is_ident("important") => {
                pending.marker = Marker::Important;
                Ok(Context::InDeclaration(pending))
            }
            Marker::Bang => Err(Error::unexpected(&token, "after \"!\"")),
            Marker::Important if token.is_char(';') => self.complete(pending, property, true),
            Marker::Important => Err(Error::unexpected(&token, "after \"!important\"")),
        }
    }

    fn complete(
        &mut self,
        pending: PendingDeclaration,
        property: Property,
        important: bool,
    ) -> Result<Context> {
        let location = pending.name.location;
        let value = postprocess_value(&property, &pending.value, important, location)?;

        self.current.declarations.push(PropertyDeclaration {
            property,
            value,
            location,
        });
        Ok(Context::SeekingProperty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SelectorError;
    use crate::types::{Color, PropertyValue};

    fn parse(source: &str) -> Result<Vec<Ruleset>> {
        stylesheet_rulesets(source, PropertyRegistry::standard(), ParserConfig::MERCATOR)
    }

    #[test]
    fn empty_stylesheet() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("  /* nothing */ ").unwrap().is_empty());
    }

    #[test]
    fn groups_selectors_with_their_block() {
        let rulesets = parse(
            "#roads, .major[lanes>2] { line-width: 2; line-color: #f00; }\n\
             Map { map-bgcolor: transparent; }",
        )
        .unwrap();

        assert_eq!(rulesets.len(), 2);

        let first = &rulesets[0];
        let selectors: Vec<String> = first.selectors.iter().map(|s| s.to_string()).collect();
        assert_eq!(selectors, ["#roads", ".major[lanes>2]"]);
        assert_eq!(first.declarations.len(), 2);
        assert_eq!(first.declarations[0].property.name(), "line-width");
        assert_eq!(first.declarations[0].value.data, PropertyValue::Float(2.0));
        assert_eq!(
            first.declarations[1].value.data,
            PropertyValue::Color(Color::rgb(255, 0, 0))
        );

        assert_eq!(rulesets[1].declarations[0].value.data, PropertyValue::Transparent);
    }

    #[test]
    fn declaration_positions_are_property_names() {
        let rulesets = parse("Map {\n  line-width: 1;\n  line-opacity: 0.5;\n}").unwrap();
        let positions: Vec<SourceLocation> =
            rulesets[0].declarations.iter().map(|d| d.location).collect();

        assert_eq!(positions, [SourceLocation::new(2, 3), SourceLocation::new(3, 3)]);
    }

    #[test]
    fn important_marker() {
        let rulesets = parse("Map { line-width: 1 !important; line-opacity: 1 ! important ; }").unwrap();
        let declarations = &rulesets[0].declarations;

        assert!(declarations[0].value.important);
        assert!(declarations[1].value.important);

        assert!(parse("Map { line-width: 1 !urgent; }").is_err());
        assert!(parse("Map { line-width: 1 !important 2; }").is_err());
    }

    #[test]
    fn zoom_needs_mercator() {
        let err = stylesheet_rulesets(
            "Layer[zoom>3] { line-width: 1; }",
            PropertyRegistry::standard(),
            ParserConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::Projection { .. }));
        assert_eq!(err.location(), Some(SourceLocation::new(1, 1)));
    }

    #[test]
    fn structural_errors() {
        let cases = [
            ("{ line-width: 1; }", SourceLocation::new(1, 1)),
            ("Map { 12: 1; }", SourceLocation::new(1, 7)),
            ("Map { line-width 1; }", SourceLocation::new(1, 18)),
            ("Map { line-width: { }", SourceLocation::new(1, 19)),
            ("'Map' { }", SourceLocation::new(1, 1)),
        ];

        for (source, location) in cases {
            let err = parse(source).unwrap_err();
            assert!(matches!(err, Error::Syntax { .. }), "{source}: {err}");
            assert_eq!(err.location(), Some(location), "{source}");
        }
    }

    #[test]
    fn unterminated_input() {
        for source in ["Map", "Map {", "Map { line-width", "Map { line-width: 1", "Map, "] {
            let err = parse(source).unwrap_err();
            assert!(
                err.to_string().starts_with("Unexpected end of input"),
                "{source}: {err}"
            );
        }
    }

    #[test]
    fn unknown_property() {
        let err = parse("Map { line-wdith: 1; }").unwrap_err();
        match err {
            Error::UnknownProperty { property, location } => {
                assert_eq!(property, "line-wdith");
                assert_eq!(location, SourceLocation::new(1, 7));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_selector_in_group() {
        let err = parse("Map, { line-width: 1; }").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSelector { source: SelectorError::Empty, .. }
        ));
    }

    #[test]
    fn value_errors_name_the_property() {
        let err = parse("Layer { polygon-fill: notacolor; }").unwrap_err();
        match err {
            Error::InvalidValue { property, .. } => assert_eq!(property, "polygon-fill"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
