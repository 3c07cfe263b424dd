//! Rulesets: comma-grouped selectors sharing one declaration block.

use std::sync::Arc;

use super::Declaration;
use crate::parser::SourceLocation;
use crate::properties::Property;
use crate::selector::Selector;
use crate::types::Value;

/// One `property: value;` entry of a block, before it is paired with selectors.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDeclaration {
    /// The assigned property.
    pub property: Property,
    /// The typed value.
    pub value: Value,
    /// Location of the property name.
    pub location: SourceLocation,
}

/// A selector group and the block it applies to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ruleset {
    /// Selectors of the comma group, in source order.
    pub selectors: Vec<Arc<Selector>>,
    /// Block entries, in source order.
    pub declarations: Vec<PropertyDeclaration>,
}

impl Ruleset {
    /// Create a ruleset.
    pub fn new(selectors: Vec<Arc<Selector>>, declarations: Vec<PropertyDeclaration>) -> Self {
        Self {
            selectors,
            declarations,
        }
    }

    /// Pair every selector with every block entry.
    ///
    /// Selector-major: all entries for the first selector, then all
    /// entries for the next one.
    pub fn flatten(&self) -> impl Iterator<Item = Declaration> + '_ {
        self.selectors.iter().flat_map(move |selector| {
            self.declarations.iter().map(move |entry| {
                Declaration::new(
                    Arc::clone(selector),
                    entry.property,
                    entry.value.clone(),
                    entry.location,
                )
            })
        })
    }

    /// Number of declarations [`flatten`](Self::flatten) yields.
    pub fn declaration_count(&self) -> usize {
        self.selectors.len() * self.declarations.len()
    }
}
