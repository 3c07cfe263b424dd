//! Flattened declarations and their cascade sort key.

use std::fmt;
use std::sync::Arc;

use crate::parser::SourceLocation;
use crate::properties::Property;
use crate::selector::{Selector, Specificity};
use crate::types::Value;

/// Cascade precedence of a declaration.
///
/// Compared field by field: importance, then specificity, then source
/// position. Later-sorting declarations override earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey {
    /// 1 for `!important` declarations, 0 otherwise.
    pub importance: u8,
    /// Specificity of the declaration's selector.
    pub specificity: Specificity,
    /// Where the declaration's property name appears.
    pub position: SourceLocation,
}

/// One selector paired with one property assignment.
///
/// Selectors are shared between all declarations of a comma group.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The selector this declaration applies under.
    pub selector: Arc<Selector>,
    /// The assigned property.
    pub property: Property,
    /// The typed value.
    pub value: Value,
    /// Cascade precedence.
    pub sort_key: SortKey,
}

impl Declaration {
    /// Create a declaration, computing its sort key.
    pub fn new(
        selector: Arc<Selector>,
        property: Property,
        value: Value,
        position: SourceLocation,
    ) -> Self {
        let sort_key = SortKey {
            importance: value.importance(),
            specificity: selector.specificity(),
            position,
        };
        Self {
            selector,
            property,
            value,
            sort_key,
        }
    }

    /// Whether the value carried `!important`.
    pub fn is_important(&self) -> bool {
        self.value.important
    }

    /// Source position of the declaration.
    pub fn position(&self) -> SourceLocation {
        self.sort_key.position
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ {}: {} }}", self.selector, self.property, self.value)
    }
}
