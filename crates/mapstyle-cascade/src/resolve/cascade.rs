//! Flattening rulesets into the ordered declaration list.

use std::collections::BTreeMap;

use crate::rules::{Declaration, Ruleset};

/// Expand every ruleset into declarations and sort them into cascade order.
///
/// Applying the result front to back, with later declarations replacing
/// earlier ones for the same property, gives standard cascade precedence.
pub fn flatten<'a>(rulesets: impl IntoIterator<Item = &'a Ruleset>) -> Vec<Declaration> {
    let mut declarations: Vec<Declaration> = rulesets
        .into_iter()
        .flat_map(|ruleset| ruleset.flatten())
        .collect();
    sort_declarations(&mut declarations);
    declarations
}

/// Stable ascending sort by sort key.
///
/// Equal keys keep their relative order, so of two equal-precedence
/// declarations the one inserted last still wins.
pub fn sort_declarations(declarations: &mut [Declaration]) {
    declarations.sort_by_key(|declaration| declaration.sort_key);
}

/// Group declarations by the symbolizer family of their property.
///
/// Order within each family is preserved.
pub fn group_by_family<'d>(
    declarations: impl IntoIterator<Item = &'d Declaration>,
) -> BTreeMap<&'static str, Vec<&'d Declaration>> {
    let mut families: BTreeMap<&'static str, Vec<&'d Declaration>> = BTreeMap::new();
    for declaration in declarations {
        families
            .entry(declaration.property.group())
            .or_default()
            .push(declaration);
    }
    families
}
