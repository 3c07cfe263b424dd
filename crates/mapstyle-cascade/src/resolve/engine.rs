//! Resolving the cascade for one layer at one scale.

use std::collections::BTreeMap;

use crate::rules::Declaration;
use crate::types::Value;

/// What a layer looks like to the cascade.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleContext<'a> {
    /// Tag name, e.g. `Layer` or `Map`.
    pub tag: Option<&'a str>,
    /// Layer id.
    pub id: Option<&'a str>,
    /// Layer classes.
    pub classes: &'a [&'a str],
    /// Scale to evaluate scale-denominator tests at; `None` ignores them.
    ///
    /// Tests on other attributes depend on feature data and are never
    /// evaluated here.
    pub scale_denominator: Option<f64>,
}

impl<'a> StyleContext<'a> {
    /// Context for an element with the given tag.
    pub fn new(tag: &'a str) -> Self {
        Self {
            tag: Some(tag),
            ..Self::default()
        }
    }

    /// Set the id.
    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the classes.
    pub fn classes(mut self, classes: &'a [&'a str]) -> Self {
        self.classes = classes;
        self
    }

    /// Set the scale denominator.
    pub fn scale_denominator(mut self, scale_denominator: f64) -> Self {
        self.scale_denominator = Some(scale_denominator);
        self
    }

    /// Whether a declaration's selector applies in this context.
    pub fn applies(&self, declaration: &Declaration) -> bool {
        let selector = &declaration.selector;
        selector.matches(self.tag, self.id, self.classes)
            && self
                .scale_denominator
                .is_none_or(|scale| selector.map_scale_tests().all(|test| test.in_range(scale)))
    }
}

/// The winning declaration for each property.
#[derive(Debug, Clone, Default)]
pub struct ComputedStyle<'d> {
    winners: BTreeMap<&'static str, &'d Declaration>,
}

impl<'d> ComputedStyle<'d> {
    /// Winning value for a property.
    pub fn get(&self, property: &str) -> Option<&'d Value> {
        self.winners.get(property).copied().map(|declaration| &declaration.value)
    }

    /// Winning declaration for a property.
    pub fn declaration(&self, property: &str) -> Option<&'d Declaration> {
        self.winners.get(property).copied()
    }

    /// Number of resolved properties.
    pub fn len(&self) -> usize {
        self.winners.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.winners.is_empty()
    }

    /// Winners ordered by property name.
    pub fn iter(&self) -> impl Iterator<Item = &'d Declaration> + '_ {
        self.winners.values().copied()
    }

    /// Winners grouped by symbolizer family.
    pub fn groups(&self) -> BTreeMap<&'static str, Vec<&'d Declaration>> {
        super::group_by_family(self.iter())
    }
}

/// Apply sorted declarations in order, keeping the last match per property.
#[tracing::instrument(skip_all, target = "mapstyle_cascade::resolve", level = "trace")]
pub fn compute_style<'d>(
    declarations: impl IntoIterator<Item = &'d Declaration>,
    context: &StyleContext<'_>,
) -> ComputedStyle<'d> {
    let mut style = ComputedStyle::default();
    for declaration in declarations {
        if context.applies(declaration) {
            style.winners.insert(declaration.property.name(), declaration);
        }
    }
    tracing::trace!(target: crate::targets::RESOLVE, properties = style.len(), "resolved style");
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::parser::stylesheet_declarations;
    use crate::properties::PropertyRegistry;
    use crate::types::{Color, PropertyValue};

    const SHEET: &str = "
        Layer { line-width: 1; line-color: #000; }
        Layer[zoom>=12] { line-width: 2; }
        #roads { line-width: 3; }
        .minor { line-width: 0.5 !important; }
        Map { map-bgcolor: #fff; }
    ";

    fn declarations() -> Vec<Declaration> {
        stylesheet_declarations(SHEET, PropertyRegistry::standard(), ParserConfig::MERCATOR).unwrap()
    }

    fn width(style: &ComputedStyle<'_>) -> Option<PropertyValue> {
        style.get("line-width").map(|value| value.data.clone())
    }

    #[test]
    fn tag_only() {
        let declarations = declarations();
        let style = compute_style(&declarations, &StyleContext::new("Layer"));

        // The zoom rule is more specific and no scale was given.
        assert_eq!(width(&style), Some(PropertyValue::Float(2.0)));
        assert_eq!(
            style.get("line-color").map(|v| &v.data),
            Some(&PropertyValue::Color(Color::BLACK))
        );
        assert!(style.get("map-bgcolor").is_none());
    }

    #[test]
    fn scale_filters_ranged_rules() {
        let declarations = declarations();

        let far = compute_style(&declarations, &StyleContext::new("Layer").scale_denominator(5_000_000.0));
        assert_eq!(width(&far), Some(PropertyValue::Float(1.0)));

        let near = compute_style(&declarations, &StyleContext::new("Layer").scale_denominator(50_000.0));
        assert_eq!(width(&near), Some(PropertyValue::Float(2.0)));
    }

    #[test]
    fn id_and_important() {
        let declarations = declarations();

        let roads = compute_style(&declarations, &StyleContext::new("Layer").id("roads"));
        assert_eq!(width(&roads), Some(PropertyValue::Float(3.0)));

        let minor = compute_style(
            &declarations,
            &StyleContext::new("Layer").id("roads").classes(&["minor"]),
        );
        assert_eq!(width(&minor), Some(PropertyValue::Float(0.5)));
        assert!(minor.declaration("line-width").unwrap().is_important());
    }

    #[test]
    fn grouped_output() {
        let declarations = declarations();
        let style = compute_style(&declarations, &StyleContext::new("Layer"));
        let groups = style.groups();

        assert_eq!(style.len(), 2);
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), ["line"]);
        assert_eq!(groups["line"].len(), 2);

        let map = compute_style(&declarations, &StyleContext::new("Map"));
        assert_eq!(map.groups().keys().copied().collect::<Vec<_>>(), ["map"]);
    }
}
