//! Selector type definitions.

use std::fmt;

use super::AttributeTest;
use crate::SelectorError;

/// One name in a selector element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectorName {
    /// A bare tag such as `Layer` or `Map`.
    Tag(String),
    /// The universal selector `*`.
    Universal,
    /// An id selector, `#roads`.
    Id(String),
    /// A class selector, `.major`.
    Class(String),
}

impl SelectorName {
    /// Parse a name from its sigil form (`Layer`, `*`, `#id`, `.class`).
    pub fn parse(name: &str) -> Self {
        if name == "*" {
            Self::Universal
        } else if let Some(id) = name.strip_prefix('#') {
            Self::Id(id.to_string())
        } else if let Some(class) = name.strip_prefix('.') {
            Self::Class(class.to_string())
        } else {
            Self::Tag(name.to_string())
        }
    }

    /// Check if this is an id name.
    pub fn is_id(&self) -> bool {
        matches!(self, Self::Id(_))
    }

    /// Check if this is a class name.
    pub fn is_class(&self) -> bool {
        matches!(self, Self::Class(_))
    }
}

impl fmt::Display for SelectorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => f.write_str(tag),
            Self::Universal => f.write_str("*"),
            Self::Id(id) => write!(f, "#{id}"),
            Self::Class(class) => write!(f, ".{class}"),
        }
    }
}

/// One element of a selector: names plus attribute tests, e.g. `Layer#roads[zoom>10]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectorElement {
    /// Names in source order.
    pub names: Vec<SelectorName>,
    /// Attribute tests in source order.
    pub tests: Vec<AttributeTest>,
}

impl SelectorElement {
    /// Create an empty element.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an element holding a single name.
    pub fn with_name(name: SelectorName) -> Self {
        Self {
            names: vec![name],
            tests: vec![],
        }
    }

    /// Append a name.
    pub fn add_name(&mut self, name: SelectorName) {
        self.names.push(name);
    }

    /// Append an attribute test.
    pub fn add_test(&mut self, test: AttributeTest) {
        self.tests.push(test);
    }

    /// Builder form of [`add_name`](Self::add_name).
    pub fn name(mut self, name: SelectorName) -> Self {
        self.add_name(name);
        self
    }

    /// Builder form of [`add_test`](Self::add_test).
    pub fn test(mut self, test: AttributeTest) -> Self {
        self.add_test(test);
        self
    }

    /// Number of attribute tests.
    pub fn count_tests(&self) -> usize {
        self.tests.len()
    }

    /// Number of id names.
    pub fn count_ids(&self) -> usize {
        self.names.iter().filter(|n| n.is_id()).count()
    }

    /// Number of class names.
    pub fn count_classes(&self) -> usize {
        self.names.iter().filter(|n| n.is_class()).count()
    }

    /// Number of names of any kind.
    pub fn count_names(&self) -> usize {
        self.names.len()
    }
}

impl fmt::Display for SelectorElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in &self.names {
            write!(f, "{name}")?;
        }
        for test in &self.tests {
            write!(f, "{test}")?;
        }
        Ok(())
    }
}

/// A complete selector: a scoped element, optionally followed by a bare
/// descendant element (e.g. `#roads name`).
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    elements: Vec<SelectorElement>,
}

impl Selector {
    /// Create a selector, checking the shape rules.
    ///
    /// A selector has one or two elements. The first must start with `Map`,
    /// `Layer`, an id, a class or `*`. A second element may not carry ids,
    /// classes or attribute tests.
    pub fn new(elements: Vec<SelectorElement>) -> Result<Self, SelectorError> {
        match elements.len() {
            0 => return Err(SelectorError::Empty),
            1 | 2 => {}
            n => return Err(SelectorError::TooManyElements(n)),
        }

        let rooted = match elements[0].names.first() {
            Some(SelectorName::Tag(tag)) => tag == "Map" || tag == "Layer",
            Some(_) => true,
            None => return Err(SelectorError::Unrooted(elements[0].to_string())),
        };
        if !rooted {
            return Err(SelectorError::Unrooted(elements[0].names[0].to_string()));
        }

        if let Some(descendant) = elements.get(1)
            && (descendant.count_tests() > 0
                || descendant.count_ids() > 0
                || descendant.count_classes() > 0)
        {
            return Err(SelectorError::QualifiedDescendant);
        }

        Ok(Self { elements })
    }

    /// All elements, in source order.
    pub fn elements(&self) -> &[SelectorElement] {
        &self.elements
    }

    /// The scoped first element.
    pub fn first(&self) -> &SelectorElement {
        &self.elements[0]
    }

    /// The bare descendant element, if any.
    pub fn descendant(&self) -> Option<&SelectorElement> {
        self.elements.get(1)
    }

    pub(crate) fn first_mut(&mut self) -> &mut SelectorElement {
        &mut self.elements[0]
    }

    /// Attribute tests that take part in matching: those of the first element.
    pub fn all_tests(&self) -> &[AttributeTest] {
        &self.first().tests
    }

    /// Ranged tests of the first element.
    pub fn range_tests(&self) -> impl Iterator<Item = &AttributeTest> {
        self.all_tests().iter().filter(|t| t.is_ranged())
    }

    /// Whether any test of the first element is ranged.
    pub fn is_ranged(&self) -> bool {
        self.range_tests().next().is_some()
    }

    /// Scale-denominator tests of the first element.
    pub fn map_scale_tests(&self) -> impl Iterator<Item = &AttributeTest> {
        self.all_tests().iter().filter(|t| t.is_map_scaled())
    }

    /// Whether any test of the first element is on the scale denominator.
    pub fn is_map_scaled(&self) -> bool {
        self.map_scale_tests().next().is_some()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{element}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Operator;

    fn element(names: &[&str]) -> SelectorElement {
        let mut element = SelectorElement::new();
        for name in names {
            element.add_name(SelectorName::parse(name));
        }
        element
    }

    #[test]
    fn names_keep_their_sigils() {
        assert_eq!(SelectorName::parse("Layer"), SelectorName::Tag("Layer".into()));
        assert_eq!(SelectorName::parse("*"), SelectorName::Universal);
        assert_eq!(SelectorName::parse("#roads"), SelectorName::Id("roads".into()));
        assert_eq!(SelectorName::parse(".major"), SelectorName::Class("major".into()));
        assert_eq!(SelectorName::parse(".major").to_string(), ".major");
    }

    #[test]
    fn element_counts() {
        let element = element(&["Layer", "#roads", ".major", ".minor"])
            .test(AttributeTest::new("zoom", Operator::Gt, 4.0));

        assert_eq!(element.count_names(), 4);
        assert_eq!(element.count_ids(), 1);
        assert_eq!(element.count_classes(), 2);
        assert_eq!(element.count_tests(), 1);
    }

    #[test]
    fn allowed_roots() {
        for root in ["Map", "Layer", "#roads", ".major", "*"] {
            assert!(Selector::new(vec![element(&[root])]).is_ok(), "{root}");
        }
        assert_eq!(
            Selector::new(vec![element(&["Road"])]),
            Err(SelectorError::Unrooted("Road".into()))
        );
    }

    #[test]
    fn element_count_limits() {
        assert_eq!(Selector::new(vec![]), Err(SelectorError::Empty));
        assert_eq!(
            Selector::new(vec![element(&["Layer"]), element(&["name"]), element(&["x"])]),
            Err(SelectorError::TooManyElements(3))
        );
    }

    #[test]
    fn descendant_must_be_bare() {
        assert!(Selector::new(vec![element(&["#roads"]), element(&["name"])]).is_ok());

        for qualified in [
            element(&["name", "#label"]),
            element(&["name", ".big"]),
            element(&["name"]).test(AttributeTest::new("zoom", Operator::Gt, 3.0)),
        ] {
            assert_eq!(
                Selector::new(vec![element(&["#roads"]), qualified]),
                Err(SelectorError::QualifiedDescendant)
            );
        }
    }

    #[test]
    fn test_queries_use_first_element() {
        let selector = Selector::new(vec![
            element(&["Layer"])
                .test(AttributeTest::new("scale-denominator", Operator::Lt, 400000.0))
                .test(AttributeTest::new("highway", Operator::Eq, "primary")),
        ])
        .unwrap();

        assert_eq!(selector.all_tests().len(), 2);
        assert_eq!(selector.range_tests().count(), 1);
        assert!(selector.is_ranged());
        assert!(selector.is_map_scaled());

        let plain = Selector::new(vec![element(&["Layer"])]).unwrap();
        assert!(!plain.is_ranged());
        assert!(!plain.is_map_scaled());
    }

    #[test]
    fn display() {
        let selector = Selector::new(vec![
            element(&["Layer", "#roads"]).test(AttributeTest::new("zoom", Operator::Ge, 10.0)),
            element(&["name"]),
        ])
        .unwrap();

        assert_eq!(selector.to_string(), "Layer#roads[zoom>=10] name");
    }
}
