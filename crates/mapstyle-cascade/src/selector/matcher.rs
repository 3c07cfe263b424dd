//! Selector matching against layer context.

use super::{Selector, SelectorElement, SelectorName};

/// What a selector is matched against: a layer's tag, id and classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchContext<'a> {
    /// Tag name (e.g. "Layer", "Map").
    pub tag: Option<&'a str>,
    /// Layer id (for #id names).
    pub id: Option<&'a str>,
    /// Layer classes (for .class names).
    pub classes: &'a [&'a str],
}

impl<'a> MatchContext<'a> {
    /// Create a context.
    pub fn new(tag: Option<&'a str>, id: Option<&'a str>, classes: &'a [&'a str]) -> Self {
        Self { tag, id, classes }
    }

    /// Check every name of an element against this context.
    ///
    /// `*` always matches; missing context values never satisfy a name.
    /// Each context value satisfies one name only, so `#a#a` needs two ids
    /// and `.a.a` needs class `a` listed twice.
    pub fn element_matches(&self, element: &SelectorElement) -> bool {
        let mut tags = 0;
        let mut ids = 0;

        for (i, name) in element.names.iter().enumerate() {
            let satisfied = match name {
                SelectorName::Universal => true,
                SelectorName::Tag(tag) => {
                    tags += 1;
                    tags == 1 && self.tag == Some(tag.as_str())
                }
                SelectorName::Id(id) => {
                    ids += 1;
                    ids == 1 && self.id == Some(id.as_str())
                }
                SelectorName::Class(class) => {
                    let wanted = element.names[..=i]
                        .iter()
                        .filter(|n| matches!(n, SelectorName::Class(c) if c == class))
                        .count();
                    self.classes.iter().filter(|c| **c == class.as_str()).count() >= wanted
                }
            };
            if !satisfied {
                return false;
            }
        }
        true
    }
}

impl Selector {
    /// True if the first element's names are all satisfied by the given
    /// tag, id and classes.
    pub fn matches(&self, tag: Option<&str>, id: Option<&str>, classes: &[&str]) -> bool {
        MatchContext::new(tag, id, classes).element_matches(self.first())
    }

    /// True if every ranged test of the first element admits `scale_denominator`.
    pub fn in_range(&self, scale_denominator: f64) -> bool {
        self.range_tests().all(|test| test.in_range(scale_denominator))
    }
}
