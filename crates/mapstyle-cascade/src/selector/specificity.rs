//! Selector specificity calculation.

use super::Selector;

/// Specificity as an (a, b, c) tuple.
///
/// - a: id names
/// - b: all other names (tags, classes, `*`)
/// - c: attribute tests
///
/// Compared lexicographically: (1,0,0) > (0,99,99)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Zero specificity.
    pub const ZERO: Self = Self(0, 0, 0);

    /// Calculate the specificity of a selector, summed over its elements.
    pub fn of_selector(selector: &Selector) -> Self {
        selector.elements().iter().fold(Self::ZERO, |Self(a, b, c), element| {
            let ids = element.count_ids() as u32;
            Self(
                a + ids,
                b + element.count_names() as u32 - ids,
                c + element.count_tests() as u32,
            )
        })
    }

    /// Get the id count.
    pub fn ids(&self) -> u32 {
        self.0
    }

    /// Get the count of names that are not ids.
    pub fn names(&self) -> u32 {
        self.1
    }

    /// Get the attribute test count.
    pub fn tests(&self) -> u32 {
        self.2
    }
}

impl Selector {
    /// See [`Specificity::of_selector`].
    pub fn specificity(&self) -> Specificity {
        Specificity::of_selector(self)
    }
}

impl std::fmt::Display for Specificity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.0, self.1, self.2)
    }
}
