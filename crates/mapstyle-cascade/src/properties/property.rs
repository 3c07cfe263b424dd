//! Validated property names.

use std::fmt;

use super::PropertyDescriptor;

/// A property name that has been checked against a registry.
///
/// Only a [`PropertyRegistry`](super::PropertyRegistry) hands these out, so
/// holding one proves the name is recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property {
    name: &'static str,
    descriptor: PropertyDescriptor,
}

impl Property {
    pub(crate) fn new(name: &'static str, descriptor: PropertyDescriptor) -> Self {
        Self { name, descriptor }
    }

    /// The property name, e.g. `line-width`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The value grammar this property accepts.
    pub fn descriptor(&self) -> PropertyDescriptor {
        self.descriptor
    }

    /// Symbolizer family: the name up to the first hyphen.
    ///
    /// `line-width` and `line-color` are both in group `line`, while
    /// `outline-width` is in group `outline`.
    pub fn group(&self) -> &'static str {
        match self.name.split_once('-') {
            Some((group, _)) => group,
            None => self.name,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
