//! Parser configuration.

/// Options that change how a stylesheet is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserConfig {
    /// Whether the map is rendered in spherical (web) mercator.
    ///
    /// Zoom shorthand can only be converted to scale denominators when
    /// this is set; otherwise any `[zoom...]` test is an error.
    pub mercator: bool,
}

impl ParserConfig {
    /// Configuration for a web mercator map.
    pub const MERCATOR: Self = Self { mercator: true };

    /// Create a configuration.
    pub fn new(mercator: bool) -> Self {
        Self { mercator }
    }

    /// Builder: set the mercator flag.
    pub fn mercator(mut self, mercator: bool) -> Self {
        self.mercator = mercator;
        self
    }
}
