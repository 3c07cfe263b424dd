//! Cascade resolution for map stylesheets.
//!
//! This crate compiles a CSS-like map stylesheet into an ordered list of
//! typed declarations:
//!
//! - **Properties**: a fixed table of recognized properties and their value grammars
//! - **Values**: strict, property-specific value typing (colors, enums, number lists, ...)
//! - **Selectors**: tags, ids, classes and attribute tests, with zoom shorthand
//!   converted to scale-denominator ranges
//! - **Cascade**: CSS-style specificity and a deterministic declaration order
//!
//! # Example
//!
//! ```
//! use mapstyle_cascade::prelude::*;
//!
//! let sheet = Stylesheet::from_css(
//!     "Layer[zoom>=10] { line-width: 2; line-color: #336699; }",
//!     ParserConfig::MERCATOR,
//! )?;
//!
//! assert_eq!(sheet.len(), 2);
//! assert_eq!(sheet.declarations[1].property.name(), "line-color");
//! # Ok::<(), mapstyle_cascade::Error>(())
//! ```

pub mod config;
pub mod parser;
pub mod properties;
pub mod resolve;
pub mod rules;
pub mod selector;
pub mod types;

mod error;

pub use config::ParserConfig;
pub use error::{Error, Result, SelectorError};
pub use properties::PropertyRegistry;

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by stage.
pub mod targets {
    /// Tokenizing and rule parsing.
    pub const PARSER: &str = "mapstyle_cascade::parser";
    /// Selector construction and zoom conversion.
    pub const SELECTOR: &str = "mapstyle_cascade::selector";
    /// Style resolution.
    pub const RESOLVE: &str = "mapstyle_cascade::resolve";
}

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::config::ParserConfig;
    pub use crate::parser::{RuleParser, SourceLocation, Token, TokenKind, tokenize};
    pub use crate::properties::{Property, PropertyDescriptor, PropertyRegistry};
    pub use crate::resolve::{ComputedStyle, StyleContext, compute_style, flatten};
    pub use crate::rules::{Declaration, Ruleset, SortKey, Stylesheet};
    pub use crate::selector::{AttributeTest, AttributeValue, Operator, Selector, Specificity};
    pub use crate::types::{Color, PropertyValue, Value};
    pub use crate::{Error, Result};
}

static_assertions::assert_impl_all!(PropertyRegistry: Send, Sync);
static_assertions::assert_impl_all!(selector::Selector: Send, Sync);
static_assertions::assert_impl_all!(rules::Declaration: Send, Sync);
static_assertions::assert_impl_all!(rules::Stylesheet: Send, Sync);
