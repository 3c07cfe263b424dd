//! Declarations, rulesets and stylesheets.

mod declaration;
mod ruleset;
mod stylesheet;

pub use declaration::{Declaration, SortKey};
pub use ruleset::{PropertyDeclaration, Ruleset};
pub use stylesheet::Stylesheet;
