//! Selector model: names, attribute tests, specificity and matching.

mod attribute;
mod matcher;
mod specificity;
mod types;
mod zoom;

pub use attribute::{AttributeTest, AttributeValue, Operator, SCALE_DENOMINATOR};
pub use matcher::MatchContext;
pub use specificity::Specificity;
pub use types::*;
pub use zoom::{ZOOM, scale_denominators};
