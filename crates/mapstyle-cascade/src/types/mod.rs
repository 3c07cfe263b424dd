//! Typed property values and the value postprocessor.

mod color;
mod postprocess;
mod value;

pub use color::Color;
pub use postprocess::postprocess_value;
pub(crate) use postprocess::strip_quotes;
pub use value::{Number, PropertyValue, Value};
