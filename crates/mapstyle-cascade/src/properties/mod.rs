//! Recognized style properties and their value grammars.

mod property;
mod registry;

pub use property::Property;
pub use registry::{PropertyDescriptor, PropertyRegistry, UnknownProperty};
