//! Cascade assembly and style resolution.

mod cascade;
mod engine;

pub use cascade::{flatten, group_by_family, sort_declarations};
pub use engine::{ComputedStyle, StyleContext, compute_style};
