//! Stylesheet parsing.
//!
//! Two entry points share one selector and value grammar:
//!
//! - [`parse_rulesets`] runs a state machine over the whole token stream
//!   and keeps each rule's selector group together with its block.
//! - [`RuleParser`] descends one `selectors { block }` unit at a time and
//!   yields flattened [`Declaration`](crate::rules::Declaration)s directly.
//!
//! Both stop at the first error.

mod cursor;
mod rule;
mod rulesets;
mod selector;
mod token;
mod tokenizer;

pub use rule::{RuleParser, stylesheet_declarations};
pub use rulesets::{parse_rulesets, stylesheet_rulesets};
pub use token::{SourceLocation, Token, TokenKind};
pub use tokenizer::tokenize;
