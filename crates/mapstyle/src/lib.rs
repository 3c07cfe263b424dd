//! Compile CSS-like map stylesheets into ordered style declarations.
//!
//! This crate re-exports the cascade engine from `mapstyle-cascade` and adds
//! what the `mapstyle` command-line tool needs on top of it: logging setup
//! and report rendering.
//!
//! # Example
//!
//! ```
//! use mapstyle::prelude::*;
//!
//! let sheet = Stylesheet::from_css("Map { map-bgcolor: #fff; }", ParserConfig::default())?;
//! let text = Report::from_stylesheet(&sheet).render(ReportFormat::Text)?;
//!
//! assert!(text.starts_with("Map { map-bgcolor: #ffffff; }"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod logging;
pub mod report;

pub use mapstyle_cascade::{
    Error, ParserConfig, PropertyRegistry, Result, SelectorError, config, parser, properties,
    resolve, rules, selector, targets, types,
};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::logging::init_logging;
    pub use crate::report::{Report, ReportError, ReportFormat};
    pub use mapstyle_cascade::prelude::*;
}
