//! Error types for stylesheet compilation.

use std::path::PathBuf;

use crate::parser::{SourceLocation, Token};

/// Result type alias for cascade operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while compiling a stylesheet.
///
/// Every parse-stage variant carries the 1-based source position of the
/// offending construct. Any error aborts the parse; there is no partial
/// stylesheet recovery.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A token appeared where the grammar does not allow it.
    #[error("{message} ({location})")]
    Syntax {
        message: String,
        location: SourceLocation,
    },

    /// A property name that the registry does not know.
    #[error("Unknown property \"{property}\" ({location})")]
    UnknownProperty {
        property: String,
        location: SourceLocation,
    },

    /// A declaration value that does not match its property's grammar.
    #[error("{message} for property \"{property}\" ({location})")]
    InvalidValue {
        property: String,
        message: String,
        location: SourceLocation,
    },

    /// A selector that violates the selector shape rules.
    #[error("Invalid selector \"{selector}\": {source} ({location})")]
    InvalidSelector {
        selector: String,
        #[source]
        source: SelectorError,
        location: SourceLocation,
    },

    /// Zoom shorthand used under a projection it cannot be converted for.
    #[error(
        "Map projection is not web mercator, so zoom shorthand cannot be converted to scale denominators ({location})"
    )]
    Projection { location: SourceLocation },

    /// File I/O error.
    #[error("Failed to read stylesheet '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a syntax error.
    pub fn syntax(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::Syntax {
            message: message.into(),
            location,
        }
    }

    /// Create a syntax error for a token found in the wrong context.
    pub fn unexpected(token: &Token, context: &str) -> Self {
        Self::syntax(format!("Unexpected {token} {context}"), token.location)
    }

    /// Create an end-of-input error.
    pub fn unexpected_end(context: &str, location: SourceLocation) -> Self {
        Self::syntax(format!("Unexpected end of input {context}"), location)
    }

    /// Create an unknown property error.
    pub fn unknown_property(property: impl Into<String>, location: SourceLocation) -> Self {
        Self::UnknownProperty {
            property: property.into(),
            location,
        }
    }

    /// Create a value error.
    pub fn invalid_value(
        property: impl Into<String>,
        message: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self::InvalidValue {
            property: property.into(),
            message: message.into(),
            location,
        }
    }

    /// Wrap a selector error, routing projection failures to [`Error::Projection`].
    pub fn selector(selector: impl Into<String>, source: SelectorError, location: SourceLocation) -> Self {
        match source {
            SelectorError::ProjectionNotMercator => Self::Projection { location },
            source => Self::InvalidSelector {
                selector: selector.into(),
                source,
                location,
            },
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Source position of the failure, if it came from parsing.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            Self::Syntax { location, .. }
            | Self::UnknownProperty { location, .. }
            | Self::InvalidValue { location, .. }
            | Self::InvalidSelector { location, .. }
            | Self::Projection { location } => Some(*location),
            Self::Io { .. } => None,
        }
    }
}

/// Ways a selector can violate its shape rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// No elements at all.
    #[error("selector is empty")]
    Empty,

    /// More than two elements.
    #[error("selector has {0} elements, at most 2 are allowed")]
    TooManyElements(usize),

    /// First element does not start with `Map`, `Layer`, an id, a class or `*`.
    #[error("selector must start with Map, Layer, an id, a class or '*', found '{0}'")]
    Unrooted(String),

    /// Second element carries ids, classes or attribute tests.
    #[error("descendant element may not carry ids, classes or attribute tests")]
    QualifiedDescendant,

    /// A zoom test whose value is not a known zoom level.
    #[error("zoom level {0} is not between 1 and 22")]
    InvalidZoom(String),

    /// A `zoom!=N` test, which has no scale-denominator equivalent.
    #[error("zoom shorthand cannot be negated with \"!=\"")]
    ZoomInequality,

    /// Zoom shorthand without a web mercator projection.
    #[error("zoom shorthand requires a web mercator projection")]
    ProjectionNotMercator,
}
