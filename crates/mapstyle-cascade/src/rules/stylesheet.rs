//! Compiled stylesheets.

use std::path::{Path, PathBuf};

use crate::config::ParserConfig;
use crate::properties::PropertyRegistry;
use crate::resolve::{ComputedStyle, StyleContext, compute_style};
use crate::rules::Declaration;
use crate::{Error, Result};

/// A stylesheet compiled to its ordered declaration list.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    /// Declarations in cascade order.
    pub declarations: Vec<Declaration>,
    /// Source file path, when loaded from disk.
    pub source_path: Option<PathBuf>,
}

impl Stylesheet {
    /// Compile stylesheet text with the standard property table.
    pub fn from_css(css: &str, config: ParserConfig) -> Result<Self> {
        Self::parse(css, PropertyRegistry::standard(), config)
    }

    /// Compile stylesheet text against a specific property table.
    pub fn parse(css: &str, registry: &PropertyRegistry, config: ParserConfig) -> Result<Self> {
        let declarations = crate::parser::stylesheet_declarations(css, registry, config)?;
        Ok(Self {
            declarations,
            source_path: None,
        })
    }

    /// Load and compile a stylesheet file.
    pub fn from_file(path: impl AsRef<Path>, config: ParserConfig) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let mut sheet = Self::from_css(&content, config)?;
        sheet.source_path = Some(path.to_path_buf());
        Ok(sheet)
    }

    /// Get the number of declarations.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Check if the stylesheet is empty.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterate over declarations in cascade order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    /// Resolve the cascade for one context.
    pub fn compute_style(&self, context: &StyleContext<'_>) -> ComputedStyle<'_> {
        compute_style(&self.declarations, context)
    }
}

impl<'a> IntoIterator for &'a Stylesheet {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.iter()
    }
}
