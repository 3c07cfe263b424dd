//! Rendering compiled stylesheets for output.

use std::fmt::Write as _;
use std::path::Path;

use mapstyle_cascade::parser::stylesheet_rulesets;
use mapstyle_cascade::rules::{Declaration, Ruleset, Stylesheet};
use mapstyle_cascade::{Error, ParserConfig, PropertyRegistry};
use serde::Serialize;

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// Stylesheet-like text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Errors from rendering a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// JSON serialization failed.
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// One flattened declaration, in cascade order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclarationRecord {
    pub selector: String,
    pub property: &'static str,
    pub group: &'static str,
    pub value: String,
    pub important: bool,
    pub specificity: [u32; 3],
    pub line: u32,
    pub column: u32,
}

impl From<&Declaration> for DeclarationRecord {
    fn from(declaration: &Declaration) -> Self {
        let specificity = declaration.sort_key.specificity;
        let position = declaration.position();
        Self {
            selector: declaration.selector.to_string(),
            property: declaration.property.name(),
            group: declaration.property.group(),
            value: declaration.value.to_string(),
            important: declaration.is_important(),
            specificity: [specificity.ids(), specificity.names(), specificity.tests()],
            line: position.line,
            column: position.column,
        }
    }
}

/// One `property: value` entry of a ruleset block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryRecord {
    pub property: &'static str,
    pub value: String,
    pub important: bool,
    pub line: u32,
    pub column: u32,
}

/// A selector group and its block, in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RulesetRecord {
    pub selectors: Vec<String>,
    pub declarations: Vec<EntryRecord>,
}

impl From<&Ruleset> for RulesetRecord {
    fn from(ruleset: &Ruleset) -> Self {
        Self {
            selectors: ruleset.selectors.iter().map(|s| s.to_string()).collect(),
            declarations: ruleset
                .declarations
                .iter()
                .map(|entry| EntryRecord {
                    property: entry.property.name(),
                    value: entry.value.to_string(),
                    important: entry.value.important,
                    line: entry.location.line,
                    column: entry.location.column,
                })
                .collect(),
        }
    }
}

/// A compiled stylesheet, ready to print.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Report {
    /// The ordered declaration list.
    Declarations(Vec<DeclarationRecord>),
    /// The rulesets as written.
    Rulesets(Vec<RulesetRecord>),
}

impl Report {
    /// Report a compiled stylesheet.
    pub fn from_stylesheet(sheet: &Stylesheet) -> Self {
        Self::Declarations(sheet.iter().map(DeclarationRecord::from).collect())
    }

    /// Report parsed rulesets.
    pub fn from_rulesets(rulesets: &[Ruleset]) -> Self {
        Self::Rulesets(rulesets.iter().map(RulesetRecord::from).collect())
    }

    /// Compile a stylesheet file into a report.
    pub fn from_file(path: &Path, config: ParserConfig, rulesets: bool) -> Result<Self, Error> {
        if !rulesets {
            return Stylesheet::from_file(path, config).map(|sheet| Self::from_stylesheet(&sheet));
        }

        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let rulesets = stylesheet_rulesets(&source, PropertyRegistry::standard(), config)?;
        Ok(Self::from_rulesets(&rulesets))
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        match self {
            Self::Declarations(records) => records.len(),
            Self::Rulesets(records) => records.len(),
        }
    }

    /// Whether the report has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render in the given format.
    pub fn render(&self, format: ReportFormat) -> Result<String, ReportError> {
        match format {
            ReportFormat::Text => Ok(self.to_text()),
            ReportFormat::Json => {
                let mut json = serde_json::to_string_pretty(self)?;
                json.push('\n');
                Ok(json)
            }
        }
    }

    fn to_text(&self) -> String {
        let mut out = String::new();
        match self {
            Self::Declarations(records) => {
                for r in records {
                    let important = if r.important { " !important" } else { "" };
                    let [a, b, c] = r.specificity;
                    let _ = writeln!(
                        out,
                        "{} {{ {}: {}{important}; }} /* ({a},{b},{c}) line {}, column {} */",
                        r.selector, r.property, r.value, r.line, r.column
                    );
                }
            }
            Self::Rulesets(records) => {
                for r in records {
                    let _ = writeln!(out, "{} {{", r.selectors.join(", "));
                    for entry in &r.declarations {
                        let important = if entry.important { " !important" } else { "" };
                        let _ = writeln!(out, "    {}: {}{important};", entry.property, entry.value);
                    }
                    let _ = writeln!(out, "}}");
                }
            }
        }
        out
    }
}
