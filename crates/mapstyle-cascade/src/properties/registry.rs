//! The table of recognized style properties.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::Property;

/// Value grammar accepted by a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyDescriptor {
    /// A single integral number.
    Integer,
    /// A single number.
    Float,
    /// A single quoted string.
    String,
    /// A `#rgb` or `#rrggbb` color.
    Color,
    /// A color, or the keyword `transparent`.
    ColorOrTransparent,
    /// `true` or `false`.
    Boolean,
    /// A `url(...)` reference.
    Uri,
    /// A comma-separated list of numbers.
    NumberList,
    /// One identifier out of a fixed set.
    Enum(&'static [&'static str]),
    /// Recognized, but no value is accepted.
    Unsupported,
}

impl PropertyDescriptor {
    /// Short description of the accepted grammar, used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "number",
            Self::String => "string",
            Self::Color => "color",
            Self::ColorOrTransparent => "color or transparent",
            Self::Boolean => "boolean",
            Self::Uri => "url",
            Self::NumberList => "number list",
            Self::Enum(_) => "keyword",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Lookup of a property name that is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown property \"{0}\"")]
pub struct UnknownProperty(pub String);

const LINE_JOIN: &[&str] = &["miter", "round", "bevel"];
const LINE_CAP: &[&str] = &["butt", "round", "square"];
const TEXT_ALIGN: &[&str] = &["left", "middle", "right"];

/// Built-in property table, grouped by symbolizer family.
const MAPNIK_PROPERTIES: &[(&str, PropertyDescriptor)] = {
    use PropertyDescriptor::*;
    &[
        // map
        ("map-bgcolor", ColorOrTransparent),
        // polygon symbolizer
        ("polygon-fill", Color),
        ("polygon-gamma", Float),
        ("polygon-opacity", Float),
        ("polygon-meta-output", String),
        ("polygon-meta-writer", String),
        // line symbolizer
        ("line-color", Color),
        ("line-width", Float),
        ("line-opacity", Float),
        ("line-join", Enum(LINE_JOIN)),
        ("line-cap", Enum(LINE_CAP)),
        ("line-dasharray", NumberList),
        ("line-meta-output", String),
        ("line-meta-writer", String),
        // line symbolizer for outlines
        ("outline-color", Color),
        ("outline-width", Float),
        ("outline-opacity", Float),
        ("outline-join", Enum(LINE_JOIN)),
        ("outline-cap", Enum(LINE_CAP)),
        ("outline-dasharray", NumberList),
        ("outline-meta-output", String),
        ("outline-meta-writer", String),
        // line symbolizer for inlines
        ("inline-color", Color),
        ("inline-width", Float),
        ("inline-opacity", Float),
        ("inline-join", Enum(LINE_JOIN)),
        ("inline-cap", Enum(LINE_CAP)),
        ("inline-dasharray", NumberList),
        ("inline-meta-output", String),
        ("inline-meta-writer", String),
        // text symbolizer
        ("text-anchor-dx", Integer),
        ("text-anchor-dy", Integer),
        ("text-align", Enum(TEXT_ALIGN)),
        ("text-vertical-align", Enum(&["top", "middle", "bottom"])),
        ("text-justify-align", Enum(TEXT_ALIGN)),
        ("text-transform", Enum(&["uppercase", "lowercase"])),
        ("text-force-odd-labels", Boolean),
        ("text-face-name", String),
        ("text-fontset", String),
        ("text-size", Integer),
        ("text-ratio", Unsupported),
        ("text-wrap-width", Integer),
        ("text-spacing", Integer),
        ("text-character-spacing", Integer),
        ("text-line-spacing", Integer),
        ("text-label-position-tolerance", Integer),
        ("text-max-char-angle-delta", Integer),
        ("text-fill", Color),
        ("text-halo-fill", Color),
        ("text-halo-radius", Integer),
        ("text-dx", Integer),
        ("text-dy", Integer),
        ("text-avoid-edges", Boolean),
        ("text-min-distance", Integer),
        ("text-allow-overlap", Boolean),
        ("text-placement", Enum(&["point", "line"])),
        ("text-meta-output", String),
        ("text-meta-writer", String),
        // point symbolizer
        ("point-file", Uri),
        ("point-width", Integer),
        ("point-height", Integer),
        ("point-type", Unsupported),
        ("point-allow-overlap", Boolean),
        ("point-meta-output", String),
        ("point-meta-writer", String),
        // raster symbolizer
        ("raster-opacity", Float),
        (
            "raster-mode",
            Enum(&[
                "normal",
                "grain_merge",
                "grain_merge2",
                "multiply",
                "multiply2",
                "divide",
                "divide2",
                "screen",
                "hard_light",
            ]),
        ),
        ("raster-scaling", Enum(&["fast", "bilinear", "bilinear8"])),
        // polygon pattern symbolizer
        ("polygon-pattern-file", Uri),
        ("polygon-pattern-width", Integer),
        ("polygon-pattern-height", Integer),
        ("polygon-pattern-type", Unsupported),
        ("polygon-pattern-meta-output", String),
        ("polygon-pattern-meta-writer", String),
        // line pattern symbolizer
        ("line-pattern-file", Uri),
        ("line-pattern-width", Integer),
        ("line-pattern-height", Integer),
        ("line-pattern-type", Unsupported),
        ("line-pattern-meta-output", String),
        ("line-pattern-meta-writer", String),
        // shield symbolizer; the name comes from the selector instead
        ("shield-name", Unsupported),
        ("shield-face-name", String),
        ("shield-fontset", String),
        ("shield-size", Integer),
        ("shield-fill", Color),
        ("shield-min-distance", Integer),
        ("shield-spacing", Integer),
        ("shield-character-spacing", Integer),
        ("shield-line-spacing", Integer),
        ("shield-text-dx", Integer),
        ("shield-text-dy", Integer),
        ("shield-file", Uri),
        ("shield-width", Integer),
        ("shield-height", Integer),
        ("shield-type", Unsupported),
        ("shield-meta-output", String),
        ("shield-meta-writer", String),
    ]
};

static STANDARD_REGISTRY: OnceLock<PropertyRegistry> = OnceLock::new();

/// Mapping from property name to the value grammar it accepts.
///
/// The registry is read-only once built, so a single instance can be
/// shared by any number of concurrent parses.
#[derive(Debug, Clone, Default)]
pub struct PropertyRegistry {
    descriptors: HashMap<&'static str, PropertyDescriptor>,
}

impl PropertyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in registry of renderer properties.
    pub fn standard() -> &'static PropertyRegistry {
        STANDARD_REGISTRY.get_or_init(|| Self::from_table(MAPNIK_PROPERTIES))
    }

    /// Build a registry from `(name, descriptor)` pairs.
    pub fn from_table(table: &[(&'static str, PropertyDescriptor)]) -> Self {
        Self {
            descriptors: table.iter().copied().collect(),
        }
    }

    /// Register (or replace) a property.
    pub fn insert(&mut self, name: &'static str, descriptor: PropertyDescriptor) {
        self.descriptors.insert(name, descriptor);
    }

    /// Look up the grammar accepted by `name`.
    pub fn descriptor_for(&self, name: &str) -> Result<PropertyDescriptor, UnknownProperty> {
        self.descriptors
            .get(name)
            .copied()
            .ok_or_else(|| UnknownProperty(name.to_string()))
    }

    /// Validate `name` and wrap it as a [`Property`].
    pub fn property(&self, name: &str) -> Result<Property, UnknownProperty> {
        self.descriptors
            .get_key_value(name)
            .map(|(name, descriptor)| Property::new(name, *descriptor))
            .ok_or_else(|| UnknownProperty(name.to_string()))
    }

    /// Check whether `name` is a recognized property.
    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    /// Get the number of registered properties.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Iterate over registered names and descriptors, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, PropertyDescriptor)> + '_ {
        self.descriptors.iter().map(|(name, descriptor)| (*name, *descriptor))
    }
}
