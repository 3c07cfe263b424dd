//! Property value types.

use std::fmt;

use super::Color;

/// An element of a number list: integral when the literal allows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integer literal.
    Int(i64),
    /// Any other numeric literal.
    Float(f64),
}

impl Number {
    /// Parse a numeric literal, preferring the integer form.
    pub fn parse(text: &str) -> Option<Self> {
        if let Ok(int) = text.parse::<i64>() {
            return Some(Self::Int(int));
        }
        text.parse::<f64>().ok().filter(|f| f.is_finite()).map(Self::Float)
    }

    /// The value as a float.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Int(i) => *i as f64,
            Self::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

/// A validated property value, one variant per value grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// Unquoted string contents.
    String(String),
    /// RGB color.
    Color(Color),
    /// The `transparent` keyword, distinct from every RGB color.
    Transparent,
    /// Boolean value.
    Boolean(bool),
    /// Address recovered from a `url(...)` literal.
    Uri(String),
    /// Comma-separated numbers.
    Numbers(Vec<Number>),
    /// One of a property's allowed keywords.
    Keyword(String),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) | Self::Uri(s) | Self::Keyword(s) => f.write_str(s),
            Self::Color(c) => write!(f, "{c}"),
            Self::Transparent => f.write_str("transparent"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Numbers(numbers) => {
                for (i, n) in numbers.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{n}")?;
                }
                Ok(())
            }
        }
    }
}

/// A property value together with its `!important` flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    /// The typed value.
    pub data: PropertyValue,
    /// Whether the declaration carried `!important`.
    pub important: bool,
}

impl Value {
    /// Create a value.
    pub fn new(data: PropertyValue, important: bool) -> Self {
        Self { data, important }
    }

    /// 1 for `!important` values, 0 otherwise; the first cascade sort key.
    pub fn importance(&self) -> u8 {
        u8::from(self.important)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_prefer_integers() {
        assert_eq!(Number::parse("4"), Some(Number::Int(4)));
        assert_eq!(Number::parse("-2"), Some(Number::Int(-2)));
        assert_eq!(Number::parse("2.5"), Some(Number::Float(2.5)));
        assert_eq!(Number::parse("1e2"), Some(Number::Float(100.0)));
        assert_eq!(Number::parse("two"), None);
    }

    #[test]
    fn importance() {
        assert_eq!(Value::new(PropertyValue::Integer(1), true).importance(), 1);
        assert_eq!(Value::new(PropertyValue::Integer(1), false).importance(), 0);
    }

    #[test]
    fn display() {
        let dashes = PropertyValue::Numbers(vec![Number::Int(4), Number::Float(1.5)]);
        assert_eq!(dashes.to_string(), "4,1.5");
        assert_eq!(PropertyValue::Boolean(true).to_string(), "true");
        assert_eq!(PropertyValue::Transparent.to_string(), "transparent");
        assert_eq!(PropertyValue::Color(Color::rgb(255, 0, 0)).to_string(), "#ff0000");
        assert_eq!(PropertyValue::Uri("icons/pin.png".into()).to_string(), "icons/pin.png");
    }

    #[test]
    fn transparent_is_not_black() {
        assert_ne!(PropertyValue::Transparent, PropertyValue::Color(Color::BLACK));
    }
}
