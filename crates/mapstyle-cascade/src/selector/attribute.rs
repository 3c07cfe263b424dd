//! Attribute tests, the `[property op value]` part of a selector.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Bound;

/// Property name of the renderer-native scale predicate.
pub const SCALE_DENOMINATOR: &str = "scale-denominator";

/// Comparison operator of an attribute test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `>=`
    Ge,
    /// `>`
    Gt,
}

impl Operator {
    /// Parse the operator's source spelling.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "<" => Self::Lt,
            "<=" => Self::Le,
            "=" => Self::Eq,
            "!=" => Self::Ne,
            ">=" => Self::Ge,
            ">" => Self::Gt,
            _ => return None,
        })
    }

    /// The operator's source spelling.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Ge => ">=",
            Self::Gt => ">",
        }
    }

    /// Ordering comparisons, as opposed to (in)equality.
    pub fn is_ranged(self) -> bool {
        matches!(self, Self::Lt | Self::Le | Self::Ge | Self::Gt)
    }

    /// Evaluate `lhs op rhs`.
    pub fn evaluate(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
            Self::Ge => lhs >= rhs,
            Self::Gt => lhs > rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Right-hand side of an attribute test.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Numeric literal.
    Number(f64),
    /// Quoted string literal, without quotes.
    String(String),
}

impl AttributeValue {
    /// The numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::String(_) => None,
        }
    }

    /// Order two values of the same type; numbers and strings are incomparable.
    fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b),
            (Self::String(a), Self::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "\"{s}\""),
        }
    }
}

/// A single `[property op value]` predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeTest {
    /// Tested property, e.g. `zoom` or `highway`.
    pub property: String,
    /// Comparison operator.
    pub op: Operator,
    /// Comparison value.
    pub value: AttributeValue,
}

/// The set of values a test admits, as an interval or a punctured line.
enum Admits<'a> {
    Interval(Bound<&'a AttributeValue>, Bound<&'a AttributeValue>),
    AllBut(&'a AttributeValue),
}

impl AttributeTest {
    /// Create an attribute test.
    pub fn new(property: impl Into<String>, op: Operator, value: impl Into<AttributeValue>) -> Self {
        Self {
            property: property.into(),
            op,
            value: value.into(),
        }
    }

    /// Uses `<`, `<=`, `>=` or `>`.
    pub fn is_ranged(&self) -> bool {
        self.op.is_ranged()
    }

    /// Uses `=` or `!=`.
    pub fn is_simple(&self) -> bool {
        matches!(self.op, Operator::Eq | Operator::Ne)
    }

    /// Tests the renderer's scale denominator.
    pub fn is_map_scaled(&self) -> bool {
        self.property == SCALE_DENOMINATOR
    }

    /// Compares against a number rather than a string.
    pub fn is_numeric(&self) -> bool {
        matches!(self.value, AttributeValue::Number(_))
    }

    /// The opposite test: `=` becomes `!=` and vice versa.
    ///
    /// Only simple tests have an inverse; ranged tests return `None`.
    pub fn inverse(&self) -> Option<Self> {
        let op = match self.op {
            Operator::Eq => Operator::Ne,
            Operator::Ne => Operator::Eq,
            _ => return None,
        };
        Some(Self {
            property: self.property.clone(),
            op,
            value: self.value.clone(),
        })
    }

    /// Check a concrete scale denominator against this test.
    ///
    /// Tests that are not ranged are always in range. A ranged test
    /// against a string never is.
    pub fn in_range(&self, scale_denominator: f64) -> bool {
        if !self.is_ranged() {
            return true;
        }
        match self.value.as_number() {
            Some(value) => self.op.evaluate(scale_denominator, value),
            None => false,
        }
    }

    /// Return false if this test provably contradicts any test in `tests`.
    ///
    /// Only tests on the same property are compared. The check reasons
    /// over the interval each operator admits; where no contradiction can
    /// be shown (for instance `!=` against a range, or a number against a
    /// string) the tests are considered compatible.
    pub fn is_compatible<'a>(&self, tests: impl IntoIterator<Item = &'a AttributeTest>) -> bool {
        tests
            .into_iter()
            .filter(|other| other.property == self.property)
            .all(|other| overlaps(&self.admits(), &other.admits()))
    }

    fn admits(&self) -> Admits<'_> {
        use Bound::*;
        let v = &self.value;
        match self.op {
            Operator::Lt => Admits::Interval(Unbounded, Excluded(v)),
            Operator::Le => Admits::Interval(Unbounded, Included(v)),
            Operator::Eq => Admits::Interval(Included(v), Included(v)),
            Operator::Ne => Admits::AllBut(v),
            Operator::Ge => Admits::Interval(Included(v), Unbounded),
            Operator::Gt => Admits::Interval(Excluded(v), Unbounded),
        }
    }
}

fn overlaps(a: &Admits<'_>, b: &Admits<'_>) -> bool {
    match (a, b) {
        (Admits::AllBut(_), Admits::AllBut(_)) => true,
        (Admits::AllBut(hole), Admits::Interval(lower, upper))
        | (Admits::Interval(lower, upper), Admits::AllBut(hole)) => {
            // Only a single point can fall entirely into the hole.
            match (lower, upper) {
                (Bound::Included(lo), Bound::Included(hi)) => {
                    !(lo.compare(hi) == Some(Ordering::Equal)
                        && lo.compare(hole) == Some(Ordering::Equal))
                }
                _ => true,
            }
        }
        (Admits::Interval(a_lower, a_upper), Admits::Interval(b_lower, b_upper)) => {
            !lower_exceeds_upper(*a_lower, *b_upper) && !lower_exceeds_upper(*b_lower, *a_upper)
        }
    }
}

/// True when nothing can be both above `lower` and below `upper`.
fn lower_exceeds_upper(lower: Bound<&AttributeValue>, upper: Bound<&AttributeValue>) -> bool {
    let (lower_value, lower_open) = match lower {
        Bound::Included(v) => (v, false),
        Bound::Excluded(v) => (v, true),
        Bound::Unbounded => return false,
    };
    let (upper_value, upper_open) = match upper {
        Bound::Included(v) => (v, false),
        Bound::Excluded(v) => (v, true),
        Bound::Unbounded => return false,
    };
    match lower_value.compare(upper_value) {
        Some(Ordering::Greater) => true,
        Some(Ordering::Equal) => lower_open || upper_open,
        _ => false,
    }
}

impl fmt::Display for AttributeTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}{}{}]", self.property, self.op, self.value)
    }
}
