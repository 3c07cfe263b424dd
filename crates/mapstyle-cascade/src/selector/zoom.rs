//! Conversion of zoom-level shorthand into scale-denominator tests.

use super::{AttributeTest, AttributeValue, Operator, SCALE_DENOMINATOR, Selector};
use crate::SelectorError;

/// Property name of the zoom shorthand.
pub const ZOOM: &str = "zoom";

/// Approximate (min, max) scale denominators of zoom levels 1 to 22 under
/// the spherical (web) mercator projection.
const ZOOM_SCALE_DENOMINATORS: [(f64, f64); 22] = [
    (200_000_000.0, 500_000_000.0),
    (100_000_000.0, 200_000_000.0),
    (50_000_000.0, 100_000_000.0),
    (25_000_000.0, 50_000_000.0),
    (12_500_000.0, 25_000_000.0),
    (6_500_000.0, 12_500_000.0),
    (3_000_000.0, 6_500_000.0),
    (1_500_000.0, 3_000_000.0),
    (750_000.0, 1_500_000.0),
    (400_000.0, 750_000.0),
    (200_000.0, 400_000.0),
    (100_000.0, 200_000.0),
    (50_000.0, 100_000.0),
    (25_000.0, 50_000.0),
    (12_500.0, 25_000.0),
    (5_000.0, 12_500.0),
    (2_500.0, 5_000.0),
    (1_000.0, 2_500.0),
    (500.0, 1_000.0),
    (250.0, 500.0),
    (100.0, 250.0),
    (50.0, 100.0),
];

/// The (min, max) scale denominators of a zoom level, if it is in 1..=22.
pub fn scale_denominators(zoom: u32) -> Option<(f64, f64)> {
    let index = usize::try_from(zoom).ok()?.checked_sub(1)?;
    ZOOM_SCALE_DENOMINATORS.get(index).copied()
}

fn zoom_level(value: &AttributeValue) -> Result<(f64, f64), SelectorError> {
    value
        .as_number()
        .filter(|n| n.fract() == 0.0 && *n >= 1.0 && *n <= 22.0)
        .and_then(|n| scale_denominators(n as u32))
        .ok_or_else(|| SelectorError::InvalidZoom(value.to_string()))
}

impl Selector {
    /// Rewrite `zoom` tests on the first element as `scale-denominator` tests.
    ///
    /// `zoom=N` becomes two tests (`>= min(N)` in place, plus an appended
    /// `< max(N)`); the ranged operators become a single test. `zoom!=N`
    /// is an error. Fails unless `is_mercator` is set, since the lookup
    /// table only holds for web mercator.
    pub fn convert_zoom_tests(&mut self, is_mercator: bool) -> Result<(), SelectorError> {
        let element = self.first_mut();
        let mut appended = Vec::new();

        for test in element.tests.iter_mut().filter(|t| t.property == ZOOM) {
            if !is_mercator {
                return Err(SelectorError::ProjectionNotMercator);
            }

            let (min, max) = zoom_level(&test.value)?;
            let (op, value) = match test.op {
                Operator::Eq => {
                    appended.push(AttributeTest::new(SCALE_DENOMINATOR, Operator::Lt, max));
                    (Operator::Ge, min)
                }
                Operator::Lt => (Operator::Ge, max),
                Operator::Le => (Operator::Ge, min),
                Operator::Ge => (Operator::Lt, max),
                Operator::Gt => (Operator::Lt, min),
                Operator::Ne => return Err(SelectorError::ZoomInequality),
            };

            tracing::trace!(
                target: crate::targets::SELECTOR,
                zoom = %test,
                "converting zoom shorthand"
            );
            test.property = SCALE_DENOMINATOR.to_string();
            test.op = op;
            test.value = AttributeValue::Number(value);
        }

        element.tests.extend(appended);
        Ok(())
    }
}
