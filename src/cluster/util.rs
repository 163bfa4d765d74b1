use crate::cell::Cell;
use crate::error::{Error, Result};

/// Reject thresholds that cannot define a proximity relation.
pub(crate) fn validate_radius(radius: f64) -> Result<()> {
    if !radius.is_finite() {
        return Err(Error::InvalidParameter {
            name: "radius",
            message: "must be finite",
        });
    }
    if radius <= 0.0 {
        return Err(Error::InvalidParameter {
            name: "radius",
            message: "must be positive",
        });
    }
    Ok(())
}

/// The compatibility predicate: close enough (inclusive) and sharing a label.
#[inline]
pub(crate) fn compatible(a: &Cell, b: &Cell, radius: f64) -> bool {
    a.distance(b) <= radius && a.shares_label(b)
}
