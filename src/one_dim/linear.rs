//! Two-point linear interpolation, the primitive every stage reduces to.

use num_traits::{Float, ToPrimitive};

use crate::error::{Error, Result};

/// Linear interpolation between `(x_low, y_low)` and `(x_high, y_high)`
/// evaluated at `x`.
///
/// The operation order is fixed as
/// `y_low + ((x - x_low) * (y_high - y_low)) / (x_high - x_low)`
/// so that results are reproducible bit-for-bit.
///
/// # Errors
/// * If `x_high == x_low`. Callers holding a collapsed [`Bracket`](super::Bracket)
///   must carry the low value forward instead; reaching this is a logic defect.
#[inline]
pub fn interpolate<T: Float>(x: T, x_low: T, y_low: T, x_high: T, y_high: T) -> Result<T> {
    if x_high == x_low {
        return Err(Error::DivisionGuardViolation {
            low: <T as ToPrimitive>::to_f64(&x_low).unwrap_or(f64::NAN),
            high: <T as ToPrimitive>::to_f64(&x_high).unwrap_or(f64::NAN),
        });
    }

    Ok(y_low + ((x - x_low) * (y_high - y_low)) / (x_high - x_low))
}
