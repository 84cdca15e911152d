//! Locating a query value between the two nearest tabulated values
//! on a single axis.
//!
//! A [`Bracket`] is built once per query value from a sorted column and
//! feeds every later interpolation on that axis. Exact hits collapse the
//! bracket to zero width, which downstream stages treat as "carry the low
//! value forward" rather than interpolating.

pub mod linear;

use num_traits::{Float, ToPrimitive};

use crate::error::{Error, Result};

/// Where a query value falls relative to the tabulated range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Extrap {
    Inside,
    OutsideLow,
    OutsideHigh,
}

/// What to do with a query outside the tabulated range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutOfRangePolicy {
    /// Collapse the bracket onto the nearest endpoint and flag it as extrapolated.
    #[default]
    Clamp,
    /// Fail with [`Error::ValueOutOfRange`].
    Reject,
}

/// The pair of tabulated values surrounding a query on one axis.
///
/// Invariant: `low <= input <= high`. When `input` is tabulated, or the
/// query was clamped to an endpoint, `low == high == input`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bracket<T> {
    requested: T,
    input: T,
    low: T,
    high: T,
    extrap: Extrap,
}

impl<T: Float> Bracket<T> {
    /// The value actually used for interpolation, after any clamping.
    #[inline]
    pub fn input(&self) -> T {
        self.input
    }

    /// The value the caller asked for, before clamping.
    #[inline]
    pub fn requested(&self) -> T {
        self.requested
    }

    #[inline]
    pub fn low(&self) -> T {
        self.low
    }

    #[inline]
    pub fn high(&self) -> T {
        self.high
    }

    #[inline]
    pub fn extrap(&self) -> Extrap {
        self.extrap
    }

    /// Whether the query was clamped onto an endpoint.
    #[inline]
    pub fn is_extrapolated(&self) -> bool {
        self.extrap != Extrap::Inside
    }

    /// Whether the bracket has collapsed to a single tabulated value.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.low == self.high
    }

    /// The endpoints worth fetching data for: one if collapsed, else two.
    pub fn endpoints(&self) -> impl Iterator<Item = T> {
        let high = (!self.is_exact()).then_some(self.high);
        core::iter::once(self.low).chain(high)
    }

    /// Interpolate between the values tabulated at `low` and `high`.
    ///
    /// A collapsed bracket returns `y_low` unchanged without touching
    /// the division in [`linear::interpolate`].
    #[inline]
    pub fn interp(&self, y_low: T, y_high: T) -> Result<T> {
        if self.is_exact() {
            return Ok(y_low);
        }
        linear::interpolate(self.input, self.low, y_low, self.high, y_high)
    }
}

/// Bracket `value` against an ascending `column`, clamping out-of-range
/// queries onto the nearest endpoint.
///
/// # Errors
/// * If `column` is empty
/// * If `value` is NaN
pub fn bracket<T: Float>(value: T, column: &[T]) -> Result<Bracket<T>> {
    bracket_with(value, column, OutOfRangePolicy::Clamp)
}

/// Bracket `value` against an ascending `column` under an explicit
/// out-of-range policy.
///
/// Assumes `column` is strictly increasing; see
/// [`normalize_column`](crate::utils::normalize_column).
///
/// # Errors
/// * If `column` is empty
/// * If `column` has NaN entries at its ends, or is unsorted enough to hide them
/// * If `value` is NaN
/// * If `value` is outside the column and `policy` is [`OutOfRangePolicy::Reject`]
pub fn bracket_with<T: Float>(
    value: T,
    column: &[T],
    policy: OutOfRangePolicy,
) -> Result<Bracket<T>> {
    let (first, last) = match (column.first(), column.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Err(Error::EmptyTable),
    };
    if first.is_nan() || last.is_nan() {
        return Err(Error::InvalidColumn);
    }
    if value.is_nan() {
        return Err(Error::NotANumber);
    }

    let extrap = match value {
        x if x < first => Extrap::OutsideLow,
        x if x > last => Extrap::OutsideHigh,
        _ => Extrap::Inside,
    };

    if extrap != Extrap::Inside {
        if policy == OutOfRangePolicy::Reject {
            return Err(Error::ValueOutOfRange {
                value: as_f64(value),
                low: as_f64(first),
                high: as_f64(last),
            });
        }
        let edge = match extrap {
            Extrap::OutsideLow => first,
            _ => last,
        };
        return Ok(Bracket {
            requested: value,
            input: edge,
            low: edge,
            high: edge,
            extrap,
        });
    }

    // First entry not below `value`. For a sorted column with
    // first <= value <= last this is a valid index, and only 0 when
    // value == first.
    let i = column.partition_point(|x| *x < value);
    let high = *column.get(i).ok_or(Error::InvalidColumn)?;
    let (low, high) = if high == value {
        (value, value)
    } else {
        let low = i
            .checked_sub(1)
            .and_then(|j| column.get(j))
            .ok_or(Error::InvalidColumn)?;
        (*low, high)
    };

    Ok(Bracket {
        requested: value,
        input: value,
        low,
        high,
        extrap,
    })
}

#[inline]
fn as_f64<T: Float>(v: T) -> f64 {
    <T as ToPrimitive>::to_f64(&v).unwrap_or(f64::NAN)
}
