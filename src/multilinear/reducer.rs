//! Dimension-by-dimension reduction of a cell's 16 corner values.
//!
//! Each [`Stage`] tracks which axes its values still span, so pairing
//! low/high entries is derived from the axis being removed rather than from
//! its position in the array. Reducing in [`Axis::ALL`] order always removes
//! the lowest remaining bit, giving 16 -> 8 -> 4 -> 2 -> 1.
//!
//! References
//! * https://en.wikipedia.org/wiki/Bilinear_interpolation#Repeated_linear_interpolation
use num_traits::Float;

use super::{Axis, AxisBrackets, NCORNERS};
use crate::error::{Error, Result};
use crate::one_dim::Bracket;

/// Intermediate values of a reduction, indexed by the remaining axes'
/// branches packed from least to most significant bit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stage<T> {
    /// Remaining axes; entry `k` owns bit `k` of a value index
    axes: [Axis; 4],

    /// Number of live entries in `axes`
    naxes: usize,

    /// Values, of which the first `2^naxes` are live
    vals: [T; NCORNERS],
}

impl<T: Float> Stage<T> {
    /// Start a reduction from corner values in canonical [`Corner`](super::Corner) order.
    pub fn from_corners(corners: [T; NCORNERS]) -> Self {
        Self {
            axes: Axis::ALL,
            naxes: Axis::ALL.len(),
            vals: corners,
        }
    }

    /// Axes the values still span, least significant first.
    #[inline]
    pub fn axes(&self) -> &[Axis] {
        &self.axes[..self.naxes]
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.vals[..1 << self.naxes]
    }

    /// The fully reduced value, once every axis has been removed.
    #[inline]
    pub fn result(&self) -> Option<T> {
        (self.naxes == 0).then_some(self.vals[0])
    }

    /// Remove `axis`, interpolating each low/high pair along it with `bracket`.
    ///
    /// A collapsed bracket carries the low half forward unchanged.
    ///
    /// # Errors
    /// * If `axis` was already removed
    /// * If interpolation fails
    pub fn collapse(&self, axis: Axis, bracket: &Bracket<T>) -> Result<Self> {
        let pos = self
            .axes()
            .iter()
            .position(|&a| a == axis)
            .ok_or(Error::AxisAlreadyReduced { axis })?;
        let stride = 1_usize << pos;
        let n = self.values().len() / 2;

        let mut vals = [T::zero(); NCORNERS];
        for i in 0..n {
            // Reinsert a zero bit for `axis` at `pos` to find the low entry
            let lo = ((i >> pos) << (pos + 1)) | (i & (stride - 1));
            let hi = lo | stride;
            vals[i] = bracket.interp(self.vals[lo], self.vals[hi])?;
        }

        let mut axes = self.axes;
        for k in pos..self.naxes - 1 {
            axes[k] = axes[k + 1];
        }

        Ok(Self {
            axes,
            naxes: self.naxes - 1,
            vals,
        })
    }
}

/// Reduce a cell's corner values to one interpolated value, removing
/// speed, weight, temperature, then altitude.
///
/// `corners` must be in canonical [`Corner`](super::Corner) index order.
///
/// # Errors
/// * If interpolation fails on any stage
pub fn reduce<T: Float>(corners: [T; NCORNERS], brackets: &AxisBrackets<T>) -> Result<T> {
    let mut stage = Stage::from_corners(corners);
    for axis in Axis::ALL {
        stage = stage.collapse(axis, brackets.get(axis))?;
    }

    stage.result().ok_or(Error::AxisAlreadyReduced {
        axis: Axis::Altitude,
    })
}
