//! Four-axis multilinear interpolation over bracketed grid cells.
//!
//! A cell is described by one [`Bracket`] per [`Axis`]; its 16 vertices are
//! addressed by a [`Corner`], whose canonical index packs the low/high branch
//! of each axis into one bit (speed in bit 0 through altitude in bit 3).
//! Corner values are fetched in ascending index order and reduced one axis
//! at a time by [`reducer`].

pub mod reducer;

pub use reducer::{reduce, Stage};

use num_traits::Float;

use crate::one_dim::Bracket;

/// Number of grid vertices in a four-axis cell.
pub const NCORNERS: usize = 16;

/// The interpolation axes, in reduction order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Speed = 0,
    Weight = 1,
    Temperature = 2,
    Altitude = 3,
}

impl Axis {
    /// All axes, ordered by their bit position in a corner index.
    pub const ALL: [Axis; 4] = [
        Axis::Speed,
        Axis::Weight,
        Axis::Temperature,
        Axis::Altitude,
    ];

    /// Bit position of this axis in a corner index.
    #[inline]
    pub const fn bit(self) -> usize {
        self as usize
    }
}

/// Which end of an axis bracket a corner sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Branch {
    Low,
    High,
}

/// One vertex of a four-axis cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Corner {
    branches: [Branch; 4],
}

impl Corner {
    pub const fn new(speed: Branch, weight: Branch, temperature: Branch, altitude: Branch) -> Self {
        Self {
            branches: [speed, weight, temperature, altitude],
        }
    }

    /// Decode a canonical index; only the low four bits are read.
    pub fn from_index(index: usize) -> Self {
        let mut branches = [Branch::Low; 4];
        for axis in Axis::ALL {
            if index & (1 << axis.bit()) != 0 {
                branches[axis.bit()] = Branch::High;
            }
        }
        Self { branches }
    }

    /// Canonical position of this corner in a flat 16-element array.
    pub fn index(&self) -> usize {
        Axis::ALL
            .iter()
            .filter(|axis| self.branches[axis.bit()] == Branch::High)
            .fold(0, |acc, axis| acc | (1 << axis.bit()))
    }

    #[inline]
    pub fn branch(&self, axis: Axis) -> Branch {
        self.branches[axis.bit()]
    }

    /// All corners in ascending index order.
    pub fn all() -> impl Iterator<Item = Corner> {
        (0..NCORNERS).map(Corner::from_index)
    }

    /// The corner holding the same grid point as this one once collapsed
    /// brackets are taken into account: the high branch of a zero-width
    /// bracket is the same point as its low branch.
    pub fn canonical<T: Float>(&self, brackets: &AxisBrackets<T>) -> Self {
        let mut branches = self.branches;
        for axis in Axis::ALL {
            if brackets.get(axis).is_exact() {
                branches[axis.bit()] = Branch::Low;
            }
        }
        Self { branches }
    }

    /// Grid coordinates of this corner, ordered like [`Axis::ALL`].
    pub fn select<T: Float>(&self, brackets: &AxisBrackets<T>) -> [T; 4] {
        Axis::ALL.map(|axis| {
            let b = brackets.get(axis);
            match self.branch(axis) {
                Branch::Low => b.low(),
                Branch::High => b.high(),
            }
        })
    }
}

/// One bracket per interpolation axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisBrackets<T> {
    pub speed: Bracket<T>,
    pub weight: Bracket<T>,
    pub temperature: Bracket<T>,
    pub altitude: Bracket<T>,
}

impl<T: Float> AxisBrackets<T> {
    #[inline]
    pub fn get(&self, axis: Axis) -> &Bracket<T> {
        match axis {
            Axis::Speed => &self.speed,
            Axis::Weight => &self.weight,
            Axis::Temperature => &self.temperature,
            Axis::Altitude => &self.altitude,
        }
    }

    /// Whether any axis was clamped onto the edge of its table.
    pub fn any_extrapolated(&self) -> bool {
        Axis::ALL.iter().any(|&axis| self.get(axis).is_extrapolated())
    }

    /// Number of distinct grid points the cell spans.
    pub fn distinct_corners(&self) -> usize {
        Axis::ALL
            .iter()
            .filter(|&&axis| !self.get(axis).is_exact())
            .fold(1, |acc, _| acc * 2)
    }
}
