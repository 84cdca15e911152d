//! Aircraft brake energy and cooling time from tabulated performance data.
//!
//! Performance tables only exist at discrete grid points. Every derived value
//! is produced by bracketing each input between its two nearest tabulated
//! values and interpolating between the table entries at those brackets:
//!
//! * reference brake energy is interpolated over a four-axis cell
//!   (speed, weight, temperature, altitude) from its 16 corner values,
//! * adjusted brake energy is interpolated along the reference energy axis
//!   for one braking event and reverse thrust setting,
//! * cooling time is interpolated along the adjusted energy axis for one
//!   brake category.
//!
//! Tables are read through the [`TableStore`] trait; storage is up to the caller.
//!
//! # Edge behavior
//! Inputs that hit a tabulated value exactly collapse their bracket, and the
//! matching stage carries the tabulated value forward instead of dividing by
//! a zero-width interval. Inputs outside the table are clamped onto its edge
//! and flagged as extrapolated, or rejected, depending on [`OutOfRangePolicy`].
//!
//! # Example: Four-Axis Reduction
//! ```rust
//! use brake_cooling::bracket;
//! use brake_cooling::multilinear::{reduce, AxisBrackets, Corner, NCORNERS};
//!
//! // One bracket per axis
//! let brackets = AxisBrackets {
//!     speed: bracket(130.0, &[100.0, 120.0, 140.0])?,
//!     weight: bracket(55.0, &[40.0, 50.0, 60.0])?,
//!     temperature: bracket(10.0, &[0.0, 10.0, 20.0])?,
//!     altitude: bracket(1.0, &[0.0, 2.0])?,
//! };
//!
//! // Values at the cell corners, in canonical order
//! let mut corners = [0.0; NCORNERS];
//! for c in Corner::all() {
//!     let [s, w, t, a] = c.select(&brackets);
//!     corners[c.index()] = 0.1 * s + 0.5 * w + 0.02 * t + 0.25 * a;
//! }
//!
//! let energy: f64 = reduce(corners, &brackets)?;
//! assert!((energy - 40.95).abs() < 1e-12);
//! # Ok::<(), brake_cooling::Error>(())
//! ```
// These "needless" range loops read closer to the index arithmetic they implement
#![allow(clippy::needless_range_loop)]

pub mod error;
pub use error::{Error, Result};

pub mod one_dim;
pub use one_dim::{bracket, bracket_with, linear::interpolate, Bracket, Extrap, OutOfRangePolicy};

pub mod multilinear;
pub use multilinear::{Axis, AxisBrackets, Branch, Corner};

pub mod table;
pub use table::{BrakeCategory, BrakingEvent, Column, GridPoint, ReverseThrust, TableStore};

pub mod engine;
pub use engine::{
    CoolingSchedule, CoolingTime, Engine, EngineConfig, Estimate, LandingInputs, Outcome,
    ScheduleEntry,
};

pub mod utils;

#[cfg(test)]
pub(crate) mod testing;
