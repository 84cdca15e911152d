//! Typed failures for bracketing, reduction, and table lookups.

use thiserror::Error;

use crate::multilinear::Axis;
use crate::table::GridPoint;

/// Errors produced while bracketing inputs, reducing corner values,
/// or fetching tabulated scalars from a [`TableStore`](crate::TableStore).
///
/// None of these are retried; the tables are static, so a lookup that
/// failed once will fail again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A column had no tabulated values to bracket against.
    #[error("Table column is empty")]
    EmptyTable,

    /// The store has no tables for this aircraft model.
    #[error("No tables found for model '{model}'")]
    TableNotFound { model: String },

    /// No reference energy is tabulated at this exact grid point.
    #[error("No reference braking energy tabulated for {point} in model '{model}'")]
    MissingCorner { model: String, point: GridPoint },

    /// A single-axis lookup table has no row for this key.
    #[error("No row in table '{table}' for key {key} in model '{model}'")]
    MissingRow {
        model: String,
        table: &'static str,
        key: f64,
    },

    /// Input outside the tabulated range while clamping is disabled.
    #[error("Value {value} is outside the tabulated range [{low}, {high}]")]
    ValueOutOfRange { value: f64, low: f64, high: f64 },

    /// Input could not be placed on any axis.
    #[error("Input value is NaN")]
    NotANumber,

    /// A column supplied by the store contains NaN entries.
    #[error("Table column contains NaN entries")]
    InvalidColumn,

    /// A zero-width bracket reached the interpolation primitive.
    /// This is an internal defect, not a data problem.
    #[error("Zero-width bracket [{low}, {high}] passed to linear interpolation")]
    DivisionGuardViolation { low: f64, high: f64 },

    /// A reduction stage was asked to remove an axis it no longer holds.
    #[error("Axis {axis:?} is not present in this reduction stage")]
    AxisAlreadyReduced { axis: Axis },

    /// Backend-specific failure reported by a table store implementation.
    #[error("Table store failure: {message}")]
    Store { message: String },
}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::Error;
    use crate::table::GridPoint;

    #[test]
    fn test_messages_carry_context() {
        let e = Error::MissingCorner {
            model: "B_737_800WSFP1".into(),
            point: GridPoint::new(120.0, 50.0, 10.0, 2.0),
        };
        let msg = e.to_string();
        assert!(msg.contains("B_737_800WSFP1"));
        assert!(msg.contains("speed 120"));

        let e = Error::ValueOutOfRange {
            value: 95.0,
            low: 100.0,
            high: 140.0,
        };
        assert_eq!(
            e.to_string(),
            "Value 95 is outside the tabulated range [100, 140]"
        );
    }
}
