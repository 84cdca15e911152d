//! Conditioning of columns returned by a table store before they are bracketed.
use itertools::Itertools;

use crate::error::{Error, Result};

/// Sort a column ascending and drop repeated values, producing the strictly
/// increasing sequence that bracketing assumes.
///
/// Stores are asked for sorted, unique columns, but nothing stops a query
/// from returning one value per table row; this makes either shape usable.
///
/// # Errors
/// * If any entry is NaN
pub fn normalize_column(values: Vec<f64>) -> Result<Vec<f64>> {
    if values.iter().any(|x| x.is_nan()) {
        return Err(Error::InvalidColumn);
    }
    if is_strictly_increasing(&values) {
        return Ok(values);
    }

    Ok(values.into_iter().sorted_by(f64::total_cmp).dedup().collect())
}

/// Whether every entry is greater than the one before it.
pub fn is_strictly_increasing(values: &[f64]) -> bool {
    values.iter().tuple_windows().all(|(a, b)| b > a)
}
