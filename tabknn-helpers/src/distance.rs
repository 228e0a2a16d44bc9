use crate::error::{DataError, Result};
use crate::row::Row;
use crate::Number;
use ndarray::ArrayView1;

/// Distance used to rank training rows against a query.
///
/// `Euclidean` is the *squared* Euclidean distance: the square root is
/// skipped because it does not change which neighbors are nearest. Callers
/// that need the true magnitude must take `sqrt` themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Metric {
    /// Sum of squared differences.
    #[default]
    Euclidean,
    /// Sum of absolute differences.
    Manhattan,
}

impl Metric {
    /// Distance between two feature vectors.
    ///
    /// Each difference is taken in `T` and widened to `f64` before it is
    /// accumulated.
    ///
    /// # Errors
    ///
    /// Returns `DataError::DimensionMismatch` if the vectors differ in length.
    pub fn distance<T: Number>(&self, a: ArrayView1<T>, b: ArrayView1<T>) -> Result<f64> {
        if a.len() != b.len() {
            return Err(DataError::DimensionMismatch {
                expected: a.len(),
                found: b.len(),
            });
        }
        let mut sum = 0.0;
        for (index, (&x, &y)) in a.iter().zip(b.iter()).enumerate() {
            let diff = x
                .abs_diff_f64(y)
                .ok_or(DataError::NonNumeric { index })?;
            sum += match self {
                Metric::Euclidean => diff * diff,
                Metric::Manhattan => diff,
            };
        }
        Ok(sum)
    }

    /// Distance between two rows whose slots must all be numeric.
    ///
    /// # Errors
    ///
    /// Returns `DataError::NonNumeric` if either row holds text or unset
    /// slots, and `DataError::DimensionMismatch` on a length mismatch.
    pub fn row_distance<T: Number>(&self, a: &Row<T>, b: &Row<T>) -> Result<f64> {
        if a.len() != b.len() {
            return Err(DataError::DimensionMismatch {
                expected: a.len(),
                found: b.len(),
            });
        }
        let a = a.to_array()?;
        let b = b.to_array()?;
        self.distance(a.view(), b.view())
    }
}
