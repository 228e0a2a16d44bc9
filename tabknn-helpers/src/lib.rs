//! Tabular data model shared by the classifiers of this workspace.
//!
//! A [`Table`] is a list of fixed-length [`Row`]s of [`Cell`]s, where every
//! cell is either a number of the table's numeric type or a piece of text.
//! Tables are usually built from CSV text, with each field typed on its own.

use num_traits::{Num, NumCast, ToPrimitive};

use std::fmt::{Debug, Display};
use std::str::FromStr;

// Include submodules
mod cell;
mod distance;
mod error;
mod format;
mod ingest;
mod row;
mod table;

// Re-export types from submodules
pub use cell::{Cell, CellKind, MISSING_TEXT};
pub use distance::Metric;
pub use error::{DataError, Result};
pub use format::NumberFormat;
pub use row::Row;
pub use table::Table;

/// Numeric type a [`Table`] can hold.
///
/// Anything with arithmetic, ordering and a textual parse qualifies, so the
/// plain float and integer primitives all work.
pub trait Number:
    Num + NumCast + ToPrimitive + PartialOrd + Copy + FromStr + Display + Debug + 'static
{
    /// Distance between two values, widened to `f64`.
    ///
    /// The larger operand is always the minuend. Operands of the same sign
    /// are subtracted in `Self`, which cannot overflow; operands of opposite
    /// signs are widened first, since e.g. `100i8 - -100i8` does not fit.
    fn abs_diff_f64(self, other: Self) -> Option<f64> {
        let zero = Self::zero();
        let (high, low) = if self >= other {
            (self, other)
        } else {
            (other, self)
        };
        if (high >= zero) == (low >= zero) {
            (high - low).to_f64()
        } else {
            Some(high.to_f64()? - low.to_f64()?)
        }
    }
}

impl<T> Number for T where
    T: Num + NumCast + ToPrimitive + PartialOrd + Copy + FromStr + Display + Debug + 'static
{
}
