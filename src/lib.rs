//! Table-driven k-nearest-neighbors classification.
//!
//! Re-exports the data model from `tabknn-helpers` and the classifier from
//! `k-nn`, so applications can depend on this crate alone.

pub use k_nn::{ClassColumn, KnnClassifier, KnnConfig, KnnError, TrainTestSplit, split};
pub use tabknn_helpers::{
    Cell, CellKind, DataError, MISSING_TEXT, Metric, Number, NumberFormat, Row, Table,
};
