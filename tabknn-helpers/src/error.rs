use thiserror::Error;

/// Errors returned when building or reading tables.
#[derive(Debug, Error)]
pub enum DataError {
    /// A row or column index fell outside the valid range.
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the indexed dimension.
        len: usize,
    },

    /// More values were supplied than the table has fields.
    #[error("{given} values exceed the field count of {field_count}")]
    TooManyValues {
        /// Number of values supplied.
        given: usize,
        /// Fields in the table.
        field_count: usize,
    },

    /// A row of the wrong length was pushed into a table.
    #[error("row of length {found} does not fit a table with {expected} fields")]
    RowLengthMismatch {
        /// Field count of the table.
        expected: usize,
        /// Length of the rejected row.
        found: usize,
    },

    /// Two feature vectors of different lengths were compared.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Length of the first vector.
        expected: usize,
        /// Length of the second vector.
        found: usize,
    },

    /// A slot that had to be numeric holds text or nothing at all.
    #[error("slot {index} is not numeric")]
    NonNumeric {
        /// Offending slot.
        index: usize,
    },

    /// Opening the CSV source failed.
    #[error("failed to open csv input: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader rejected its input, e.g. invalid UTF-8.
    #[error("failed to read csv input: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, DataError>;
