use crate::cell::Cell;
use crate::error::{DataError, Result};
use crate::row::Row;
use crate::Number;
use ndarray::Array2;

/// An ordered collection of [`Row`]s that all have `field_count` slots, with
/// an optional label per column.
///
/// Column removal and row selection return new tables; the only in-place
/// changes are appending rows and setting labels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Table<T: Number> {
    field_count: usize,
    rows: Vec<Row<T>>,
    labels: Vec<Option<String>>,
}

impl<T: Number> Table<T> {
    /// Creates an empty table with `field_count` columns and no labels.
    pub fn new(field_count: usize) -> Self {
        Table {
            field_count,
            rows: Vec::new(),
            labels: vec![None; field_count],
        }
    }

    // Every row must already have `field_count` slots.
    pub(crate) fn from_rows_unchecked(field_count: usize, rows: Vec<Row<T>>) -> Self {
        Table {
            field_count,
            rows,
            labels: vec![None; field_count],
        }
    }

    pub fn field_count(&self) -> usize {
        self.field_count
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Assigns column labels from the left. Labels beyond `field_count` are
    /// ignored; columns without a label keep their current one.
    pub fn set_labels<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (slot, label) in self.labels.iter_mut().zip(labels) {
            *slot = Some(label.into());
        }
    }

    /// The label of column `index`, if one was set.
    pub fn label(&self, index: usize) -> Result<Option<&str>> {
        self.labels
            .get(index)
            .map(Option::as_deref)
            .ok_or(DataError::IndexOutOfRange {
                index,
                len: self.field_count,
            })
    }

    /// Appends a row built from `values`. Trailing slots that receive no
    /// value stay unset.
    ///
    /// # Errors
    ///
    /// Returns `DataError::TooManyValues` if more than `field_count` values
    /// are supplied.
    pub fn add_row<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = Cell<T>>,
    {
        let values: Vec<Cell<T>> = values.into_iter().collect();
        if values.len() > self.field_count {
            return Err(DataError::TooManyValues {
                given: values.len(),
                field_count: self.field_count,
            });
        }
        let mut row = Row::new(self.field_count);
        for (index, cell) in values.into_iter().enumerate() {
            row.set(index, cell)?;
        }
        self.rows.push(row);
        Ok(())
    }

    /// Appends an already built row.
    ///
    /// # Errors
    ///
    /// Returns `DataError::RowLengthMismatch` unless `row.len() == field_count`.
    pub fn push_row(&mut self, row: Row<T>) -> Result<()> {
        if row.len() != self.field_count {
            return Err(DataError::RowLengthMismatch {
                expected: self.field_count,
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn row(&self, index: usize) -> Result<&Row<T>> {
        self.rows.get(index).ok_or(DataError::IndexOutOfRange {
            index,
            len: self.rows.len(),
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row<T>> + '_ {
        self.rows.iter()
    }

    /// Copy of column `index`, one slot per row.
    pub fn column(&self, index: usize) -> Result<Vec<Option<Cell<T>>>> {
        if index >= self.field_count {
            return Err(DataError::IndexOutOfRange {
                index,
                len: self.field_count,
            });
        }
        self.rows
            .iter()
            .map(|row| row.get(index).map(|cell| cell.cloned()))
            .collect()
    }

    /// New table without column `index`. Rows, remaining columns and their
    /// labels keep their order; `self` is left untouched.
    pub fn remove_column(&self, index: usize) -> Result<Table<T>> {
        if index >= self.field_count {
            return Err(DataError::IndexOutOfRange {
                index,
                len: self.field_count,
            });
        }
        let rows = self
            .rows
            .iter()
            .map(|row| row.without_index(index))
            .collect::<Result<Vec<_>>>()?;
        let mut labels = self.labels.clone();
        labels.remove(index);
        Ok(Table {
            field_count: self.field_count - 1,
            rows,
            labels,
        })
    }

    /// New table holding copies of the rows at `indices`, in that order.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Table<T>> {
        let rows = indices
            .iter()
            .map(|&index| self.row(index).cloned())
            .collect::<Result<Vec<_>>>()?;
        Ok(Table {
            field_count: self.field_count,
            rows,
            labels: self.labels.clone(),
        })
    }

    /// The whole table as an `ndarray` matrix.
    ///
    /// # Errors
    ///
    /// Returns `DataError::NonNumeric` if any slot is text or unset.
    pub fn to_matrix(&self) -> Result<Array2<T>> {
        let mut values = Vec::with_capacity(self.rows.len() * self.field_count);
        for row in &self.rows {
            values.extend(row.to_numbers()?);
        }
        let found = values.len();
        Array2::from_shape_vec((self.rows.len(), self.field_count), values).map_err(|_| {
            DataError::DimensionMismatch {
                expected: self.rows.len() * self.field_count,
                found,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> Table<i32> {
        let mut table = Table::new(3);
        table.set_labels(["x", "y", "class"]);
        table
            .add_row([Cell::Number(1), Cell::Number(2), Cell::text("cat")])
            .unwrap();
        table
            .add_row([Cell::Number(3), Cell::Number(4), Cell::text("dog")])
            .unwrap();
        table
    }

    #[test]
    fn add_row_pads_missing_values() {
        let mut table: Table<i32> = Table::new(3);
        table.add_row([Cell::Number(1)]).unwrap();
        let row = table.row(0).unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row.get(2).unwrap(), None);
    }

    #[test]
    fn add_row_rejects_extra_values() {
        let mut table: Table<i32> = Table::new(1);
        let result = table.add_row([Cell::Number(1), Cell::Number(2)]);
        assert!(matches!(
            result,
            Err(DataError::TooManyValues { given: 2, field_count: 1 })
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn push_row_checks_length() {
        let mut table: Table<i32> = Table::new(2);
        assert!(table.push_row(Row::from_numbers(&[1, 2])).is_ok());
        assert!(matches!(
            table.push_row(Row::from_numbers(&[1])),
            Err(DataError::RowLengthMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn labels_are_truncated_to_field_count() {
        let mut table: Table<f64> = Table::new(2);
        table.set_labels(["a", "b", "c"]);
        assert_eq!(table.label(0).unwrap(), Some("a"));
        assert_eq!(table.label(1).unwrap(), Some("b"));
        assert!(table.label(2).is_err());

        let mut partial: Table<f64> = Table::new(2);
        partial.set_labels(["only"]);
        assert_eq!(partial.label(1).unwrap(), None);
    }

    #[test]
    fn column_and_row_are_bounds_checked() {
        let table = sample();
        let column = table.column(2).unwrap();
        assert_eq!(column, vec![Some(Cell::text("cat")), Some(Cell::text("dog"))]);
        assert!(matches!(
            table.column(3),
            Err(DataError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(matches!(
            table.row(2),
            Err(DataError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn remove_column_returns_new_table() {
        let table = sample();
        let trimmed = table.remove_column(1).unwrap();
        assert_eq!(trimmed.field_count(), 2);
        assert_eq!(trimmed.label(1).unwrap(), Some("class"));
        assert_eq!(trimmed.row(1).unwrap().text(0).unwrap(), "3");
        assert_eq!(trimmed.row(1).unwrap().text(1).unwrap(), "dog");
        assert_eq!(table.field_count(), 3);
        assert_eq!(table.row(0).unwrap().len(), 3);
    }

    #[test]
    fn select_rows_copies_in_order() {
        let table = sample();
        let picked = table.select_rows(&[1, 0, 1]).unwrap();
        assert_eq!(picked.len(), 3);
        assert_eq!(picked.row(0).unwrap().text(2).unwrap(), "dog");
        assert_eq!(picked.row(1).unwrap().text(2).unwrap(), "cat");
        assert!(table.select_rows(&[5]).is_err());
    }

    #[test]
    fn to_matrix_requires_numbers() {
        let table = sample();
        assert!(matches!(
            table.to_matrix(),
            Err(DataError::NonNumeric { index: 2 })
        ));
        let features = table.remove_column(2).unwrap();
        assert_eq!(features.to_matrix().unwrap(), array![[1, 2], [3, 4]]);
    }
}
