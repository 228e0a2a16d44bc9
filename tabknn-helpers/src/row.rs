use crate::cell::{Cell, MISSING_TEXT};
use crate::error::{DataError, Result};
use crate::Number;
use ndarray::Array1;
use std::borrow::Cow;

/// One record of a [`Table`](crate::Table): a fixed number of slots, each
/// holding a [`Cell`] or nothing yet.
///
/// The length is fixed when the row is created. Slots can be overwritten in
/// place but never added or removed; [`Row::without_index`] builds a new,
/// shorter row instead.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Row<T: Number> {
    cells: Vec<Option<Cell<T>>>,
}

impl<T: Number> Row<T> {
    /// Creates a row of `len` unset slots.
    pub fn new(len: usize) -> Self {
        Row {
            cells: vec![None; len],
        }
    }

    /// Creates a fully populated row.
    pub fn from_cells(cells: Vec<Cell<T>>) -> Self {
        Row {
            cells: cells.into_iter().map(Some).collect(),
        }
    }

    pub(crate) fn from_slots(cells: Vec<Option<Cell<T>>>) -> Self {
        Row { cells }
    }

    /// Creates a row of number cells, one per value.
    pub fn from_numbers(values: &[T]) -> Self {
        Row {
            cells: values.iter().map(|&v| Some(Cell::Number(v))).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The slot at `index`, `None` if it was never assigned.
    ///
    /// # Errors
    ///
    /// Returns `DataError::IndexOutOfRange` if `index >= len`.
    pub fn get(&self, index: usize) -> Result<Option<&Cell<T>>> {
        self.cells
            .get(index)
            .map(Option::as_ref)
            .ok_or(DataError::IndexOutOfRange {
                index,
                len: self.cells.len(),
            })
    }

    /// Overwrites the slot at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DataError::IndexOutOfRange` if `index >= len`.
    pub fn set(&mut self, index: usize, cell: Cell<T>) -> Result<()> {
        let len = self.cells.len();
        let slot = self
            .cells
            .get_mut(index)
            .ok_or(DataError::IndexOutOfRange { index, len })?;
        *slot = Some(cell);
        Ok(())
    }

    /// The slot at `index` as text; unset slots read as [`MISSING_TEXT`].
    pub fn text(&self, index: usize) -> Result<Cow<'_, str>> {
        Ok(self
            .get(index)?
            .map_or(Cow::Borrowed(MISSING_TEXT), Cell::as_text))
    }

    /// Copy of this row with slot `index` left out. The other slots keep
    /// their relative order.
    ///
    /// # Errors
    ///
    /// Returns `DataError::IndexOutOfRange` if `index >= len`.
    pub fn without_index(&self, index: usize) -> Result<Row<T>> {
        if index >= self.cells.len() {
            return Err(DataError::IndexOutOfRange {
                index,
                len: self.cells.len(),
            });
        }
        let cells = self
            .cells
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, cell)| cell.clone())
            .collect();
        Ok(Row { cells })
    }

    /// The row as plain numbers.
    ///
    /// # Errors
    ///
    /// Returns `DataError::NonNumeric` for the first slot that is text or unset.
    pub fn to_numbers(&self) -> Result<Vec<T>> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                cell.as_ref()
                    .and_then(Cell::as_number)
                    .ok_or(DataError::NonNumeric { index })
            })
            .collect()
    }

    /// Same as [`Row::to_numbers`], packed into an `ndarray` vector.
    pub fn to_array(&self) -> Result<Array1<T>> {
        self.to_numbers().map(Array1::from)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&Cell<T>>> + '_ {
        self.cells.iter().map(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_row() -> Row<f64> {
        Row::from_cells(vec![
            Cell::Number(1.0),
            Cell::Text("red".into()),
            Cell::Number(3.0),
            Cell::Text("cat".into()),
        ])
    }

    #[test]
    fn new_row_is_unset() {
        let row: Row<i32> = Row::new(3);
        assert_eq!(row.len(), 3);
        assert!(row.iter().all(|cell| cell.is_none()));
        assert_eq!(row.text(1).unwrap(), MISSING_TEXT);
    }

    #[test]
    fn set_then_get() {
        let mut row: Row<i32> = Row::new(2);
        row.set(1, Cell::Number(7)).unwrap();
        assert_eq!(row.get(1).unwrap(), Some(&Cell::Number(7)));
        assert_eq!(row.get(0).unwrap(), None);
    }

    #[test]
    fn out_of_range_access_fails() {
        let mut row: Row<i32> = Row::new(2);
        assert!(matches!(
            row.get(2),
            Err(DataError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(matches!(
            row.set(5, Cell::Number(1)),
            Err(DataError::IndexOutOfRange { index: 5, len: 2 })
        ));
        assert!(row.without_index(2).is_err());
    }

    #[test]
    fn without_index_keeps_order_and_source() {
        let row = mixed_row();
        let stripped = row.without_index(1).unwrap();
        assert_eq!(stripped.len(), 3);
        assert_eq!(stripped.text(0).unwrap(), "1");
        assert_eq!(stripped.text(1).unwrap(), "3");
        assert_eq!(stripped.text(2).unwrap(), "cat");
        assert_eq!(row.len(), 4);
        assert_eq!(row.text(1).unwrap(), "red");
    }

    #[test]
    fn to_numbers_rejects_text() {
        let row = mixed_row();
        assert!(matches!(
            row.to_numbers(),
            Err(DataError::NonNumeric { index: 1 })
        ));
        let features = row.without_index(3).unwrap().without_index(1).unwrap();
        assert_eq!(features.to_numbers().unwrap(), vec![1.0, 3.0]);
    }

    #[test]
    fn to_numbers_rejects_unset() {
        let mut row: Row<f64> = Row::new(2);
        row.set(0, Cell::Number(1.0)).unwrap();
        assert!(matches!(
            row.to_array(),
            Err(DataError::NonNumeric { index: 1 })
        ));
    }
}
