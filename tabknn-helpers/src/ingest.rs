//! Line-based CSV ingestion.
//!
//! Fields are split on every `,` and trimmed; quoting is turned off, so a
//! comma inside quotes still splits the field. Blank lines are skipped. The
//! widest line sets the table's field count and shorter lines leave their
//! trailing slots unset. Each field is typed on its own: if the [`NumberFormat`]
//! parses it, it becomes a number, otherwise it is kept as trimmed text.
//! A field that does not parse never aborts ingestion.

use crate::cell::Cell;
use crate::error::Result;
use crate::format::NumberFormat;
use crate::row::Row;
use crate::table::Table;
use crate::Number;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

impl<T: Number> Table<T> {
    /// Reads a UTF-8 CSV file into a table.
    ///
    /// # Errors
    ///
    /// Returns `DataError::Io` if the file cannot be opened, or
    /// `DataError::Csv` if it cannot be read as UTF-8 text.
    pub fn load_csv<P: AsRef<Path>>(path: P, format: &NumberFormat) -> Result<Table<T>> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading csv");
        let file = File::open(path)?;
        Self::from_reader(file, format)
    }

    /// Reads CSV text from any reader.
    pub fn from_reader<R: Read>(reader: R, format: &NumberFormat) -> Result<Table<T>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(reader);

        let mut records: Vec<StringRecord> = Vec::new();
        for record in reader.records() {
            let record = record?;
            // Whitespace-only lines come back as a single empty field.
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }
            records.push(record);
        }
        Ok(Self::from_records(&records, format))
    }

    /// Parses CSV text held in memory.
    pub fn from_csv_str(text: &str, format: &NumberFormat) -> Result<Table<T>> {
        Self::from_reader(text.as_bytes(), format)
    }

    fn from_records(records: &[StringRecord], format: &NumberFormat) -> Table<T> {
        let field_count = records.iter().map(StringRecord::len).max().unwrap_or(0);

        let mut text_cells = 0usize;
        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let slots: Vec<Option<Cell<T>>> = record
                .iter()
                .map(|field| {
                    let cell = parse_field(field, format);
                    if !cell.is_number() {
                        text_cells += 1;
                    }
                    Some(cell)
                })
                .chain(std::iter::repeat(None))
                .take(field_count)
                .collect();
            rows.push(Row::from_slots(slots));
        }
        debug!(rows = rows.len(), field_count, text_cells, "parsed csv");
        Table::from_rows_unchecked(field_count, rows)
    }
}

fn parse_field<T: Number>(field: &str, format: &NumberFormat) -> Cell<T> {
    match format.parse(field) {
        Some(value) => Cell::Number(value),
        None => Cell::Text(field.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellKind;
    use crate::error::DataError;
    use std::io::Cursor;

    #[test]
    fn short_rows_leave_trailing_slots_unset() {
        let table: Table<f64> = Table::from_csv_str("1,2,3,cat\n4,5\n", &NumberFormat::default()).unwrap();
        assert_eq!(table.field_count(), 4);
        assert_eq!(table.len(), 2);
        let short = table.row(1).unwrap();
        assert_eq!(short.len(), 4);
        assert_eq!(short.get(1).unwrap(), Some(&Cell::Number(5.0)));
        assert_eq!(short.get(2).unwrap(), None);
        assert_eq!(short.get(3).unwrap(), None);
    }

    #[test]
    fn fields_are_trimmed_and_typed_independently() {
        let csv = " 1 , red ,2.5\nblue, 3 ,x\n";
        let table: Table<f64> = Table::from_csv_str(csv, &NumberFormat::default()).unwrap();
        let first = table.row(0).unwrap();
        assert_eq!(first.get(0).unwrap(), Some(&Cell::Number(1.0)));
        assert_eq!(first.get(1).unwrap(), Some(&Cell::text("red")));
        let second = table.row(1).unwrap();
        assert_eq!(second.get(0).unwrap().map(Cell::kind), Some(CellKind::Text));
        assert_eq!(second.get(1).unwrap(), Some(&Cell::Number(3.0)));
    }

    #[test]
    fn empty_field_becomes_empty_text() {
        let table: Table<i32> = Table::from_csv_str("1,,3", &NumberFormat::default()).unwrap();
        let row = table.row(0).unwrap();
        assert_eq!(row.get(1).unwrap(), Some(&Cell::text("")));
        assert_eq!(row.get(2).unwrap(), Some(&Cell::Number(3)));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let input = Cursor::new("1,a\n\n   \n2,b\n");
        let table: Table<i32> = Table::from_reader(input, &NumberFormat::default()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.field_count(), 2);
    }

    #[test]
    fn leading_zeros_follow_the_format() {
        let strict = NumberFormat::default().with_leading_zeros(false);
        let table: Table<i64> = Table::from_csv_str("007,10", &strict).unwrap();
        let row = table.row(0).unwrap();
        assert_eq!(row.get(0).unwrap(), Some(&Cell::text("007")));
        assert_eq!(row.get(1).unwrap(), Some(&Cell::Number(10)));

        let lenient: Table<i64> = Table::from_csv_str("007,10", &NumberFormat::default()).unwrap();
        assert_eq!(lenient.row(0).unwrap().get(0).unwrap(), Some(&Cell::Number(7)));
    }

    #[test]
    fn integer_tables_keep_decimals_as_text() {
        let table: Table<i32> = Table::from_csv_str("1.5,2", &NumberFormat::default()).unwrap();
        assert_eq!(table.row(0).unwrap().get(0).unwrap(), Some(&Cell::text("1.5")));
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table: Table<f64> = Table::from_csv_str("\n\n", &NumberFormat::default()).unwrap();
        assert_eq!(table.field_count(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("tabknn-helpers-does-not-exist.csv");
        let result: Result<Table<f64>> = Table::load_csv(&path, &NumberFormat::default());
        assert!(matches!(result, Err(DataError::Io(_))));
    }

    #[test]
    fn invalid_utf8_is_a_csv_error() {
        let bytes: &[u8] = b"1,2\n\xff\xfe,3\n";
        let result: Result<Table<f64>> = Table::from_reader(bytes, &NumberFormat::default());
        assert!(matches!(result, Err(DataError::Csv(_))));
    }

    #[test]
    fn quotes_are_not_special() {
        let table: Table<f64> =
            Table::from_csv_str("\"a,b\",1", &NumberFormat::default()).unwrap();
        assert_eq!(table.field_count(), 3);
        assert_eq!(table.row(0).unwrap().text(0).unwrap(), "\"a");
    }

    #[test]
    fn load_csv_reads_a_file() {
        let path = std::env::temp_dir().join(format!("tabknn-helpers-{}.csv", std::process::id()));
        std::fs::write(&path, "1,2,cat\r\n3,4,dog\r\n").unwrap();
        let table: Table<f64> = Table::load_csv(&path, &NumberFormat::default()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.row(1).unwrap().text(2).unwrap(), "dog");
    }
}
