//! In-memory table with a (possibly multi-level) column header.
//!
//! Data is stored column-major; every column key has the same number of
//! levels and every column holds one value per row.
pub(crate) mod column;
pub(crate) mod ingest;
pub(crate) mod value;

pub use column::ColumnKey;
pub use ingest::detect_header_depth;
pub use ingest::sheet_values;
pub use value::Value;

use thiserror::Error;

/// Errors raised by table lookups and construction.
#[derive(Error, Debug, PartialEq)]
pub enum TableError {
    #[error("Column '{name}' not found")]
    ColumnNotFound { name: String },

    #[error("Row {row} has {found} values, expected {expected}")]
    RowWidthMismatch { row: usize, expected: usize, found: usize },

    #[error("Column key '{key}' has {found} levels, expected {expected}")]
    LevelMismatch { key: String, expected: usize, found: usize },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<ColumnKey>,
    data: Vec<Vec<Value>>,
    rows: usize,
}

impl Table {
    /// Builds a table from column keys and row-major values.
    pub fn new(columns: Vec<ColumnKey>, rows: Vec<Vec<Value>>) -> Result<Table, TableError> {
        let levels = columns.first().map(ColumnKey::len).unwrap_or(1);
        if let Some(key) = columns.iter().find(|key| key.len() != levels) {
            return Err(TableError::LevelMismatch {
                key: key.to_string(),
                expected: levels,
                found: key.len(),
            });
        }
        let mut data = vec![Vec::with_capacity(rows.len()); columns.len()];
        let count = rows.len();
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TableError::RowWidthMismatch {
                    row: index,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            for (column, value) in data.iter_mut().zip(row) {
                column.push(value);
            }
        }
        Ok(Table { columns, data, rows: count })
    }

    /// Number of header levels (1 for a flat header).
    pub fn n_levels(&self) -> usize {
        self.columns.first().map(ColumnKey::len).unwrap_or(1)
    }

    pub fn is_multi_level(&self) -> bool {
        self.n_levels() > 1
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[ColumnKey] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [ColumnKey] {
        &mut self.columns
    }

    /// Labels of every column at one header level, in column order.
    pub fn level_values(&self, level: usize) -> Vec<&str> {
        self.columns.iter().filter_map(|key| key.level(level)).collect()
    }

    /// Values of the column at `index`.
    pub fn column(&self, index: usize) -> &[Value] {
        &self.data[index]
    }

    pub(crate) fn column_mut(&mut self, index: usize) -> &mut Vec<Value> {
        &mut self.data[index]
    }

    /// Resolves a column name: the first column whose outermost label is
    /// `name`, else the first column carrying `name` at any level.
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|key| key.level(0) == Some(name))
            .or_else(|| self.columns.iter().position(|key| key.contains(name)))
    }

    /// Like [`Table::find_column`] but a miss is an error.
    pub fn require_column(&self, name: &str) -> Result<usize, TableError> {
        self.find_column(name).ok_or_else(|| TableError::ColumnNotFound { name: name.to_owned() })
    }

    /// Values of one row, in column order.
    pub fn row(&self, index: usize) -> Vec<&Value> {
        self.data.iter().map(|column| &column[index]).collect()
    }

    /// All rows, row-major.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        (0..self.rows).map(move |index| self.row(index))
    }

    /// Projects the given column indexes, in the given order.
    pub fn select_columns(&self, indexes: &[usize]) -> Table {
        Table {
            columns: indexes.iter().map(|&index| self.columns[index].clone()).collect(),
            data: indexes.iter().map(|&index| self.data[index].clone()).collect(),
            rows: self.rows,
        }
    }

    /// Keeps the rows whose mask entry is true.
    pub fn filter_rows(&self, mask: &[bool]) -> Table {
        let data: Vec<Vec<Value>> = self
            .data
            .iter()
            .map(|column| {
                column
                    .iter()
                    .zip(mask)
                    .filter(|(_, keep)| **keep)
                    .map(|(value, _)| value.clone())
                    .collect()
            })
            .collect();
        Table {
            columns: self.columns.clone(),
            rows: mask.iter().take(self.rows).filter(|keep| **keep).count(),
            data,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a table from string cells; empty strings become nulls.
    pub(crate) fn table(columns: &[&[&str]], rows: &[&[&str]]) -> Table {
        let columns = columns.iter().map(|labels| ColumnKey::new(labels.iter().copied())).collect();
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| if cell.is_empty() { Value::Null } else { Value::from(*cell) })
                    .collect()
            })
            .collect();
        Table::new(columns, rows).unwrap()
    }

    #[test]
    fn shape_is_validated() {
        let columns = vec![ColumnKey::from("A"), ColumnKey::from("B")];
        let error = Table::new(columns, vec![vec![Value::Int(1)]]).unwrap_err();
        assert_eq!(error.to_string(), "Row 0 has 1 values, expected 2");

        let columns = vec![ColumnKey::from("A"), ColumnKey::from(["B", "C"])];
        assert!(matches!(Table::new(columns, vec![]), Err(TableError::LevelMismatch { .. })));
    }

    #[test]
    fn finds_columns_at_any_level() {
        let table = table(&[&["Tỉnh", "Header"], &["Thu nhập", "Thấp"], &["Thu nhập", "Cao"]], &[]);
        assert_eq!(table.find_column("Thu nhập"), Some(1));
        assert_eq!(table.find_column("Cao"), Some(2));
        assert_eq!(
            table.require_column("Huyện"),
            Err(TableError::ColumnNotFound { name: "Huyện".to_owned() })
        );
        assert_eq!(table.level_values(1), vec!["Header", "Thấp", "Cao"]);
    }

    #[test]
    fn projects_and_filters() {
        let table = table(&[&["A"], &["B"], &["C"]], &[&["1", "2", "3"], &["4", "5", "6"], &["7", "8", "9"]]);
        let projected = table.select_columns(&[2, 0]).filter_rows(&[true, false, true]);
        assert_eq!(projected.row_count(), 2);
        assert_eq!(projected.col_count(), 2);
        assert_eq!(projected.row(1), vec![&Value::from("9"), &Value::from("7")]);
        assert!(!projected.is_multi_level());
    }
}
