//! Turns a worksheet grid into a [`Table`] with an `L`-row header.
//!
//! Merged header cells arrive as one label followed by blanks. Blanks are
//! forward-filled left to right, but a label seen at a position in any
//! shallower header row blocks the fill there, so a child row never
//! inherits across a parent boundary. Whatever stays blank is named
//! `Unnamed: {col}_level_{level}` (or `Unnamed: {col}` for a flat header).
use crate::config::EngineConfig;
use crate::error::HierarchyError;
use crate::spreadsheet::Sheet;
use crate::table::ColumnKey;
use crate::table::Table;
use crate::table::Value;
use std::collections::HashMap;
use tracing::debug;

/// Converts a sheet's dense cell grid into values.
pub fn sheet_values(sheet: &Sheet) -> Result<Vec<Vec<Value>>, HierarchyError> {
    sheet
        .grid()
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| cell.map(|cell| cell.to_value()).unwrap_or(Ok(Value::Null)))
                .collect()
        })
        .collect()
}

/// Number of header rows: one plus the run of blank first-column cells
/// directly under the first non-blank row, capped at `max_header_rows`.
pub fn detect_header_depth(grid: &[Vec<Value>], max_header_rows: usize) -> usize {
    let mut rows = grid.iter().filter(|row| !is_blank_row(row)).skip(1);
    let mut depth = 1;
    while depth < max_header_rows.max(1) {
        match rows.next() {
            Some(row) if row.first().map(Value::is_blank).unwrap_or(true) => depth += 1,
            _ => break,
        }
    }
    debug!(depth, "detected header depth");
    depth
}

fn is_blank_row(row: &[Value]) -> bool {
    row.iter().all(Value::is_blank)
}

/// Forward-fills one header row in place. `control[i]` stays true while no
/// header row so far carried a label at `i`.
fn fill_header_row(row: &mut [Option<String>], control: &mut [bool]) {
    let mut last = row.first().cloned().flatten();
    for i in 1..row.len() {
        if !control[i] {
            last = row[i].clone();
        }
        match &row[i] {
            None => row[i] = last.clone(),
            Some(label) => {
                control[i] = false;
                last = Some(label.to_owned());
            }
        }
    }
}

/// Suffixes repeated flat labels as `name.1`, `name.2`, ...
fn mangle_duplicates(labels: &mut [String]) {
    let mut seen = HashMap::<String, usize>::new();
    for label in labels.iter_mut() {
        let count = seen.entry(label.clone()).or_insert(0);
        if *count > 0 {
            let renamed = format!("{label}.{count}");
            *count += 1;
            seen.insert(renamed.clone(), 1);
            *label = renamed;
        } else {
            *count = 1;
        }
    }
}

impl Table {
    /// Builds a table from a value grid whose first `header_rows` non-blank
    /// rows form the column header. Fully blank rows are skipped.
    pub fn from_grid(grid: &[Vec<Value>], header_rows: usize, config: &EngineConfig) -> Result<Table, HierarchyError> {
        let rows: Vec<&Vec<Value>> = grid.iter().filter(|row| !is_blank_row(row)).collect();
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);
        let header_rows = header_rows.max(1).min(rows.len().max(1));

        let mut header: Vec<Vec<Option<String>>> = (0..header_rows)
            .map(|level| {
                (0..width)
                    .map(|col| {
                        rows.get(level)
                            .and_then(|row| row.get(col))
                            .filter(|value| !value.is_blank())
                            .and_then(Value::as_text)
                            .map(|text| text.trim().to_owned())
                    })
                    .collect()
            })
            .collect();

        let prefix = config.unnamed_prefix.trim_end();
        let columns: Vec<ColumnKey> = if header_rows > 1 {
            let mut control = vec![true; width];
            for row in header.iter_mut() {
                fill_header_row(row, &mut control);
            }
            (0..width)
                .map(|col| {
                    ColumnKey::new((0..header_rows).map(|level| {
                        header[level][col]
                            .clone()
                            .unwrap_or_else(|| format!("{prefix} {col}_level_{level}"))
                    }))
                })
                .collect()
        } else {
            let mut labels: Vec<String> = (0..width)
                .map(|col| header[0][col].clone().unwrap_or_else(|| format!("{prefix} {col}")))
                .collect();
            mangle_duplicates(&mut labels);
            labels.into_iter().map(|label| ColumnKey::new([label])).collect()
        };

        let data: Vec<Vec<Value>> = rows
            .iter()
            .skip(header_rows)
            .map(|row| (0..width).map(|col| row.get(col).cloned().unwrap_or_default()).collect())
            .collect();
        debug!(columns = columns.len(), rows = data.len(), levels = header_rows, "built table from grid");
        Ok(Table::new(columns, data)?)
    }
}
