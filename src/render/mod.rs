//! Presentation payloads for a selected table.
//!
//! A result table is rendered twice over the same rows: once with the full
//! header matrix (merged cells reconstructed from the column keys) and once
//! with flattened single-level names.
pub(crate) mod flatten;
pub(crate) mod header_matrix;

pub use flatten::create_acronym;
pub use flatten::flatten_column_names;
pub use header_matrix::build_header_matrix;
pub use header_matrix::flat_header_row;
pub use header_matrix::HeaderCell;

use crate::config::EngineConfig;
use crate::error::HierarchyError;
use crate::table::ColumnKey;
use crate::table::Table;
use crate::table::Value;
use serde::Serialize;
use tracing::debug;

/// Header cells, column names and row data of one rendered view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedTable {
    pub has_multi_level: bool,
    pub header_matrix: Vec<Vec<HeaderCell>>,
    /// Multi-level keys for the full view, flattened names otherwise
    pub final_columns: Vec<ColumnKey>,
    pub data_rows: Vec<Vec<Value>>,
    pub row_count: usize,
    pub col_count: usize,
}

/// Both renderings of one result table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableViews {
    pub normal: RenderedTable,
    pub flattened: RenderedTable,
}

impl TableViews {
    /// JSON payload for the presentation layer.
    pub fn to_json(&self) -> Result<String, HierarchyError> {
        Ok(serde_json::to_string(self)?)
    }
}

pub struct TablePostProcessor<'a> {
    config: &'a EngineConfig,
}

impl<'a> TablePostProcessor<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        TablePostProcessor { config }
    }

    pub fn process(&self, table: &Table) -> TableViews {
        let data_rows: Vec<Vec<Value>> = table
            .rows()
            .map(|row| row.into_iter().cloned().collect())
            .collect();

        let normal_matrix = if table.is_multi_level() {
            build_header_matrix(table.columns(), &self.config.header_sentinel)
        } else {
            let labels: Vec<String> = table.columns().iter().map(ToString::to_string).collect();
            flat_header_row(&labels)
        };
        let flat_names = flatten_column_names(table.columns(), self.config);
        debug!(
            levels = table.n_levels(),
            columns = table.col_count(),
            rows = table.row_count(),
            "rendered table views"
        );

        TableViews {
            normal: RenderedTable {
                has_multi_level: table.is_multi_level(),
                header_matrix: normal_matrix,
                final_columns: table.columns().to_vec(),
                data_rows: data_rows.clone(),
                row_count: table.row_count(),
                col_count: table.col_count(),
            },
            flattened: RenderedTable {
                has_multi_level: false,
                header_matrix: flat_header_row(&flat_names),
                final_columns: flat_names.iter().map(|name| ColumnKey::from(name.as_str())).collect(),
                data_rows,
                row_count: table.row_count(),
                col_count: table.col_count(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::tests::table;

    #[test]
    fn multi_level_views_share_rows() {
        let result = table(
            &[&["Cà phê", "Header"], &["Thời gian", "Hè"], &["Thời gian", "Đông"]],
            &[&["Cà phê Đen", "10", ""]],
        );
        let config = EngineConfig::default();
        let views = TablePostProcessor::new(&config).process(&result);

        assert!(views.normal.has_multi_level);
        assert_eq!(views.normal.header_matrix.len(), 2);
        assert_eq!(views.normal.header_matrix[0][0].rowspan, 2);
        assert_eq!(views.normal.header_matrix[0][1].colspan, 2);
        assert_eq!(views.normal.final_columns[1], ColumnKey::from(["Thời gian", "Hè"]));

        let names: Vec<String> = views.flattened.final_columns.iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["Cà phê", "Tg Hè", "Tg Đông"]);
        assert!(!views.flattened.has_multi_level);
        assert_eq!(views.flattened.header_matrix.len(), 1);
        assert_eq!(views.normal.data_rows, views.flattened.data_rows);
        assert_eq!(views.normal.data_rows[0][2], Value::Null);
    }

    #[test]
    fn serializes_json_native_values() {
        let mut result = table(&[&["Tên"], &["Số"]], &[&["A", ""]]);
        result.column_mut(1)[0] = Value::Float(2.5);
        let config = EngineConfig::default();
        let views = TablePostProcessor::new(&config).process(&result);
        let json = serde_json::to_value(&views.flattened).unwrap();
        assert_eq!(json["data_rows"], serde_json::json!([["A", 2.5]]));
        assert_eq!(json["final_columns"], serde_json::json!([["Tên"], ["Số"]]));
        assert_eq!(views.flattened.header_matrix, views.normal.header_matrix);
    }

    #[test]
    fn empty_result_keeps_header() {
        let result = table(&[&["A", "x"], &["A", "y"]], &[]);
        let config = EngineConfig::default();
        let views = TablePostProcessor::new(&config).process(&result);
        assert_eq!(views.normal.row_count, 0);
        assert_eq!(views.normal.col_count, 2);
        assert!(views.flattened.data_rows.is_empty());
        let json = views.to_json().unwrap();
        assert!(json.starts_with(r#"{"normal":{"has_multi_level":true,"#));
    }
}
