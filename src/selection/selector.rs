use crate::config::EngineConfig;
use crate::selection::parser::parse_col_paths;
use crate::selection::parser::parse_row_paths;
use crate::selection::parser::ColPath;
use crate::selection::parser::RowPath;
use crate::table::Table;
use serde::Serialize;
use tracing::debug;
use tracing::info;

/// Row mask for the given paths: entries of one path are ANDed, paths are
/// ORed. Undefined values and unknown features add no constraint; a path
/// left with no constraint contributes nothing. With no constrained path
/// at all every row matches.
pub fn row_mask(table: &Table, paths: &[RowPath], config: &EngineConfig) -> Vec<bool> {
    let mut mask: Option<Vec<bool>> = None;
    for path in paths {
        let mut path_mask: Option<Vec<bool>> = None;
        for (feature, value) in path {
            if config.is_undefined(value) {
                continue;
            }
            let Some(index) = table.find_column(feature) else {
                debug!(feature = feature.as_str(), "ignoring unknown row feature");
                continue;
            };
            let alternatives: Vec<&str> = value.split(',').map(str::trim).collect();
            let matches: Vec<bool> = table
                .column(index)
                .iter()
                .map(|cell| {
                    cell.as_text()
                        .map(|text| alternatives.contains(&text.as_str()))
                        .unwrap_or(false)
                })
                .collect();
            path_mask = Some(match path_mask {
                Some(previous) => previous.iter().zip(&matches).map(|(a, b)| *a && *b).collect(),
                None => matches,
            });
        }
        if let Some(path_mask) = path_mask {
            mask = Some(match mask {
                Some(previous) => previous.iter().zip(&path_mask).map(|(a, b)| *a || *b).collect(),
                None => path_mask,
            });
        }
    }
    mask.unwrap_or_else(|| vec![true; table.row_count()])
}

/// Indexes of every column matching at least one path, in table order.
/// Levels deeper than the header are ignored; unspecified levels match
/// anything. Flat headers compare only `level_1`.
pub fn select_columns(table: &Table, paths: &[ColPath]) -> Vec<usize> {
    let levels = table.n_levels();
    let mut selected = Vec::new();
    for path in paths {
        if !table.is_multi_level() && !path.contains_key(&1) {
            continue;
        }
        for (index, key) in table.columns().iter().enumerate() {
            let matches = path
                .iter()
                .filter(|(level, _)| **level >= 1 && **level <= levels)
                .all(|(level, value)| key.level(level - 1) == Some(value.as_str()));
            if matches && !selected.contains(&index) {
                selected.push(index);
            }
        }
    }
    selected.sort_unstable();
    selected
}

/// Row and column paths parsed from identifier text, with the row mask and
/// selected columns they resolve to on one table.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub row_paths: Vec<RowPath>,
    pub col_paths: Vec<ColPath>,
    pub mask: Vec<bool>,
    pub columns: Vec<usize>,
}

impl Selection {
    pub fn parse(table: &Table, row_text: &str, col_text: &str, config: &EngineConfig) -> Self {
        let row_paths = parse_row_paths(row_text, config.indent_width);
        let col_paths = parse_col_paths(col_text);
        let mask = row_mask(table, &row_paths, config);
        let columns = select_columns(table, &col_paths);
        info!(
            kept = mask.iter().filter(|keep| **keep).count(),
            total = table.row_count(),
            selected = columns.len(),
            "selection resolved"
        );
        Selection {
            row_paths,
            col_paths,
            mask,
            columns,
        }
    }

    pub fn filtered_rows(&self) -> usize {
        self.mask.iter().filter(|keep| **keep).count()
    }

    /// Keeps the matching rows and the feature columns followed by the
    /// selected columns. Without column paths every column is kept.
    pub fn project(&self, table: &Table, features: &[String]) -> Table {
        let filtered = table.filter_rows(&self.mask);
        if self.col_paths.is_empty() {
            return filtered;
        }
        let mut columns: Vec<usize> = Vec::new();
        for feature in features {
            match table.find_column(feature) {
                Some(index) if !columns.contains(&index) => columns.push(index),
                Some(_) => (),
                None => debug!(feature = feature.as_str(), "feature column not in table"),
            }
        }
        for index in &self.columns {
            if !columns.contains(index) {
                columns.push(*index);
            }
        }
        filtered.select_columns(&columns)
    }

    pub fn stats(&self, table: &Table) -> ExtractionStats {
        let total_rows = table.row_count();
        let filtered_rows = self.filtered_rows();
        ExtractionStats {
            total_rows,
            filtered_rows,
            total_columns: table.col_count(),
            selected_columns: self.columns.len(),
            row_paths_count: self.row_paths.len(),
            col_paths_count: self.col_paths.len(),
            extraction_percentage: if total_rows > 0 {
                filtered_rows as f64 / total_rows as f64 * 100.0
            } else {
                0.0
            },
        }
    }
}

/// Parses both identifier texts and projects the table in one go.
pub fn render_filtered_table(
    table: &Table,
    row_text: &str,
    col_text: &str,
    features: &[String],
    config: &EngineConfig,
) -> Table {
    Selection::parse(table, row_text, col_text, config).project(table, features)
}

/// What a selection would extract, without projecting the table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExtractionStats {
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub total_columns: usize,
    pub selected_columns: usize,
    pub row_paths_count: usize,
    pub col_paths_count: usize,
    pub extraction_percentage: f64,
}

pub fn extraction_stats(table: &Table, row_text: &str, col_text: &str, config: &EngineConfig) -> ExtractionStats {
    Selection::parse(table, row_text, col_text, config).stats(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::tests::table;

    fn row_path(entries: &[(&str, &str)]) -> RowPath {
        entries.iter().map(|(key, value)| (key.to_string(), value.to_string())).collect()
    }

    fn col_path(entries: &[(usize, &str)]) -> ColPath {
        entries.iter().map(|(level, value)| (*level, value.to_string())).collect()
    }

    fn cities() -> Table {
        table(
            &[&["City"], &["District"], &["Population"]],
            &[
                &["Hanoi", "CauGiay", "10"],
                &["Hanoi", "DongDa", "20"],
                &["HCMC", "District 1", "30"],
                &["HCMC", "District 3", "40"],
            ],
        )
    }

    #[test]
    fn undefined_matches_any_value() {
        let paths = vec![row_path(&[("City", "Hanoi"), ("District", "Undefined")])];
        assert_eq!(row_mask(&cities(), &paths, &EngineConfig::default()), vec![true, true, false, false]);
    }

    #[test]
    fn paths_are_or_of_and() {
        let paths = vec![
            row_path(&[("City", "Hanoi")]),
            row_path(&[("City", "HCMC"), ("District", "District 1")]),
        ];
        let mask = row_mask(&cities(), &paths, &EngineConfig::default());
        assert_eq!(mask, vec![true, true, true, false]);
        assert_eq!(mask.iter().filter(|keep| **keep).count(), 3);
    }

    #[test]
    fn commas_list_alternatives() {
        let paths = vec![row_path(&[("District", "CauGiay, District 3")])];
        assert_eq!(row_mask(&cities(), &paths, &EngineConfig::default()), vec![true, false, false, true]);
    }

    #[test]
    fn unconstrained_paths_match_everything() {
        let config = EngineConfig::default();
        assert_eq!(row_mask(&cities(), &[], &config), vec![true; 4]);
        let paths = vec![row_path(&[("Ward", "X"), ("City", "undefined")])];
        assert_eq!(row_mask(&cities(), &paths, &config), vec![true; 4]);
    }

    #[test]
    fn numbers_match_their_text() {
        let paths = vec![row_path(&[("Population", "30")])];
        let mut numeric = cities();
        numeric.column_mut(2)[2] = crate::table::Value::Int(30);
        assert_eq!(row_mask(&numeric, &paths, &EngineConfig::default()), vec![false, false, true, false]);
    }

    fn income() -> Table {
        table(
            &[
                &["Tỉnh", "Header"],
                &["Income", "Low"],
                &["Income", "Medium"],
                &["Income", "High"],
                &["Cost", "Low"],
            ],
            &[&["A", "1", "2", "3", "4"]],
        )
    }

    #[test]
    fn column_path_matches_descendants() {
        assert_eq!(select_columns(&income(), &[col_path(&[(1, "Income")])]), vec![1, 2, 3]);
        assert_eq!(select_columns(&income(), &[col_path(&[(2, "Low")])]), vec![1, 4]);
        assert_eq!(select_columns(&income(), &[col_path(&[(1, "Income"), (3, "x")])]), vec![1, 2, 3]);
        assert!(select_columns(&income(), &[col_path(&[(1, "Profit")])]).is_empty());
    }

    #[test]
    fn overlapping_paths_keep_table_order() {
        let paths = vec![col_path(&[(1, "Cost")]), col_path(&[(1, "Income"), (2, "Low")])];
        assert_eq!(select_columns(&income(), &paths), vec![1, 4]);
    }

    #[test]
    fn flat_tables_match_level_one_only() {
        let flat = cities();
        assert_eq!(select_columns(&flat, &[col_path(&[(1, "Population")])]), vec![2]);
        assert!(select_columns(&flat, &[col_path(&[(2, "Population")])]).is_empty());
    }

    #[test]
    fn render_prefixes_feature_columns() {
        let features = vec!["Tỉnh".to_owned()];
        let config = EngineConfig::default();
        let result = render_filtered_table(&income(), "", "level_1: Income\n    level_2: High", &features, &config);
        let keys: Vec<String> = result.columns().iter().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["Tỉnh - Header", "Income - High"]);

        let all = render_filtered_table(&income(), "Tỉnh: B", "", &features, &config);
        assert_eq!(all.col_count(), 5);
        assert!(all.is_empty());
    }

    #[test]
    fn stats_report_counts() {
        let stats = extraction_stats(&cities(), "City: Hanoi", "level_1: Population", &EngineConfig::default());
        assert_eq!(stats.total_rows, 4);
        assert_eq!(stats.filtered_rows, 2);
        assert_eq!(stats.selected_columns, 1);
        assert_eq!(stats.row_paths_count, 1);
        assert_eq!(stats.col_paths_count, 1);
        assert_eq!(stats.extraction_percentage, 50.0);
    }

    #[test]
    fn one_selection_feeds_projection_and_stats() {
        let features = vec!["Tỉnh".to_owned()];
        let config = EngineConfig::default();
        let table = income();
        let selection = Selection::parse(&table, "Tỉnh: A", "level_2: Low", &config);
        assert_eq!(selection.mask, vec![true]);
        assert_eq!(selection.columns, vec![1, 4]);

        let projected = selection.project(&table, &features);
        let keys: Vec<String> = projected.columns().iter().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["Tỉnh - Header", "Income - Low", "Cost - Low"]);

        let stats = selection.stats(&table);
        assert_eq!(stats.filtered_rows, 1);
        assert_eq!(stats.selected_columns, 2);
        assert_eq!(stats, extraction_stats(&table, "Tỉnh: A", "level_2: Low", &config));
    }
}
