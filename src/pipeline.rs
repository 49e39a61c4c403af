//! Per-file preparation and per-query answering.
//!
//! A [`ProcessedSheet`] is built once per workbook and then shared
//! read-only; every query works on its own projection of the table.
use crate::config::EngineConfig;
use crate::error::HierarchyError;
use crate::error::ResultMessage;
use crate::hierarchy::build_header_tree;
use crate::hierarchy::build_row_tree;
use crate::hierarchy::format_col_tree;
use crate::hierarchy::format_row_tree;
use crate::hierarchy::normalize_rows;
use crate::hierarchy::rename_unnamed_headers;
use crate::hierarchy::HierarchyNode;
use crate::render::TablePostProcessor;
use crate::render::TableViews;
use crate::selection::extract_identifier_section;
use crate::selection::resolve_features;
use crate::selection::resolved_names;
use crate::selection::ExtractionStats;
use crate::selection::Selection;
use crate::spreadsheet::open_spreadsheet;
use crate::spreadsheet::read_first_sheet;
use crate::spreadsheet::Criteria;
use crate::spreadsheet::Sheet;
use crate::table::detect_header_depth;
use crate::table::sheet_values;
use crate::table::Table;
use anyhow::Context;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;
use tracing::info;
use tracing::warn;

const ROW_IDENTIFIER_HEADING: &str = "Row Identifier";
const COL_IDENTIFIER_HEADING: &str = "Col Identifier";

/// Resolves a natural-language query into identifier text.
///
/// Implementations usually wrap a language model. Responses are expected
/// to carry a `### Row Identifier` or `### Col Identifier` section in the
/// shapes produced by [`format_row_tree`] and [`format_col_tree`].
pub trait IdentifierSource {
    fn row_identifier(&self, query: &str, sheet: &ProcessedSheet) -> anyhow::Result<String>;

    fn col_identifier(&self, query: &str, sheet: &ProcessedSheet) -> anyhow::Result<String>;
}

/// A normalized table with its hierarchy trees and their text forms.
#[derive(Clone, Debug)]
pub struct ProcessedSheet {
    pub table: Table,
    pub feature_rows: Vec<String>,
    pub feature_cols: Vec<String>,
    pub header_tree: IndexMap<String, HierarchyNode>,
    pub row_tree: HierarchyNode,
    pub row_text: String,
    pub col_text: String,
    config: EngineConfig,
}

/// Outcome of one query against a processed sheet.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueryResult {
    pub query: String,
    pub row_selection: String,
    pub col_selection: String,
    pub stats: ExtractionStats,
    pub views: TableViews,
    /// Nothing matched the selection
    pub no_data: bool,
}

impl ProcessedSheet {
    /// Renames unnamed sub-headers, normalizes the feature row columns and
    /// builds both hierarchy trees. `table` is left untouched.
    pub fn build(
        table: &Table,
        feature_rows: Vec<String>,
        feature_cols: Vec<String>,
        config: EngineConfig,
    ) -> Result<ProcessedSheet, HierarchyError> {
        let mut table = table.clone();
        rename_unnamed_headers(&mut table, &config);
        let table = normalize_rows(&table, &feature_rows, &config)?;

        let row_tree = build_row_tree(&table, &feature_rows, &config)?;
        let header_tree = build_header_tree(&table, &feature_cols, &config);
        let row_text = format_row_tree(&row_tree, &feature_rows, &config);
        let col_text = format_col_tree(&header_tree, &config);
        info!(
            rows = table.row_count(),
            columns = table.col_count(),
            levels = table.n_levels(),
            "processed sheet"
        );
        Ok(ProcessedSheet {
            table,
            feature_rows,
            feature_cols,
            header_tree,
            row_tree,
            row_text,
            col_text,
            config,
        })
    }

    /// Builds from a worksheet, detecting the header depth and resolving
    /// the proposed feature names against the real header labels.
    pub fn from_sheet(
        sheet: &Sheet,
        feature_rows: &[String],
        feature_cols: &[String],
        config: EngineConfig,
    ) -> Result<ProcessedSheet, HierarchyError> {
        let grid = sheet_values(sheet).with_prefix(&format!("Read sheet '{}'", sheet.name))?;
        let depth = detect_header_depth(&grid, config.max_header_rows);
        let table = Table::from_grid(&grid, depth, &config)?;

        let resolve = |requested: &[String]| {
            resolved_names(&resolve_features(&table, requested, config.feature_match_threshold))
        };
        let feature_rows = resolve(feature_rows);
        let feature_cols = resolve(feature_cols);
        Self::build(&table, feature_rows, feature_cols, config)
    }

    /// Opens a workbook and processes the first sheet `criteria` accepts.
    pub fn open<P: AsRef<Path>>(
        path: P,
        criteria: &Criteria,
        feature_rows: &[String],
        feature_cols: &[String],
        config: EngineConfig,
    ) -> Result<ProcessedSheet, HierarchyError> {
        let mut spreadsheet = open_spreadsheet(path)?;
        let sheet = read_first_sheet(spreadsheet.as_mut(), criteria)?;
        Self::from_sheet(&sheet, feature_rows, feature_cols, config)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Selects and renders the table for already-resolved identifier text.
    pub fn select(&self, row_selection: &str, col_selection: &str) -> (ExtractionStats, TableViews) {
        let selection = Selection::parse(&self.table, row_selection, col_selection, &self.config);
        let filtered = selection.project(&self.table, &self.feature_rows);
        let stats = selection.stats(&self.table);
        let views = TablePostProcessor::new(&self.config).process(&filtered);
        (stats, views)
    }

    /// Asks `source` for row and column identifiers, then selects and
    /// renders. An empty selection is reported through `no_data`.
    pub fn answer(&self, query: &str, source: &dyn IdentifierSource) -> anyhow::Result<QueryResult> {
        let row_response = source
            .row_identifier(query, self)
            .context("Failed to resolve row identifier")?;
        let col_response = source
            .col_identifier(query, self)
            .context("Failed to resolve column identifier")?;
        let row_selection = extract_identifier_section(&row_response, ROW_IDENTIFIER_HEADING);
        let col_selection = extract_identifier_section(&col_response, COL_IDENTIFIER_HEADING);

        let (stats, views) = self.select(&row_selection, &col_selection);
        let no_data = views.normal.row_count == 0 || views.normal.col_count == 0;
        if no_data {
            warn!(query, "selection matched no data");
        }
        Ok(QueryResult {
            query: query.to_owned(),
            row_selection,
            col_selection,
            stats,
            views,
            no_data,
        })
    }
}
