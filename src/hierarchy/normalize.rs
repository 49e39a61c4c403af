//! Repairs the gaps merged cells leave in headers and row keys.
use crate::config::EngineConfig;
use crate::error::HierarchyError;
use crate::error::ResultMessage;
use crate::table::Table;
use crate::table::Value;
use tracing::debug;

/// Renames auto-generated "no label" headers at levels >= 1 to the header
/// sentinel. The outermost level is left untouched.
pub fn rename_unnamed_headers(table: &mut Table, config: &EngineConfig) {
    let mut renamed = 0usize;
    for key in table.columns_mut() {
        for level in 1..key.len() {
            if key.level(level).map(|label| label.starts_with(&config.unnamed_prefix)).unwrap_or(false) {
                key.set_level(level, config.header_sentinel.to_owned());
                renamed += 1;
            }
        }
    }
    debug!(renamed, "renamed unnamed header labels");
}

/// Resolves every feature column, failing on the first missing name.
fn feature_indexes(table: &Table, features: &[String]) -> Result<Vec<usize>, HierarchyError> {
    features
        .iter()
        .map(|name| Ok(table.require_column(name)?))
        .collect()
}

/// For each adjacent feature pair, a row with a parent value and a missing
/// child gets the undefined label as child. Pairs are processed in order,
/// so a filled child acts as parent for the next pair.
pub fn fill_undefined_sequentially(
    table: &Table,
    features: &[String],
    config: &EngineConfig,
) -> Result<Table, HierarchyError> {
    let indexes = feature_indexes(table, features)?;
    let mut table = table.clone();
    for pair in indexes.windows(2) {
        let (parent, child) = (pair[0], pair[1]);
        let present: Vec<bool> = table.column(parent).iter().map(|value| !value.is_blank()).collect();
        for (value, has_parent) in table.column_mut(child).iter_mut().zip(present) {
            if has_parent && value.is_blank() {
                *value = Value::Text(config.undefined_label.to_owned());
            }
        }
    }
    Ok(table)
}

/// Propagates the last present value of each feature column downwards.
pub fn forward_fill(table: &Table, features: &[String]) -> Result<Table, HierarchyError> {
    let indexes = feature_indexes(table, features)?;
    let mut table = table.clone();
    for index in indexes {
        let mut last: Option<Value> = None;
        for value in table.column_mut(index).iter_mut() {
            if value.is_blank() {
                if let Some(last) = &last {
                    *value = last.clone();
                }
            } else {
                last = Some(value.clone());
            }
        }
    }
    Ok(table)
}

/// Undefined fill followed by forward fill, on a copy of `table`.
pub fn normalize_rows(table: &Table, features: &[String], config: &EngineConfig) -> Result<Table, HierarchyError> {
    let filled = fill_undefined_sequentially(table, features, config).with_prefix("Normalize rows")?;
    forward_fill(&filled, features).with_prefix("Normalize rows")
}
