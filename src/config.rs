use crate::error::HierarchyError;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;

/// Order of collapsed leaf lists in both hierarchy trees.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafOrder {
    /// First appearance in the table
    #[default]
    Insertion,
    /// Lexicographic
    Sorted,
}

/// Labels and limits used across the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Replacement for unnamed header labels below the outermost level
    pub header_sentinel: String,
    /// Fill for deliberately blank row keys; also the "any value" marker in selections
    pub undefined_label: String,
    /// Prefix of auto-generated names for blank header cells
    pub unnamed_prefix: String,
    /// Flattened label for a column with no meaningful header part
    pub default_flat_label: String,
    /// Spaces per indent level in identifier text
    pub indent_width: usize,
    pub leaf_order: LeafOrder,
    /// Cap for header depth detection
    pub max_header_rows: usize,
    /// Minimum similarity for fuzzy feature resolution, in `0.0..=1.0`
    pub feature_match_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            header_sentinel: "Header".to_owned(),
            undefined_label: "Undefined".to_owned(),
            unnamed_prefix: "Unnamed:".to_owned(),
            default_flat_label: "Column".to_owned(),
            indent_width: 4,
            leaf_order: LeafOrder::Insertion,
            max_header_rows: 10,
            feature_match_threshold: 0.8,
        }
    }
}

impl EngineConfig {
    /// Load from TOML string; missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self, HierarchyError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, HierarchyError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub(crate) fn is_undefined(&self, value: &str) -> bool {
        value.trim().eq_ignore_ascii_case(&self.undefined_label)
    }
}
