//! Header and row hierarchy inference.
//!
//! The normalizer repairs merged-cell gaps, then the two builders turn the
//! column axis and the feature row columns into [`HierarchyNode`] trees.
pub(crate) mod format;
pub(crate) mod header_tree;
pub(crate) mod node;
pub(crate) mod normalize;
pub(crate) mod row_tree;

pub use format::format_col_tree;
pub use format::format_row_tree;
pub use header_tree::build_header_tree;
pub use node::HierarchyNode;
pub use normalize::fill_undefined_sequentially;
pub use normalize::forward_fill;
pub use normalize::normalize_rows;
pub use normalize::rename_unnamed_headers;
pub use row_tree::build_row_tree;
