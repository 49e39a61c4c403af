//! Query-side selection: parsing identifier text into paths and applying
//! them to a table.
pub(crate) mod features;
pub(crate) mod parser;
pub(crate) mod selector;

pub use features::resolve_features;
pub use features::resolved_names;
pub use features::FeatureMatch;
pub use parser::extract_identifier_section;
pub use parser::parse_col_paths;
pub use parser::parse_row_paths;
pub use parser::ColPath;
pub use parser::RowPath;
pub use selector::extraction_stats;
pub use selector::render_filtered_table;
pub use selector::row_mask;
pub use selector::select_columns;
pub use selector::Selection;
pub use selector::ExtractionStats;
