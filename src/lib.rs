//! # Rusty Hierarchy
//!
//! Hierarchy inference and selection for spreadsheet tables with merged,
//! multi-level headers and grouped row keys.
//!
//! ## Features
//!
//! - **Workbook ingestion**: Read `.xlsx`/`.xlsm` worksheets from disk or memory, with
//!   shared strings, booleans, error cells and date/time number formats
//! - **Header reconstruction**: Rebuild multi-level column keys from merged header rows
//! - **Row normalization**: Fill blank row keys with `Undefined` or the value above
//! - **Hierarchy trees**: Infer the column and row hierarchies and print them as
//!   indented `key: value` text
//! - **Selection**: Parse identifier text back into row/column paths and project the table
//! - **Rendering**: Produce a merged-cell header matrix and flattened column names
//!   over the same rows
//!
//! ## Example
//!
//! ```no_run
//! use rusty_hierarchy::{Criteria, EngineConfig, ProcessedSheet};
//!
//! # fn main() -> Result<(), rusty_hierarchy::HierarchyError> {
//! let features = vec!["Cà phê".to_owned(), "Loại".to_owned()];
//! let columns = vec!["Thời gian".to_owned()];
//! let sheet = ProcessedSheet::open("coffee.xlsx", &Criteria::default(), &features, &columns, EngineConfig::default())?;
//! let (_, views) = sheet.select("Cà phê: Cà phê Đen", "level_1: Thời gian");
//! assert!(views.normal.has_multi_level);
//! # Ok(())
//! # }
//! ```
mod error;
pub(crate) mod helpers;

pub mod config;
pub mod hierarchy;
pub mod pipeline;
pub mod render;
pub mod selection;
pub mod spreadsheet;
pub mod table;

pub use config::EngineConfig;
pub use config::LeafOrder;
pub use error::HierarchyError;
pub use pipeline::IdentifierSource;
pub use pipeline::ProcessedSheet;
pub use pipeline::QueryResult;
pub use spreadsheet::Criteria;
pub use table::ColumnKey;
pub use table::Table;
pub use table::Value;
