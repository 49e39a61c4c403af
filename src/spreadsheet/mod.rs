//! # Spreadsheet Reading
//!
//! Opens Office Open XML workbooks (`.xlsx`, `.xlsm`) from disk or memory and
//! reads worksheets as sparse cell lists. Cell typing follows the workbook's
//! number formats so date/time cells come back as ISO-8601 text.
pub(crate) mod cell;
pub(crate) mod criteria;
pub(crate) mod excel;
pub(crate) mod range;
pub(crate) mod reference;
pub(crate) mod sheet;
pub(crate) mod xlsx;

pub use cell::Cell;
pub use cell::CellType;
pub use criteria::Criteria;
pub use range::Range;
pub use range::RangeError;
pub use sheet::Sheet;
pub use xlsx::XlsxSpreadsheet;

use crate::error::HierarchyError;
use crate::helpers::reader::UnifiedReader;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors raised while opening or reading a workbook.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    #[error("Missing package part '{0}'")]
    FileError(String),

    #[error("Spreadsheet '{0}' contains no worksheets")]
    SpreadsheetEmptyError(String),

    #[error("No worksheet matches '{0}'")]
    SheetNotFound(String),

    #[error("Error value in '{0}' sheet '{1}' cell {2}: {3}")]
    CellValueError(String, String, String, String),

    #[error("Shared string {1} missing in '{0}'")]
    SharedStringError(String, usize),

    #[error("Unsupported spreadsheet format '{0}'")]
    UnsupportedFormat(String),
}

/// A workbook that can list and read its worksheets.
pub trait Spreadsheet {
    /// Returns the file name of this spreadsheet.
    fn name(&self) -> String;

    /// Returns worksheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Reads the worksheets selected by `criteria`.
    fn read_sheets(&mut self, criteria: &Criteria) -> Result<Vec<Sheet>, HierarchyError>;
}

/// Opens a workbook from a local path, choosing the reader by extension.
pub fn open_spreadsheet<P: AsRef<Path>>(path: P) -> Result<Box<dyn Spreadsheet>, HierarchyError> {
    let path = path.as_ref();
    let name = path.to_string_lossy().to_string();
    let extension = path
        .extension()
        .map(|extension| extension.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "xlsx" | "xlsm" => {
            info!(file = name.as_str(), "opening workbook");
            Ok(Box::new(XlsxSpreadsheet::open(&name, UnifiedReader::open(path)?)?))
        }
        _ => Err(SpreadsheetError::UnsupportedFormat(name))?,
    }
}

/// Opens an in-memory `.xlsx` package.
pub fn open_spreadsheet_bytes(name: &str, bytes: Vec<u8>) -> Result<Box<dyn Spreadsheet>, HierarchyError> {
    Ok(Box::new(XlsxSpreadsheet::open(name, UnifiedReader::from_bytes(bytes))?))
}

/// Reads the first worksheet accepted by `criteria`.
pub fn read_first_sheet(spreadsheet: &mut dyn Spreadsheet, criteria: &Criteria) -> Result<Sheet, HierarchyError> {
    spreadsheet
        .read_sheets(criteria)?
        .into_iter()
        .next()
        .ok_or_else(|| SpreadsheetError::SheetNotFound(spreadsheet.name()).into())
}
