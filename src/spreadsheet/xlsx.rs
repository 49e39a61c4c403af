use crate::error::HierarchyError;
use crate::helpers::reader::UnifiedReader;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::xml::XmlReader;
use crate::helpers::xml::XmlTextContextHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::criteria::Criteria;
use crate::spreadsheet::excel;
use crate::spreadsheet::excel::load_relationships;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::reference::reference_to_index;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::Spreadsheet;
use crate::spreadsheet::SpreadsheetError;
use quick_xml::events::Event;
use quick_xml::name::QName;
use std::collections::HashMap;
use std::io::BufRead;
use tracing::debug;
use zip::ZipArchive;

// XML tag names for parsing Excel XLSX format
const TAG_CUSTOM_FORMATS: QName = QName(b"numFmts"); // Custom number formats container
const TAG_CUSTOM_FORMAT: QName = QName(b"numFmt");   // Individual custom number format
const TAG_FORMAT_INDEXES: QName = QName(b"cellXfs");  // Cell format indexes container
const TAG_FORMAT_INDEX: QName = QName(b"xf");         // Individual cell format index
const TAG_SHARED_STRING_ITEM: QName = QName(b"si");   // Shared string table item
const TAG_PHONETIC_TEXT: QName = QName(b"rPh");       // Phonetic text for Asian languages
const TAG_TEXT: QName = QName(b"t");                  // Text content within strings
const TAG_WORKBOOK_PROPERTIES: QName = QName(b"workbookPr"); // Workbook properties
const TAG_SHEET: QName = QName(b"sheet");             // Worksheet definition
const TAG_ROW: QName = QName(b"row");                 // Row in worksheet
const TAG_CELL: QName = QName(b"c");                  // Cell in worksheet
const TAG_INLINE_STRING: QName = QName(b"is");        // Inline string value
const TAG_VALUE: QName = QName(b"v");                 // Cell value content

/// An Excel `.xlsx` / `.xlsm` workbook opened for reading.
pub struct XlsxSpreadsheet {
    /// File name of the spreadsheet
    name: String,
    /// ZIP archive containing the package parts
    zip: ZipArchive<UnifiedReader>,
    /// Parsed number formats for cell type detection, indexed by style ID
    number_formats: Vec<CellType>,
    /// Shared string table
    shared_strings: Vec<String>,
    /// List of worksheets with (name, zip_path) pairs
    sheets: Vec<(String, String)>,
}

impl XlsxSpreadsheet {
    /// Opens an `.xlsx` package backed by any unified reader.
    pub(crate) fn open(name: &str, reader: UnifiedReader) -> Result<XlsxSpreadsheet, HierarchyError> {
        let mut zip = ZipArchive::new(reader)?;
        let (sheets, is_1904) = load_workbook(&mut zip)?;
        if sheets.is_empty() {
            Err(SpreadsheetError::SpreadsheetEmptyError(name.to_owned()))?
        }
        let number_formats = load_number_formats(&mut zip, is_1904)?;
        let shared_strings = load_shared_strings(&mut zip)?;
        debug!(file = name, sheets = sheets.len(), shared_strings = shared_strings.len(), "opened workbook");
        Ok(XlsxSpreadsheet {
            name: name.to_owned(),
            zip,
            number_formats,
            shared_strings,
            sheets,
        })
    }

    /// Replaces shared string indexes by their text.
    fn resolve(&self, kind: CellType, value: String) -> Result<(CellType, String), HierarchyError> {
        if kind != CellType::SharedString {
            return Ok((kind, value));
        }
        let index = value.trim().parse::<usize>()?;
        let text = self
            .shared_strings
            .get(index)
            .cloned()
            .ok_or_else(|| SpreadsheetError::SharedStringError(self.name.to_owned(), index))?;
        Ok((CellType::Text, text))
    }
}

impl Spreadsheet for XlsxSpreadsheet {
    fn name(&self) -> String {
        self.name.to_owned()
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.to_owned()).collect()
    }

    /// Reads every worksheet accepted by the criteria. Empty cells, null
    /// literals and (with `error_as_null`) error cells are dropped.
    fn read_sheets(&mut self, criteria: &Criteria) -> Result<Vec<Sheet>, HierarchyError> {
        let mut sheets = Vec::<Sheet>::new();
        let targets: Vec<(String, String)> = self
            .sheets
            .iter()
            .filter(|(sheet_name, _)| criteria.accept(sheet_name))
            .cloned()
            .collect();
        for (sheet_name, zip_path) in targets {
            let mut sheet = Sheet::new(&self.name, &sheet_name, criteria.range, criteria.rows_limit);
            let mut pending = Vec::<(usize, usize, CellType, String)>::new();
            {
                let number_formats = &self.number_formats;
                let mut reader = self
                    .zip
                    .xml_reader(&zip_path)?
                    .ok_or_else(|| SpreadsheetError::FileError(zip_path.to_owned()))?;
                read_cells(&mut reader, criteria, number_formats, &mut pending)?;
            }
            for (row, col, kind, value) in pending {
                if sheet.after_row_upper_bound(row) {
                    break;
                }
                if !sheet.contains(row, col) {
                    continue;
                }
                if kind == CellType::Error {
                    if criteria.error_as_null {
                        continue;
                    }
                    Err(SpreadsheetError::CellValueError(
                        sheet.file_name.to_owned(),
                        sheet.name.to_owned(),
                        index_to_reference(row, col),
                        value.to_owned(),
                    ))?
                }
                let (kind, value) = self.resolve(kind, value)?;
                if value.is_empty() || (kind == CellType::Text && criteria.nulls.contains(&value)) {
                    continue;
                }
                sheet.push(Cell { row, col, kind, value });
            }
            debug!(sheet = sheet_name, cells = sheet.cells.len(), "read worksheet");
            sheets.push(sheet);
        }
        Ok(sheets)
    }
}

/// Collects the raw `(row, col, type, value)` of every worksheet cell.
/// Stops early once rows pass the user range.
fn read_cells<R: BufRead>(
    reader: &mut XmlReader<R>,
    criteria: &Criteria,
    number_formats: &[CellType],
    cells: &mut Vec<(usize, usize, CellType, String)>,
) -> Result<(), HierarchyError> {
    let classify = |kind: Option<&str>, format_id: Option<&str>| -> Result<CellType, HierarchyError> {
        let kind = match kind {
            Some("inlineStr" | "str") => CellType::Text,
            Some("s") => CellType::SharedString,
            Some("d") => CellType::IsoDateTime,
            Some("b") => CellType::Boolean,
            Some("e") => CellType::Error,
            _ => CellType::Number,
        };
        match format_id.filter(|id| kind == CellType::Number && !id.is_empty()) {
            Some(id) => Ok(number_formats.get(id.parse::<usize>()?).copied().unwrap_or(CellType::Number)),
            None => Ok(kind),
        }
    };

    let mut row_count = 0usize;
    let mut col_count = 0usize;
    let mut row = 0usize;
    let mut col = 0usize;
    let mut kind = CellType::default();
    let mut value = String::new();
    match_xml_events!(reader => {
        Event::End(event) if event.name() == TAG_ROW => {
            row_count += 1;
            col_count = 0;
        }
        Event::Start(event) if event.name() == TAG_CELL => {
            (row, col) = event.get_attribute_value("r")?
                .and_then(|reference| reference_to_index(&reference))
                .unwrap_or((row_count, col_count));
            col_count = col + 1;
            row_count = row;
            if criteria.range.map(|range| range.after_row_upper_bound(row)).unwrap_or(false) {
                break;
            }
            let t = event.get_attribute_value("t")?;
            let s = event.get_attribute_value("s")?;
            kind = classify(t.as_deref(), s.as_deref())?;
            value.clear();
        }
        Event::Start(event) if event.name() == TAG_INLINE_STRING => {
            value = read_string_value(reader, TAG_INLINE_STRING, false)?;
        }
        Event::Start(event) if event.name() == TAG_VALUE => {
            value = read_string_value(reader, TAG_VALUE, true)?;
        }
        Event::End(event) if event.name() == TAG_CELL => {
            if kind != CellType::Empty && !value.is_empty() {
                cells.push((row, col, kind, std::mem::take(&mut value)));
            }
            kind = CellType::default();
        }
    });
    Ok(())
}

/// Loads worksheet names and paths plus the date system flag from `workbook.xml`.
fn load_workbook(zip: &mut ZipArchive<UnifiedReader>) -> Result<(Vec<(String, String)>, bool), HierarchyError> {
    let relationships = load_relationships(zip, "xl/_rels/workbook.xml.rels")?;
    let mut reader = zip
        .xml_reader("xl/workbook.xml")?
        .ok_or_else(|| SpreadsheetError::FileError("xl/workbook.xml".to_string()))?;
    let mut sheets: Vec<(String, String)> = Vec::new();
    let mut is_1904 = false;
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TAG_SHEET => {
            let mut name = None::<String>;
            let mut id = None::<String>;
            for result in event.attributes() {
                let attribute = result?;
                let key = attribute.key.local_name();
                if key.as_ref() == b"name" {
                    name = Some(attribute.unescape_value()?.to_string());
                } else if key.as_ref() == b"id" {
                    id = Some(attribute.unescape_value()?.to_string());
                }
            }
            if let Some((name, id)) = name.zip(id) {
                if let Some(path) = relationships.get(&id) {
                    sheets.push((name, path.to_owned()));
                }
            }
        }
        Event::Start(event) if event.name() == TAG_WORKBOOK_PROPERTIES => {
            is_1904 = event.get_attribute_value("date1904")?
                .map(|value| value.eq("1") || value.eq("true"))
                .unwrap_or(false);
        }
    });
    Ok((sheets, is_1904))
}

/// Loads the cell style table from `styles.xml` as one cell type per style ID.
fn load_number_formats(zip: &mut ZipArchive<UnifiedReader>, is_1904: bool) -> Result<Vec<CellType>, HierarchyError> {
    let mut reader = match zip.xml_reader("xl/styles.xml")? {
        Some(reader) => reader,
        None => return Ok(Vec::new()),
    };

    let mut custom_formats_context = false;
    let mut custom_formats = HashMap::<String, CellType>::new();
    let mut format_indexes_context = false;
    let mut format_indexes = Vec::<String>::new();

    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TAG_CUSTOM_FORMATS => custom_formats_context = true,
        Event::End(event) if event.name() == TAG_CUSTOM_FORMATS => custom_formats_context = false,
        Event::Start(event) if custom_formats_context && event.name() == TAG_CUSTOM_FORMAT => {
            let id = event.get_attribute_value("numFmtId")?;
            let format = event.get_attribute_value("formatCode")?;
            if let Some((id, format)) = id.zip(format) {
                let style = CellType::parse_custom_number_format(&format, is_1904);
                custom_formats.insert(id.to_string(), style);
            }
        }
        Event::Start(event) if event.name() == TAG_FORMAT_INDEXES => format_indexes_context = true,
        Event::End(event) if event.name() == TAG_FORMAT_INDEXES => format_indexes_context = false,
        Event::Start(event) if format_indexes_context && event.name() == TAG_FORMAT_INDEX => {
            let id = event.get_attribute_value("numFmtId")?;
            format_indexes.push(id.map(|id| id.to_string()).unwrap_or_else(|| "0".to_owned()));
        }
    });

    Ok(excel::load_number_formats(format_indexes, custom_formats, is_1904))
}

/// Loads the whole shared string table.
fn load_shared_strings(zip: &mut ZipArchive<UnifiedReader>) -> Result<Vec<String>, HierarchyError> {
    let mut shared_strings = Vec::<String>::new();
    let mut reader = match zip.xml_reader("xl/sharedStrings.xml")? {
        Some(reader) => reader,
        None => return Ok(shared_strings),
    };
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TAG_SHARED_STRING_ITEM => {
            shared_strings.push(read_string_value(&mut reader, TAG_SHARED_STRING_ITEM, false)?);
        }
    });
    Ok(shared_strings)
}

/// Reads string content up to `end_tag`, skipping phonetic runs.
/// With `is_text_content` every text node counts, otherwise only `<t>` runs.
fn read_string_value<R: BufRead>(
    reader: &mut XmlReader<R>,
    end_tag: QName,
    is_text_content: bool,
) -> Result<String, HierarchyError> {
    let mut is_phonetic_text = false;
    let mut is_text = is_text_content;
    let mut text = String::new();
    match_xml_events!(reader => {
        Event::End(event) if event.name() == end_tag => break,
        Event::Start(event) if event.name() == TAG_PHONETIC_TEXT => is_phonetic_text = true,
        Event::End(event) if event.name() == TAG_PHONETIC_TEXT => is_phonetic_text = false,
        Event::Start(event) if !is_phonetic_text && event.name() == TAG_TEXT => is_text = true,
        Event::End(event) if is_text && event.name() == TAG_TEXT => is_text = false,
        Event::Text(event) if is_text => text.push_str(&event.xml_content()?),
        Event::CData(event) if is_text => text.push_str(&event.xml_content()?),
        Event::GeneralRef(event) if is_text => text.push_bytes_ref(&event)?,
    });
    Ok(text)
}
