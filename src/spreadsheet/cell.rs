use crate::error::HierarchyError;
use crate::spreadsheet::reference::index_to_reference;
use crate::table::value::Value;
use chrono::Duration;
use chrono::NaiveDate;

/// Types of cell data in `.xlsx` worksheets.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum CellType {
    #[default]
    Empty,
    /// Boolean values stored as `0`/`1`
    Boolean,
    /// Numeric values
    Number,
    /// Date/time values stored as numbers from 1900 epoch
    NumberDateTime1900,
    /// Date values stored as numbers from 1900 epoch
    NumberDate1900,
    /// Time values stored as numbers from 1900 epoch
    NumberTime1900,
    /// Date/time values stored as numbers from 1904 epoch
    NumberDateTime1904,
    /// Date values stored as numbers from 1904 epoch
    NumberDate1904,
    /// Time values stored as numbers from 1904 epoch
    NumberTime1904,
    /// ISO 8601 date/time strings
    IsoDateTime,
    /// Text, either inline or already resolved from the shared string table
    Text,
    /// Unresolved index into the shared string table
    SharedString,
    /// Error values
    Error,
}

impl CellType {
    /// Parses built-in Excel number format IDs to determine cell type.
    pub(crate) fn parse_builtin_number_format_id(id: &str, is_1904: bool) -> Option<Self> {
        match id {
            "22" => Some(if is_1904 { Self::NumberDateTime1904 } else { Self::NumberDateTime1900 }),
            "14" | "15" | "16" | "17" => Some(if is_1904 { Self::NumberDate1904 } else { Self::NumberDate1900 }),
            "18" | "19" | "20" | "21" | "45" | "46" | "47" => Some(if is_1904 { Self::NumberTime1904 } else { Self::NumberTime1900 }),
            _ => None,
        }
    }

    /// Parses custom number format strings to determine cell type.
    /// Analyzes format codes for date/time patterns outside literals and colors.
    pub(crate) fn parse_custom_number_format(format: &str, is_1904: bool) -> Self {
        let mut is_escaped = false;
        let mut is_literal = false;
        let mut is_date = false;
        let mut is_time = false;
        let mut is_color = false;
        for character in format.chars() {
            match character {
                _ if is_escaped => is_escaped = false,
                '_' | '\\' => is_escaped = true,

                '"' if is_literal => is_literal = false,
                '"' if !is_color => is_literal = true,

                ']' if is_color => is_color = false,
                '[' if !is_literal => is_color = true,
                _ if is_literal || is_color => (),

                'Y' | 'y' | 'D' | 'd' => is_date = true,
                'H' | 'h' | 'S' | 's' => is_time = true,
                _ => (),
            }
        }

        match (is_date, is_time, is_1904) {
            (true, true, false) => Self::NumberDateTime1900,
            (true, true, true) => Self::NumberDateTime1904,
            (true, false, false) => Self::NumberDate1900,
            (true, false, true) => Self::NumberDate1904,
            (false, true, false) => Self::NumberTime1900,
            (false, true, true) => Self::NumberTime1904,
            (false, false, _) => Self::Number,
        }
    }
}

/// Represents a single cell in a worksheet with position, type, and raw value.
#[derive(Clone, Debug)]
pub struct Cell {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
    /// Cell data type
    pub kind: CellType,
    /// Cell value as stored in the package
    pub value: String,
}

impl Cell {
    /// Returns the Excel-style cell reference (e.g., "A1", "B2").
    pub fn reference(&self) -> String {
        index_to_reference(self.row, self.col)
    }

    /// Displays the cell the way a header label is read: numbers lose a
    /// trailing `.0`, dates become ISO text.
    pub fn to_text(&self) -> Result<String, HierarchyError> {
        Ok(match self.to_value()? {
            Value::Null => String::new(),
            value => value.to_string(),
        })
    }

    /// Converts the raw value into a JSON-safe table value.
    pub fn to_value(&self) -> Result<Value, HierarchyError> {
        let value = match self.kind {
            CellType::Empty => Value::Null,
            CellType::Boolean => Value::Text(if self.value == "1" { "TRUE" } else { "FALSE" }.to_owned()),
            CellType::Number => Value::from_number(self.value.parse::<f64>()?),
            CellType::NumberDateTime1900 => Value::Text(to_datetime_string(&self.value, false)?),
            CellType::NumberDateTime1904 => Value::Text(to_datetime_string(&self.value, true)?),
            CellType::NumberDate1900 => Value::Text(to_date_string(&self.value, false)?),
            CellType::NumberDate1904 => Value::Text(to_date_string(&self.value, true)?),
            CellType::NumberTime1900 | CellType::NumberTime1904 => Value::Text(to_time_string(&self.value)?),
            CellType::IsoDateTime => Value::Text(self.value.replace('T', " ")),
            CellType::Text | CellType::SharedString | CellType::Error => Value::Text(self.value.to_owned()),
        };
        Ok(value)
    }
}

/// Converts Excel numeric date to ISO date string.
/// Handles Lotus 1-2-3 leap year bug for 1900 epoch.
fn to_date_string(value: &str, is_1904: bool) -> Result<String, HierarchyError> {
    let days = value.parse::<f64>()?.trunc() as i64;
    let duration = Duration::days(
        days + if is_1904 {
            1462
        } else if days < 60 {
            1
        } else {
            0
        },
    );
    let date = NaiveDate::from_ymd_opt(1899, 12, 30).expect("NaiveDate Literal") + duration;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Converts Excel numeric time (fraction of a day) to ISO time string.
fn to_time_string(value: &str) -> Result<String, HierarchyError> {
    let factor = value.parse::<f64>()?.fract();
    let mut rest = (factor * 86_400_000f64).round() as i64;
    let milliseconds = rest % 1_000;
    rest /= 1_000;
    let seconds = rest % 60;
    rest /= 60;
    let minutes = rest % 60;
    let hours = rest / 60;
    let timestamp = if milliseconds > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}.{milliseconds:03}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    };
    Ok(timestamp)
}

/// Converts Excel numeric datetime to ISO datetime string.
fn to_datetime_string(value: &str, is_1904: bool) -> Result<String, HierarchyError> {
    let date = to_date_string(value, is_1904)?;
    let time = to_time_string(value)?;
    Ok(format!("{date} {time}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(kind: CellType, value: &str) -> Cell {
        Cell {
            row: 0,
            col: 0,
            kind,
            value: value.to_owned(),
        }
    }

    #[test]
    fn custom_formats() {
        assert_eq!(CellType::parse_custom_number_format("yyyy-mm-dd", false), CellType::NumberDate1900);
        assert_eq!(CellType::parse_custom_number_format("hh:mm", true), CellType::NumberTime1904);
        assert_eq!(CellType::parse_custom_number_format("[Red]0.00", false), CellType::Number);
        assert_eq!(CellType::parse_custom_number_format("0\" days\"", false), CellType::Number);
    }

    #[test]
    fn numbers_become_int_or_float() {
        assert_eq!(cell(CellType::Number, "42").to_value().unwrap(), Value::Int(42));
        assert_eq!(cell(CellType::Number, "42.0").to_value().unwrap(), Value::Int(42));
        assert_eq!(cell(CellType::Number, "1.5").to_value().unwrap(), Value::Float(1.5));
        assert!(cell(CellType::Number, "abc").to_value().is_err());
    }

    #[test]
    fn dates_render_as_iso_text() {
        assert_eq!(cell(CellType::NumberDate1900, "45292").to_text().unwrap(), "2024-01-01");
        assert_eq!(cell(CellType::NumberDateTime1900, "45292.5").to_text().unwrap(), "2024-01-01 12:00:00");
        assert_eq!(cell(CellType::NumberTime1900, "0.25").to_text().unwrap(), "06:00:00");
        assert_eq!(cell(CellType::IsoDateTime, "2024-01-01T08:00:00").to_text().unwrap(), "2024-01-01 08:00:00");
    }

    #[test]
    fn header_text_of_integral_number() {
        assert_eq!(cell(CellType::Number, "2024").to_text().unwrap(), "2024");
        assert_eq!(cell(CellType::Boolean, "1").to_text().unwrap(), "TRUE");
        assert_eq!(cell(CellType::Empty, "").to_text().unwrap(), "");
    }
}
