use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::range::Range;

/// A worksheet read into memory as a sparse list of non-empty cells.
#[derive(Debug)]
pub struct Sheet {
    /// Source file name
    pub file_name: String,
    /// Sheet name
    pub name: String,
    /// Non-empty cells in row-major order
    pub cells: Vec<Cell>,
    /// Expected data range (user-specified)
    range: Range,
    /// Row limit for data extraction
    limit: Option<usize>,
    /// Actual data range (determined from cell data)
    pub row_lower_bound: Option<usize>,
    pub row_upper_bound: Option<usize>,
    pub col_lower_bound: Option<usize>,
    pub col_upper_bound: Option<usize>,
}

impl Sheet {
    /// Creates an empty sheet with the given range and row limit.
    pub(crate) fn new(file_name: &str, name: &str, range: Option<Range>, limit: Option<usize>) -> Self {
        Self {
            file_name: file_name.to_owned(),
            name: name.to_owned(),
            cells: Vec::new(),
            range: range.unwrap_or_default(),
            limit,
            row_lower_bound: None,
            row_upper_bound: None,
            col_lower_bound: None,
            col_upper_bound: None,
        }
    }

    /// Returns true if the sheet contains no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Checks if a row is after the upper bound of the specified range or exceeds the row limit.
    pub(crate) fn after_row_upper_bound(&self, row: usize) -> bool {
        let is_more_than_limit = self
            .row_lower_bound
            .zip(self.limit)
            .map(|(row_lower_bound, limit)| row_lower_bound + limit <= row)
            .unwrap_or(false);
        self.range.after_row_upper_bound(row) || is_more_than_limit
    }

    /// Checks if a cell at (row, col) is within the specified range and limits.
    pub(crate) fn contains(&self, row: usize, col: usize) -> bool {
        self.range.contains(row, col) && !self.after_row_upper_bound(row)
    }

    /// Adds a cell to the sheet, updating the data range.
    pub(crate) fn push(&mut self, cell: Cell) {
        self.update_bound(cell.row, cell.col);
        self.cells.push(cell);
    }

    /// Updates the actual data range boundaries based on cell positions.
    fn update_bound(&mut self, row: usize, col: usize) {
        if self.row_lower_bound.map(|row_lower_bound| row < row_lower_bound).unwrap_or(true) {
            self.row_lower_bound = Some(row);
        }
        if self.row_upper_bound.map(|row_upper_bound| row_upper_bound < row).unwrap_or(true) {
            self.row_upper_bound = Some(row);
        }
        if self.col_lower_bound.map(|col_lower_bound| col < col_lower_bound).unwrap_or(true) {
            self.col_lower_bound = Some(col);
        }
        if self.col_upper_bound.map(|col_upper_bound| col_upper_bound < col).unwrap_or(true) {
            self.col_upper_bound = Some(col);
        }
    }

    /// Lays the cells out as a dense grid from the first to the last
    /// populated row. Columns span the user range when given, otherwise
    /// the populated columns.
    pub fn grid(&self) -> Vec<Vec<Option<&Cell>>> {
        let (Some(row_lower), Some(row_upper)) = (self.row_lower_bound, self.row_upper_bound) else {
            return Vec::new();
        };
        let col_lower = self.range.col_lower_bound.or(self.col_lower_bound).unwrap_or(0);
        let col_upper = self.range.col_upper_bound.or(self.col_upper_bound).unwrap_or(0);
        let width = col_upper + 1 - col_lower.min(col_upper + 1);
        let mut table = vec![vec![None; width]; row_upper + 1 - row_lower];
        for cell in &self.cells {
            if (col_lower..=col_upper).contains(&cell.col) {
                table[cell.row - row_lower][cell.col - col_lower] = Some(cell);
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::cell::CellType;

    fn push(sheet: &mut Sheet, row: usize, col: usize) {
        sheet.push(Cell {
            row,
            col,
            kind: CellType::Text,
            value: format!("{row}:{col}"),
        });
    }

    #[test]
    fn sheet_initial() {
        let sheet = Sheet::new("", "", None, None);

        assert!(sheet.is_empty());
        assert_eq!(sheet.row_lower_bound, None);
        assert_eq!(sheet.col_upper_bound, None);
        assert!(sheet.grid().is_empty());
    }

    #[test]
    fn sheet_update() {
        let mut sheet = Sheet::new("", "", None, None);
        push(&mut sheet, 1, 1);
        push(&mut sheet, 1, 3);
        push(&mut sheet, 3, 1);
        push(&mut sheet, 3, 3);

        assert_eq!(sheet.row_lower_bound, Some(1));
        assert_eq!(sheet.row_upper_bound, Some(3));
        assert_eq!(sheet.col_lower_bound, Some(1));
        assert_eq!(sheet.col_upper_bound, Some(3));

        let grid = sheet.grid();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[0].len(), 3);
        assert_eq!(grid[0][2].map(|cell| cell.value.as_str()), Some("1:3"));
        assert!(grid[1].iter().all(Option::is_none));
    }

    #[test]
    fn rows_out_of_order_keep_their_bounds() {
        let mut sheet = Sheet::new("", "", None, None);
        push(&mut sheet, 4, 0);
        push(&mut sheet, 2, 1);
        push(&mut sheet, 6, 0);
        push(&mut sheet, 3, 0);

        assert_eq!(sheet.row_lower_bound, Some(2));
        assert_eq!(sheet.row_upper_bound, Some(6));

        let grid = sheet.grid();
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0][1].map(|cell| cell.value.as_str()), Some("2:1"));
        assert_eq!(grid[4][0].map(|cell| cell.value.as_str()), Some("6:0"));
        assert!(grid[3].iter().all(Option::is_none));
    }

    #[test]
    fn sheet_range_and_limit() {
        let range = Range::try_from("B1:C10").unwrap();
        let mut sheet = Sheet::new("", "", Some(range), Some(2));
        assert!(!sheet.contains(0, 0));
        assert!(sheet.contains(0, 1));
        push(&mut sheet, 0, 1);
        assert!(sheet.contains(1, 2));
        assert!(!sheet.contains(2, 2));
        assert!(sheet.after_row_upper_bound(11));

        let grid = sheet.grid();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].len(), 2);
    }
}
