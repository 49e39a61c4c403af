use crate::error::HierarchyError;
use crate::spreadsheet::range::Range;
use glob::Pattern;
use std::collections::HashSet;

/// Criteria for selecting worksheets and the cells read from them.
#[derive(Clone, Debug, Default)]
pub struct Criteria {
    /// Sheet name patterns for filtering which sheets to process.
    pub sheet_name_patterns: Option<Vec<Pattern>>,

    /// Data range within sheets to extract.
    pub range: Option<Range>,

    /// Maximum number of rows to read per sheet, header rows included.
    pub rows_limit: Option<usize>,

    /// Text values read as null (in addition to empty cells).
    pub nulls: HashSet<String>,

    /// Convert error cells (`#N/A`, `#DIV/0!`) to null instead of failing.
    pub error_as_null: bool,
}

impl Criteria {
    /// Builds criteria from textual sheet-name globs and an optional A1 range.
    pub fn new(sheet_names: &[&str], range: Option<&str>) -> Result<Self, HierarchyError> {
        let sheet_name_patterns = if sheet_names.is_empty() {
            None
        } else {
            Some(
                sheet_names
                    .iter()
                    .map(|name| Pattern::new(name))
                    .collect::<Result<Vec<_>, _>>()?,
            )
        };
        Ok(Criteria {
            sheet_name_patterns,
            range: range.map(Range::try_from).transpose()?,
            ..Default::default()
        })
    }

    /// Checks if a sheet name matches the criteria patterns.
    /// Returns true if no patterns are specified or if name matches any pattern.
    pub fn accept(&self, sheet_name: &str) -> bool {
        match &self.sheet_name_patterns {
            Some(patterns) => patterns.iter().any(|pattern| pattern.matches(sheet_name)),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_everything_without_patterns() {
        let criteria = Criteria::default();
        assert!(criteria.accept("Sheet1"));
    }

    #[test]
    fn matches_glob_patterns() {
        let criteria = Criteria::new(&["Doanh*", "Report"], Some("A1:F20")).unwrap();
        assert!(criteria.accept("Doanh thu"));
        assert!(criteria.accept("Report"));
        assert!(!criteria.accept("Sheet1"));
        assert_eq!(criteria.range.and_then(|range| range.row_upper_bound), Some(19));
    }

    #[test]
    fn invalid_inputs_fail() {
        assert!(Criteria::new(&["[a"], None).is_err());
        assert!(Criteria::new(&[], Some("1A")).is_err());
    }
}
