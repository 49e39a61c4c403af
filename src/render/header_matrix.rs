use crate::table::ColumnKey;
use serde::Serialize;
use std::collections::HashSet;

/// One rendered header cell covering `colspan` columns from `position`
/// and `rowspan` levels from `level`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub text: String,
    pub level: usize,
    pub position: usize,
    pub colspan: usize,
    pub rowspan: usize,
}

/// Builds per-level header cells for a multi-level column axis.
///
/// A cell spans down to the last level when every deeper label at its
/// first column is the sentinel. Equal neighbouring labels merge sideways when
/// the deeper levels vary across the run, or are all sentinel; identical
/// non-sentinel deeper labels stay separate cells. The last level never
/// spans. Every `(level, column)` ends up covered by exactly one cell.
pub fn build_header_matrix(columns: &[ColumnKey], sentinel: &str) -> Vec<Vec<HeaderCell>> {
    let levels = columns.first().map(ColumnKey::len).unwrap_or(0);
    let label = |level: usize, position: usize| columns[position].level(level).unwrap_or("");
    let all_lower_are_sentinel = |level: usize, position: usize| {
        ((level + 1)..levels).all(|lower| label(lower, position) == sentinel)
    };

    let mut matrix = Vec::with_capacity(levels);
    let mut covered = HashSet::<(usize, usize)>::new();
    for level in 0..levels {
        let mut cells = Vec::new();
        let mut position = 0;
        while position < columns.len() {
            if covered.contains(&(level, position)) {
                position += 1;
                continue;
            }
            let text = label(level, position);
            let colspan = colspan(level, position, levels, columns.len(), &covered, &label, sentinel);
            let rowspan = if level + 1 < levels && all_lower_are_sentinel(level, position) {
                levels - level
            } else {
                1
            };
            for row in (level + 1)..(level + rowspan) {
                for column in position..position + colspan {
                    covered.insert((row, column));
                }
            }
            cells.push(HeaderCell {
                text: text.to_owned(),
                level,
                position,
                colspan,
                rowspan,
            });
            position += colspan;
        }
        matrix.push(cells);
    }
    matrix
}

fn colspan<'a>(
    level: usize,
    start: usize,
    levels: usize,
    width: usize,
    covered: &HashSet<(usize, usize)>,
    label: &impl Fn(usize, usize) -> &'a str,
    sentinel: &str,
) -> usize {
    if level + 1 >= levels {
        return 1;
    }
    let text = label(level, start);
    let mut end = start + 1;
    while end < width && label(level, end) == text && !covered.contains(&(level, end)) {
        end += 1;
    }
    if end - start == 1 {
        return 1;
    }
    let lower_levels_vary = ((level + 1)..levels)
        .any(|lower| (start + 1..end).any(|position| label(lower, position) != label(lower, start)));
    let lower_all_sentinel = ((level + 1)..levels)
        .all(|lower| (start..end).all(|position| label(lower, position) == sentinel));
    if lower_levels_vary || lower_all_sentinel {
        end - start
    } else {
        1
    }
}

/// One cell per column for a single-level header.
pub fn flat_header_row(labels: &[String]) -> Vec<Vec<HeaderCell>> {
    vec![labels
        .iter()
        .enumerate()
        .map(|(position, text)| HeaderCell {
            text: text.to_owned(),
            level: 0,
            position,
            colspan: 1,
            rowspan: 1,
        })
        .collect()]
}
