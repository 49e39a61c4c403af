use indexmap::IndexMap;
use tracing::debug;

/// One row selection: feature name to raw value, broadest feature first.
/// A value may list comma-separated alternatives.
pub type RowPath = IndexMap<String, String>;

/// One column selection: 1-based header level to label.
pub type ColPath = IndexMap<usize, String>;

/// Splits a line into `(indent level, label, value)`. Lines without a
/// colon yield `None`.
fn split_line(line: &str, indent_width: usize) -> Option<(usize, &str, &str)> {
    if line.trim().is_empty() {
        return None;
    }
    let leading = line.chars().take_while(|character| character.is_whitespace()).count();
    let (label, value) = line.trim().split_once(':')?;
    Some((leading / indent_width.max(1), label.trim(), value.trim()))
}

/// Parses indented `feature: value` lines. Every indent-0 line starts a new
/// path; deeper lines extend the current one.
pub fn parse_row_paths(text: &str, indent_width: usize) -> Vec<RowPath> {
    let mut paths = Vec::new();
    let mut current = RowPath::new();
    for line in text.trim().lines() {
        let Some((indent, feature, value)) = split_line(line, indent_width) else {
            continue;
        };
        if indent == 0 && !current.is_empty() {
            paths.push(std::mem::take(&mut current));
        }
        current.insert(feature.to_owned(), value.to_owned());
    }
    if !current.is_empty() {
        paths.push(current);
    }
    debug!(paths = paths.len(), "parsed row paths");
    paths
}

/// Parses `level_N: label` lines. Every `level_1` line starts a new path.
/// Lines whose key is not `level_<number>` are skipped.
pub fn parse_col_paths(text: &str) -> Vec<ColPath> {
    let mut paths = Vec::new();
    let mut current = ColPath::new();
    for line in text.trim().lines() {
        let Some((_, key, value)) = split_line(line, 1) else {
            continue;
        };
        let Some(level) = key.strip_prefix("level_").and_then(|number| number.trim().parse::<usize>().ok()) else {
            continue;
        };
        if level == 1 && !current.is_empty() {
            paths.push(std::mem::take(&mut current));
        }
        current.insert(level, value.to_owned());
    }
    if !current.is_empty() {
        paths.push(current);
    }
    debug!(paths = paths.len(), "parsed column paths");
    paths
}

/// Extracts the body under a `### {heading}` line up to the next `###`
/// heading, trimmed. Empty when the heading is absent.
pub fn extract_identifier_section(output: &str, heading: &str) -> String {
    let marker = format!("### {heading}");
    let mut capturing = false;
    let mut lines = Vec::new();
    for line in output.trim().lines() {
        let stripped = line.trim();
        if !capturing && stripped.starts_with(&marker) {
            capturing = true;
        } else if capturing && stripped.starts_with("###") {
            break;
        } else if capturing {
            lines.push(line);
        }
    }
    lines.join("\n").trim().to_owned()
}
