//! Indented text forms of the hierarchy trees, as handed to the query
//! resolver. The selection parsers read these shapes back.
use crate::config::EngineConfig;
use crate::hierarchy::node::HierarchyNode;
use indexmap::IndexMap;

/// Formats the row tree as `feature: value` lines, one feature per depth.
/// A leaf list becomes one comma-joined line under the next feature.
///
/// ```text
/// Cà phê: Cà phê Đen
///     Loại: Undefined
///         Nhập Khẩu: Việt Nam, Brazil
/// ```
pub fn format_row_tree(tree: &HierarchyNode, features: &[String], config: &EngineConfig) -> String {
    let mut lines = Vec::new();
    format_row_level(tree, features, 0, config, &mut lines);
    lines.join("\n")
}

fn format_row_level(node: &HierarchyNode, features: &[String], depth: usize, config: &EngineConfig, lines: &mut Vec<String>) {
    let Some(feature) = features.get(depth) else {
        return;
    };
    let indent = " ".repeat(config.indent_width * depth);
    match node {
        HierarchyNode::Leaf(values) if !values.is_empty() => {
            lines.push(format!("{indent}{feature}: {}", values.join(", ")));
        }
        HierarchyNode::Leaf(_) => (),
        HierarchyNode::Branch(children) => {
            for (key, child) in children {
                lines.push(format!("{indent}{feature}: {key}"));
                format_row_level(child, features, depth + 1, config, lines);
            }
        }
    }
}

/// Formats the column tree as `level_N: label` lines. At each level the
/// terminal labels come first as one comma-joined line, then branches,
/// then labels with leaf lists.
///
/// ```text
/// level_1: Thời gian
///     level_2: Hè, Đông
/// level_1: Ghi chú
/// ```
pub fn format_col_tree(tree: &IndexMap<String, HierarchyNode>, config: &EngineConfig) -> String {
    let mut lines = Vec::new();
    let child_indent = " ".repeat(config.indent_width);
    for (name, node) in tree {
        lines.push(format!("level_1: {name}"));
        match node {
            HierarchyNode::Branch(children) if !children.is_empty() => format_col_level(children, 2, 1, config, &mut lines),
            HierarchyNode::Leaf(values) if !values.is_empty() => {
                lines.push(format!("{child_indent}level_2: {}", values.join(", ")));
            }
            _ => (),
        }
    }
    lines.join("\n")
}

fn format_col_level(
    children: &IndexMap<String, HierarchyNode>,
    level: usize,
    depth: usize,
    config: &EngineConfig,
    lines: &mut Vec<String>,
) {
    let indent = " ".repeat(config.indent_width * depth);
    let next_indent = " ".repeat(config.indent_width * (depth + 1));
    let mut terminals = Vec::new();
    let mut branches = Vec::new();
    let mut lists = Vec::new();
    for (key, child) in children {
        match child {
            HierarchyNode::Branch(grandchildren) if !grandchildren.is_empty() => branches.push((key, grandchildren)),
            HierarchyNode::Leaf(values) if !values.is_empty() => lists.push((key, values)),
            _ => terminals.push(key.as_str()),
        }
    }
    if !terminals.is_empty() {
        lines.push(format!("{indent}level_{level}: {}", terminals.join(", ")));
    }
    for (key, grandchildren) in branches {
        lines.push(format!("{indent}level_{level}: {key}"));
        format_col_level(grandchildren, level + 1, depth + 1, config, lines);
    }
    for (key, values) in lists {
        lines.push(format!("{indent}level_{level}: {key}"));
        lines.push(format!("{next_indent}level_{}: {}", level + 1, values.join(", ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(values: &[&str]) -> HierarchyNode {
        HierarchyNode::Leaf(values.iter().map(|value| value.to_string()).collect())
    }

    fn branch(children: Vec<(&str, HierarchyNode)>) -> HierarchyNode {
        HierarchyNode::Branch(children.into_iter().map(|(key, child)| (key.to_owned(), child)).collect())
    }

    #[test]
    fn row_tree_text() {
        let tree = branch(vec![
            ("Cà phê Đen", branch(vec![("Undefined", leaf(&["Việt Nam", "Brazil"]))])),
            ("Bạc xỉu", HierarchyNode::default()),
        ]);
        let features: Vec<String> = ["Cà phê", "Loại", "Nhập Khẩu"].iter().map(|name| name.to_string()).collect();
        let text = format_row_tree(&tree, &features, &EngineConfig::default());
        assert_eq!(
            text,
            "Cà phê: Cà phê Đen\n    Loại: Undefined\n        Nhập Khẩu: Việt Nam, Brazil\nCà phê: Bạc xỉu"
        );
    }

    #[test]
    fn row_tree_single_list() {
        let features = vec!["Tỉnh".to_owned()];
        let text = format_row_tree(&leaf(&["Hà Nội", "HCM"]), &features, &EngineConfig::default());
        assert_eq!(text, "Tỉnh: Hà Nội, HCM");
    }

    #[test]
    fn col_tree_text_orders_terminals_first() {
        let mut tree = IndexMap::new();
        tree.insert(
            "Chi phí".to_owned(),
            branch(vec![
                ("Năm 2024", leaf(&["Quý 1", "Quý 2"])),
                ("Tổng", HierarchyNode::default()),
                ("Năm 2023", branch(vec![("Quý 1", leaf(&["Tháng 1"])), ("Quý 2", HierarchyNode::default())])),
            ]),
        );
        tree.insert("Thu nhập".to_owned(), leaf(&["Thấp", "Cao"]));
        tree.insert("Ghi chú".to_owned(), HierarchyNode::default());
        let text = format_col_tree(&tree, &EngineConfig::default());
        let expected = [
            "level_1: Chi phí",
            "    level_2: Tổng",
            "    level_2: Năm 2023",
            "        level_3: Quý 2",
            "        level_3: Quý 1",
            "            level_4: Tháng 1",
            "    level_2: Năm 2024",
            "        level_3: Quý 1, Quý 2",
            "level_1: Thu nhập",
            "    level_2: Thấp, Cao",
            "level_1: Ghi chú",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }
}
