use crate::config::EngineConfig;
use crate::error::HierarchyError;
use crate::error::ResultMessage;
use crate::hierarchy::node::HierarchyNode;
use crate::table::Table;
use indexmap::IndexMap;

/// Unpruned tree: every distinct value under its parent, in first-seen order.
#[derive(Default)]
struct RawNode(IndexMap<String, RawNode>);

/// Builds the row hierarchy over the feature columns, broadest first.
///
/// The full tree is built first; a second post-order pass drops
/// undefined-label branches that carry nothing below them and collapses
/// all-terminal levels into leaf lists.
pub fn build_row_tree(table: &Table, features: &[String], config: &EngineConfig) -> Result<HierarchyNode, HierarchyError> {
    let indexes = features
        .iter()
        .map(|name| Ok(table.require_column(name)?))
        .collect::<Result<Vec<usize>, HierarchyError>>()
        .with_prefix("Build row tree")?;
    if indexes.is_empty() {
        return Ok(HierarchyNode::default());
    }
    let rows: Vec<usize> = (0..table.row_count()).collect();
    let raw = build_raw(table, &indexes, &rows);
    Ok(finish(raw, config))
}

fn build_raw(table: &Table, indexes: &[usize], rows: &[usize]) -> RawNode {
    let Some((&index, deeper)) = indexes.split_first() else {
        return RawNode::default();
    };
    let column = table.column(index);
    let mut groups = IndexMap::<String, Vec<usize>>::new();
    for &row in rows {
        if column[row].is_blank() {
            continue;
        }
        if let Some(text) = column[row].as_text() {
            groups.entry(text).or_default().push(row);
        }
    }
    RawNode(
        groups
            .into_iter()
            .map(|(value, rows)| (value, build_raw(table, deeper, &rows)))
            .collect(),
    )
}

fn finish(raw: RawNode, config: &EngineConfig) -> HierarchyNode {
    let mut children = IndexMap::new();
    for (key, child) in raw.0 {
        let child = finish(child, config);
        if key == config.undefined_label && is_redundant(&child, &config.undefined_label) {
            continue;
        }
        children.insert(key, child);
    }
    HierarchyNode::collapse(children, config.leaf_order)
}

/// Empty, only undefined leaves, or only undefined keys over redundant children.
fn is_redundant(node: &HierarchyNode, undefined: &str) -> bool {
    match node {
        HierarchyNode::Leaf(values) => values.iter().all(|value| value == undefined),
        HierarchyNode::Branch(children) => children
            .iter()
            .all(|(key, child)| key == undefined && is_redundant(child, undefined)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::normalize::normalize_rows;
    use crate::table::tests::table;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn coffee() -> Table {
        table(
            &[&["Cà phê"], &["Loại"], &["Nhập Khẩu"], &["Giá"]],
            &[
                &["Cà phê Đen", "Undefined", "Việt Nam", "1"],
                &["Cà phê Đen", "Undefined", "Brazil", "2"],
                &["Cà phê Sữa", "Đá", "Undefined", "3"],
                &["Cà phê Sữa", "Nóng", "Undefined", "4"],
                &["Bạc xỉu", "Undefined", "Undefined", "5"],
            ],
        )
    }

    #[test]
    fn prunes_redundant_undefined_branches() {
        let features = names(&["Cà phê", "Loại", "Nhập Khẩu"]);
        let tree = build_row_tree(&coffee(), &features, &EngineConfig::default()).unwrap();
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(
            json,
            r#"{"Cà phê Đen":{"Undefined":["Việt Nam","Brazil"]},"Cà phê Sữa":["Đá","Nóng"],"Bạc xỉu":{}}"#
        );
    }

    #[test]
    fn single_feature_collapses_to_list() {
        let tree = build_row_tree(&coffee(), &names(&["Cà phê"]), &EngineConfig::default()).unwrap();
        assert_eq!(
            tree,
            HierarchyNode::Leaf(vec!["Cà phê Đen".to_owned(), "Cà phê Sữa".to_owned(), "Bạc xỉu".to_owned()])
        );
    }

    #[test]
    fn every_source_value_appears() {
        let source = table(
            &[&["Tỉnh"], &["Huyện"]],
            &[&["Hà Nội", ""], &["", "Cầu Giấy"], &["", "Đống Đa"], &["HCM", ""], &["", "Quận 1"]],
        );
        let config = EngineConfig::default();
        let features = names(&["Tỉnh", "Huyện"]);
        let normalized = normalize_rows(&source, &features, &config).unwrap();
        let tree = build_row_tree(&normalized, &features, &config).unwrap();
        let labels = tree.labels();
        for value in ["Hà Nội", "Cầu Giấy", "Đống Đa", "HCM", "Quận 1"] {
            assert!(labels.contains(&value), "{value} missing from {labels:?}");
        }
        assert!(!labels.contains(&"Undefined"));
    }

    #[test]
    fn missing_feature_is_an_error() {
        let error = build_row_tree(&coffee(), &names(&["Cà phê", "Size"]), &EngineConfig::default()).unwrap_err();
        assert_eq!(error.to_string(), "Build row tree: Column 'Size' not found");
    }

    #[test]
    fn no_features_is_empty() {
        assert!(build_row_tree(&coffee(), &[], &EngineConfig::default()).unwrap().is_empty());
    }
}
