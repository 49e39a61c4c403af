use crate::config::EngineConfig;
use crate::hierarchy::node::HierarchyNode;
use crate::table::Table;
use indexmap::IndexMap;
use tracing::debug;

/// Builds the column hierarchy below each requested outermost label.
///
/// Each name maps to the tree of the deeper header levels of its columns.
/// A name that is missing, or that has nothing below it but the header
/// sentinel, maps to an empty branch.
pub fn build_header_tree(table: &Table, names: &[String], config: &EngineConfig) -> IndexMap<String, HierarchyNode> {
    let mut tree = IndexMap::new();
    for name in names {
        let suffixes: Vec<&[String]> = table
            .columns()
            .iter()
            .filter(|key| key.level(0) == Some(name.as_str()))
            .map(|key| &key.levels()[1..])
            .collect();
        if suffixes.is_empty() {
            debug!(name = name.as_str(), "header name not found");
        }
        tree.insert(name.to_owned(), build_level(&suffixes, config));
    }
    tree
}

/// Groups the key suffixes by their first label and recurses on the rest.
fn build_level(keys: &[&[String]], config: &EngineConfig) -> HierarchyNode {
    let mut children = IndexMap::<String, HierarchyNode>::new();
    for key in keys {
        let Some(label) = key.first() else {
            continue;
        };
        if label.trim().is_empty() || *label == config.header_sentinel || children.contains_key(label) {
            continue;
        }
        let group: Vec<&[String]> = keys
            .iter()
            .filter(|other| other.first() == Some(label))
            .map(|other| &other[1..])
            .collect();
        children.insert(label.to_owned(), build_level(&group, config));
    }
    HierarchyNode::collapse(children, config.leaf_order)
}
