use crate::config::LeafOrder;
use indexmap::IndexMap;
use serde::Serialize;

/// A node of a row or column hierarchy tree.
///
/// `Leaf` holds the option list of a node whose children are all terminal.
/// `Branch` maps each value to its subtree; an empty branch is terminal.
/// Serializes as a JSON array or object respectively.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HierarchyNode {
    Leaf(Vec<String>),
    Branch(IndexMap<String, HierarchyNode>),
}

impl Default for HierarchyNode {
    fn default() -> Self {
        HierarchyNode::Branch(IndexMap::new())
    }
}

impl HierarchyNode {
    /// True for an empty branch or an empty leaf list.
    pub fn is_empty(&self) -> bool {
        match self {
            HierarchyNode::Leaf(values) => values.is_empty(),
            HierarchyNode::Branch(children) => children.is_empty(),
        }
    }

    /// Replaces a mapping whose children are all terminal by the list of its
    /// keys. Other mappings are kept as branches.
    pub(crate) fn collapse(children: IndexMap<String, HierarchyNode>, order: LeafOrder) -> HierarchyNode {
        let all_terminal = children
            .values()
            .all(|child| matches!(child, HierarchyNode::Branch(grandchildren) if grandchildren.is_empty()));
        if children.is_empty() || !all_terminal {
            return HierarchyNode::Branch(children);
        }
        let mut values: Vec<String> = children.into_keys().collect();
        if order == LeafOrder::Sorted {
            values.sort();
        }
        HierarchyNode::Leaf(values)
    }

    /// Every label in the subtree, keys and leaf values alike, depth first.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        self.collect_labels(&mut labels);
        labels
    }

    fn collect_labels<'a>(&'a self, labels: &mut Vec<&'a str>) {
        match self {
            HierarchyNode::Leaf(values) => labels.extend(values.iter().map(String::as_str)),
            HierarchyNode::Branch(children) => {
                for (key, child) in children {
                    labels.push(key);
                    child.collect_labels(labels);
                }
            }
        }
    }

    /// A branch keyed by `label` in this node, if any.
    pub fn child(&self, label: &str) -> Option<&HierarchyNode> {
        match self {
            HierarchyNode::Branch(children) => children.get(label),
            HierarchyNode::Leaf(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminal(keys: &[&str]) -> IndexMap<String, HierarchyNode> {
        keys.iter().map(|key| (key.to_string(), HierarchyNode::default())).collect()
    }

    #[test]
    fn collapses_terminal_children() {
        let node = HierarchyNode::collapse(terminal(&["Hè", "Đông"]), LeafOrder::Insertion);
        assert_eq!(node, HierarchyNode::Leaf(vec!["Hè".to_owned(), "Đông".to_owned()]));

        let node = HierarchyNode::collapse(terminal(&["b", "a"]), LeafOrder::Sorted);
        assert_eq!(node, HierarchyNode::Leaf(vec!["a".to_owned(), "b".to_owned()]));
    }

    #[test]
    fn keeps_structured_children() {
        let mut children = terminal(&["a"]);
        children.insert("b".to_owned(), HierarchyNode::Leaf(vec!["x".to_owned()]));
        let node = HierarchyNode::collapse(children, LeafOrder::Insertion);
        assert!(matches!(node, HierarchyNode::Branch(_)));
        assert_eq!(node.labels(), vec!["a", "b", "x"]);
        assert!(HierarchyNode::collapse(IndexMap::new(), LeafOrder::Insertion).is_empty());
    }

    #[test]
    fn serializes_as_nested_json() {
        let mut children = IndexMap::new();
        children.insert("Thu nhập".to_owned(), HierarchyNode::Leaf(vec!["Thấp".to_owned(), "Cao".to_owned()]));
        children.insert("Ghi chú".to_owned(), HierarchyNode::default());
        let json = serde_json::to_string(&HierarchyNode::Branch(children)).unwrap();
        assert_eq!(json, r#"{"Thu nhập":["Thấp","Cao"],"Ghi chú":{}}"#);
    }
}
