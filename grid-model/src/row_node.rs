//! FILENAME: grid-model/src/row_node.rs
//! PURPOSE: The hierarchical row tree the row-model stages operate on.
//! CONTEXT: Row nodes live in an arena (`RowTree`) and reference each other
//! by `RowNodeId`, so buckets and sibling links are plain indices rather than
//! shared ownership. Nodes are created and destroyed by the row model; the
//! pivot stage only reads `children_after_filter` and writes
//! `children_mapped`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::value::RowData;

/// Index of a row node within its `RowTree`.
pub type RowNodeId = u32;

/// The nested bucket mapping written onto leaf-group nodes by pivoting.
/// `Groups` nesting depth equals the number of active pivot columns,
/// terminating in `Rows` of data-row ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChildrenMapped {
    Groups(FxHashMap<String, ChildrenMapped>),
    Rows(Vec<RowNodeId>),
}

impl ChildrenMapped {
    /// Number of `Groups` levels until the row sequences are reached.
    /// An empty `Groups` level still counts as one level.
    pub fn depth(&self) -> usize {
        match self {
            ChildrenMapped::Rows(_) => 0,
            ChildrenMapped::Groups(groups) => {
                1 + groups.values().map(|c| c.depth()).max().unwrap_or(0)
            }
        }
    }

    /// Looks up the bucket for a key at this level.
    pub fn get(&self, key: &str) -> Option<&ChildrenMapped> {
        match self {
            ChildrenMapped::Groups(groups) => groups.get(key),
            ChildrenMapped::Rows(_) => None,
        }
    }

    /// The row ids if this is a terminal bucket.
    pub fn rows(&self) -> Option<&[RowNodeId]> {
        match self {
            ChildrenMapped::Rows(rows) => Some(rows),
            ChildrenMapped::Groups(_) => None,
        }
    }

    /// Number of keys at this level (0 for a terminal bucket).
    pub fn group_count(&self) -> usize {
        match self {
            ChildrenMapped::Groups(groups) => groups.len(),
            ChildrenMapped::Rows(_) => 0,
        }
    }
}

/// A node in the row tree: either a grouping node or a leaf data row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowNode {
    pub id: RowNodeId,

    /// Group key for grouping nodes, None for data rows and the root.
    pub key: Option<String>,

    /// True for the root and every grouping node.
    pub group: bool,

    /// True when this node is the lowest grouping level and its children
    /// are the actual data rows.
    pub leaf_group: bool,

    /// Children remaining after row-level filtering, in display order.
    /// Written by the filter stage; read-only for downstream stages.
    pub children_after_filter: Vec<RowNodeId>,

    /// Nested pivot buckets. Exclusively owned and overwritten by the
    /// pivot stage on each execution.
    pub children_mapped: Option<ChildrenMapped>,

    /// Optional twin node whose `children_mapped` mirrors this node's.
    pub sibling: Option<RowNodeId>,

    /// The data record, present on leaf data rows only.
    pub data: Option<RowData>,
}

/// Arena holding all row nodes of one grid session's row model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowTree {
    nodes: Vec<RowNode>,
    root: RowNodeId,
}

impl RowTree {
    /// Creates a tree containing only the root grouping node.
    pub fn new() -> Self {
        let root = RowNode {
            id: 0,
            key: None,
            group: true,
            leaf_group: false,
            children_after_filter: Vec::new(),
            children_mapped: None,
            sibling: None,
            data: None,
        };
        RowTree {
            nodes: vec![root],
            root: 0,
        }
    }

    pub fn root(&self) -> RowNodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: RowNodeId) -> &RowNode {
        &self.nodes[id as usize]
    }

    pub fn node_mut(&mut self, id: RowNodeId) -> &mut RowNode {
        &mut self.nodes[id as usize]
    }

    /// Adds a grouping node under `parent` and links it into the parent's
    /// filtered children.
    pub fn add_group(&mut self, parent: RowNodeId, key: &str, leaf_group: bool) -> RowNodeId {
        let id = self.nodes.len() as RowNodeId;
        self.nodes.push(RowNode {
            id,
            key: Some(key.to_string()),
            group: true,
            leaf_group,
            children_after_filter: Vec::new(),
            children_mapped: None,
            sibling: None,
            data: None,
        });
        self.nodes[parent as usize].children_after_filter.push(id);
        id
    }

    /// Adds a leaf data row under `parent` and links it into the parent's
    /// filtered children.
    pub fn add_leaf_row(&mut self, parent: RowNodeId, data: RowData) -> RowNodeId {
        let id = self.nodes.len() as RowNodeId;
        self.nodes.push(RowNode {
            id,
            key: None,
            group: false,
            leaf_group: false,
            children_after_filter: Vec::new(),
            children_mapped: None,
            sibling: None,
            data: Some(data),
        });
        self.nodes[parent as usize].children_after_filter.push(id);
        id
    }

    /// Adds a detached twin of `node` (not linked into any parent) and
    /// records it as the node's sibling.
    pub fn add_sibling(&mut self, node: RowNodeId) -> RowNodeId {
        let id = self.nodes.len() as RowNodeId;
        let twin = RowNode {
            id,
            sibling: None,
            ..self.nodes[node as usize].clone()
        };
        self.nodes.push(twin);
        self.nodes[node as usize].sibling = Some(id);
        id
    }
}

impl Default for RowTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{CellValue, RowData};

    fn row(country: &str) -> RowData {
        let mut data = RowData::new();
        data.set("country", CellValue::Text(country.to_string()));
        data
    }

    #[test]
    fn test_new_tree_has_root_group() {
        let tree = RowTree::new();
        assert_eq!(tree.len(), 1);
        let root = tree.node(tree.root());
        assert!(root.group);
        assert!(!root.leaf_group);
        assert!(root.children_after_filter.is_empty());
    }

    #[test]
    fn test_add_group_links_parent() {
        let mut tree = RowTree::new();
        let group = tree.add_group(tree.root(), "2000", true);

        assert_eq!(tree.node(tree.root()).children_after_filter, vec![group]);
        let node = tree.node(group);
        assert_eq!(node.key.as_deref(), Some("2000"));
        assert!(node.group);
        assert!(node.leaf_group);
    }

    #[test]
    fn test_add_leaf_rows_preserve_order() {
        let mut tree = RowTree::new();
        let group = tree.add_group(tree.root(), "2000", true);
        let a = tree.add_leaf_row(group, row("US"));
        let b = tree.add_leaf_row(group, row("FR"));
        let c = tree.add_leaf_row(group, row("US"));

        assert_eq!(tree.node(group).children_after_filter, vec![a, b, c]);
        assert!(tree.node(a).data.is_some());
        assert!(!tree.node(a).group);
    }

    #[test]
    fn test_add_sibling_is_detached_twin() {
        let mut tree = RowTree::new();
        let group = tree.add_group(tree.root(), "2000", true);
        tree.add_leaf_row(group, row("US"));

        let sibling = tree.add_sibling(group);

        assert_eq!(tree.node(group).sibling, Some(sibling));
        assert_eq!(tree.node(sibling).sibling, None);
        assert_eq!(tree.node(sibling).key.as_deref(), Some("2000"));
        // the twin is not a child of the root
        assert_eq!(tree.node(tree.root()).children_after_filter, vec![group]);
    }

    #[test]
    fn test_children_mapped_depth() {
        let rows = ChildrenMapped::Rows(vec![1, 2]);
        assert_eq!(rows.depth(), 0);
        assert_eq!(rows.rows(), Some(&[1, 2][..]));

        let mut inner = FxHashMap::default();
        inner.insert("2000".to_string(), ChildrenMapped::Rows(vec![1]));
        let mut outer = FxHashMap::default();
        outer.insert("US".to_string(), ChildrenMapped::Groups(inner));
        let mapped = ChildrenMapped::Groups(outer);

        assert_eq!(mapped.depth(), 2);
        assert_eq!(mapped.group_count(), 1);
        let us = mapped.get("US").unwrap();
        assert_eq!(us.get("2000").unwrap().rows(), Some(&[1][..]));
    }
}
