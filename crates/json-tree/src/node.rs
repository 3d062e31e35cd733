//! The tree node type.
//!
//! A [`TreeNode`] is one position in the JSON structure: a display label,
//! its path from the root, the cached path key, and either a scalar value
//! (leaf) or an ordered child list (branch). The leaf/branch duality is an
//! explicit enum, so exactly one of value/children exists by construction,
//! and empty objects and arrays are branches with zero children, never
//! leaves.
//!
//! Children are held behind [`Rc`] so the reconciler can rebuild an ancestor
//! spine while sharing every untouched subtree with the previous tree. The
//! model is single-threaded by contract, hence `Rc` rather than `Arc`.
//!
//! Transient editing state does not live here; see
//! [`EditSession`](crate::edit::EditSession).

use std::rc::Rc;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::types::{Path, PathStep, TreeError};

/// One vertex of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Display label: the property name, the stringified index, or the
    /// synthetic root label.
    pub key: String,
    /// Steps from the root; empty for the root node.
    pub path: Path,
    /// Canonical encoding of `path`, computed at construction.
    pub path_key: String,
    content: NodeContent,
}

/// Leaf/branch payload of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeContent {
    /// A scalar or null JSON value.
    Leaf(Value),
    /// Ordered children of an object or array. Objects keep source insertion
    /// order, arrays keep index order.
    Branch(Vec<Rc<TreeNode>>),
}

impl TreeNode {
    pub(crate) fn leaf(key: String, path: Path, value: Value) -> Self {
        let path_key = json_tree_path::format_path_key(&path);
        TreeNode {
            key,
            path,
            path_key,
            content: NodeContent::Leaf(value),
        }
    }

    pub(crate) fn branch(key: String, path: Path, children: Vec<Rc<TreeNode>>) -> Self {
        let path_key = json_tree_path::format_path_key(&path);
        TreeNode {
            key,
            path,
            path_key,
            content: NodeContent::Branch(children),
        }
    }

    /// The leaf/branch payload.
    pub fn content(&self) -> &NodeContent {
        &self.content
    }

    /// True iff the underlying value is a scalar or null.
    pub fn is_leaf(&self) -> bool {
        matches!(self.content, NodeContent::Leaf(_))
    }

    /// The scalar value, if this is a leaf.
    pub fn value(&self) -> Option<&Value> {
        match &self.content {
            NodeContent::Leaf(value) => Some(value),
            NodeContent::Branch(_) => None,
        }
    }

    /// The ordered children, if this is a branch.
    pub fn children(&self) -> Option<&[Rc<TreeNode>]> {
        match &self.content {
            NodeContent::Leaf(_) => None,
            NodeContent::Branch(children) => Some(children),
        }
    }

    /// Position of the direct child addressed by `step`, if any.
    ///
    /// Array children sit at their own index; object children are scanned
    /// in order. A `Key` step never matches an array child and an `Index`
    /// step never matches an object child, so the key `"0"` and the index
    /// `0` resolve independently.
    pub fn child_index(&self, step: &PathStep) -> Option<usize> {
        let children = self.children()?;
        if let PathStep::Index(index) = step {
            let node = children.get(*index)?;
            if node.path.last() == Some(step) {
                return Some(*index);
            }
            return None;
        }
        children
            .iter()
            .position(|child| child.path.last() == Some(step))
    }

    /// The direct child addressed by `step`, if any.
    pub fn child(&self, step: &PathStep) -> Option<&Rc<TreeNode>> {
        let index = self.child_index(step)?;
        self.children()?.get(index)
    }

    /// Descend from this node along `steps` (relative to this node).
    pub fn descendant(&self, steps: &[PathStep]) -> Option<&TreeNode> {
        let mut node = self;
        for step in steps {
            node = node.child(step)?;
        }
        Some(node)
    }

    /// Resolve an absolute path key within this subtree. The key must lie
    /// at or below this node's own path.
    ///
    /// # Errors
    ///
    /// [`TreeError::PathKey`] if the string is not a well-formed path key,
    /// [`TreeError::NodeNotFound`] if it does not resolve here.
    pub fn descendant_by_key(&self, path_key: &str) -> Result<&TreeNode, TreeError> {
        let path = json_tree_path::parse_path_key(path_key)?;
        if path.len() < self.path.len() || path[..self.path.len()] != self.path[..] {
            return Err(TreeError::NodeNotFound);
        }
        self.descendant(&path[self.path.len()..])
            .ok_or(TreeError::NodeNotFound)
    }

    /// Total number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        match &self.content {
            NodeContent::Leaf(_) => 1,
            NodeContent::Branch(children) => {
                1 + children.iter().map(|c| c.node_count()).sum::<usize>()
            }
        }
    }
}

/// Serializes to the consumer wire shape: `key`, `value` or `children`,
/// `path`, `pathKey`, `isLeaf`.
impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Children<'a>(&'a [Rc<TreeNode>]);

        impl Serialize for Children<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
                for child in self.0 {
                    seq.serialize_element(child.as_ref())?;
                }
                seq.end()
            }
        }

        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry("key", &self.key)?;
        match &self.content {
            NodeContent::Leaf(value) => map.serialize_entry("value", value)?,
            NodeContent::Branch(children) => {
                map.serialize_entry("children", &Children(children))?
            }
        }
        map.serialize_entry("path", &self.path)?;
        map.serialize_entry("pathKey", &self.path_key)?;
        map.serialize_entry("isLeaf", &self.is_leaf())?;
        map.end()
    }
}
