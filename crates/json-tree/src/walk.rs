//! Depth-first traversal over a tree.

use crate::node::TreeNode;

/// Iterate a tree depth-first, pre-order: each node before its children,
/// children in their stored order. This is the order a panel flattens the
/// tree into visible rows.
///
/// # Example
///
/// ```
/// use json_tree::{build, walk};
/// use serde_json::json;
///
/// let tree = build(&json!({"a": 1, "b": [true]}), "root").unwrap();
/// let labels: Vec<&str> = walk(&tree).map(|node| node.key.as_str()).collect();
/// assert_eq!(labels, ["root", "a", "b", "0"]);
/// ```
pub fn walk(root: &TreeNode) -> Walk<'_> {
    Walk { stack: vec![root] }
}

/// Iterator state for [`walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(children) = node.children() {
            for child in children.iter().rev() {
                self.stack.push(child);
            }
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build;
    use serde_json::json;

    #[test]
    fn test_preorder() {
        let tree = build(&json!({"a": {"x": 1, "y": 2}, "b": [null]}), "root").unwrap();
        let keys: Vec<String> = walk(&tree)
            .map(|node| node.path_key.clone())
            .collect();
        assert_eq!(
            keys,
            [
                "$",
                "$['a']",
                "$['a']['x']",
                "$['a']['y']",
                "$['b']",
                "$['b'][0]",
            ]
        );
    }

    #[test]
    fn test_single_leaf() {
        let tree = build(&json!(42), "root").unwrap();
        assert_eq!(walk(&tree).count(), 1);
    }

    #[test]
    fn test_visits_every_node() {
        let tree = build(&json!({"a": [{"b": 1}, []], "c": {}}), "root").unwrap();
        assert_eq!(walk(&tree).count(), tree.node_count());
    }
}
