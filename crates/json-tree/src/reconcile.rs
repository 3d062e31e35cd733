//! Value reconciler — splices a committed edit back into the document and
//! regenerates only the affected subtree.

use std::rc::Rc;

use serde_json::Value;

use crate::build::{build_at, BuildOptions};
use crate::node::TreeNode;
use crate::types::{Path, PathStep, TreeError};

/// Result of a reconciliation: the updated document, the updated tree, and
/// the path of the node that changed (for a minimal UI patch).
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub doc: Value,
    pub root: TreeNode,
    pub affected_path: Path,
}

/// Applies `new_value` at `path_key`, returning fresh document and tree.
///
/// A scalar lands as a replaced leaf; an object or array regenerates the
/// target as a branch with builder rules (structural edits flow through the
/// same entry point). Only the ancestor spine of the target is rebuilt;
/// every untouched subtree is shared with the input tree, so a consumer can
/// keep unaffected rows by node identity.
///
/// Pure with respect to both inputs: neither `doc` nor `root` is mutated;
/// the caller owns replacing its references with the returned pair.
///
/// # Errors
///
/// [`TreeError::PathKey`] for a malformed key; [`TreeError::NodeNotFound`]
/// when the key does not resolve in `root`, or when tree and document have
/// drifted apart and the path no longer exists in `doc`; in both cases the
/// caller should rebuild the tree from its current document.
///
/// # Example
///
/// ```
/// use json_tree::{apply_edit, build};
/// use serde_json::json;
///
/// let doc = json!({"a": 1, "b": [true, "x"]});
/// let tree = build(&doc, "root").unwrap();
///
/// let result = apply_edit(&doc, &tree, "$['a']", json!(false)).unwrap();
/// assert_eq!(result.doc, json!({"a": false, "b": [true, "x"]}));
/// assert_eq!(
///     result.root.descendant_by_key("$['a']").unwrap().value(),
///     Some(&json!(false))
/// );
/// ```
pub fn apply_edit(
    doc: &Value,
    root: &TreeNode,
    path_key: &str,
    new_value: Value,
) -> Result<Reconciled, TreeError> {
    apply_edit_with_options(doc, root, path_key, new_value, &BuildOptions::default())
}

/// [`apply_edit`] with explicit options for the subtree regeneration.
pub fn apply_edit_with_options(
    doc: &Value,
    root: &TreeNode,
    path_key: &str,
    new_value: Value,
    options: &BuildOptions,
) -> Result<Reconciled, TreeError> {
    let path = json_tree_path::parse_path_key(path_key)?;
    let target = root.descendant(&path).ok_or(TreeError::NodeNotFound)?;

    let rebuilt = build_at(&new_value, target.key.clone(), path.clone(), options)?;

    let mut new_doc = doc.clone();
    let slot = get_mut_at(&mut new_doc, &path).ok_or(TreeError::NodeNotFound)?;
    *slot = new_value;

    let new_root = replace_at(root, &path, rebuilt)?;
    Ok(Reconciled {
        doc: new_doc,
        root: new_root,
        affected_path: path,
    })
}

/// Mutable navigation into a document along typed steps.
fn get_mut_at<'a>(doc: &'a mut Value, path: &[PathStep]) -> Option<&'a mut Value> {
    let mut current = doc;
    for step in path {
        match current {
            Value::Object(map) => match step {
                PathStep::Key(key) => current = map.get_mut(key)?,
                PathStep::Index(_) => return None,
            },
            Value::Array(items) => match step {
                PathStep::Index(index) => current = items.get_mut(*index)?,
                PathStep::Key(_) => return None,
            },
            _ => return None,
        }
    }
    Some(current)
}

/// Rebuilds the spine from `node` down to `path`, swapping in `replacement`
/// at the end. Child vectors are cloned (`Rc` bumps), so every subtree off
/// the spine is shared with the input.
fn replace_at(
    node: &TreeNode,
    path: &[PathStep],
    replacement: TreeNode,
) -> Result<TreeNode, TreeError> {
    let (step, rest) = match path.split_first() {
        Some(split) => split,
        None => return Ok(replacement),
    };
    let children = node.children().ok_or(TreeError::NodeNotFound)?;
    let position = node.child_index(step).ok_or(TreeError::NodeNotFound)?;

    let mut new_children = children.to_vec();
    new_children[position] = Rc::new(replace_at(&children[position], rest, replacement)?);
    Ok(TreeNode::branch(
        node.key.clone(),
        node.path.clone(),
        new_children,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build;
    use serde_json::json;

    #[test]
    fn test_scalar_replacement() {
        let doc = json!({"a": 1, "b": 2});
        let tree = build(&doc, "root").unwrap();

        let result = apply_edit(&doc, &tree, "$['b']", json!("two")).unwrap();
        assert_eq!(result.doc, json!({"a": 1, "b": "two"}));
        assert_eq!(result.affected_path, vec![PathStep::from("b")]);

        let node = result.root.descendant_by_key("$['b']").unwrap();
        assert!(node.is_leaf());
        assert_eq!(node.value(), Some(&json!("two")));

        // Inputs untouched
        assert_eq!(doc, json!({"a": 1, "b": 2}));
        assert_eq!(tree.descendant_by_key("$['b']").unwrap().value(), Some(&json!(2)));
    }

    #[test]
    fn test_root_replacement() {
        let doc = json!("scalar");
        let tree = build(&doc, "root").unwrap();

        let result = apply_edit(&doc, &tree, "$", json!({"now": "object"})).unwrap();
        assert_eq!(result.doc, json!({"now": "object"}));
        assert!(!result.root.is_leaf());
        assert_eq!(result.root.key, "root");
        assert_eq!(result.affected_path, Vec::<PathStep>::new());
    }

    #[test]
    fn test_nested_array_slot() {
        let doc = json!({"b": [true, "x"]});
        let tree = build(&doc, "root").unwrap();

        let result = apply_edit(&doc, &tree, "$['b'][0]", json!(9)).unwrap();
        assert_eq!(result.doc, json!({"b": [9, "x"]}));
        assert_eq!(
            result.root.descendant_by_key("$['b'][1]").unwrap().value(),
            Some(&json!("x"))
        );
    }

    #[test]
    fn test_unknown_and_malformed_keys() {
        let doc = json!({"a": 1});
        let tree = build(&doc, "root").unwrap();
        assert!(matches!(
            apply_edit(&doc, &tree, "$['zz']", json!(2)),
            Err(TreeError::NodeNotFound)
        ));
        assert!(matches!(
            apply_edit(&doc, &tree, "bogus", json!(2)),
            Err(TreeError::PathKey(_))
        ));
    }

    #[test]
    fn test_drifted_document() {
        // Tree still has "a", the document no longer does
        let doc = json!({"a": 1});
        let tree = build(&doc, "root").unwrap();
        let drifted = json!({"b": 1});
        assert!(matches!(
            apply_edit(&drifted, &tree, "$['a']", json!(2)),
            Err(TreeError::NodeNotFound)
        ));
    }

    #[test]
    fn test_structural_edit_becomes_branch() {
        let doc = json!({"a": 1, "b": 2});
        let tree = build(&doc, "root").unwrap();

        let result = apply_edit(&doc, &tree, "$['a']", json!({"x": [1, 2]})).unwrap();
        let node = result.root.descendant_by_key("$['a']").unwrap();
        assert!(!node.is_leaf());
        // The regenerated subtree matches a direct build of the same value
        let direct = build_at(
            &json!({"x": [1, 2]}),
            "a".to_string(),
            vec![PathStep::from("a")],
            &BuildOptions::default(),
        )
        .unwrap();
        assert_eq!(node, &direct);
    }

    #[test]
    fn test_siblings_are_shared() {
        let doc = json!({"a": 1, "b": {"deep": [1, 2, 3]}});
        let tree = build(&doc, "root").unwrap();
        let old_b = Rc::clone(tree.child(&PathStep::from("b")).unwrap());

        let result = apply_edit(&doc, &tree, "$['a']", json!(99)).unwrap();
        let new_b = result.root.child(&PathStep::from("b")).unwrap();
        assert!(Rc::ptr_eq(&old_b, new_b));
    }
}
