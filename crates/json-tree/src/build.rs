//! Tree builder — materializes a full node hierarchy from a JSON value.

use std::rc::Rc;

use serde_json::Value;

use crate::node::TreeNode;
use crate::types::{Path, PathStep, TreeError};

/// Knobs for tree construction.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Maximum nesting depth below the subtree root. A well-formed JSON
    /// payload never comes close; a malformed cyclic in-memory source
    /// would recurse forever, so blowing this ceiling reports
    /// [`TreeError::CyclicValue`] instead of overflowing the stack.
    pub max_depth: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { max_depth: 128 }
    }
}

/// Builds the full tree for `value`, labeling the synthetic root `root_key`.
///
/// Objects and arrays become branches with one child per entry: objects in
/// source insertion order, arrays in index order (this ordering is what
/// keeps path keys stable, so it is never re-sorted). Everything else
/// becomes a leaf holding the scalar. The result is fully materialized:
/// no lazy subtrees.
///
/// Pure: the source value is only read.
///
/// # Example
///
/// ```
/// use json_tree::build;
/// use serde_json::json;
///
/// let tree = build(&json!({"a": 1, "b": [true, "x"]}), "root").unwrap();
/// assert!(!tree.is_leaf());
/// assert_eq!(tree.children().unwrap().len(), 2);
///
/// let b0 = tree.descendant_by_key("$['b'][0]").unwrap();
/// assert_eq!(b0.value(), Some(&json!(true)));
/// ```
pub fn build(value: &Value, root_key: &str) -> Result<TreeNode, TreeError> {
    build_with_options(value, root_key, &BuildOptions::default())
}

/// [`build`] with explicit options.
pub fn build_with_options(
    value: &Value,
    root_key: &str,
    options: &BuildOptions,
) -> Result<TreeNode, TreeError> {
    build_at(value, root_key.to_string(), Path::new(), options)
}

/// Builds a subtree whose root sits at `path` and is labeled `key`.
///
/// Child paths extend `path`; this is what the reconciler uses to
/// regenerate just the affected part of a tree.
pub fn build_at(
    value: &Value,
    key: String,
    path: Path,
    options: &BuildOptions,
) -> Result<TreeNode, TreeError> {
    build_node(value, key, path, 0, options)
}

fn build_node(
    value: &Value,
    key: String,
    path: Path,
    depth: usize,
    options: &BuildOptions,
) -> Result<TreeNode, TreeError> {
    if depth > options.max_depth {
        return Err(TreeError::CyclicValue);
    }
    match value {
        Value::Object(map) => {
            let mut children = Vec::with_capacity(map.len());
            for (child_key, child_value) in map {
                let child_path = json_tree_path::append(&path, PathStep::Key(child_key.clone()));
                children.push(Rc::new(build_node(
                    child_value,
                    child_key.clone(),
                    child_path,
                    depth + 1,
                    options,
                )?));
            }
            Ok(TreeNode::branch(key, path, children))
        }
        Value::Array(items) => {
            let mut children = Vec::with_capacity(items.len());
            for (index, child_value) in items.iter().enumerate() {
                let child_path = json_tree_path::append(&path, PathStep::Index(index));
                children.push(Rc::new(build_node(
                    child_value,
                    index.to_string(),
                    child_path,
                    depth + 1,
                    options,
                )?));
            }
            Ok(TreeNode::branch(key, path, children))
        }
        scalar => Ok(TreeNode::leaf(key, path, scalar.clone())),
    }
}
