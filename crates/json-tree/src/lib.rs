//! json-tree — an editable, path-addressed tree model over arbitrary JSON.
//!
//! Mirrors the lifecycle of a JSON inspection panel: [`build`] materializes
//! a [`TreeNode`] hierarchy from a document, an [`EditSession`] runs the
//! begin/buffer/commit protocol on one leaf at a time, and [`apply_edit`]
//! reconciles the committed value back into the document while regenerating
//! only the affected subtree.
//!
//! Every node carries a canonical path key (see the `json-tree-path` crate)
//! so consumers can target mutations without holding node references.
//!
//! All operations are synchronous, run to completion, and never retain
//! state between calls: the caller owns the current document/tree pair and
//! the session, and serializes calls by construction.
//!
//! # Example
//!
//! ```
//! use json_tree::{apply_edit, build, EditSession};
//! use serde_json::json;
//!
//! let doc = json!({"a": 1, "b": [true, "x"]});
//! let tree = build(&doc, "root").unwrap();
//!
//! let mut session = EditSession::new();
//! session.begin_edit(&tree, "$['a']").unwrap();
//! session.update_buffer("false").unwrap();
//! let committed = session.commit().unwrap();
//!
//! let result = apply_edit(&doc, &tree, &committed.path_key, committed.value).unwrap();
//! assert_eq!(result.doc, json!({"a": false, "b": [true, "x"]}));
//! ```

pub mod build;
pub mod edit;
pub mod node;
pub mod reconcile;
pub mod types;
pub mod walk;

pub use build::{build, build_at, build_with_options, BuildOptions};
pub use edit::{
    canonical_text, infer_value, CommitOptions, CommittedEdit, EditSession, NumberGrammar,
};
pub use node::{NodeContent, TreeNode};
pub use reconcile::{apply_edit, apply_edit_with_options, Reconciled};
pub use types::{Path, PathKeyError, PathStep, TreeError};
pub use walk::{walk, Walk};
