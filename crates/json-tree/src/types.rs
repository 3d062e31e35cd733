//! Core error type for the tree model.

use thiserror::Error;

pub use json_tree_path::{Path, PathKeyError, PathStep};

/// Errors signaled by tree operations.
///
/// All of these are local, recoverable conditions for the caller to surface
/// or retry after resynchronizing; none abort the process. `NodeNotFound`
/// and `MalformedPathKey` mean the caller's tree and path key are out of
/// sync and the tree should be rebuilt from the current document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The path key does not resolve to a node in the given tree.
    #[error("NODE_NOT_FOUND")]
    NodeNotFound,
    /// An edit was requested on a branch node; only leaves are editable.
    #[error("NOT_EDITABLE")]
    NotEditable,
    /// A second edit session was requested while one is open.
    #[error("EDIT_IN_PROGRESS")]
    EditInProgress,
    /// A buffer update, commit, or cancel was requested with no open session.
    #[error("NO_ACTIVE_EDIT")]
    NoActiveEdit,
    /// The source value nests deeper than the build ceiling. `serde_json`
    /// values cannot contain reference cycles, so unbounded depth is the
    /// form a malformed cyclic source takes here.
    #[error("CYCLIC_VALUE")]
    CyclicValue,
    #[error(transparent)]
    PathKey(#[from] PathKeyError),
}
