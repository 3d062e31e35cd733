//! Type definitions for tree paths.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single step in a tree path.
///
/// Object properties are addressed by key, array elements by index. The two
/// are distinct types, not a stringly union: the object key `"0"` and the
/// array index `0` are different steps and encode to different path keys.
///
/// Serializes untagged: a `Key` becomes a JSON string, an `Index` a JSON
/// number. That is the wire shape consumers of the tree expect for the
/// `path` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathStep {
    /// An object property name.
    Key(String),
    /// An array element index.
    Index(usize),
}

/// A path from the tree root to a node. The empty path is the root itself.
pub type Path = Vec<PathStep>;

impl PathStep {
    /// Returns the property name if this step addresses an object member.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathStep::Key(key) => Some(key),
            PathStep::Index(_) => None,
        }
    }

    /// Returns the element index if this step addresses an array slot.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathStep::Key(_) => None,
            PathStep::Index(index) => Some(*index),
        }
    }

    pub fn is_key(&self) -> bool {
        matches!(self, PathStep::Key(_))
    }

    pub fn is_index(&self) -> bool {
        matches!(self, PathStep::Index(_))
    }
}

/// Renders the step as a display label: key text verbatim, index in decimal.
impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(key) => f.write_str(key),
            PathStep::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        PathStep::Key(key.to_string())
    }
}

impl From<String> for PathStep {
    fn from(key: String) -> Self {
        PathStep::Key(key)
    }
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        PathStep::Index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(PathStep::Key("foo".to_string()).to_string(), "foo");
        assert_eq!(PathStep::Index(12).to_string(), "12");
        // A numeric-looking key displays the same as the index; only the
        // path key encoding tells them apart.
        assert_eq!(PathStep::Key("12".to_string()).to_string(), "12");
    }

    #[test]
    fn test_accessors() {
        let key = PathStep::from("name");
        assert_eq!(key.as_key(), Some("name"));
        assert_eq!(key.as_index(), None);
        assert!(key.is_key());

        let index = PathStep::from(3usize);
        assert_eq!(index.as_key(), None);
        assert_eq!(index.as_index(), Some(3));
        assert!(index.is_index());
    }

    #[test]
    fn test_serde_untagged() {
        let path: Path = vec![PathStep::from("b"), PathStep::from(0usize)];
        let encoded = serde_json::to_string(&path).unwrap();
        assert_eq!(encoded, r#"["b",0]"#);

        let decoded: Path = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, path);
    }
}
