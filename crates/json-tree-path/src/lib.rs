//! Typed tree paths and the canonical path-key codec.
//!
//! A [`Path`] locates a node inside a JSON tree as an ordered sequence of
//! [`PathStep`]s (object keys and array indexes). Its canonical string form,
//! the *path key*, uses JSONPath normalized-path syntax (RFC 9535 §2.7):
//! the root is `$`, keys append `['name']`, indexes append `[0]`.
//!
//! The encoding is bijective within a tree: string segments always carry
//! quotes and index segments never do, so the object key `"0"` and the array
//! index `0` cannot collide, and a key containing quotes, brackets, or
//! backslashes is escaped rather than left ambiguous.
//!
//! # Example
//!
//! ```
//! use json_tree_path::{append, format_path_key, parse_path_key, PathStep};
//!
//! let path = vec![PathStep::from("b"), PathStep::from(0usize)];
//! let key = format_path_key(&path);
//! assert_eq!(key, "$['b'][0]");
//!
//! // Round-trip
//! assert_eq!(parse_path_key(&key).unwrap(), path);
//!
//! // Extending a path never mutates the original
//! let child = append(&path, PathStep::from("x"));
//! assert_eq!(format_path_key(&child), "$['b'][0]['x']");
//! assert_eq!(path.len(), 2);
//! ```

use thiserror::Error;

pub mod types;
pub use types::{Path, PathStep};

/// Escapes an object key for embedding in a path key.
///
/// `\` is doubled and `'` gains a backslash; everything else passes through
/// verbatim.
///
/// # Example
///
/// ```
/// use json_tree_path::escape_key;
///
/// assert_eq!(escape_key("plain"), "plain");
/// assert_eq!(escape_key("it's"), "it\\'s");
/// assert_eq!(escape_key("a\\b"), "a\\\\b");
/// ```
pub fn escape_key(key: &str) -> String {
    if !key.contains('\\') && !key.contains('\'') {
        return key.to_string();
    }
    // Order matters: backslashes must be doubled before quotes gain theirs
    key.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Formats a path into its canonical path key.
///
/// Deterministic and pure: equal paths always produce equal keys, distinct
/// paths always produce distinct keys.
///
/// # Example
///
/// ```
/// use json_tree_path::{format_path_key, PathStep};
///
/// assert_eq!(format_path_key(&[]), "$");
/// assert_eq!(
///     format_path_key(&[PathStep::from("a"), PathStep::from(2usize)]),
///     "$['a'][2]"
/// );
/// // Key "0" and index 0 stay distinguishable
/// assert_eq!(format_path_key(&[PathStep::from("0")]), "$['0']");
/// assert_eq!(format_path_key(&[PathStep::from(0usize)]), "$[0]");
/// ```
pub fn format_path_key(path: &[PathStep]) -> String {
    let mut out = String::with_capacity(1 + path.len() * 8);
    out.push('$');
    for step in path {
        match step {
            PathStep::Key(key) => {
                out.push_str("['");
                out.push_str(&escape_key(key));
                out.push_str("']");
            }
            PathStep::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    out
}

/// Parses a path key back into a path. Strict inverse of [`format_path_key`].
///
/// # Errors
///
/// Returns [`PathKeyError::MalformedPathKey`], carrying the byte offset of
/// the first invalid character, for any string `format_path_key` cannot
/// produce: a missing `$` prefix, an unterminated bracket or quote, an
/// invalid escape, an empty or leading-zero index, or trailing garbage.
///
/// # Example
///
/// ```
/// use json_tree_path::{parse_path_key, PathKeyError, PathStep};
///
/// assert_eq!(parse_path_key("$").unwrap(), Vec::<PathStep>::new());
/// assert_eq!(
///     parse_path_key("$['a'][2]").unwrap(),
///     vec![PathStep::from("a"), PathStep::from(2usize)]
/// );
/// assert_eq!(parse_path_key("a.b"), Err(PathKeyError::MalformedPathKey(0)));
/// assert_eq!(parse_path_key("$[01]"), Err(PathKeyError::MalformedPathKey(2)));
/// ```
pub fn parse_path_key(key: &str) -> Result<Path, PathKeyError> {
    let mut chars = key.char_indices().peekable();
    match chars.next() {
        Some((_, '$')) => {}
        _ => return Err(PathKeyError::MalformedPathKey(0)),
    }

    let mut path = Path::new();
    while let Some((open_at, ch)) = chars.next() {
        if ch != '[' {
            return Err(PathKeyError::MalformedPathKey(open_at));
        }
        match chars.peek() {
            Some(&(_, '\'')) => {
                chars.next();
                let mut segment = String::new();
                loop {
                    match chars.next() {
                        Some((_, '\'')) => break,
                        Some((escape_at, '\\')) => match chars.next() {
                            Some((_, next)) if next == '\\' || next == '\'' => {
                                segment.push(next);
                            }
                            _ => return Err(PathKeyError::MalformedPathKey(escape_at)),
                        },
                        Some((_, other)) => segment.push(other),
                        None => return Err(PathKeyError::MalformedPathKey(key.len())),
                    }
                }
                expect_close(&mut chars, key.len())?;
                path.push(PathStep::Key(segment));
            }
            Some(&(digits_at, c)) if c.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some(&(_, d)) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    digits.push(d);
                    chars.next();
                }
                // format_path_key never emits a leading zero
                if digits.len() > 1 && digits.starts_with('0') {
                    return Err(PathKeyError::MalformedPathKey(digits_at));
                }
                let index: usize = digits
                    .parse()
                    .map_err(|_| PathKeyError::MalformedPathKey(digits_at))?;
                expect_close(&mut chars, key.len())?;
                path.push(PathStep::Index(index));
            }
            Some(&(bad_at, _)) => return Err(PathKeyError::MalformedPathKey(bad_at)),
            None => return Err(PathKeyError::MalformedPathKey(key.len())),
        }
    }
    Ok(path)
}

fn expect_close(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    end: usize,
) -> Result<(), PathKeyError> {
    match chars.next() {
        Some((_, ']')) => Ok(()),
        Some((at, _)) => Err(PathKeyError::MalformedPathKey(at)),
        None => Err(PathKeyError::MalformedPathKey(end)),
    }
}

/// Returns a new path one step longer; the input is untouched.
pub fn append(path: &[PathStep], step: PathStep) -> Path {
    let mut out = Vec::with_capacity(path.len() + 1);
    out.extend_from_slice(path);
    out.push(step);
    out
}

/// Check if a path points to the tree root.
///
/// # Example
///
/// ```
/// use json_tree_path::{is_root, PathStep};
///
/// assert!(is_root(&[]));
/// assert!(!is_root(&[PathStep::from("foo")]));
/// ```
pub fn is_root(path: &[PathStep]) -> bool {
    path.is_empty()
}

/// Check if `parent` path strictly contains the `child` path.
pub fn is_child(parent: &[PathStep], child: &[PathStep]) -> bool {
    if parent.len() >= child.len() {
        return false;
    }
    parent.iter().zip(child).all(|(a, b)| a == b)
}

/// Check if two paths are equal element-wise and in order.
pub fn is_path_equal(p1: &[PathStep], p2: &[PathStep]) -> bool {
    p1 == p2
}

/// Get the parent path of a given path.
///
/// # Errors
///
/// Returns [`PathKeyError::NoParent`] for the root path.
pub fn parent(path: &[PathStep]) -> Result<Path, PathKeyError> {
    if path.is_empty() {
        return Err(PathKeyError::NoParent);
    }
    Ok(path[..path.len() - 1].to_vec())
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathKeyError {
    /// The string was not produced by [`format_path_key`]; the payload is
    /// the byte offset of the first invalid character.
    #[error("MALFORMED_PATH_KEY: invalid syntax at byte {0}")]
    MalformedPathKey(usize),
    #[error("NO_PARENT")]
    NoParent,
}
