//! Edit session — the begin/buffer/commit protocol for leaf values.
//!
//! The session is an explicit state machine owned by the caller, not a flag
//! scattered across tree nodes: it is either idle or holds exactly one
//! `(path key, buffer)` pair, which enforces the single-active-edit rule by
//! construction. Nodes are referenced by path key only, so opening and
//! closing a session never touches the tree.
//!
//! Committing never fails on user input: the buffer is inferred as `null`,
//! boolean, number (per the configured grammar), and otherwise taken
//! verbatim as a string.
//!
//! # Example
//!
//! ```
//! use json_tree::{build, EditSession};
//! use serde_json::json;
//!
//! let tree = build(&json!({"a": "hello"}), "root").unwrap();
//! let mut session = EditSession::new();
//!
//! session.begin_edit(&tree, "$['a']").unwrap();
//! assert_eq!(session.buffer(), Some("hello"));
//!
//! session.update_buffer("42").unwrap();
//! let committed = session.commit().unwrap();
//! assert_eq!(committed.value, json!(42));
//! assert!(!session.is_editing());
//! ```

use serde_json::{Number, Value};

use crate::node::TreeNode;
use crate::types::TreeError;

/// Numeric grammar used when promoting buffer text to a number on commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberGrammar {
    /// Exactly the RFC 8259 number grammar: optional leading `-`, no leading
    /// zeros, optional fraction and exponent. Surrounding whitespace is
    /// significant, so padded digits commit as strings.
    Json,
    /// Additionally accepts a leading `+`, leading zeros, and bare or
    /// trailing decimal points (anything `f64` parsing accepts from
    /// digit/sign/dot/exponent characters). Non-finite results are never
    /// promoted.
    Lenient,
}

/// Knobs for [`EditSession::commit_with_options`] / [`infer_value`].
#[derive(Debug, Clone)]
pub struct CommitOptions {
    pub number_grammar: NumberGrammar,
}

impl Default for CommitOptions {
    fn default() -> Self {
        Self {
            number_grammar: NumberGrammar::Json,
        }
    }
}

/// The outcome of a committed edit: the target node and its new typed value,
/// ready to hand to the reconciler.
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedEdit {
    pub path_key: String,
    pub value: Value,
}

#[derive(Debug, Clone)]
struct ActiveEdit {
    path_key: String,
    buffer: String,
}

/// The edit state machine: idle, or editing exactly one leaf.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    active: Option<ActiveEdit>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a session is open.
    pub fn is_editing(&self) -> bool {
        self.active.is_some()
    }

    /// Path key of the node under edit, if any.
    pub fn editing_path_key(&self) -> Option<&str> {
        self.active.as_ref().map(|edit| edit.path_key.as_str())
    }

    /// True iff the open session targets the node with this path key.
    pub fn is_editing_node(&self, path_key: &str) -> bool {
        self.editing_path_key() == Some(path_key)
    }

    /// The raw text buffer of the open session, if any.
    pub fn buffer(&self) -> Option<&str> {
        self.active.as_ref().map(|edit| edit.buffer.as_str())
    }

    /// Opens a session on the leaf at `path_key`, seeding the buffer with
    /// the current value's canonical text.
    ///
    /// # Errors
    ///
    /// - [`TreeError::EditInProgress`] if a session is already open, for
    ///   any target including the same node; commit or cancel first.
    /// - [`TreeError::PathKey`] / [`TreeError::NodeNotFound`] if `path_key`
    ///   does not resolve in `tree`.
    /// - [`TreeError::NotEditable`] if the node is a branch.
    pub fn begin_edit(&mut self, tree: &TreeNode, path_key: &str) -> Result<(), TreeError> {
        if self.active.is_some() {
            return Err(TreeError::EditInProgress);
        }
        let node = tree.descendant_by_key(path_key)?;
        let value = node.value().ok_or(TreeError::NotEditable)?;
        self.active = Some(ActiveEdit {
            path_key: node.path_key.clone(),
            buffer: canonical_text(value),
        });
        Ok(())
    }

    /// Replaces the buffer text. No validation; that is commit's job.
    ///
    /// # Errors
    ///
    /// [`TreeError::NoActiveEdit`] outside a session.
    pub fn update_buffer(&mut self, text: impl Into<String>) -> Result<(), TreeError> {
        match &mut self.active {
            Some(edit) => {
                edit.buffer = text.into();
                Ok(())
            }
            None => Err(TreeError::NoActiveEdit),
        }
    }

    /// Commits the buffer with the default [`CommitOptions`].
    pub fn commit(&mut self) -> Result<CommittedEdit, TreeError> {
        self.commit_with_options(&CommitOptions::default())
    }

    /// Parses the buffer into a typed value and closes the session.
    ///
    /// Inference is total over buffer text (the string fallback means no
    /// user input is an error), so the only failure mode is calling this
    /// outside a session ([`TreeError::NoActiveEdit`]).
    pub fn commit_with_options(
        &mut self,
        options: &CommitOptions,
    ) -> Result<CommittedEdit, TreeError> {
        match self.active.take() {
            Some(edit) => Ok(CommittedEdit {
                path_key: edit.path_key,
                value: infer_value(&edit.buffer, options),
            }),
            None => Err(TreeError::NoActiveEdit),
        }
    }

    /// Discards the buffer and closes the session. Nothing observable
    /// changes anywhere else.
    ///
    /// # Errors
    ///
    /// [`TreeError::NoActiveEdit`] outside a session.
    pub fn cancel(&mut self) -> Result<(), TreeError> {
        match self.active.take() {
            Some(_) => Ok(()),
            None => Err(TreeError::NoActiveEdit),
        }
    }
}

/// The textual form a leaf value takes in a fresh edit buffer: strings
/// verbatim, everything else in its JSON rendering (`null`, `true`, `42`).
pub fn canonical_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Total type inference over edit-buffer text, in fixed order: the `null`
/// literal, the boolean literals, the configured numeric grammar, and
/// otherwise the text verbatim as a string.
pub fn infer_value(text: &str, options: &CommitOptions) -> Value {
    match text {
        "null" => Value::Null,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => match parse_number(text, options.number_grammar) {
            Some(number) => Value::Number(number),
            None => Value::String(text.to_string()),
        },
    }
}

fn parse_number(text: &str, grammar: NumberGrammar) -> Option<Number> {
    if text.is_empty() {
        return None;
    }
    match grammar {
        NumberGrammar::Json => {
            // serde_json's parser tolerates surrounding whitespace; the
            // grammar here treats it as significant
            if text.bytes().any(|b| b.is_ascii_whitespace()) {
                return None;
            }
            serde_json::from_str::<Number>(text).ok()
        }
        NumberGrammar::Lenient => {
            let numeric_charset = text
                .bytes()
                .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
            if !numeric_charset || !text.bytes().any(|b| b.is_ascii_digit()) {
                return None;
            }
            // Strict parse first so integers stay integers
            if let Ok(number) = serde_json::from_str::<Number>(text) {
                return Some(number);
            }
            let parsed: f64 = text.parse().ok()?;
            if !parsed.is_finite() {
                return None;
            }
            Number::from_f64(parsed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build;
    use serde_json::json;

    fn options(grammar: NumberGrammar) -> CommitOptions {
        CommitOptions {
            number_grammar: grammar,
        }
    }

    #[test]
    fn test_canonical_text() {
        assert_eq!(canonical_text(&json!("hello")), "hello");
        assert_eq!(canonical_text(&json!(null)), "null");
        assert_eq!(canonical_text(&json!(true)), "true");
        assert_eq!(canonical_text(&json!(42)), "42");
        assert_eq!(canonical_text(&json!(-1.5)), "-1.5");
    }

    #[test]
    fn test_infer_literals() {
        let opts = CommitOptions::default();
        assert_eq!(infer_value("null", &opts), json!(null));
        assert_eq!(infer_value("true", &opts), json!(true));
        assert_eq!(infer_value("false", &opts), json!(false));
        // Only the exact lowercase tokens count
        assert_eq!(infer_value("True", &opts), json!("True"));
        assert_eq!(infer_value("NULL", &opts), json!("NULL"));
    }

    #[test]
    fn test_infer_numbers_json_grammar() {
        let opts = CommitOptions::default();
        assert_eq!(infer_value("42", &opts), json!(42));
        assert_eq!(infer_value("-7", &opts), json!(-7));
        assert_eq!(infer_value("3.25", &opts), json!(3.25));
        assert_eq!(infer_value("1e3", &opts), json!(1000.0));
        // Rejected by the strict grammar, committed verbatim as strings
        assert_eq!(infer_value("042", &opts), json!("042"));
        assert_eq!(infer_value("+1", &opts), json!("+1"));
        assert_eq!(infer_value(" 42", &opts), json!(" 42"));
        assert_eq!(infer_value("42 ", &opts), json!("42 "));
        assert_eq!(infer_value("1.", &opts), json!("1."));
        assert_eq!(infer_value("", &opts), json!(""));
    }

    #[test]
    fn test_infer_numbers_lenient_grammar() {
        let opts = options(NumberGrammar::Lenient);
        assert_eq!(infer_value("42", &opts), json!(42));
        assert_eq!(infer_value("042", &opts), json!(42.0));
        assert_eq!(infer_value("+1", &opts), json!(1.0));
        assert_eq!(infer_value("1.", &opts), json!(1.0));
        // Still strings: whitespace, alphabetic text, digitless symbols
        assert_eq!(infer_value(" 42", &opts), json!(" 42"));
        assert_eq!(infer_value("inf", &opts), json!("inf"));
        assert_eq!(infer_value("NaN", &opts), json!("NaN"));
        assert_eq!(infer_value("-", &opts), json!("-"));
        assert_eq!(infer_value(".", &opts), json!("."));
    }

    #[test]
    fn test_infer_string_fallback_is_total() {
        let opts = CommitOptions::default();
        for text in ["hello", "{\"a\": 1}", "[1]", "nulll", "12abc", "🦀"] {
            assert_eq!(infer_value(text, &opts), json!(text));
        }
    }

    #[test]
    fn test_begin_seeds_buffer() {
        let tree = build(&json!({"s": "text", "n": 2.5, "b": false, "z": null}), "root").unwrap();
        let cases = [
            ("$['s']", "text"),
            ("$['n']", "2.5"),
            ("$['b']", "false"),
            ("$['z']", "null"),
        ];
        for (path_key, expected) in cases {
            let mut session = EditSession::new();
            session.begin_edit(&tree, path_key).unwrap();
            assert_eq!(session.buffer(), Some(expected));
            assert!(session.is_editing_node(path_key));
        }
    }

    #[test]
    fn test_begin_rejects_branches() {
        let tree = build(&json!({"obj": {}, "arr": [1]}), "root").unwrap();
        let mut session = EditSession::new();
        assert_eq!(
            session.begin_edit(&tree, "$['obj']"),
            Err(TreeError::NotEditable)
        );
        assert_eq!(
            session.begin_edit(&tree, "$['arr']"),
            Err(TreeError::NotEditable)
        );
        assert!(!session.is_editing());
    }

    #[test]
    fn test_begin_rejects_unknown_and_malformed_keys() {
        let tree = build(&json!({"a": 1}), "root").unwrap();
        let mut session = EditSession::new();
        assert_eq!(
            session.begin_edit(&tree, "$['nope']"),
            Err(TreeError::NodeNotFound)
        );
        assert!(matches!(
            session.begin_edit(&tree, "a/b"),
            Err(TreeError::PathKey(_))
        ));
    }

    #[test]
    fn test_single_active_edit() {
        let tree = build(&json!({"a": 1, "b": 2}), "root").unwrap();
        let mut session = EditSession::new();
        session.begin_edit(&tree, "$['a']").unwrap();

        assert_eq!(
            session.begin_edit(&tree, "$['b']"),
            Err(TreeError::EditInProgress)
        );
        // Re-entering the same node is no different
        assert_eq!(
            session.begin_edit(&tree, "$['a']"),
            Err(TreeError::EditInProgress)
        );
        // The open session is untouched by the failed attempts
        assert!(session.is_editing_node("$['a']"));
        assert_eq!(session.buffer(), Some("1"));
    }

    #[test]
    fn test_idle_misuse() {
        let mut session = EditSession::new();
        assert_eq!(session.update_buffer("x"), Err(TreeError::NoActiveEdit));
        assert_eq!(session.commit(), Err(TreeError::NoActiveEdit));
        assert_eq!(session.cancel(), Err(TreeError::NoActiveEdit));
    }

    #[test]
    fn test_commit_closes_session() {
        let tree = build(&json!({"a": "hello"}), "root").unwrap();
        let mut session = EditSession::new();
        session.begin_edit(&tree, "$['a']").unwrap();
        session.update_buffer("42").unwrap();

        let committed = session.commit().unwrap();
        assert_eq!(committed.path_key, "$['a']");
        assert_eq!(committed.value, json!(42));
        assert!(!session.is_editing());
        assert_eq!(session.buffer(), None);
    }

    #[test]
    fn test_cancel_discards_buffer() {
        let tree = build(&json!({"a": "hello"}), "root").unwrap();
        let mut session = EditSession::new();
        session.begin_edit(&tree, "$['a']").unwrap();
        session.update_buffer("scratch").unwrap();
        session.cancel().unwrap();

        assert!(!session.is_editing());
        assert_eq!(session.buffer(), None);
        // A fresh session re-seeds from the unchanged tree
        session.begin_edit(&tree, "$['a']").unwrap();
        assert_eq!(session.buffer(), Some("hello"));
    }
}
