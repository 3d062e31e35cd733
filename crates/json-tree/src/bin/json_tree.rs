//! `json-tree` — print the tree model of a JSON document.
//!
//! Usage:
//!   json-tree [root-label]
//!
//! The document is read from stdin. The optional first argument labels the
//! synthetic root node (default `root`). One line per node: indentation by
//! depth, display label, leaf value if any, and the node's path key.

use json_tree::{build, walk};
use std::io::{self, Read, Write};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let root_label = args.get(1).cloned().unwrap_or_else(|| "root".to_string());

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let doc: serde_json::Value = match serde_json::from_str(buf.trim()) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let tree = match build(&doc, &root_label) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut out = String::new();
    for node in walk(&tree) {
        let indent = "  ".repeat(node.path.len());
        match node.value() {
            Some(value) => {
                out.push_str(&format!("{indent}{}: {value}  ({})\n", node.key, node.path_key))
            }
            None => out.push_str(&format!("{indent}{}  ({})\n", node.key, node.path_key)),
        }
    }
    io::stdout().write_all(out.as_bytes()).unwrap();
}
