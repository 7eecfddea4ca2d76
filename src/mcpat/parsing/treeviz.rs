//! Treeviz rendering for parse trees
//!
//! One line per node, nesting drawn with box connectors:
//!
//! ```text
//! ├─ component: Core0
//! │ ├─ attribute: Area = 1.2 mm^2
//! │ └─ attribute: Peak Dynamic = 0.5 W
//! └─ component: L2
//! ```
//!
//! The synthetic root is not printed. Labels are truncated to keep lines scannable.

use crate::mcpat::parsing::tree::{NodeId, ParseTree};

const MAX_LABEL_CHARS: usize = 48;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn display_label(tree: &ParseTree, id: NodeId) -> String {
    let node = tree.node(id);
    let text = match node.value() {
        Some("") | None => node.label().to_string(),
        Some(value) => format!("{} = {}", node.label(), value),
    };
    truncate(&text, MAX_LABEL_CHARS)
}

pub fn to_treeviz_str(tree: &ParseTree) -> String {
    let mut result = String::new();
    append_children(&mut result, tree, tree.root(), "");
    result
}

fn append_node(result: &mut String, tree: &ParseTree, id: NodeId, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    let label = display_label(tree, id);
    if label.is_empty() {
        result.push_str(&format!("{}{} {}\n", prefix, connector, tree.kind(id)));
    } else {
        result.push_str(&format!("{}{} {}: {}\n", prefix, connector, tree.kind(id), label));
    }

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    append_children(result, tree, id, &new_prefix);
}

fn append_children(result: &mut String, tree: &ParseTree, id: NodeId, prefix: &str) {
    let children = tree.children(id);
    for (i, &child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_node(result, tree, child, prefix, is_last);
    }
}
