//! Indentation to tree
//!
//! Converts the flat lexed line sequence into a [`ParseTree`] using indentation as the
//! only nesting signal. No knowledge of which kinds may contain which is applied here;
//! the normalization passes repair the irregular spots afterwards.
//!
//! # Logic
//!
//! 1. Keep a stack of open nodes, the synthetic root at the bottom.
//! 2. For each line, close (pop) every open node whose depth is greater than or equal
//!    to the line's depth.
//! 3. The node on top of the stack becomes the line's parent.
//! 4. Push the line's node; it is now the innermost open node.
//!
//! Every node is pushed and popped at most once, so the build is linear in the number
//! of lines.

use crate::mcpat::lexing::LexedLine;
use crate::mcpat::parsing::tree::{NodeId, ParseTree};

/// Build the raw tree for a lexed report.
pub fn build_tree(lines: &[LexedLine]) -> ParseTree {
    let mut tree = ParseTree::new();
    let mut open: Vec<(NodeId, Option<usize>)> = vec![(tree.root(), None)];

    for line in lines {
        while let Some(&(_, Some(depth))) = open.last() {
            if depth < line.depth {
                break;
            }
            open.pop();
        }

        let parent = open.last().map(|&(id, _)| id).unwrap_or(tree.root());
        let node = tree.add_line(line);
        tree.append_child(parent, node);
        open.push((node, Some(line.depth)));
    }

    clilog::debug!(
        RAW_TREE,
        "built raw tree with {} nodes from {} lines",
        tree.reachable().len() - 1,
        lines.len()
    );
    tree
}
