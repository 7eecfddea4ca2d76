//! Promote visual dividers
//!
//! Separators (`*****`) and blank lines are not containers, but the indentation tree
//! builder treats any deeper line after them as their child. This pass dissolves every
//! node of one kind, splicing its children into its parent at its own position.
//!
//! Separators are not spliced away directly: each one is replaced by a synthetic blank
//! paragraph that adopts its children, and the paragraph pass dissolves it later. Until
//! then the paragraph ends a run of attributes, so attributes that followed a separator
//! are never pushed down into a parameter that preceded it.

use crate::mcpat::lexing::TokenKind;
use crate::mcpat::parsing::{NodeId, ParseTree};
use crate::mcpat::pipeline::pass::{walk_post_order, TreePass};

pub struct PromoteBlocks {
    name: &'static str,
    kind: TokenKind,
    synthesize_paragraph: bool,
}

impl PromoteBlocks {
    /// Replace separator lines by synthetic paragraphs holding their children.
    pub fn separators() -> Self {
        PromoteBlocks {
            name: "promote-separators",
            kind: TokenKind::Separator,
            synthesize_paragraph: true,
        }
    }

    /// Dissolve blank-line paragraphs.
    pub fn paragraphs() -> Self {
        PromoteBlocks {
            name: "promote-paragraphs",
            kind: TokenKind::Paragraph,
            synthesize_paragraph: false,
        }
    }

    fn promote_in(&self, tree: &mut ParseTree, parent: NodeId) {
        if !tree.children(parent).iter().any(|&c| tree.kind(c) == self.kind) {
            return;
        }

        let mut rewritten = Vec::new();
        for child in tree.take_children(parent) {
            if tree.kind(child) != self.kind {
                rewritten.push(child);
                continue;
            }
            let children = tree.take_children(child);
            if self.synthesize_paragraph {
                let paragraph = tree.add_synthetic(TokenKind::Paragraph, &[""]);
                tree.set_children(paragraph, children);
                rewritten.push(paragraph);
            } else {
                rewritten.extend(children);
            }
        }
        tree.set_children(parent, rewritten);
    }
}

impl TreePass for PromoteBlocks {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, mut tree: ParseTree) -> ParseTree {
        let root = tree.root();
        walk_post_order(&mut tree, root, &mut |tree, id| self.promote_in(tree, id));
        tree
    }
}
