//! Enumerate repeated top-level components
//!
//! Heterogeneous and homogeneous configurations alike print one `Core:` (or
//! `First Level Directory:`) block per instance without an index. The hierarchy
//! names instances `core0`, `core1`, ..., so repeated blocks get ordinal suffixes in
//! emission order.

use crate::mcpat::lexing::TokenKind;
use crate::mcpat::parsing::ParseTree;
use crate::mcpat::pipeline::pass::TreePass;

pub struct EnumerateSiblings {
    name: &'static str,
    label: &'static str,
}

impl EnumerateSiblings {
    pub fn cores() -> Self {
        EnumerateSiblings {
            name: "enumerate-cores",
            label: "Core",
        }
    }

    pub fn l1_directories() -> Self {
        EnumerateSiblings {
            name: "enumerate-l1-directories",
            label: "First Level Directory",
        }
    }
}

impl TreePass for EnumerateSiblings {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, mut tree: ParseTree) -> ParseTree {
        let root = tree.root();
        let matching: Vec<_> = tree
            .children(root)
            .iter()
            .copied()
            .filter(|&c| tree.kind(c) == TokenKind::Component && tree.label(c) == self.label)
            .collect();

        for (ordinal, id) in matching.into_iter().enumerate() {
            let label = format!("{}{}", self.label, ordinal);
            tree.rename(id, &label);
        }
        tree
    }
}
