//! Flatten attributes
//!
//! Attributes are leaves. When indentation noise gives an attribute children, those
//! children become the attribute's following siblings, in order.

use crate::mcpat::lexing::TokenKind;
use crate::mcpat::parsing::{NodeId, ParseTree};
use crate::mcpat::pipeline::pass::{walk_post_order, TreePass};

pub struct FlattenAttributes;

impl FlattenAttributes {
    pub fn new() -> Self {
        FlattenAttributes
    }
}

impl Default for FlattenAttributes {
    fn default() -> Self {
        Self::new()
    }
}

fn flatten_in(tree: &mut ParseTree, parent: NodeId) {
    let needs_flattening = tree
        .children(parent)
        .iter()
        .any(|&c| tree.kind(c) == TokenKind::Attribute && !tree.children(c).is_empty());
    if !needs_flattening {
        return;
    }

    let mut rewritten = Vec::new();
    for child in tree.take_children(parent) {
        rewritten.push(child);
        if tree.kind(child) == TokenKind::Attribute {
            rewritten.extend(tree.take_children(child));
        }
    }
    tree.set_children(parent, rewritten);
}

impl TreePass for FlattenAttributes {
    fn name(&self) -> &'static str {
        "flatten-attributes"
    }

    fn apply(&self, mut tree: ParseTree) -> ParseTree {
        let root = tree.root();
        walk_post_order(&mut tree, root, &mut flatten_in);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcpat::lexing::tokenize;
    use crate::mcpat::parsing::build_tree;

    #[test]
    fn test_nested_attribute_children_become_siblings() {
        let source = "Core:\n  Area = 1.2 mm^2\n    Peak Dynamic = 0.5 W\n      Gate Leakage = 0.01 W\n  Runtime Dynamic = 0.4 W\n";
        let tree = FlattenAttributes::new().apply(build_tree(&tokenize(source).unwrap()));
        let core = tree.children(tree.root())[0];
        let labels: Vec<_> = tree.children(core).iter().map(|&c| tree.label(c)).collect();
        assert_eq!(
            labels,
            vec!["Area", "Peak Dynamic", "Gate Leakage", "Runtime Dynamic"]
        );
        for &child in tree.children(core) {
            assert!(tree.children(child).is_empty());
        }
    }

    #[test]
    fn test_component_children_are_untouched() {
        let source = "Core:\n  Instruction Fetch Unit:\n    Area = 0.3 mm^2\n";
        let before = build_tree(&tokenize(source).unwrap());
        let expected = before.outline();
        assert_eq!(FlattenAttributes::new().apply(before).outline(), expected);
    }
}
