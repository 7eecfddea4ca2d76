//! Tree pass trait and traversal helpers
//!
//! Every structural rewrite of the pipeline is a [`TreePass`]: a named function from a
//! parse tree to a parse tree. Passes take the tree by value and hand it back, so a
//! pass can never observe a half-applied predecessor.
//!
//! Most passes rewrite child lists. [`walk_post_order`] visits every reachable node
//! after its descendants, so nested irregularities are fixed before the outer ones that
//! contain them.
//!
//! # Contract
//!
//! - A pass touches only the node kinds and labels it names.
//! - A pass is total: unexpected but well-formed input is left alone, never an error.
//! - Applying a pass to its own output changes nothing.

use crate::mcpat::lexing::TokenKind;
use crate::mcpat::parsing::{NodeId, ParseTree};

pub trait TreePass {
    /// Stable kebab-case name, used in logs.
    fn name(&self) -> &'static str;

    fn apply(&self, tree: ParseTree) -> ParseTree;
}

/// Call `visit` on `id` and every node below it, children before parents.
///
/// The child list of a node is read before its children are visited; a visit may
/// rewrite the visited node's own child list but must leave its parent's alone.
pub fn walk_post_order<F>(tree: &mut ParseTree, id: NodeId, visit: &mut F)
where
    F: FnMut(&mut ParseTree, NodeId),
{
    let children = tree.children(id).to_vec();
    for child in children {
        walk_post_order(tree, child, visit);
    }
    visit(tree, id);
}

/// Visit `id` before its descendants. Children are read after the visit, so nodes the
/// visit moves under a child are visited too.
pub fn walk_pre_order<F>(tree: &mut ParseTree, id: NodeId, visit: &mut F)
where
    F: FnMut(&mut ParseTree, NodeId),
{
    visit(tree, id);
    let children = tree.children(id).to_vec();
    for child in children {
        walk_pre_order(tree, child, visit);
    }
}

/// Every reachable component with exactly this label, in pre-order.
pub fn components_labelled(tree: &ParseTree, label: &str) -> Vec<NodeId> {
    tree.reachable()
        .into_iter()
        .filter(|&id| tree.kind(id) == TokenKind::Component && tree.label(id) == label)
        .collect()
}

/// Run passes in order, logging the tree after each one.
pub fn run_passes(mut tree: ParseTree, passes: &[Box<dyn TreePass>]) -> ParseTree {
    for pass in passes {
        tree = pass.apply(tree);
        clilog::debug!(
            TREE_PASS,
            "after {}:\n{}",
            pass.name(),
            crate::mcpat::parsing::to_treeviz_str(&tree)
        );
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcpat::lexing::tokenize;
    use crate::mcpat::parsing::build_tree;

    #[test]
    fn test_post_order_visits_children_first() {
        let mut tree = build_tree(&tokenize("Alpha\n  Beta\n    Gamma\n  Delta\n").unwrap());
        let mut seen = Vec::new();
        let root = tree.root();
        walk_post_order(&mut tree, root, &mut |tree, id| {
            if id != tree.root() {
                seen.push(tree.label(id).to_string());
            }
        });
        assert_eq!(seen, vec!["Gamma", "Beta", "Delta", "Alpha"]);
    }

    #[test]
    fn test_pre_order_visits_parents_first() {
        let mut tree = build_tree(&tokenize("Alpha\n  Beta\n    Gamma\n  Delta\n").unwrap());
        let mut seen = Vec::new();
        let root = tree.root();
        walk_pre_order(&mut tree, root, &mut |tree, id| {
            if id != tree.root() {
                seen.push(tree.label(id).to_string());
            }
        });
        assert_eq!(seen, vec!["Alpha", "Beta", "Gamma", "Delta"]);
    }

    #[test]
    fn test_components_labelled_skips_other_kinds() {
        let tree = build_tree(&tokenize("Core\n  Core = 10\n  Inner\n    Core\n").unwrap());
        assert_eq!(components_labelled(&tree, "Core").len(), 2);
    }
}
