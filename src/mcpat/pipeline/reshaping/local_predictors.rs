//! Group local predictor fragments
//!
//! McPAT prints the two halves of a local predictor (`L1_Local Predictor`,
//! `L2_Local Predictor`) as loose children of `Branch Predictor`. The component
//! hierarchy has one local predictor, so the fragments are gathered under a new
//! `Local Predictor` component placed where the first fragment was.

use crate::mcpat::lexing::TokenKind;
use crate::mcpat::parsing::{NodeId, ParseTree};
use crate::mcpat::pipeline::pass::{components_labelled, TreePass};

const BRANCH_PREDICTOR: &str = "Branch Predictor";
const LOCAL_PREDICTOR: &str = "Local Predictor";
const FRAGMENTS: [&str; 2] = ["L1_Local Predictor", "L2_Local Predictor"];

pub struct GroupLocalPredictors;

fn is_fragment(tree: &ParseTree, id: NodeId) -> bool {
    tree.kind(id) == TokenKind::Component && FRAGMENTS.contains(&tree.label(id))
}

fn group_under(tree: &mut ParseTree, predictor: NodeId) {
    let Some(first) = tree
        .children(predictor)
        .iter()
        .position(|&c| is_fragment(tree, c))
    else {
        return;
    };

    let group = tree.add_synthetic(TokenKind::Component, &[LOCAL_PREDICTOR]);
    let mut rewritten = Vec::new();
    for child in tree.take_children(predictor) {
        if is_fragment(tree, child) {
            tree.append_child(group, child);
        } else {
            rewritten.push(child);
        }
    }
    rewritten.insert(first, group);
    tree.set_children(predictor, rewritten);
}

impl TreePass for GroupLocalPredictors {
    fn name(&self) -> &'static str {
        "group-local-predictors"
    }

    fn apply(&self, mut tree: ParseTree) -> ParseTree {
        for predictor in components_labelled(&tree, BRANCH_PREDICTOR) {
            group_under(&mut tree, predictor);
        }
        tree
    }
}
