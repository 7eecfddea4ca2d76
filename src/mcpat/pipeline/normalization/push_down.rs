//! Push attributes down into parameters
//!
//! McPAT prints a parameter's figures at the parameter's own indentation:
//!
//! ```text
//!   Total First Level Directory:
//!   Device Type= ITRS high performance device type
//!     Area = 2.0 mm^2
//! ```
//!
//! After attribute flattening, the attributes that directly follow a parameter at the
//! same level belong to it. They are moved under the parameter, in order, up to the
//! first sibling that is not an attribute. Parents are handled before their children, so
//! attributes appended after a nested parameter move on into that parameter.

use crate::mcpat::lexing::TokenKind;
use crate::mcpat::parsing::{NodeId, ParseTree};
use crate::mcpat::pipeline::pass::{walk_pre_order, TreePass};

pub struct PushDownToParameter;

impl PushDownToParameter {
    pub fn new() -> Self {
        PushDownToParameter
    }
}

impl Default for PushDownToParameter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_down_in(tree: &mut ParseTree, parent: NodeId) {
    if !tree
        .children(parent)
        .iter()
        .any(|&c| tree.kind(c) == TokenKind::Parameter)
    {
        return;
    }

    let children = tree.take_children(parent);
    let mut rewritten = Vec::with_capacity(children.len());
    let mut current_parameter: Option<NodeId> = None;

    for child in children {
        match (tree.kind(child), current_parameter) {
            (TokenKind::Attribute, Some(parameter)) => tree.append_child(parameter, child),
            (TokenKind::Parameter, _) => {
                current_parameter = Some(child);
                rewritten.push(child);
            }
            _ => {
                current_parameter = None;
                rewritten.push(child);
            }
        }
    }
    tree.set_children(parent, rewritten);
}

impl TreePass for PushDownToParameter {
    fn name(&self) -> &'static str {
        "push-down-to-parameter"
    }

    fn apply(&self, mut tree: ParseTree) -> ParseTree {
        let root = tree.root();
        walk_pre_order(&mut tree, root, &mut push_down_in);
        tree
    }
}
