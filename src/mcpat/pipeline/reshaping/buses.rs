//! Replace bus groups with bus components
//!
//! McPAT reports on-chip buses as one `BUSES` block with a `Bus` child per bus. In the
//! hierarchy each bus is an interconnect in its own right, while the group is just a
//! total. The group becomes a `Total Buses` parameter (keeping its own figures) and its
//! buses are re-inserted directly after it as `Bus0`, `Bus1`, ...

use crate::mcpat::lexing::TokenKind;
use crate::mcpat::parsing::{NodeId, ParseTree};
use crate::mcpat::pipeline::pass::{components_labelled, TreePass};

const BUS_GROUP: &str = "BUSES";
const BUS: &str = "Bus";
const TOTAL_BUSES: &str = "Total Buses";

pub struct ReplaceBuses;

fn replace_group(tree: &mut ParseTree, group: NodeId) {
    let mut buses = Vec::new();
    let mut kept = Vec::new();
    for child in tree.take_children(group) {
        if tree.kind(child) == TokenKind::Component && tree.label(child) == BUS {
            buses.push(child);
        } else {
            kept.push(child);
        }
    }
    tree.set_children(group, kept);

    tree.set_kind(group, TokenKind::Parameter);
    tree.rename(group, TOTAL_BUSES);

    for (ordinal, &bus) in buses.iter().enumerate() {
        tree.rename(bus, &format!("{}{}", BUS, ordinal));
    }

    match (tree.parent(group), tree.position(group)) {
        (Some(parent), Some(index)) => tree.insert_children(parent, index + 1, buses),
        _ => clilog::warn!(BUS_DETACHED, "bus group has no parent; buses dropped"),
    }
}

impl TreePass for ReplaceBuses {
    fn name(&self) -> &'static str {
        "replace-buses"
    }

    fn apply(&self, mut tree: ParseTree) -> ParseTree {
        for group in components_labelled(&tree, BUS_GROUP) {
            replace_group(&mut tree, group);
        }
        tree
    }
}
