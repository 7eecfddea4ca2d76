//! Split the combined load/store queue
//!
//! In-order cores report a single `LoadStore Queue`, while the hierarchy always has a
//! load queue and a store queue. The combined block becomes `LoadQ` and a `StoreQ`
//! carrying copies of the same figures is inserted right after it. Copies keep the line
//! numbers of the attributes they were copied from.

use crate::mcpat::lexing::TokenKind;
use crate::mcpat::parsing::{NodeId, ParseTree};
use crate::mcpat::pipeline::pass::{components_labelled, TreePass};

const COMBINED: &str = "LoadStore Queue";
const LOAD_QUEUE: &str = "LoadQ";
const STORE_QUEUE: &str = "StoreQ";

pub struct SplitLoadStoreQueue;

fn split(tree: &mut ParseTree, combined: NodeId) {
    let (Some(parent), Some(index)) = (tree.parent(combined), tree.position(combined)) else {
        return;
    };

    tree.rename(combined, LOAD_QUEUE);
    let store = tree.add_synthetic(TokenKind::Component, &[STORE_QUEUE]);
    for child in tree.children(combined).to_vec() {
        let copy = tree.copy_subtree(child);
        tree.append_child(store, copy);
    }
    tree.insert_child(parent, index + 1, store);
}

impl TreePass for SplitLoadStoreQueue {
    fn name(&self) -> &'static str {
        "split-load-store-queue"
    }

    fn apply(&self, mut tree: ParseTree) -> ParseTree {
        for combined in components_labelled(&tree, COMBINED) {
            split(&mut tree, combined);
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcpat::lexing::tokenize;
    use crate::mcpat::parsing::{build_tree, to_treeviz_str};

    const SOURCE: &str = "\
Load Store Unit:
  LoadStore Queue:
    Area = 0.02 mm^2
    Peak Dynamic = 0.01 W
  Data Cache:
";

    #[test]
    fn test_split_copies_figures() {
        let tree = SplitLoadStoreQueue.apply(build_tree(&tokenize(SOURCE).unwrap()));
        insta::assert_snapshot!(to_treeviz_str(&tree), @r###"
        └─ component: Load Store Unit
          ├─ component: LoadQ
          │ ├─ attribute: Area = 0.02 mm^2
          │ └─ attribute: Peak Dynamic = 0.01 W
          ├─ component: StoreQ
          │ ├─ attribute: Area = 0.02 mm^2
          │ └─ attribute: Peak Dynamic = 0.01 W
          └─ component: Data Cache
        "###);
    }

    #[test]
    fn test_copies_do_not_add_source_lines() {
        let before = build_tree(&tokenize(SOURCE).unwrap());
        let lines = before.attribute_lines();
        let after = SplitLoadStoreQueue.apply(before);
        assert_eq!(after.attribute_lines(), lines);
    }

    #[test]
    fn test_idempotent() {
        let once = SplitLoadStoreQueue.apply(build_tree(&tokenize(SOURCE).unwrap()));
        let expected = once.outline();
        assert_eq!(SplitLoadStoreQueue.apply(once).outline(), expected);
    }
}
