//! Merge processor and system
//!
//! McPAT prints the processor totals as a `Processor:` block and then every top-level
//! unit (cores, caches, NoCs, memory controllers) as its root-level sibling. The
//! hierarchy has a single `system` owning all of those, so `Processor` is renamed
//! `System` and the root-level components after it move into it, in order.

use crate::mcpat::lexing::TokenKind;
use crate::mcpat::parsing::ParseTree;
use crate::mcpat::pipeline::pass::TreePass;

const PROCESSOR: &str = "Processor";
const SYSTEM: &str = "System";

pub struct MergeProcessorAndSystem;

impl TreePass for MergeProcessorAndSystem {
    fn name(&self) -> &'static str {
        "merge-processor-and-system"
    }

    fn apply(&self, mut tree: ParseTree) -> ParseTree {
        let root = tree.root();
        let Some(processor) = tree.find_child(root, TokenKind::Component, PROCESSOR) else {
            return tree;
        };
        tree.rename(processor, SYSTEM);

        let mut seen_processor = false;
        let mut kept = Vec::new();
        let mut absorbed = Vec::new();
        for child in tree.take_children(root) {
            if child == processor {
                seen_processor = true;
                kept.push(child);
            } else if seen_processor && tree.kind(child) == TokenKind::Component {
                absorbed.push(child);
            } else {
                kept.push(child);
            }
        }
        tree.set_children(root, kept);
        for child in absorbed {
            tree.append_child(processor, child);
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcpat::lexing::tokenize;
    use crate::mcpat::parsing::{build_tree, to_treeviz_str};

    #[test]
    fn test_following_components_move_into_system() {
        let source = "\
Technology 90 nm
Processor:
  Area = 10 mm^2
Core0:
  Area = 1.2 mm^2
L2
  Area = 3.0 mm^2
";
        let tree = MergeProcessorAndSystem.apply(build_tree(&tokenize(source).unwrap()));
        insta::assert_snapshot!(to_treeviz_str(&tree), @r###"
        ├─ technology: Technology = 90 nm
        └─ component: System
          ├─ attribute: Area = 10 mm^2
          ├─ component: Core0
          │ └─ attribute: Area = 1.2 mm^2
          └─ component: L2
            └─ attribute: Area = 3.0 mm^2
        "###);
    }

    #[test]
    fn test_without_processor_is_a_no_op() {
        let source = "Core0:\n  Area = 1.2 mm^2\n";
        let before = build_tree(&tokenize(source).unwrap());
        let expected = before.outline();
        assert_eq!(MergeProcessorAndSystem.apply(before).outline(), expected);
    }

    #[test]
    fn test_idempotent() {
        let source = "Processor:\nCore0:\n";
        let once = MergeProcessorAndSystem.apply(build_tree(&tokenize(source).unwrap()));
        let expected = once.outline();
        assert_eq!(MergeProcessorAndSystem.apply(once).outline(), expected);
    }
}
