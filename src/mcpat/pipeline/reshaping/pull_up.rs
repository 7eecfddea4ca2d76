//! Pull components up one level
//!
//! McPAT nests some units under a different parent than the hierarchy does: the branch
//! target buffer and branch predictor under the instruction fetch unit, the TLBs under
//! the memory management unit, the register files under their `Register Files` group.
//! Each pass moves the selected children of every matching parent up one level, placing
//! them directly after that parent in its own parent's child list.

use crate::mcpat::lexing::TokenKind;
use crate::mcpat::parsing::{NodeId, ParseTree};
use crate::mcpat::pipeline::pass::{components_labelled, TreePass};

/// Which children of the parent get pulled up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Components with exactly this label
    Named(&'static str),
    /// Every component child (attributes and parameters stay)
    AllComponents,
}

impl Selection {
    fn selects(&self, tree: &ParseTree, id: NodeId) -> bool {
        if tree.kind(id) != TokenKind::Component {
            return false;
        }
        match self {
            Selection::Named(label) => tree.label(id) == *label,
            Selection::AllComponents => true,
        }
    }
}

pub struct PullUp {
    name: &'static str,
    parent: &'static str,
    selection: Selection,
}

impl PullUp {
    pub fn new(name: &'static str, parent: &'static str, selection: Selection) -> Self {
        PullUp {
            name,
            parent,
            selection,
        }
    }

    pub fn branch_target_buffer() -> Self {
        Self::new(
            "pull-up-branch-target-buffer",
            "Instruction Fetch Unit",
            Selection::Named("Branch Target Buffer"),
        )
    }

    pub fn branch_predictor() -> Self {
        Self::new(
            "pull-up-branch-predictor",
            "Instruction Fetch Unit",
            Selection::Named("Branch Predictor"),
        )
    }

    pub fn itlb() -> Self {
        Self::new(
            "pull-up-itlb",
            "Memory Management Unit",
            Selection::Named("Itlb"),
        )
    }

    pub fn dtlb() -> Self {
        Self::new(
            "pull-up-dtlb",
            "Memory Management Unit",
            Selection::Named("Dtlb"),
        )
    }

    pub fn register_files() -> Self {
        Self::new(
            "pull-up-register-files",
            "Register Files",
            Selection::AllComponents,
        )
    }

    fn pull_up_from(&self, tree: &mut ParseTree, parent: NodeId) {
        let (Some(grandparent), Some(index)) = (tree.parent(parent), tree.position(parent)) else {
            return;
        };

        let mut pulled = Vec::new();
        let mut kept = Vec::new();
        for child in tree.take_children(parent) {
            if self.selection.selects(tree, child) {
                pulled.push(child);
            } else {
                kept.push(child);
            }
        }
        tree.set_children(parent, kept);
        tree.insert_children(grandparent, index + 1, pulled);
    }
}

impl TreePass for PullUp {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, mut tree: ParseTree) -> ParseTree {
        for parent in components_labelled(&tree, self.parent) {
            self.pull_up_from(&mut tree, parent);
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcpat::lexing::tokenize;
    use crate::mcpat::parsing::{build_tree, to_treeviz_str};

    fn run(pass: PullUp, source: &str) -> ParseTree {
        pass.apply(build_tree(&tokenize(source).unwrap()))
    }

    const FETCH: &str = "\
Core0:
  Instruction Fetch Unit:
    Area = 0.3 mm^2
    Instruction Cache:
      Area = 0.1 mm^2
    Branch Target Buffer:
      Area = 0.05 mm^2
    Branch Predictor:
      Area = 0.04 mm^2
  Load Store Unit:
";

    #[test]
    fn test_branch_units_land_after_fetch_unit() {
        let tree = run(PullUp::branch_target_buffer(), FETCH);
        let tree = PullUp::branch_predictor().apply(tree);
        insta::assert_snapshot!(to_treeviz_str(&tree), @r###"
        └─ component: Core0
          ├─ component: Instruction Fetch Unit
          │ ├─ attribute: Area = 0.3 mm^2
          │ └─ component: Instruction Cache
          │   └─ attribute: Area = 0.1 mm^2
          ├─ component: Branch Predictor
          │ └─ attribute: Area = 0.04 mm^2
          ├─ component: Branch Target Buffer
          │ └─ attribute: Area = 0.05 mm^2
          └─ component: Load Store Unit
        "###);
    }

    #[test]
    fn test_register_files_keep_their_figures() {
        let source = "\
Execution Unit:
  Register Files:
    Area = 0.2 mm^2
    Integer RF:
      Area = 0.1 mm^2
    Floating Point RF:
      Area = 0.1 mm^2
  Instruction Scheduler:
";
        let tree = run(PullUp::register_files(), source);
        let unit = tree.children(tree.root())[0];
        let labels: Vec<_> = tree.children(unit).iter().map(|&c| tree.label(c)).collect();
        assert_eq!(
            labels,
            vec![
                "Register Files",
                "Integer RF",
                "Floating Point RF",
                "Instruction Scheduler"
            ]
        );
        let files = tree.children(unit)[0];
        assert_eq!(tree.children(files).len(), 1);
    }

    #[test]
    fn test_idempotent() {
        let once = run(PullUp::itlb(), "Memory Management Unit:\n  Itlb:\n    Area = 0.01 mm^2\n");
        let expected = once.outline();
        assert_eq!(PullUp::itlb().apply(once).outline(), expected);
    }

    #[test]
    fn test_unrelated_parents_untouched() {
        let source = "Load Store Unit:\n  Itlb:\n";
        let before = build_tree(&tokenize(source).unwrap());
        let expected = before.outline();
        assert_eq!(PullUp::itlb().apply(before).outline(), expected);
    }
}
