//! Tree alignment
//!
//! Walks the target hierarchy depth-first, pre-order, keeping a stack of frames that
//! pairs every open target node with the report block it matched. Each node looks for
//! its counterpart among the children of its parent's block.
//!
//! # State
//!
//! - `frames`: the blocks matched by the open target nodes, innermost last. Skipped
//!   and absent nodes open no frame, so every node that is looked up finds its
//!   parent's block on top. The hierarchy root is paired with the report root,
//!   whatever its type.
//! - `skip_root`: the target node whose subtree is currently being skipped. It is set
//!   when a node's figures already cover its descendants, when an optional node has no
//!   counterpart, or when a node is excluded from export. It is cleared exactly when
//!   that node is left, so later siblings are matched normally.
//! - `consumed`: blocks already paired with a target node in this run; a block is never
//!   matched twice
//!
//! # Outcomes per node
//!
//! - skipped: result slot untouched
//! - matched: record extracted and written (replacing any previous record)
//! - absent, optional: result slot cleared, subtree skipped
//! - absent, required: [`TreeAlignmentMismatch`]

use crate::mcpat::importing::record::ResultRecord;
use crate::mcpat::importing::registry::TranslatorRegistry;
use crate::mcpat::importing::ImportError;
use crate::mcpat::parsing::{NodeId, ParseTree};
use crate::mcpat::target::{TargetId, TargetTree};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// A required target node has no counterpart in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeAlignmentMismatch {
    /// Path of the unmatched target node
    pub target: String,
    /// Path of its parent
    pub target_parent: String,
    /// Label of the block the parent matched
    pub source_parent: String,
    /// Labels of the parent block's children that are still unmatched
    pub candidates: Vec<String>,
}

impl fmt::Display for TreeAlignmentMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No report block for '{}' under '{}' (matched block '{}'); unmatched candidates: [{}]",
            self.target,
            self.target_parent,
            self.source_parent,
            self.candidates.join(", ")
        )
    }
}

impl std::error::Error for TreeAlignmentMismatch {}

/// One record written into the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    /// Target path, e.g. `root/system/core0`
    pub target: String,
    /// Label of the report block the figures came from
    pub source: String,
    pub record: ResultRecord,
}

enum Visit {
    Enter(TargetId),
    Exit(TargetId, bool),
}

struct Aligner<'a> {
    registry: &'a TranslatorRegistry,
    source: &'a ParseTree,
    target: &'a mut TargetTree,
    frames: Vec<NodeId>,
    skip_root: Option<TargetId>,
    consumed: HashSet<NodeId>,
    placements: Vec<Placement>,
}

fn source_label(source: &ParseTree, id: NodeId) -> String {
    if id == source.root() {
        "<report>".to_string()
    } else {
        source.label(id).to_string()
    }
}

impl<'a> Aligner<'a> {
    fn find_counterpart(&self, id: TargetId, parent_block: NodeId) -> Option<NodeId> {
        let node = self.target.node(id);
        let translator = self.registry.get(node.kind);
        self.source
            .children(parent_block)
            .iter()
            .copied()
            .filter(|block| !self.consumed.contains(block))
            .find(|&block| translator.matches(self.source, block, node))
    }

    fn mismatch(&self, id: TargetId, parent_block: NodeId) -> TreeAlignmentMismatch {
        let target_parent = self
            .target
            .parent(id)
            .map(|p| self.target.path(p))
            .unwrap_or_default();
        TreeAlignmentMismatch {
            target: self.target.path(id),
            target_parent,
            source_parent: source_label(self.source, parent_block),
            candidates: self
                .source
                .children(parent_block)
                .iter()
                .copied()
                .filter(|block| !self.consumed.contains(block))
                .filter(|&block| self.source.kind(block).is_block())
                .map(|block| self.source.label(block).to_string())
                .collect(),
        }
    }

    /// Returns whether a frame was opened for `id`.
    fn enter(&mut self, id: TargetId) -> Result<bool, ImportError> {
        if self.skip_root.is_some() {
            clilog::debug!(ALIGN_SKIP, "skip {}", self.target.path(id));
            return Ok(false);
        }

        if !self.target.node(id).exported {
            clilog::warn!(
                ALIGN_EXCLUDED,
                "{} is excluded from export; subtree not imported",
                self.target.path(id)
            );
            self.skip_root = Some(id);
            return Ok(false);
        }

        let Some(&parent_block) = self.frames.last() else {
            // Only the hierarchy root has no open frame: it stands for the whole report,
            // whatever its type, and carries no record of its own
            clilog::debug!(ALIGN_MATCH, "{} <- <report>", self.target.path(id));
            self.target.set_result(id, None);
            self.frames.push(self.source.root());
            return Ok(true);
        };

        let counterpart = match self.find_counterpart(id, parent_block) {
            Some(block) => Some(block),
            None => {
                let node = self.target.node(id);
                if !self.registry.get(node.kind).is_optional(node) {
                    return Err(self.mismatch(id, parent_block).into());
                }
                None
            }
        };

        let Some(block) = counterpart else {
            clilog::warn!(
                ALIGN_ABSENT,
                "optional {} not in report; left empty",
                self.target.path(id)
            );
            self.target.set_result(id, None);
            self.skip_root = Some(id);
            return Ok(false);
        };

        let (record, skip_children) = {
            let node = self.target.node(id);
            let translator = self.registry.get(node.kind);
            (
                translator.extract(self.source, block)?,
                translator.skip_children(node),
            )
        };

        clilog::debug!(
            ALIGN_MATCH,
            "{} <- {}",
            self.target.path(id),
            source_label(self.source, block)
        );
        self.consumed.insert(block);
        if let Some(record) = &record {
            self.placements.push(Placement {
                target: self.target.path(id),
                source: source_label(self.source, block),
                record: record.clone(),
            });
        }
        self.target.set_result(id, record);
        self.frames.push(block);
        if skip_children {
            self.skip_root = Some(id);
        }
        Ok(true)
    }

    fn exit(&mut self, id: TargetId, opened: bool) {
        if opened {
            self.frames.pop();
        }
        if self.skip_root == Some(id) {
            self.skip_root = None;
        }
    }

    fn run(mut self) -> Result<Vec<Placement>, ImportError> {
        let mut work = vec![Visit::Enter(self.target.root())];
        while let Some(visit) = work.pop() {
            match visit {
                Visit::Enter(id) => {
                    let opened = self.enter(id)?;
                    work.push(Visit::Exit(id, opened));
                    work.extend(self.target.children(id).iter().rev().map(|&c| Visit::Enter(c)));
                }
                Visit::Exit(id, opened) => self.exit(id, opened),
            }
        }
        Ok(self.placements)
    }
}

/// Align `source` against `target`, writing a record into every matched node.
///
/// Stops at the first error; records written before it stay in place.
pub fn align(
    registry: &TranslatorRegistry,
    target: &mut TargetTree,
    source: &ParseTree,
) -> Result<Vec<Placement>, ImportError> {
    let aligner = Aligner {
        registry,
        source,
        target,
        frames: Vec::new(),
        skip_root: None,
        consumed: HashSet::new(),
        placements: Vec::new(),
    };
    let placements = aligner.run()?;
    clilog::info!(ALIGN_DONE, "placed {} records", placements.len());
    Ok(placements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcpat::pipeline::parse_and_reshape;
    use crate::mcpat::target::{ComponentSpec, ComponentType};

    const FIGURES: &str = "    Area = 1 mm^2\n    Peak Dynamic = 1 W\n    Subthreshold Leakage = 1 W\n    Gate Leakage = 1 W\n    Runtime Dynamic = 1 W\n";

    fn block(indent: &str, label: &str) -> String {
        let figures: String = FIGURES
            .lines()
            .map(|line| format!("{}{}\n", indent, line))
            .collect();
        format!("{}{}:\n{}", indent, label, figures)
    }

    fn run(target: &mut TargetTree, report: &str) -> Result<Vec<Placement>, ImportError> {
        let source = parse_and_reshape(report).unwrap();
        align(&TranslatorRegistry::with_defaults(), target, &source)
    }

    fn two_cores() -> String {
        format!("{}{}", block("", "Core"), block("", "Core"))
    }

    #[test]
    fn test_consumed_blocks_are_not_matched_twice() {
        let mut target = TargetTree::new("root");
        let root = target.root();
        target.add_child(root, "core", ComponentType::Core);
        target.add_child(root, "core", ComponentType::Core);
        let placements = run(&mut target, &two_cores()).unwrap();
        let sources: Vec<_> = placements.iter().map(|p| p.source.as_str()).collect();
        assert_eq!(sources, vec!["Core0", "Core1"]);
    }

    #[test]
    fn test_missing_required_node_names_it() {
        let mut target = TargetTree::new("root");
        let root = target.root();
        target.add_child(root, "core0", ComponentType::Core);
        target.add_child(root, "core2", ComponentType::Core);
        let err = run(&mut target, &two_cores()).unwrap_err();
        match err {
            ImportError::Mismatch(mismatch) => {
                assert_eq!(mismatch.target, "root/core2");
                assert_eq!(mismatch.target_parent, "root");
                assert_eq!(mismatch.source_parent, "<report>");
                assert_eq!(mismatch.candidates, vec!["Core1"]);
            }
            other => panic!("Expected mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_skip_scope_ends_with_subtree() {
        let report = format!(
            "{}{}{}",
            block("", "Core"),
            block("  ", "Branch Predictor"),
            block("  ", "Instruction Cache"),
        );
        // Branch Predictor rolls up its children: its (absent) child is never looked up,
        // while the following sibling is matched normally.
        let mut target = TargetTree::new("root");
        let root = target.root();
        let core = target.add_child(root, "core0", ComponentType::Core);
        let bp = target.add_child(core, "bp", ComponentType::BranchPredictor);
        let inner = target.add_child(bp, "global", ComponentType::Itlb);
        let icache = target.add_child(core, "icache", ComponentType::InstructionCache);

        let placements = run(&mut target, &report).unwrap();
        assert_eq!(placements.len(), 3);
        assert!(target.result(bp).is_some());
        assert!(target.result(inner).is_none());
        assert!(target.result(icache).is_some());
    }

    #[test]
    fn test_optional_absent_node_is_cleared_and_subtree_skipped() {
        let mut target = TargetTree::new("root");
        let root = target.root();
        let l3 = target.add_child(root, "l3", ComponentType::SharedCacheL3);
        let below = target.add_child(l3, "bank", ComponentType::Core);
        target.set_result(l3, Some(stale_record()));

        run(&mut target, &block("", "Core")).unwrap();
        assert!(target.result(l3).is_none());
        assert!(target.result(below).is_none());
    }

    #[test]
    fn test_excluded_subtree_is_untouched() {
        let mut target = TargetTree::new("root");
        let root = target.root();
        let hidden = target.add_child(root, "core0", ComponentType::Core);
        target.node_mut(hidden).exported = false;
        target.set_result(hidden, Some(stale_record()));
        let later = target.add_child(root, "core1", ComponentType::Core);

        let placements = run(&mut target, &two_cores()).unwrap();
        assert_eq!(target.result(hidden), Some(&stale_record()));
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].source, "Core1");
        assert!(target.result(later).is_some());
    }

    #[test]
    fn test_missing_attribute_aborts() {
        let mut target = TargetTree::new("root");
        let root = target.root();
        target.add_child(root, "core0", ComponentType::Core);
        let err = run(&mut target, "Core:\n  Area = 1 mm^2\n").unwrap_err();
        assert!(matches!(err, ImportError::MissingAttribute(_)));
    }

    #[test]
    fn test_root_of_any_type_stands_for_the_report() {
        let spec = ComponentSpec::new("system", ComponentType::System)
            .child(ComponentSpec::new("core0", ComponentType::Core));
        let mut target = TargetTree::from_spec(&spec);
        let placements = run(&mut target, &block("", "Core0")).unwrap();
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].target, "system/core0");
        assert!(target.result(target.root()).is_none());
    }

    #[test]
    fn test_nested_skips_keep_frames_balanced() {
        let report = format!(
            "{}{}{}",
            block("", "Core"),
            block("  ", "Branch Predictor"),
            block("", "Core"),
        );
        let mut target = TargetTree::new("root");
        let root = target.root();
        let first = target.add_child(root, "core0", ComponentType::Core);
        let excluded = target.add_child(first, "ifu", ComponentType::InstructionFetchUnit);
        target.node_mut(excluded).exported = false;
        let inner = target.add_child(excluded, "icache", ComponentType::InstructionCache);
        target.add_child(inner, "deeper", ComponentType::Itlb);
        target.add_child(first, "bp", ComponentType::BranchPredictor);
        let second = target.add_child(root, "core1", ComponentType::Core);

        let placements = run(&mut target, &report).unwrap();
        let targets: Vec<_> = placements.iter().map(|p| p.target.as_str()).collect();
        assert_eq!(targets, vec!["root/core0", "root/core0/bp", "root/core1"]);
        assert!(target.result(second).is_some());
    }

    fn stale_record() -> ResultRecord {
        ResultRecord {
            area: 9.0,
            leakage_static: 9.0,
            leakage_gate: 9.0,
            peak_dynamic: 9.0,
            runtime_dynamic: 9.0,
            attributes: Vec::new(),
        }
    }
}
