//! Translators
//!
//! A translator is the per-component-type knowledge the aligner needs: which report
//! block corresponds to a target node, whether its absence is acceptable, how to turn
//! the block into a record, and whether the block's figures already cover the node's
//! descendants.
//!
//! Dispatch is by [`ComponentType`] through the
//! [`TranslatorRegistry`](super::registry::TranslatorRegistry); label heuristics live
//! only inside `matches`.

use crate::mcpat::importing::record::{extract_record, MissingAttributeError, ResultRecord};
use crate::mcpat::lexing::TokenKind;
use crate::mcpat::parsing::{NodeId, ParseTree};
use crate::mcpat::target::TargetNode;

pub trait Translator: Send + Sync {
    /// Whether the report may lack a counterpart for `target`.
    fn is_optional(&self, target: &TargetNode) -> bool {
        target.optional
    }

    /// Whether the report block `candidate` is `target`'s counterpart.
    fn matches(&self, source: &ParseTree, candidate: NodeId, target: &TargetNode) -> bool;

    /// The record for a matched block; `None` for nodes that carry no figures.
    fn extract(
        &self,
        source: &ParseTree,
        block: NodeId,
    ) -> Result<Option<ResultRecord>, MissingAttributeError> {
        extract_record(source, block).map(Some)
    }

    /// Whether the block's figures are a roll-up of the node's descendants, so the
    /// descendants must not be matched on their own.
    fn skip_children(&self, _target: &TargetNode) -> bool {
        false
    }
}

fn is_block(source: &ParseTree, id: NodeId) -> bool {
    source.kind(id).is_block()
}

/// A run of ASCII digits without leading zeros, so ordinals of any length compare as
/// strings.
fn canonical_ordinal(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() && !digits.is_empty() {
        "0"
    } else {
        trimmed
    }
}

/// Trailing ASCII digits of a name, if any, without leading zeros.
fn trailing_ordinal(name: &str) -> Option<&str> {
    let stem = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if stem.len() == name.len() {
        return None;
    }
    Some(canonical_ordinal(&name[stem.len()..]))
}

/// Matches blocks whose label is exactly one of a fixed set.
pub struct LabelTranslator {
    labels: &'static [&'static str],
    optional: bool,
    skip_children: bool,
}

impl LabelTranslator {
    pub fn new(labels: &'static [&'static str]) -> Self {
        LabelTranslator {
            labels,
            optional: false,
            skip_children: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn rolls_up_children(mut self) -> Self {
        self.skip_children = true;
        self
    }
}

impl Translator for LabelTranslator {
    fn is_optional(&self, target: &TargetNode) -> bool {
        self.optional || target.optional
    }

    fn matches(&self, source: &ParseTree, candidate: NodeId, _target: &TargetNode) -> bool {
        is_block(source, candidate) && self.labels.contains(&source.label(candidate))
    }

    fn skip_children(&self, _target: &TargetNode) -> bool {
        self.skip_children
    }
}

/// Matches `<prefix><digits>` labels, e.g. `Core0`, `Bus1`.
///
/// When both the block label and the target name end in digits, the numbers must be
/// equal; otherwise any instance is accepted and sibling order decides.
pub struct OrdinalTranslator {
    prefix: &'static str,
    ordinal_required: bool,
    optional: bool,
}

impl OrdinalTranslator {
    /// The label must carry an ordinal (`Core` alone does not match).
    pub fn required(prefix: &'static str) -> Self {
        OrdinalTranslator {
            prefix,
            ordinal_required: true,
            optional: false,
        }
    }

    /// The bare prefix also matches (`L2` as well as `L20`).
    pub fn allowing_bare(prefix: &'static str) -> Self {
        OrdinalTranslator {
            prefix,
            ordinal_required: false,
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

impl Translator for OrdinalTranslator {
    fn is_optional(&self, target: &TargetNode) -> bool {
        self.optional || target.optional
    }

    fn matches(&self, source: &ParseTree, candidate: NodeId, target: &TargetNode) -> bool {
        if !is_block(source, candidate) {
            return false;
        }
        let Some(suffix) = source.label(candidate).strip_prefix(self.prefix) else {
            return false;
        };
        if !suffix.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        if suffix.is_empty() {
            return !self.ordinal_required;
        }
        match trailing_ordinal(&target.name) {
            Some(expected) => canonical_ordinal(suffix) == expected,
            None => true,
        }
    }
}

/// Matches labels starting with a prefix, e.g. `Integer ALUs (Count: 6 )`.
pub struct PrefixTranslator {
    prefix: &'static str,
}

impl PrefixTranslator {
    pub fn new(prefix: &'static str) -> Self {
        PrefixTranslator { prefix }
    }
}

impl Translator for PrefixTranslator {
    fn matches(&self, source: &ParseTree, candidate: NodeId, _target: &TargetNode) -> bool {
        is_block(source, candidate) && source.label(candidate).starts_with(self.prefix)
    }
}

/// The hierarchy root: paired with the report root, carries no figures.
pub struct RootTranslator;

impl Translator for RootTranslator {
    fn is_optional(&self, _target: &TargetNode) -> bool {
        false
    }

    fn matches(&self, source: &ParseTree, candidate: NodeId, _target: &TargetNode) -> bool {
        source.kind(candidate) == TokenKind::Root
    }

    fn extract(
        &self,
        _source: &ParseTree,
        _block: NodeId,
    ) -> Result<Option<ResultRecord>, MissingAttributeError> {
        Ok(None)
    }
}

/// Components without a dedicated category: the block label must equal the node
/// name, ignoring case. Always optional.
pub struct GenericTranslator;

impl Translator for GenericTranslator {
    fn is_optional(&self, _target: &TargetNode) -> bool {
        true
    }

    fn matches(&self, source: &ParseTree, candidate: NodeId, target: &TargetNode) -> bool {
        is_block(source, candidate) && source.label(candidate).eq_ignore_ascii_case(&target.name)
    }
}
