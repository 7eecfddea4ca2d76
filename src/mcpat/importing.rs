//! Importing
//!
//! Places the figures of a reshaped report tree into a target hierarchy.
//!
//!     reshaped tree + target hierarchy -> aligner (consults translators) -> result slots
//!
//! [`PatImporter`] bundles a translator registry with the whole text-to-slots run and can
//! be reused for successive reports against the same hierarchy. Each run overwrites the
//! result slots it reaches.

pub mod aligner;
pub mod record;
pub mod registry;
pub mod translators;

pub use aligner::{align, Placement, TreeAlignmentMismatch};
pub use record::{extract_record, MissingAttributeError, ResultRecord};
pub use registry::TranslatorRegistry;
pub use translators::Translator;

use crate::mcpat::lexing::UnknownLineError;
use crate::mcpat::parsing::ParseTree;
use crate::mcpat::pipeline::parse_and_reshape;
use crate::mcpat::target::TargetTree;
use std::fmt;

/// Everything that can fail a report import.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportError {
    Lexing(UnknownLineError),
    MissingAttribute(MissingAttributeError),
    Mismatch(TreeAlignmentMismatch),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Lexing(err) => write!(f, "Malformed report: {}", err),
            ImportError::MissingAttribute(err) => write!(f, "Extraction failed: {}", err),
            ImportError::Mismatch(err) => write!(f, "Tree alignment mismatch: {}", err),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Lexing(err) => Some(err),
            ImportError::MissingAttribute(err) => Some(err),
            ImportError::Mismatch(err) => Some(err),
        }
    }
}

impl From<UnknownLineError> for ImportError {
    fn from(err: UnknownLineError) -> Self {
        ImportError::Lexing(err)
    }
}

impl From<MissingAttributeError> for ImportError {
    fn from(err: MissingAttributeError) -> Self {
        ImportError::MissingAttribute(err)
    }
}

impl From<TreeAlignmentMismatch> for ImportError {
    fn from(err: TreeAlignmentMismatch) -> Self {
        ImportError::Mismatch(err)
    }
}

/// Align an already reshaped report against `target` with the standard translators.
pub fn align_and_import(
    target: &mut TargetTree,
    source: &ParseTree,
) -> Result<Vec<Placement>, ImportError> {
    align(&TranslatorRegistry::with_defaults(), target, source)
}

/// Imports whole reports into a target hierarchy.
pub struct PatImporter {
    registry: TranslatorRegistry,
}

impl PatImporter {
    pub fn new(registry: TranslatorRegistry) -> Self {
        PatImporter { registry }
    }

    pub fn registry(&self) -> &TranslatorRegistry {
        &self.registry
    }

    /// Parse, reshape and align one complete report.
    pub fn import(
        &self,
        target: &mut TargetTree,
        report: &str,
    ) -> Result<Vec<Placement>, ImportError> {
        let source = parse_and_reshape(report)?;
        align(&self.registry, target, &source)
    }
}

impl Default for PatImporter {
    fn default() -> Self {
        Self::new(TranslatorRegistry::with_defaults())
    }
}
