//! Report pipeline
//!
//! Text to reshaped tree, in fixed order:
//!
//!     tokenize -> build_tree -> normalization passes -> reshaping passes
//!
//! [`parse_and_reshape`] runs all of it. [`PipelineExecutor`] runs named configurations
//! that stop at an earlier stage, which is what the CLI uses to show intermediate
//! trees.

pub mod config;
pub mod executor;
pub mod normalization;
pub mod pass;
pub mod reshaping;

pub use config::{ConfigRegistry, ProcessingConfig, Stage};
pub use executor::{ExecutionError, ExecutionOutput, PipelineExecutor};
pub use normalization::normalization_passes;
pub use pass::{run_passes, TreePass};
pub use reshaping::reshaping_passes;

use crate::mcpat::lexing::{tokenize, UnknownLineError};
use crate::mcpat::parsing::{build_tree, ParseTree};

/// Apply the normalization passes.
pub fn normalize(tree: ParseTree) -> ParseTree {
    run_passes(tree, &normalization_passes())
}

/// Apply the reshaping passes to a normalized tree.
pub fn reshape(tree: ParseTree) -> ParseTree {
    run_passes(tree, &reshaping_passes())
}

/// Parse one complete report into the tree alignment consumes.
pub fn parse_and_reshape(source: &str) -> Result<ParseTree, UnknownLineError> {
    let lines = tokenize(source)?;
    let tree = reshape(normalize(build_tree(&lines)));
    clilog::info!(
        REPORT_PARSED,
        "parsed report: {} lines, {} attribute lines in reshaped tree",
        lines.len(),
        tree.attribute_lines().len()
    );
    Ok(tree)
}
