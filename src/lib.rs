//! # patbridge
//!
//! Imports the power, area and timing figures computed by McPAT back into a
//! simulator's component hierarchy.
//!
//! The work happens in two halves:
//!
//! 1. [`mcpat::pipeline::parse_and_reshape`] turns one textual McPAT report into a
//!    tree shaped like the simulator's component hierarchy (lexing, indentation tree
//!    building, structural normalization, schema reshaping).
//! 2. [`mcpat::importing::align_and_import`] walks a pre-built target hierarchy in
//!    lock-step with that tree and writes a result record into every matched node.
//!
//! ## Testing
//!
//! Sample reports and target hierarchies live in the [testing module](mcpat::testing),
//! together with a fluent assertion API for parse trees.

pub mod mcpat;
