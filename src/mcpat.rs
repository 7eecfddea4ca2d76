//! Main module for McPAT report importing
//!
//! Data flows leaf to root:
//!
//!     report text -> lexing -> parsing (raw tree) -> pipeline (normalized, reshaped tree)
//!     reshaped tree + target hierarchy -> importing (result records in the target)

pub mod importing;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
pub mod report;
pub mod target;
pub mod testing;
