//! Parsing
//!
//! Raw tree construction from lexed lines, plus the arena the rest of the pipeline
//! rewrites in place.
//!
//! The raw tree is purely indentation driven; see [`tree_builder`] for the algorithm and
//! [`crate::mcpat::pipeline`] for the passes that give it meaning.

pub mod tree;
pub mod tree_builder;
pub mod treeviz;

pub use tree::{NodeId, Outline, ParseNode, ParseTree};
pub use tree_builder::build_tree;
pub use treeviz::to_treeviz_str;
