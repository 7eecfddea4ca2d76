//! Testing utilities for report trees
//!
//! # Writing pipeline tests
//!
//! Two tools cover most of what a pipeline test needs:
//!
//! 1. **[McpatSamples]** - vetted report and hierarchy fixtures
//! 2. **[assert_tree](fn@assert_tree)** - fluent assertions over a
//!    [`ParseTree`](crate::mcpat::parsing::ParseTree)
//!
//! ## Use the samples for anything larger than a block or two
//!
//! McPAT output is whitespace-sensitive and easy to get subtly wrong by hand (a
//! misplaced blank line moves a whole block). Short inline sources are fine for unit
//! tests of one pass; end-to-end tests should go through [`McpatSamples`] so that a
//! change in the report format only needs one fixture updated.
//!
//! ```rust-example
//! use patbridge::mcpat::pipeline::parse_and_reshape;
//! use patbridge::mcpat::testing::McpatSamples;
//!
//! let tree = parse_and_reshape(McpatSamples::report())?;
//! let mut target = McpatSamples::target()?;
//! ```
//!
//! ## Assert on shape, not on counts
//!
//! Walking a tree by hand turns into a ladder of `children(..)[i]` lookups where the
//! interesting expectation gets lost. The fluent API states the expected shape
//! directly and reports which node failed and what it held instead:
//!
//! ```rust-example
//! use patbridge::mcpat::testing::assert_tree;
//! use patbridge::mcpat::lexing::TokenKind;
//!
//! assert_tree(&tree)
//!     .child_count(1)
//!     .component("System", |system| {
//!         system
//!             .attribute("Area", "53.2258 mm^2")
//!             .component("Core0", |core| {
//!                 core.component_labels(&["Instruction Fetch Unit", "Branch Target Buffer"]);
//!             });
//!     });
//! ```

mod samples;
mod testing_assertions;

pub use samples::McpatSamples;
pub use testing_assertions::{assert_tree, NodeAssertion, TreeAssertion};
