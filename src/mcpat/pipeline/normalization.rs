//! Structural normalization
//!
//! Four passes repair the irregularities of the raw indentation tree, always in this
//! order:
//!
//! 1. [`PromoteBlocks::separators`]: replace separator lines by synthetic blank
//!    paragraphs that adopt their children
//! 2. [`FlattenAttributes`]: attributes with children hand them to their parent
//! 3. [`PushDownToParameter`]: attributes following a parameter move under it
//! 4. [`PromoteBlocks::paragraphs`]: dissolve blank paragraphs
//!
//! Afterwards no separator or paragraph remains, attributes are leaves, and every
//! parameter owns the attribute lines that followed it.

pub mod flatten_attributes;
pub mod promote_blocks;
pub mod push_down;

pub use flatten_attributes::FlattenAttributes;
pub use promote_blocks::PromoteBlocks;
pub use push_down::PushDownToParameter;

use crate::mcpat::pipeline::pass::TreePass;

/// The normalization passes, in application order.
pub fn normalization_passes() -> Vec<Box<dyn TreePass>> {
    vec![
        Box::new(PromoteBlocks::separators()),
        Box::new(FlattenAttributes::new()),
        Box::new(PushDownToParameter::new()),
        Box::new(PromoteBlocks::paragraphs()),
    ]
}
