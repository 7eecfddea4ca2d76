//! Schema reshaping
//!
//! Turns the normalized report tree into the shape of the component hierarchy. Each
//! pass fixes one known difference between how McPAT prints a unit and where the
//! hierarchy keeps it:
//!
//! | # | pass                           | effect                                             |
//! |---|--------------------------------|----------------------------------------------------|
//! | 1 | `group-local-predictors`       | L1/L2 local predictor fragments under one node     |
//! | 2 | `enumerate-cores`              | `Core` → `Core0`, `Core1`, ...                     |
//! | 3 | `enumerate-l1-directories`     | `First Level Directory` → `...0`, `...1`, ...      |
//! | 4 | `merge-processor-and-system`   | `Processor` → `System`, absorbing following units  |
//! | 5 | `replace-buses`                | `BUSES` → `Total Buses` + `Bus0`, `Bus1`, ...      |
//! | 6 | `pull-up-branch-target-buffer` | out of `Instruction Fetch Unit`                    |
//! | 7 | `pull-up-branch-predictor`     | out of `Instruction Fetch Unit`                    |
//! | 8 | `pull-up-itlb`                 | out of `Memory Management Unit`                    |
//! | 9 | `pull-up-dtlb`                 | out of `Memory Management Unit`                    |
//! | 10| `split-load-store-queue`       | `LoadStore Queue` → `LoadQ` + `StoreQ`             |
//! | 11| `pull-up-register-files`       | out of `Register Files`                            |
//!
//! Passes only move, rename, regroup or copy nodes. The set of report lines reachable
//! as attributes is the same before and after.

pub mod buses;
pub mod enumerate;
pub mod load_store_queue;
pub mod local_predictors;
pub mod merge_system;
pub mod pull_up;

pub use buses::ReplaceBuses;
pub use enumerate::EnumerateSiblings;
pub use load_store_queue::SplitLoadStoreQueue;
pub use local_predictors::GroupLocalPredictors;
pub use merge_system::MergeProcessorAndSystem;
pub use pull_up::{PullUp, Selection};

use crate::mcpat::pipeline::pass::TreePass;

/// The reshaping passes, in application order.
pub fn reshaping_passes() -> Vec<Box<dyn TreePass>> {
    vec![
        Box::new(GroupLocalPredictors),
        Box::new(EnumerateSiblings::cores()),
        Box::new(EnumerateSiblings::l1_directories()),
        Box::new(MergeProcessorAndSystem),
        Box::new(ReplaceBuses),
        Box::new(PullUp::branch_target_buffer()),
        Box::new(PullUp::branch_predictor()),
        Box::new(PullUp::itlb()),
        Box::new(PullUp::dtlb()),
        Box::new(SplitLoadStoreQueue),
        Box::new(PullUp::register_files()),
    ]
}
