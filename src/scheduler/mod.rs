//! Batch auto-scheduling.
//!
//! `AutoScheduler` runs a greedy, difficulty-first placement pass over the
//! unscheduled sections of a term; `RunReport` summarizes what was placed
//! and what was not.
//!
//! # Algorithm
//!
//! First-fit greedy with no backtracking: an unplaceable section may exist
//! where a different placement order would have succeeded. The conflict
//! detector and validator are decoupled from this strategy so a smarter
//! search can replace it without touching conflict semantics.

mod auto;
mod report;

pub use auto::AutoScheduler;
pub use report::RunReport;
