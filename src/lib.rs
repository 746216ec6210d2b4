//! University timetabling core.
//!
//! Combines departments' sections, courses, rooms, time slots, and teacher
//! assignments into conflict-free class schedules. Persistence, HTTP
//! transport, and authentication live in the surrounding application; this
//! crate holds the scheduling logic.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Section`, `Course`, `Room`, `TimeSlot`,
//!   `Teacher`, `Assignment`
//! - **`catalog`**: `ScheduleStore` (the storage seam), read-only `Catalog`
//!   snapshots, and an in-memory store
//! - **`conflict`**: Conflict detection across the room, section, and
//!   teacher axes
//! - **`validation`**: Accept/reject decisions with human-readable reasons
//! - **`service`**: Interactive validate/commit surface with serialized
//!   commits
//! - **`scheduler`**: Greedy batch auto-scheduler and run reports
//!
//! # Conflict model
//!
//! Conflicts are keyed by time slot identity: two assignments collide only
//! when they share a slot *and* a room, section, or teacher. Distinct
//! catalog slots never conflict, even if their wall-clock ranges intersect;
//! `Catalog::overlapping_slots` audits a catalog for that condition.

pub mod catalog;
pub mod conflict;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod service;
pub mod validation;

pub use catalog::{Catalog, MemoryStore, ScheduleStore};
pub use conflict::{find_conflicts, ConflictAxis, ConflictReason};
pub use error::{Result, ScheduleError};
pub use scheduler::{AutoScheduler, RunReport};
pub use service::{CommitResult, ScheduleService};
pub use validation::{validate_assignment, ValidationOutcome};
