//! Timetabling domain models.
//!
//! Core data types for a university timetable: the resources a class needs
//! (rooms, time slots, teachers), the academic entities that need them
//! (sections, courses), and the binding that ties them together
//! ([`Assignment`]).
//!
//! All entities are keyed by numeric identifiers, matching the relational
//! storage collaborator. Everything except `Assignment` is read-only to the
//! scheduler.

mod assignment;
mod course;
mod room;
mod section;
mod teacher;
mod time_slot;

pub use assignment::{Assignment, AssignmentDraft};
pub use course::Course;
pub use room::{Room, RoomKind};
pub use section::Section;
pub use teacher::Teacher;
pub use time_slot::{TimeOfDay, TimeSlot, Weekday};

/// Section identifier.
pub type SectionId = u32;
/// Course identifier.
pub type CourseId = u32;
/// Room identifier.
pub type RoomId = u32;
/// Time slot identifier.
pub type TimeSlotId = u32;
/// Teacher identifier.
pub type TeacherId = u32;
/// Assignment identifier.
pub type AssignmentId = u32;
/// Academic term identifier.
pub type TermId = u32;
