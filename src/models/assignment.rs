//! Assignment (schedule record) model.
//!
//! An assignment binds a section and course to a room and time slot, with
//! an optional teacher. It is the unit the conflict detector protects.
//!
//! Uniqueness invariants across the committed set:
//! - no two assignments share (room, time slot)
//! - no two assignments share (section, time slot)
//! - no two assignments share (teacher, time slot) when both have a teacher

use serde::{Deserialize, Serialize};

use super::{AssignmentId, CourseId, RoomId, SectionId, TeacherId, TermId, TimeSlotId};

/// A committed schedule record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Unique assignment identifier.
    pub id: AssignmentId,
    /// The section being scheduled.
    pub section_id: SectionId,
    /// The course the section takes in this slot.
    pub course_id: CourseId,
    /// The room used.
    pub room_id: RoomId,
    /// The slot occupied.
    pub time_slot_id: TimeSlotId,
    /// The teacher, if staffed.
    pub teacher_id: Option<TeacherId>,
    /// The academic term, if scoped to one.
    pub term_id: Option<TermId>,
}

/// A candidate assignment not yet committed.
///
/// What the validator and conflict detector operate on. `exclude` carries
/// the id of the record being updated so an assignment can be modified
/// without conflicting with itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDraft {
    /// The section being scheduled.
    pub section_id: SectionId,
    /// The course, if known at check time.
    pub course_id: Option<CourseId>,
    /// The room requested.
    pub room_id: RoomId,
    /// The slot requested.
    pub time_slot_id: TimeSlotId,
    /// The teacher, if staffed.
    pub teacher_id: Option<TeacherId>,
    /// Existing assignment to ignore during conflict checks.
    pub exclude: Option<AssignmentId>,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(
        id: AssignmentId,
        section_id: SectionId,
        course_id: CourseId,
        room_id: RoomId,
        time_slot_id: TimeSlotId,
    ) -> Self {
        Self {
            id,
            section_id,
            course_id,
            room_id,
            time_slot_id,
            teacher_id: None,
            term_id: None,
        }
    }

    /// Sets the teacher.
    pub fn with_teacher(mut self, teacher_id: TeacherId) -> Self {
        self.teacher_id = Some(teacher_id);
        self
    }

    /// Sets the term.
    pub fn with_term(mut self, term_id: TermId) -> Self {
        self.term_id = Some(term_id);
        self
    }
}

impl AssignmentDraft {
    /// Creates a draft for a (section, room, slot) candidate.
    pub fn new(section_id: SectionId, room_id: RoomId, time_slot_id: TimeSlotId) -> Self {
        Self {
            section_id,
            course_id: None,
            room_id,
            time_slot_id,
            teacher_id: None,
            exclude: None,
        }
    }

    /// Sets the course.
    pub fn with_course(mut self, course_id: CourseId) -> Self {
        self.course_id = Some(course_id);
        self
    }

    /// Sets the teacher.
    pub fn with_teacher(mut self, teacher_id: TeacherId) -> Self {
        self.teacher_id = Some(teacher_id);
        self
    }

    /// Ignores an existing assignment during conflict checks.
    pub fn excluding(mut self, id: AssignmentId) -> Self {
        self.exclude = Some(id);
        self
    }
}
