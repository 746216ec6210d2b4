//! Conflict detection across the three axes: room, section, teacher.
//!
//! Given a candidate assignment and a set of existing assignments, reports
//! every axis on which the candidate collides. The existing set is an
//! explicit argument — the committed records, a run's in-progress records,
//! or their union — never shared state, so the same detector serves both
//! interactive validation and batch scheduling.
//!
//! # Complexity
//! O(n) per call over the existing set. Fine at university scale (hundreds
//! of assignments); index by (room, slot) and (teacher, slot) before
//! growing past that.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::models::{Assignment, AssignmentDraft};

/// The dimension along which two assignments may not share a time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictAxis {
    /// Same room, same time slot.
    Room,
    /// Same section, same time slot.
    Section,
    /// Same teacher, same time slot.
    Teacher,
}

/// One conflict between a candidate and an existing assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReason {
    /// The axis that triggered.
    pub axis: ConflictAxis,
    /// Course code of the conflicting assignment.
    pub course_code: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Finds every conflict between a candidate and the existing assignments.
///
/// The three axis predicates are tested independently for each existing
/// assignment — they are not mutually exclusive, so one candidate may
/// accumulate several reasons. Order-independent: all matches are
/// reported, not just the first.
///
/// An existing assignment whose id equals `draft.exclude` is skipped, so a
/// record can be updated without conflicting with itself. A candidate
/// without a teacher never triggers the teacher axis.
pub fn find_conflicts(
    draft: &AssignmentDraft,
    existing: &[Assignment],
    catalog: &Catalog,
) -> Vec<ConflictReason> {
    let mut reasons = Vec::new();

    for a in existing {
        if draft.exclude == Some(a.id) {
            continue;
        }
        if a.time_slot_id != draft.time_slot_id {
            continue;
        }

        if a.room_id == draft.room_id {
            let room_name = catalog
                .room(draft.room_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| format!("#{}", draft.room_id));
            let code = catalog.course_code(a.course_id);
            reasons.push(ConflictReason {
                axis: ConflictAxis::Room,
                message: format!(
                    "Room {room_name} is already booked for {code} at this time slot"
                ),
                course_code: code,
            });
        }

        if a.section_id == draft.section_id {
            let code = catalog.course_code(a.course_id);
            reasons.push(ConflictReason {
                axis: ConflictAxis::Section,
                message: format!("Section already has {code} scheduled at this time slot"),
                course_code: code,
            });
        }

        if let (Some(t), Some(other)) = (draft.teacher_id, a.teacher_id) {
            if t == other {
                let teacher = catalog
                    .teacher(t)
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| format!("#{t}"));
                let code = catalog.course_code(a.course_id);
                reasons.push(ConflictReason {
                    axis: ConflictAxis::Teacher,
                    message: format!(
                        "Teacher {teacher} is already teaching {code} at this time slot"
                    ),
                    course_code: code,
                });
            }
        }
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, MemoryStore};
    use crate::models::{Course, Room, Section, Teacher, TimeOfDay, TimeSlot, Weekday};

    fn sample_catalog() -> Catalog {
        let store = MemoryStore::new();
        store.add_room(Room::new(1, "B201", 30));
        store.add_room(Room::new(2, "A101", 50));
        store.add_time_slot(
            TimeSlot::new(
                1,
                "TS1",
                TimeOfDay::parse("08:00").unwrap(),
                TimeOfDay::parse("09:30").unwrap(),
                vec![Weekday::Monday],
            )
            .unwrap(),
        );
        store.add_section(Section::new(1, "SE-Y1-A", 25));
        store.add_section(Section::new(2, "SE-Y1-B", 20));
        store.add_course(Course::new(1, "CS101"));
        store.add_course(Course::new(2, "MA201"));
        store.add_teacher(Teacher::new(7, "prof.smith"));
        Catalog::load(&store).unwrap()
    }

    #[test]
    fn test_room_conflict_cites_room_and_course() {
        let catalog = sample_catalog();
        let existing = vec![Assignment::new(1, 1, 1, 1, 1)];
        // Different section, same room + slot
        let draft = AssignmentDraft::new(2, 1, 1);

        let reasons = find_conflicts(&draft, &existing, &catalog);
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons[0].axis, ConflictAxis::Room);
        assert_eq!(reasons[0].course_code, "CS101");
        assert_eq!(
            reasons[0].message,
            "Room B201 is already booked for CS101 at this time slot"
        );
    }

    #[test]
    fn test_section_conflict() {
        let catalog = sample_catalog();
        let existing = vec![Assignment::new(1, 1, 1, 1, 1)];
        // Same section, different room, same slot
        let draft = AssignmentDraft::new(1, 2, 1);

        let reasons = find_conflicts(&draft, &existing, &catalog);
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons[0].axis, ConflictAxis::Section);
        assert!(reasons[0].message.contains("CS101"));
    }

    #[test]
    fn test_teacher_conflict() {
        let catalog = sample_catalog();
        let existing = vec![Assignment::new(1, 1, 1, 1, 1).with_teacher(7)];
        let draft = AssignmentDraft::new(2, 2, 1).with_teacher(7);

        let reasons = find_conflicts(&draft, &existing, &catalog);
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons[0].axis, ConflictAxis::Teacher);
        assert!(reasons[0].message.contains("prof.smith"));
    }

    #[test]
    fn test_teacherless_candidate_skips_teacher_axis() {
        let catalog = sample_catalog();
        let existing = vec![Assignment::new(1, 1, 1, 1, 1).with_teacher(7)];
        // No teacher, different room and section
        let draft = AssignmentDraft::new(2, 2, 1);
        assert!(find_conflicts(&draft, &existing, &catalog).is_empty());
    }

    #[test]
    fn test_different_slot_never_conflicts() {
        let catalog = sample_catalog();
        let existing = vec![Assignment::new(1, 1, 1, 1, 1).with_teacher(7)];
        // Same room, section, and teacher, but slot 2
        let draft = AssignmentDraft::new(1, 1, 2).with_teacher(7);
        assert!(find_conflicts(&draft, &existing, &catalog).is_empty());
    }

    #[test]
    fn test_all_axes_reported_from_distinct_assignments() {
        let catalog = sample_catalog();
        let existing = vec![
            Assignment::new(1, 1, 1, 1, 1), // room 1, section 1
            Assignment::new(2, 2, 2, 2, 1), // room 2, section 2
        ];
        // Reuses room+slot of A and section+slot of B: two distinct reasons
        let draft = AssignmentDraft::new(2, 1, 1);

        let reasons = find_conflicts(&draft, &existing, &catalog);
        assert_eq!(reasons.len(), 2);
        assert!(reasons.iter().any(|r| r.axis == ConflictAxis::Room));
        assert!(reasons.iter().any(|r| r.axis == ConflictAxis::Section));
    }

    #[test]
    fn test_multiple_axes_from_one_assignment() {
        let catalog = sample_catalog();
        let existing = vec![Assignment::new(1, 1, 1, 1, 1).with_teacher(7)];
        // Same room, same section, same teacher, same slot
        let draft = AssignmentDraft::new(1, 1, 1).with_teacher(7);

        let reasons = find_conflicts(&draft, &existing, &catalog);
        assert_eq!(reasons.len(), 3);
    }

    #[test]
    fn test_exclude_skips_self() {
        let catalog = sample_catalog();
        let existing = vec![Assignment::new(1, 1, 1, 1, 1)];
        // Updating assignment 1 in place: identical fields, no conflict
        let draft = AssignmentDraft::new(1, 1, 1).excluding(1);
        assert!(find_conflicts(&draft, &existing, &catalog).is_empty());
    }

    #[test]
    fn test_empty_existing_set() {
        let catalog = sample_catalog();
        let draft = AssignmentDraft::new(1, 1, 1).with_teacher(7);
        assert!(find_conflicts(&draft, &[], &catalog).is_empty());
    }
}
