//! Resource catalog and the storage collaborator seam.
//!
//! [`ScheduleStore`] is the contract with the relational storage layer:
//! simple list/insert/update/delete operations keyed by numeric identifiers.
//! [`Catalog`] is a read-only snapshot of the reference entities (rooms,
//! time slots, teachers, sections, courses) for one scheduling run — a
//! single fetch per entity type, never mutated.
//!
//! [`MemoryStore`] is a complete in-memory store used by the test suite and
//! by embedders that bring their own persistence later.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::models::{
    Assignment, AssignmentId, Course, CourseId, Room, RoomId, Section, SectionId, Teacher,
    TeacherId, TermId, TimeSlot, TimeSlotId,
};

/// A section awaiting placement, paired with the course to schedule.
///
/// An assignment always binds a section *and* a course to a room and slot,
/// so the unit of unscheduled work is this pair, not a bare section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDemand {
    /// The section needing a room and time slot.
    pub section: Section,
    /// The course to place for it.
    pub course_id: CourseId,
}

/// Fields for a new assignment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignment {
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

/// Partial update for an assignment. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPatch {
    pub section_id: Option<SectionId>,
    pub course_id: Option<CourseId>,
    pub room_id: Option<RoomId>,
    pub time_slot_id: Option<TimeSlotId>,
    pub teacher_id: Option<TeacherId>,
}

/// Axis filter for listing assignments. `None` fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentFilter {
    pub section_id: Option<SectionId>,
    pub course_id: Option<CourseId>,
    pub teacher_id: Option<TeacherId>,
    pub room_id: Option<RoomId>,
}

impl AssignmentFilter {
    /// Whether an assignment matches this filter.
    pub fn matches(&self, a: &Assignment) -> bool {
        self.section_id.map_or(true, |id| a.section_id == id)
            && self.course_id.map_or(true, |id| a.course_id == id)
            && self.teacher_id.map_or(true, |id| a.teacher_id == Some(id))
            && self.room_id.map_or(true, |id| a.room_id == id)
    }
}

/// The storage collaborator.
///
/// Read failures surface as [`ScheduleError::DataUnavailable`], write
/// failures as [`ScheduleError::PersistenceFailure`]. Both are propagated,
/// not retried — transient-read retry is the collaborator's responsibility.
pub trait ScheduleStore {
    /// Lists (section, course) demands with no committed assignment for the
    /// given term, in catalog order.
    fn unscheduled_sections(&self, term: TermId) -> Result<Vec<SectionDemand>>;
    /// Lists all sections.
    fn sections(&self) -> Result<Vec<Section>>;
    /// Lists all rooms, in catalog order.
    fn rooms(&self) -> Result<Vec<Room>>;
    /// Lists all time slots, in catalog order.
    fn time_slots(&self) -> Result<Vec<TimeSlot>>;
    /// Lists all teachers.
    fn teachers(&self) -> Result<Vec<Teacher>>;
    /// Lists all courses.
    fn courses(&self) -> Result<Vec<Course>>;
    /// Lists committed assignments matching a filter.
    fn assignments(&self, filter: &AssignmentFilter) -> Result<Vec<Assignment>>;

    /// Creates one assignment, returning it with its new id.
    fn create_assignment(&self, new: NewAssignment) -> Result<Assignment>;
    /// Creates a batch of assignments atomically: all or none.
    fn create_assignments(&self, batch: Vec<NewAssignment>) -> Result<Vec<Assignment>>;
    /// Applies a partial update. Fails with `NotFound` if absent.
    fn update_assignment(&self, id: AssignmentId, patch: AssignmentPatch) -> Result<Assignment>;
    /// Deletes an assignment. Fails with `NotFound` if absent.
    fn delete_assignment(&self, id: AssignmentId) -> Result<()>;

    /// Fetches one section by id.
    fn section(&self, id: SectionId) -> Result<Option<Section>> {
        Ok(self.sections()?.into_iter().find(|s| s.id == id))
    }

    /// Fetches one room by id.
    fn room(&self, id: RoomId) -> Result<Option<Room>> {
        Ok(self.rooms()?.into_iter().find(|r| r.id == id))
    }

    /// Fetches one assignment by id.
    fn assignment(&self, id: AssignmentId) -> Result<Option<Assignment>> {
        Ok(self
            .assignments(&AssignmentFilter::default())?
            .into_iter()
            .find(|a| a.id == id))
    }
}

/// Read-only snapshot of the reference entities for one run.
///
/// Preserves catalog order in the entity vectors (the auto-scheduler's
/// iteration order) and carries id-keyed indexes for lookups.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Rooms in catalog order.
    pub rooms: Vec<Room>,
    /// Time slots in catalog order.
    pub time_slots: Vec<TimeSlot>,
    /// Teachers.
    pub teachers: Vec<Teacher>,
    /// Sections.
    pub sections: Vec<Section>,
    /// Courses.
    pub courses: Vec<Course>,
    room_index: HashMap<RoomId, usize>,
    slot_index: HashMap<TimeSlotId, usize>,
    teacher_index: HashMap<TeacherId, usize>,
    section_index: HashMap<SectionId, usize>,
    course_index: HashMap<CourseId, usize>,
}

impl Catalog {
    /// Loads a snapshot from the store: one fetch per entity type.
    pub fn load<S: ScheduleStore + ?Sized>(store: &S) -> Result<Self> {
        let rooms = store.rooms()?;
        let time_slots = store.time_slots()?;
        let teachers = store.teachers()?;
        let sections = store.sections()?;
        let courses = store.courses()?;

        let room_index = rooms.iter().enumerate().map(|(i, r)| (r.id, i)).collect();
        let slot_index = time_slots.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
        let teacher_index = teachers.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
        let section_index = sections.iter().enumerate().map(|(i, s)| (s.id, i)).collect();
        let course_index = courses.iter().enumerate().map(|(i, c)| (c.id, i)).collect();

        Ok(Self {
            rooms,
            time_slots,
            teachers,
            sections,
            courses,
            room_index,
            slot_index,
            teacher_index,
            section_index,
            course_index,
        })
    }

    /// Looks up a room.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.room_index.get(&id).map(|&i| &self.rooms[i])
    }

    /// Looks up a time slot.
    pub fn time_slot(&self, id: TimeSlotId) -> Option<&TimeSlot> {
        self.slot_index.get(&id).map(|&i| &self.time_slots[i])
    }

    /// Looks up a teacher.
    pub fn teacher(&self, id: TeacherId) -> Option<&Teacher> {
        self.teacher_index.get(&id).map(|&i| &self.teachers[i])
    }

    /// Looks up a section.
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.section_index.get(&id).map(|&i| &self.sections[i])
    }

    /// Looks up a course.
    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.course_index.get(&id).map(|&i| &self.courses[i])
    }

    /// Course code for an id, or a numeric placeholder for unknown ids.
    pub fn course_code(&self, id: CourseId) -> String {
        match self.course(id) {
            Some(c) => c.code.clone(),
            None => format!("course #{id}"),
        }
    }

    /// Pairs of distinct slots whose wall-clock ranges collide.
    ///
    /// Diagnostic for catalog audits: conflict detection is keyed on slot
    /// identity and assumes slots are mutually non-overlapping by
    /// construction. A non-empty result means that assumption is broken.
    pub fn overlapping_slots(&self) -> Vec<(TimeSlotId, TimeSlotId)> {
        let mut pairs = Vec::new();
        for (i, a) in self.time_slots.iter().enumerate() {
            for b in &self.time_slots[i + 1..] {
                if a.overlaps(b) {
                    pairs.push((a.id, b.id));
                }
            }
        }
        pairs
    }
}

/// In-memory [`ScheduleStore`].
///
/// Interior mutex so `&self` methods serve concurrent readers; assignment
/// ids are allocated from a monotonic counter.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<StoreData>,
}

#[derive(Debug, Default)]
struct StoreData {
    sections: Vec<Section>,
    rooms: Vec<Room>,
    time_slots: Vec<TimeSlot>,
    teachers: Vec<Teacher>,
    courses: Vec<Course>,
    demands: Vec<(SectionId, CourseId)>,
    assignments: Vec<Assignment>,
    next_assignment_id: AssignmentId,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a section.
    pub fn add_section(&self, section: Section) {
        self.lock().sections.push(section);
    }

    /// Adds a room.
    pub fn add_room(&self, room: Room) {
        self.lock().rooms.push(room);
    }

    /// Adds a time slot.
    pub fn add_time_slot(&self, slot: TimeSlot) {
        self.lock().time_slots.push(slot);
    }

    /// Adds a teacher.
    pub fn add_teacher(&self, teacher: Teacher) {
        self.lock().teachers.push(teacher);
    }

    /// Adds a course.
    pub fn add_course(&self, course: Course) {
        self.lock().courses.push(course);
    }

    /// Registers a (section, course) pair needing placement.
    pub fn add_demand(&self, section_id: SectionId, course_id: CourseId) {
        self.lock().demands.push((section_id, course_id));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreData> {
        // Lock poisoning only occurs if a panic happened mid-mutation;
        // the data is plain rows, so recover the guard.
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl ScheduleStore for MemoryStore {
    fn unscheduled_sections(&self, _term: TermId) -> Result<Vec<SectionDemand>> {
        let data = self.lock();
        let mut demands = Vec::new();
        for &(section_id, course_id) in &data.demands {
            let placed = data
                .assignments
                .iter()
                .any(|a| a.section_id == section_id && a.course_id == course_id);
            if placed {
                continue;
            }
            if let Some(section) = data.sections.iter().find(|s| s.id == section_id) {
                demands.push(SectionDemand {
                    section: section.clone(),
                    course_id,
                });
            }
        }
        Ok(demands)
    }

    fn sections(&self) -> Result<Vec<Section>> {
        Ok(self.lock().sections.clone())
    }

    fn rooms(&self) -> Result<Vec<Room>> {
        Ok(self.lock().rooms.clone())
    }

    fn time_slots(&self) -> Result<Vec<TimeSlot>> {
        Ok(self.lock().time_slots.clone())
    }

    fn teachers(&self) -> Result<Vec<Teacher>> {
        Ok(self.lock().teachers.clone())
    }

    fn courses(&self) -> Result<Vec<Course>> {
        Ok(self.lock().courses.clone())
    }

    fn assignments(&self, filter: &AssignmentFilter) -> Result<Vec<Assignment>> {
        Ok(self
            .lock()
            .assignments
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect())
    }

    fn create_assignment(&self, new: NewAssignment) -> Result<Assignment> {
        let mut data = self.lock();
        data.next_assignment_id += 1;
        let assignment = Assignment {
            id: data.next_assignment_id,
            section_id: new.section_id,
            course_id: new.course_id,
            room_id: new.room_id,
            time_slot_id: new.time_slot_id,
            teacher_id: new.teacher_id,
            term_id: new.term_id,
        };
        data.assignments.push(assignment.clone());
        Ok(assignment)
    }

    fn create_assignments(&self, batch: Vec<NewAssignment>) -> Result<Vec<Assignment>> {
        let mut data = self.lock();
        let mut created = Vec::with_capacity(batch.len());
        for new in batch {
            data.next_assignment_id += 1;
            let assignment = Assignment {
                id: data.next_assignment_id,
                section_id: new.section_id,
                course_id: new.course_id,
                room_id: new.room_id,
                time_slot_id: new.time_slot_id,
                teacher_id: new.teacher_id,
                term_id: new.term_id,
            };
            data.assignments.push(assignment.clone());
            created.push(assignment);
        }
        Ok(created)
    }

    fn update_assignment(&self, id: AssignmentId, patch: AssignmentPatch) -> Result<Assignment> {
        let mut data = self.lock();
        let a = data
            .assignments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ScheduleError::not_found("Assignment", id))?;
        if let Some(v) = patch.section_id {
            a.section_id = v;
        }
        if let Some(v) = patch.course_id {
            a.course_id = v;
        }
        if let Some(v) = patch.room_id {
            a.room_id = v;
        }
        if let Some(v) = patch.time_slot_id {
            a.time_slot_id = v;
        }
        if let Some(v) = patch.teacher_id {
            a.teacher_id = Some(v);
        }
        Ok(a.clone())
    }

    fn delete_assignment(&self, id: AssignmentId) -> Result<()> {
        let mut data = self.lock();
        let before = data.assignments.len();
        data.assignments.retain(|a| a.id != id);
        if data.assignments.len() == before {
            return Err(ScheduleError::not_found("Assignment", id));
        }
        Ok(())
    }
}
