//! Greedy auto-scheduler.
//!
//! Places each unscheduled section into the first (room, time slot) pair
//! that passes capacity and all three conflict axes, checking candidates
//! against the union of the committed assignments and the placements made
//! earlier in the same run. One pass, no retry, no backtracking.
//!
//! # Complexity
//! O(sections × slots × rooms × universe) per run — well under a second at
//! university scale (tens to low hundreds of rows per table).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::{AssignmentFilter, Catalog, NewAssignment, ScheduleStore, SectionDemand};
use crate::conflict::find_conflicts;
use crate::error::{Result, ScheduleError};
use crate::models::{Assignment, AssignmentDraft, RoomId, TermId, TimeSlotId};

use super::RunReport;

/// Batch scheduler for a term's unscheduled sections.
///
/// Single-threaded and run-to-completion: the in-run assignment set is
/// owned exclusively for the duration of a run, and given identical catalog
/// ordering and input the result is fully deterministic.
#[derive(Debug, Clone, Default)]
pub struct AutoScheduler {
    cancel: Option<Arc<AtomicBool>>,
}

impl AutoScheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a cancellation flag, checked between sections.
    ///
    /// Coarse-grained: no per-section state survives across iterations, so
    /// checking between sections is safe. Cancellation aborts the run with
    /// [`ScheduleError::Cancelled`] and commits nothing.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Runs one scheduling pass for a term.
    ///
    /// # Algorithm
    /// 1. Fetch the catalog, the unscheduled demands, and the committed
    ///    assignments — one fetch each; any failure aborts the run.
    /// 2. Stable-sort demands by descending section capacity. Large
    ///    sections have the fewest feasible rooms and must claim scarce
    ///    large rooms first; ties keep catalog input order.
    /// 3. Per demand, first fit over time slots in catalog order, rooms in
    ///    catalog order within each slot.
    /// 4. Demands with no valid pair are reported unplaceable; a failed
    ///    section never aborts the run.
    /// 5. Persist every placement in one batch. A write failure discards
    ///    the computed placements and surfaces the error — nothing was
    ///    committed.
    pub fn run<S: ScheduleStore + ?Sized>(&self, store: &S, term: TermId) -> Result<RunReport> {
        let catalog = Catalog::load(store)?;
        let mut demands = store.unscheduled_sections(term)?;
        let committed = store.assignments(&AssignmentFilter::default())?;

        info!(
            term,
            sections = demands.len(),
            rooms = catalog.rooms.len(),
            slots = catalog.time_slots.len(),
            existing = committed.len(),
            "starting scheduling run"
        );

        demands.sort_by(|a, b| b.section.capacity.cmp(&a.section.capacity));

        // Conflict universe: committed records plus this run's placements.
        let mut universe = committed;
        let mut batch = Vec::new();
        let mut unplaceable = Vec::new();

        for demand in &demands {
            if self.is_cancelled() {
                warn!(term, "scheduling run cancelled");
                return Err(ScheduleError::Cancelled);
            }

            match self.find_slot(demand, &catalog, &universe) {
                Some((room_id, time_slot_id)) => {
                    debug!(
                        section = demand.section.id,
                        room = room_id,
                        slot = time_slot_id,
                        "section placed"
                    );
                    // In-run placements have no id yet; 0 stands in until
                    // the batch persist allocates real ids.
                    universe.push(Assignment {
                        id: 0,
                        section_id: demand.section.id,
                        course_id: demand.course_id,
                        room_id,
                        time_slot_id,
                        teacher_id: demand.section.teacher_id,
                        term_id: Some(term),
                    });
                    batch.push(NewAssignment {
                        section_id: demand.section.id,
                        course_id: demand.course_id,
                        room_id,
                        time_slot_id,
                        teacher_id: demand.section.teacher_id,
                        term_id: Some(term),
                    });
                }
                None => {
                    warn!(
                        section = demand.section.id,
                        code = %demand.section.code,
                        "no valid room/slot pair found"
                    );
                    unplaceable.push(demand.section.id);
                }
            }
        }

        let placements = store.create_assignments(batch)?;
        let report = RunReport {
            scheduled: placements.len(),
            failed: unplaceable.len(),
            placements,
            unplaceable,
        };
        info!(
            term,
            scheduled = report.scheduled,
            failed = report.failed,
            "scheduling run complete"
        );
        Ok(report)
    }

    /// First (room, slot) pair satisfying capacity and all conflict axes.
    fn find_slot(
        &self,
        demand: &SectionDemand,
        catalog: &Catalog,
        universe: &[Assignment],
    ) -> Option<(RoomId, TimeSlotId)> {
        for slot in &catalog.time_slots {
            for room in &catalog.rooms {
                if !room.fits(demand.section.capacity) {
                    continue;
                }
                let mut draft = AssignmentDraft::new(demand.section.id, room.id, slot.id)
                    .with_course(demand.course_id);
                if let Some(teacher_id) = demand.section.teacher_id {
                    draft = draft.with_teacher(teacher_id);
                }
                if find_conflicts(&draft, universe, catalog).is_empty() {
                    return Some((room.id, slot.id));
                }
            }
        }
        None
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AssignmentPatch, MemoryStore};
    use crate::models::{
        AssignmentId, Course, Room, Section, TimeOfDay, TimeSlot, Weekday,
    };

    fn add_slot(store: &MemoryStore, id: u32, start: &str, end: &str) {
        store.add_time_slot(
            TimeSlot::new(
                id,
                format!("TS{id}"),
                TimeOfDay::parse(start).unwrap(),
                TimeOfDay::parse(end).unwrap(),
                vec![Weekday::Monday, Weekday::Wednesday],
            )
            .unwrap(),
        );
    }

    fn base_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.add_course(Course::new(1, "CS101"));
        store
    }

    /// Two sections (40, 10), one 40-seat room, two free slots: both placed,
    /// the big section first, the small one in the same room's other slot.
    #[test]
    fn test_shared_room_across_slots() {
        let store = base_store();
        store.add_room(Room::new(1, "A102", 40));
        add_slot(&store, 1, "08:00", "09:30");
        add_slot(&store, 2, "09:45", "11:15");
        store.add_section(Section::new(1, "small", 10));
        store.add_section(Section::new(2, "big", 40));
        store.add_demand(1, 1);
        store.add_demand(2, 1);

        let report = AutoScheduler::new().run(&store, 1).unwrap();
        assert_eq!(report.scheduled, 2);
        assert_eq!(report.failed, 0);
        assert!(report.success());

        // Descending capacity: the big section claims the first slot.
        let big = report.placements.iter().find(|a| a.section_id == 2).unwrap();
        let small = report.placements.iter().find(|a| a.section_id == 1).unwrap();
        assert_eq!(big.time_slot_id, 1);
        assert_eq!(small.time_slot_id, 2);
        assert_eq!(big.room_id, small.room_id);
    }

    /// Same, but only one slot exists: the room is taken by the big section
    /// and no room remains for the small one.
    #[test]
    fn test_one_slot_leaves_small_section_unplaceable() {
        let store = base_store();
        store.add_room(Room::new(1, "A102", 40));
        add_slot(&store, 1, "08:00", "09:30");
        store.add_section(Section::new(1, "small", 10));
        store.add_section(Section::new(2, "big", 40));
        store.add_demand(1, 1);
        store.add_demand(2, 1);

        let report = AutoScheduler::new().run(&store, 1).unwrap();
        assert_eq!(report.scheduled, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.placements[0].section_id, 2);
        assert_eq!(report.unplaceable, vec![1]);
    }

    /// Two sections competing for the same (room, slot): exactly one wins,
    /// and at equal capacities the winner is catalog input order.
    #[test]
    fn test_equal_capacity_tie_break_is_catalog_order() {
        let store = base_store();
        store.add_room(Room::new(1, "A102", 30));
        add_slot(&store, 1, "08:00", "09:30");
        store.add_section(Section::new(1, "first", 30));
        store.add_section(Section::new(2, "second", 30));
        store.add_demand(1, 1);
        store.add_demand(2, 1);

        let report = AutoScheduler::new().run(&store, 1).unwrap();
        assert_eq!(report.scheduled, 1);
        assert_eq!(report.placements[0].section_id, 1);
        assert_eq!(report.unplaceable, vec![2]);
    }

    /// Sections sharing a teacher cannot share a slot even in different rooms.
    #[test]
    fn test_teacher_axis_respected_within_run() {
        let store = base_store();
        store.add_room(Room::new(1, "A101", 50));
        store.add_room(Room::new(2, "A102", 50));
        add_slot(&store, 1, "08:00", "09:30");
        store.add_section(Section::new(1, "a", 30).with_teacher(7));
        store.add_section(Section::new(2, "b", 30).with_teacher(7));
        store.add_demand(1, 1);
        store.add_demand(2, 1);

        let report = AutoScheduler::new().run(&store, 1).unwrap();
        assert_eq!(report.scheduled, 1);
        assert_eq!(report.failed, 1);
    }

    /// Teacherless sections may share a slot across different rooms.
    #[test]
    fn test_teacherless_sections_share_slot_in_different_rooms() {
        let store = base_store();
        store.add_room(Room::new(1, "A101", 50));
        store.add_room(Room::new(2, "A102", 50));
        add_slot(&store, 1, "08:00", "09:30");
        store.add_section(Section::new(1, "a", 30));
        store.add_section(Section::new(2, "b", 30));
        store.add_demand(1, 1);
        store.add_demand(2, 1);

        let report = AutoScheduler::new().run(&store, 1).unwrap();
        assert_eq!(report.scheduled, 2);
        let rooms: Vec<_> = report.placements.iter().map(|a| a.room_id).collect();
        assert!(rooms.contains(&1) && rooms.contains(&2));
    }

    /// Committed assignments are part of the conflict universe.
    #[test]
    fn test_committed_assignments_block_placement() {
        let store = base_store();
        store.add_room(Room::new(1, "A102", 40));
        add_slot(&store, 1, "08:00", "09:30");
        add_slot(&store, 2, "09:45", "11:15");
        store.add_section(Section::new(1, "manual", 20));
        store.add_section(Section::new(2, "batch", 20));
        store.add_demand(2, 1);
        store
            .create_assignment(NewAssignment {
                section_id: 1,
                course_id: 1,
                room_id: 1,
                time_slot_id: 1,
                teacher_id: None,
                term_id: None,
            })
            .unwrap();

        let report = AutoScheduler::new().run(&store, 1).unwrap();
        assert_eq!(report.scheduled, 1);
        // Slot 1 is occupied by the manual assignment.
        assert_eq!(report.placements[0].time_slot_id, 2);
    }

    /// A run never commits a placement violating the uniqueness invariants.
    #[test]
    fn test_run_output_holds_invariants() {
        let store = base_store();
        store.add_room(Room::new(1, "A101", 50));
        store.add_room(Room::new(2, "B201", 30));
        add_slot(&store, 1, "08:00", "09:30");
        add_slot(&store, 2, "09:45", "11:15");
        for (id, cap, teacher) in [(1, 45, 7), (2, 30, 7), (3, 25, 8), (4, 20, 8)] {
            store.add_section(Section::new(id, format!("S{id}"), cap).with_teacher(teacher));
            store.add_demand(id, 1);
        }

        let report = AutoScheduler::new().run(&store, 1).unwrap();
        let all = store.assignments(&AssignmentFilter::default()).unwrap();
        assert_eq!(all.len(), report.scheduled);

        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(!(a.room_id == b.room_id && a.time_slot_id == b.time_slot_id));
                assert!(!(a.section_id == b.section_id && a.time_slot_id == b.time_slot_id));
                if let (Some(ta), Some(tb)) = (a.teacher_id, b.teacher_id) {
                    assert!(!(ta == tb && a.time_slot_id == b.time_slot_id));
                }
            }
        }
    }

    /// Determinism: the same input produces the identical report.
    #[test]
    fn test_run_is_deterministic() {
        let build = || {
            let store = base_store();
            store.add_room(Room::new(1, "A101", 50));
            store.add_room(Room::new(2, "B201", 30));
            add_slot(&store, 1, "08:00", "09:30");
            add_slot(&store, 2, "09:45", "11:15");
            for (id, cap) in [(1, 30), (2, 30), (3, 45)] {
                store.add_section(Section::new(id, format!("S{id}"), cap));
                store.add_demand(id, 1);
            }
            AutoScheduler::new().run(&store, 1).unwrap()
        };

        let first = build();
        let second = build();
        let key = |r: &RunReport| -> Vec<(u32, u32, u32)> {
            r.placements
                .iter()
                .map(|a| (a.section_id, a.room_id, a.time_slot_id))
                .collect()
        };
        assert_eq!(key(&first), key(&second));
        assert_eq!(first.unplaceable, second.unplaceable);
    }

    #[test]
    fn test_cancellation_commits_nothing() {
        let store = base_store();
        store.add_room(Room::new(1, "A102", 40));
        add_slot(&store, 1, "08:00", "09:30");
        store.add_section(Section::new(1, "s", 10));
        store.add_demand(1, 1);

        let flag = Arc::new(AtomicBool::new(true));
        let result = AutoScheduler::new().with_cancel_flag(flag).run(&store, 1);
        assert!(matches!(result, Err(ScheduleError::Cancelled)));
        assert!(store.assignments(&AssignmentFilter::default()).unwrap().is_empty());
    }

    #[test]
    fn test_empty_batch_reports_zero() {
        let store = base_store();
        store.add_room(Room::new(1, "A102", 40));
        add_slot(&store, 1, "08:00", "09:30");

        let report = AutoScheduler::new().run(&store, 1).unwrap();
        assert_eq!(report.scheduled, 0);
        assert_eq!(report.failed, 0);
        assert!(report.success());
    }

    /// Store wrapper that fails reads or writes on demand.
    struct FlakyStore {
        inner: MemoryStore,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl ScheduleStore for FlakyStore {
        fn unscheduled_sections(&self, term: TermId) -> Result<Vec<SectionDemand>> {
            if self.fail_reads {
                return Err(ScheduleError::DataUnavailable("sections".into()));
            }
            self.inner.unscheduled_sections(term)
        }
        fn sections(&self) -> Result<Vec<Section>> {
            if self.fail_reads {
                return Err(ScheduleError::DataUnavailable("sections".into()));
            }
            self.inner.sections()
        }
        fn rooms(&self) -> Result<Vec<Room>> {
            if self.fail_reads {
                return Err(ScheduleError::DataUnavailable("rooms".into()));
            }
            self.inner.rooms()
        }
        fn time_slots(&self) -> Result<Vec<TimeSlot>> {
            self.inner.time_slots()
        }
        fn teachers(&self) -> Result<Vec<crate::models::Teacher>> {
            self.inner.teachers()
        }
        fn courses(&self) -> Result<Vec<Course>> {
            self.inner.courses()
        }
        fn assignments(&self, filter: &AssignmentFilter) -> Result<Vec<Assignment>> {
            self.inner.assignments(filter)
        }
        fn create_assignment(&self, new: NewAssignment) -> Result<Assignment> {
            if self.fail_writes {
                return Err(ScheduleError::PersistenceFailure("insert failed".into()));
            }
            self.inner.create_assignment(new)
        }
        fn create_assignments(&self, batch: Vec<NewAssignment>) -> Result<Vec<Assignment>> {
            if self.fail_writes {
                return Err(ScheduleError::PersistenceFailure("batch insert failed".into()));
            }
            self.inner.create_assignments(batch)
        }
        fn update_assignment(&self, id: AssignmentId, patch: AssignmentPatch) -> Result<Assignment> {
            self.inner.update_assignment(id, patch)
        }
        fn delete_assignment(&self, id: AssignmentId) -> Result<()> {
            self.inner.delete_assignment(id)
        }
    }

    #[test]
    fn test_read_failure_aborts_run() {
        let inner = base_store();
        let store = FlakyStore {
            inner,
            fail_reads: true,
            fail_writes: false,
        };
        let result = AutoScheduler::new().run(&store, 1);
        assert!(matches!(result, Err(ScheduleError::DataUnavailable(_))));
    }

    #[test]
    fn test_persist_failure_discards_placements() {
        let inner = base_store();
        inner.add_room(Room::new(1, "A102", 40));
        add_slot(&inner, 1, "08:00", "09:30");
        inner.add_section(Section::new(1, "s", 10));
        inner.add_demand(1, 1);
        let store = FlakyStore {
            inner,
            fail_reads: false,
            fail_writes: true,
        };

        let result = AutoScheduler::new().run(&store, 1);
        assert!(matches!(result, Err(ScheduleError::PersistenceFailure(_))));
        assert!(store
            .inner
            .assignments(&AssignmentFilter::default())
            .unwrap()
            .is_empty());
    }
}
