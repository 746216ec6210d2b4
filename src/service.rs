//! Interactive scheduling surface.
//!
//! What the HTTP/CRUD layer calls: single-candidate validation, conflict
//! listing, and assignment create/update/delete. Reads are safe for
//! concurrent callers; commits are serialized behind an internal lock so
//! two concurrent creates cannot both pass validation against a stale
//! snapshot and then both land — the exact conflict validation exists to
//! prevent. When the store is a real database, a uniqueness constraint on
//! (room, slot) and (section, slot) is the recommended backstop.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::catalog::{AssignmentFilter, AssignmentPatch, Catalog, NewAssignment, ScheduleStore};
use crate::conflict::find_conflicts;
use crate::error::{Result, ScheduleError};
use crate::models::{Assignment, AssignmentDraft, AssignmentId, TermId};
use crate::scheduler::{AutoScheduler, RunReport};
use crate::validation::{validate_assignment, ValidationOutcome};

/// Result of attempting to commit an assignment.
#[derive(Debug, Clone)]
pub enum CommitResult {
    /// The record was validated and written.
    Committed(Assignment),
    /// Validation rejected the candidate; nothing was written.
    Rejected(ValidationOutcome),
}

impl CommitResult {
    /// The committed assignment, if any.
    pub fn committed(&self) -> Option<&Assignment> {
        match self {
            Self::Committed(a) => Some(a),
            Self::Rejected(_) => None,
        }
    }
}

/// Scheduling operations over a storage collaborator.
#[derive(Debug)]
pub struct ScheduleService<S> {
    store: S,
    commit_lock: Arc<Mutex<()>>,
}

impl<S: ScheduleStore> ScheduleService<S> {
    /// Creates a service over a store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            commit_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Human-readable conflict descriptions for a candidate.
    ///
    /// Conflict axes only — capacity and structural checks belong to
    /// [`validate`](Self::validate).
    pub fn check_conflicts(&self, draft: &AssignmentDraft) -> Result<Vec<String>> {
        let catalog = Catalog::load(&self.store)?;
        let existing = self.store.assignments(&AssignmentFilter::default())?;
        Ok(find_conflicts(draft, &existing, &catalog)
            .into_iter()
            .map(|c| c.message)
            .collect())
    }

    /// Full validation of a candidate: structure, capacity, conflicts.
    ///
    /// Read-only; safe for concurrent callers. The committed set is
    /// re-read on every call.
    pub fn validate(&self, draft: &AssignmentDraft) -> Result<ValidationOutcome> {
        debug!(
            section = draft.section_id,
            room = draft.room_id,
            slot = draft.time_slot_id,
            "validating candidate"
        );
        validate_assignment(&self.store, draft)
    }

    /// Validates and, if clean, commits a new assignment.
    ///
    /// Validate and write happen under the commit lock, so the validated
    /// snapshot is still current when the write lands.
    pub fn create(&self, new: NewAssignment) -> Result<CommitResult> {
        let _guard = self.lock_commits();

        let mut draft = AssignmentDraft::new(new.section_id, new.room_id, new.time_slot_id)
            .with_course(new.course_id);
        if let Some(teacher_id) = new.teacher_id {
            draft = draft.with_teacher(teacher_id);
        }

        let outcome = validate_assignment(&self.store, &draft)?;
        if !outcome.valid {
            debug!(section = new.section_id, "create rejected: {}", outcome.message());
            return Ok(CommitResult::Rejected(outcome));
        }

        let created = self.store.create_assignment(new)?;
        info!(id = created.id, section = created.section_id, "assignment created");
        Ok(CommitResult::Committed(created))
    }

    /// Re-validates and applies a partial update to an assignment.
    ///
    /// The record under update is excluded from conflict checks by its own
    /// id, so unchanged fields never conflict with themselves. Fails with
    /// [`ScheduleError::NotFound`] if the assignment does not exist.
    pub fn update(&self, id: AssignmentId, patch: AssignmentPatch) -> Result<CommitResult> {
        let _guard = self.lock_commits();

        let current = self
            .store
            .assignment(id)?
            .ok_or_else(|| ScheduleError::not_found("Assignment", id))?;

        let mut draft = AssignmentDraft::new(
            patch.section_id.unwrap_or(current.section_id),
            patch.room_id.unwrap_or(current.room_id),
            patch.time_slot_id.unwrap_or(current.time_slot_id),
        )
        .excluding(id)
        .with_course(patch.course_id.unwrap_or(current.course_id));
        if let Some(teacher_id) = patch.teacher_id.or(current.teacher_id) {
            draft = draft.with_teacher(teacher_id);
        }

        let outcome = validate_assignment(&self.store, &draft)?;
        if !outcome.valid {
            debug!(id, "update rejected: {}", outcome.message());
            return Ok(CommitResult::Rejected(outcome));
        }

        let updated = self.store.update_assignment(id, patch)?;
        info!(id, "assignment updated");
        Ok(CommitResult::Committed(updated))
    }

    /// Deletes an assignment.
    ///
    /// Fails with [`ScheduleError::NotFound`] if absent. A deleted record
    /// leaves no residual conflict state: re-creating identical fields
    /// succeeds.
    pub fn delete(&self, id: AssignmentId) -> Result<()> {
        let _guard = self.lock_commits();
        self.store.delete_assignment(id)?;
        info!(id, "assignment deleted");
        Ok(())
    }

    /// Runs the batch auto-scheduler for a term.
    ///
    /// Holds the commit lock for the whole run: the batch validates against
    /// a snapshot it alone can extend.
    pub fn auto_schedule(&self, term: TermId) -> Result<RunReport> {
        let _guard = self.lock_commits();
        AutoScheduler::new().run(&self.store, term)
    }

    fn lock_commits(&self) -> std::sync::MutexGuard<'_, ()> {
        // The guarded value is (), so a poisoned lock carries no bad state.
        self.commit_lock.lock().unwrap_or_else(|p| p.into_inner())
    }
}
