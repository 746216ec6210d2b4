//! Assignment validation.
//!
//! Composes capacity rules with the conflict detector to produce an
//! accept/reject decision carrying human-readable reasons. All checks after
//! the structural one are reported together, so a caller sees the full
//! picture in one call — capacity problems do not hide time conflicts.
//!
//! Validation is read-only and idempotent: with an unchanged committed set,
//! the same candidate yields the same outcome. The committed set is re-read
//! at call time, never cached across calls.

use serde::{Deserialize, Serialize};

use crate::catalog::{AssignmentFilter, Catalog, ScheduleStore};
use crate::conflict::find_conflicts;
use crate::error::Result;
use crate::models::AssignmentDraft;

/// Outcome of validating a candidate assignment.
///
/// `valid` is true iff `reasons` is empty. A rejection always carries at
/// least one reason; an empty reason list with `valid == false` is a defect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Whether the candidate may be committed.
    pub valid: bool,
    /// Why not, when `valid` is false.
    pub reasons: Vec<String>,
}

impl ValidationOutcome {
    fn accepted() -> Self {
        Self {
            valid: true,
            reasons: Vec::new(),
        }
    }

    fn rejected(reasons: Vec<String>) -> Self {
        debug_assert!(!reasons.is_empty());
        Self {
            valid: false,
            reasons,
        }
    }

    /// Single-line summary for display.
    pub fn message(&self) -> String {
        if self.valid {
            "No conflicts detected".to_string()
        } else {
            self.reasons.join("; ")
        }
    }
}

/// Validates a candidate against the committed assignment set.
///
/// Steps, in order:
/// 1. Resolve section and room; if either is missing, reject with
///    "Section or room not found" (structural, short-circuits).
/// 2. Capacity: section capacity must fit the room. Reported but does not
///    short-circuit.
/// 3. Conflict axes against the committed set, honoring `draft.exclude`.
pub fn validate_assignment<S: ScheduleStore + ?Sized>(
    store: &S,
    draft: &AssignmentDraft,
) -> Result<ValidationOutcome> {
    let catalog = Catalog::load(store)?;

    let (section, room) = match (catalog.section(draft.section_id), catalog.room(draft.room_id)) {
        (Some(s), Some(r)) => (s, r),
        _ => return Ok(ValidationOutcome::rejected(vec![
            "Section or room not found".to_string(),
        ])),
    };

    let mut reasons = Vec::new();
    if section.capacity > room.capacity {
        reasons.push(format!(
            "Capacity conflict: Section has {} students but room {} only fits {}",
            section.capacity, room.name, room.capacity
        ));
    }

    let existing = store.assignments(&AssignmentFilter::default())?;
    reasons.extend(
        find_conflicts(draft, &existing, &catalog)
            .into_iter()
            .map(|c| c.message),
    );

    if reasons.is_empty() {
        Ok(ValidationOutcome::accepted())
    } else {
        Ok(ValidationOutcome::rejected(reasons))
    }
}
