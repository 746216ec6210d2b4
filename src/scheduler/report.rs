//! Scheduling run summary.

use serde::{Deserialize, Serialize};

use crate::models::{Assignment, SectionId};

/// Outcome of one auto-scheduling run.
///
/// Every section in the batch ends either in `placements` (Scheduled) or in
/// `unplaceable` (no valid room/slot pair existed). A report only exists
/// once the batch was durably persisted; a failed persist surfaces as an
/// error instead, since nothing was committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// Number of sections placed and persisted.
    pub scheduled: usize,
    /// Number of sections left unplaced.
    pub failed: usize,
    /// The persisted assignments, with their new ids.
    pub placements: Vec<Assignment>,
    /// Sections no valid (room, slot) pair could be found for, in the order
    /// they were attempted. For operator follow-up.
    pub unplaceable: Vec<SectionId>,
}

impl RunReport {
    /// Whether every section in the batch was placed.
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}
