//! Teacher model.

use serde::{Deserialize, Serialize};

use super::TeacherId;

/// A teacher who can be bound to assignments.
///
/// Only the scheduling-relevant subset of a user record: identity and a
/// display name for conflict messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: TeacherId,
    /// Display name (e.g., "prof.smith").
    pub name: String,
}

impl Teacher {
    /// Creates a new teacher.
    pub fn new(id: TeacherId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
