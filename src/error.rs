//! Error types for timetabling operations.
//!
//! Scheduling *conflicts* are deliberately absent from this taxonomy:
//! a conflict is an expected, common outcome that callers must handle
//! gracefully, so it is always a normal result value
//! ([`ValidationOutcome`](crate::validation::ValidationOutcome),
//! [`ConflictReason`](crate::conflict::ConflictReason)) — never an error.

use thiserror::Error;

/// Main error type for timetabling operations.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// A referenced entity does not exist. Surfaced directly, not retried.
    #[error("{entity} with ID {id} not found")]
    NotFound {
        /// Entity kind ("Section", "Room", "TimeSlot", "Course", "Assignment").
        entity: &'static str,
        /// The identifier that failed to resolve.
        id: u32,
    },

    /// A catalog read failed. The batch scheduler aborts the whole run;
    /// interactive callers may retry.
    #[error("Catalog data unavailable: {0}")]
    DataUnavailable(String),

    /// The final batch write failed. Nothing was durably committed.
    #[error("Failed to persist schedule: {0}")]
    PersistenceFailure(String),

    /// A scheduling run was cancelled between sections.
    #[error("Scheduling run was cancelled")]
    Cancelled,
}

impl ScheduleError {
    /// Shorthand for a [`ScheduleError::NotFound`].
    pub fn not_found(entity: &'static str, id: u32) -> Self {
        Self::NotFound { entity, id }
    }
}

/// Result type alias for timetabling operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let e = ScheduleError::not_found("Section", 42);
        assert_eq!(e.to_string(), "Section with ID 42 not found");
    }

    #[test]
    fn test_data_unavailable_message() {
        let e = ScheduleError::DataUnavailable("rooms query timed out".into());
        assert!(e.to_string().contains("rooms query timed out"));
    }
}
