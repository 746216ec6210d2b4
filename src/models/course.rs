//! Course model.
//!
//! A catalog entry that a section offers in a given slot. Immutable during
//! scheduling; the course code is what conflict messages cite.

use serde::{Deserialize, Serialize};

use super::CourseId;

/// A course catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: CourseId,
    /// Course code (e.g., "CS101").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Credit hours.
    pub credit_hours: u8,
    /// Whether this course requires a lab room.
    pub is_lab: bool,
}

impl Course {
    /// Creates a new course.
    pub fn new(id: CourseId, code: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            name: String::new(),
            credit_hours: 3,
            is_lab: false,
        }
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the credit hours.
    pub fn with_credit_hours(mut self, credit_hours: u8) -> Self {
        self.credit_hours = credit_hours;
        self
    }

    /// Marks this course as a lab course.
    pub fn lab(mut self) -> Self {
        self.is_lab = true;
        self
    }
}
