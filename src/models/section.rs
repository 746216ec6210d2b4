//! Section model.
//!
//! A section is a cohort of students for one academic term. Sections are
//! created by administration before scheduling runs; the scheduler only
//! reads them.

use serde::{Deserialize, Serialize};

use super::{SectionId, TeacherId};

/// A student cohort to be scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Unique section identifier.
    pub id: SectionId,
    /// Section code (e.g., "SE-Y1-A").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Owning department identifier.
    pub department_id: u32,
    /// Year level (1-4).
    pub year_level: u8,
    /// Enrollment capacity (positive).
    pub capacity: u32,
    /// Assigned teacher, if any. Sections without a teacher are valid
    /// ("TBD" staffing) and never trigger the teacher conflict axis.
    pub teacher_id: Option<TeacherId>,
    /// Academic advisor, if assigned.
    pub advisor: Option<String>,
}

impl Section {
    /// Creates a new section.
    pub fn new(id: SectionId, code: impl Into<String>, capacity: u32) -> Self {
        Self {
            id,
            code: code.into(),
            name: String::new(),
            department_id: 0,
            year_level: 1,
            capacity,
            teacher_id: None,
            advisor: None,
        }
    }

    /// Sets the section name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the owning department.
    pub fn with_department(mut self, department_id: u32) -> Self {
        self.department_id = department_id;
        self
    }

    /// Sets the year level.
    pub fn with_year_level(mut self, year_level: u8) -> Self {
        self.year_level = year_level;
        self
    }

    /// Assigns a teacher.
    pub fn with_teacher(mut self, teacher_id: TeacherId) -> Self {
        self.teacher_id = Some(teacher_id);
        self
    }

    /// Sets the advisor.
    pub fn with_advisor(mut self, advisor: impl Into<String>) -> Self {
        self.advisor = Some(advisor.into());
        self
    }
}
