//! Room model.
//!
//! A physical space with a fixed capacity. Many sections may use the same
//! room across different time slots, but never the same slot — that is the
//! room conflict axis.

use serde::{Deserialize, Serialize};

use super::RoomId;

/// A physical room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: RoomId,
    /// Room name (e.g., "B201").
    pub name: String,
    /// Building name.
    pub building: String,
    /// Floor number.
    pub floor: i8,
    /// Seat capacity (positive).
    pub capacity: u32,
    /// Room classification.
    pub kind: RoomKind,
    /// Whether the room has a projector.
    pub has_projector: bool,
    /// Whether the room has student computers.
    pub has_computers: bool,
}

/// Room classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    /// Standard lecture room.
    Lecture,
    /// Computer or science lab.
    Lab,
    /// Large-capacity auditorium.
    Auditorium,
}

impl Room {
    /// Creates a new lecture room.
    pub fn new(id: RoomId, name: impl Into<String>, capacity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            building: String::new(),
            floor: 0,
            capacity,
            kind: RoomKind::Lecture,
            has_projector: false,
            has_computers: false,
        }
    }

    /// Sets the building.
    pub fn with_building(mut self, building: impl Into<String>) -> Self {
        self.building = building.into();
        self
    }

    /// Sets the floor.
    pub fn with_floor(mut self, floor: i8) -> Self {
        self.floor = floor;
        self
    }

    /// Sets the room kind.
    pub fn with_kind(mut self, kind: RoomKind) -> Self {
        self.kind = kind;
        self
    }

    /// Marks the room as having a projector.
    pub fn with_projector(mut self) -> Self {
        self.has_projector = true;
        self
    }

    /// Marks the room as having student computers.
    pub fn with_computers(mut self) -> Self {
        self.has_computers = true;
        self
    }

    /// Whether a section of the given size fits this room.
    #[inline]
    pub fn fits(&self, section_capacity: u32) -> bool {
        section_capacity <= self.capacity
    }
}
