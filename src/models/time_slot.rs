//! Time slot model.
//!
//! A recurring weekly period: a start/end time of day plus a non-empty set
//! of weekdays. Conflict detection is keyed on slot *identity*, not on
//! wall-clock overlap — two distinct catalog slots never conflict even if
//! their ranges intersect. [`TimeSlot::overlaps`] exists so a catalog can be
//! audited for ranges that do collide.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::TimeSlotId;

/// A time of day in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeOfDay(pub u16);

/// Day of the week a slot recurs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// A recurring weekly teaching period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Unique time slot identifier.
    pub id: TimeSlotId,
    /// Slot code (e.g., "TS1").
    pub code: String,
    /// Start of the period. Must be strictly before `end`.
    pub start: TimeOfDay,
    /// End of the period (exclusive).
    pub end: TimeOfDay,
    /// Weekdays the period recurs on. Must be non-empty.
    pub days: Vec<Weekday>,
}

impl TimeOfDay {
    /// Parses an `"HH:MM"` string.
    ///
    /// Returns `None` for malformed input or out-of-range components.
    pub fn parse(s: &str) -> Option<Self> {
        let (h, m) = s.split_once(':')?;
        let h: u16 = h.parse().ok()?;
        let m: u16 = m.parse().ok()?;
        if h > 23 || m > 59 {
            return None;
        }
        Some(Self(h * 60 + m))
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl TimeSlot {
    /// Creates a new time slot.
    ///
    /// Returns `None` if `end` is not strictly after `start` or `days` is
    /// empty.
    pub fn new(
        id: TimeSlotId,
        code: impl Into<String>,
        start: TimeOfDay,
        end: TimeOfDay,
        days: Vec<Weekday>,
    ) -> Option<Self> {
        if end <= start || days.is_empty() {
            return None;
        }
        Some(Self {
            id,
            code: code.into(),
            start,
            end,
            days,
        })
    }

    /// Duration of the period in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u16 {
        self.end.0 - self.start.0
    }

    /// Whether this slot recurs on the given weekday.
    pub fn meets_on(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }

    /// Whether two slots' wall-clock ranges intersect on a shared weekday.
    ///
    /// Half-open interval comparison: back-to-back slots do not overlap.
    /// Diagnostic only — conflict detection compares slot identity.
    pub fn overlaps(&self, other: &Self) -> bool {
        let shares_day = self.days.iter().any(|d| other.days.contains(d));
        shares_day && self.start < other.end && other.start < self.end
    }
}
