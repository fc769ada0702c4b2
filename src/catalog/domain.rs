//! Slot domain.

use serde::{Deserialize, Serialize};

use crate::models::Weekday;

/// The grid sessions are placed on: working days times numbered slots.
///
/// Slots are numbered `1..=max_slot`. Mapping slot numbers to wall-clock
/// times is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableDomain {
    pub working_days: Vec<Weekday>,
    /// Highest valid slot number in a day.
    pub max_slot: u8,
    /// Slot reserved for lunch.
    pub lunch_slot: u8,
    /// Length of a lab session in slots.
    pub lab_span: u8,
}

impl Default for TimetableDomain {
    /// Monday to Friday, eight slots a day, lunch in slot 5, three-slot labs.
    fn default() -> Self {
        Self {
            working_days: Weekday::WORK_WEEK.to_vec(),
            max_slot: 8,
            lunch_slot: 5,
            lab_span: 3,
        }
    }
}

impl TimetableDomain {
    /// Sets the working days.
    pub fn with_working_days(mut self, days: Vec<Weekday>) -> Self {
        self.working_days = days;
        self
    }

    /// Sets the number of slots per day.
    pub fn with_max_slot(mut self, max_slot: u8) -> Self {
        self.max_slot = max_slot;
        self
    }

    /// Sets the lunch slot.
    pub fn with_lunch_slot(mut self, lunch_slot: u8) -> Self {
        self.lunch_slot = lunch_slot;
        self
    }

    /// Sets the lab session length.
    pub fn with_lab_span(mut self, lab_span: u8) -> Self {
        self.lab_span = lab_span;
        self
    }

    /// Highest start slot for a session of `duration` slots, or `None` if
    /// the session cannot fit in a day.
    pub fn last_start_slot(&self, duration: u8) -> Option<u8> {
        if duration == 0 || duration > self.max_slot {
            return None;
        }
        Some(self.max_slot - duration + 1)
    }

    /// Whether `slot` lies within `1..=max_slot`.
    pub fn contains_slot(&self, slot: u8) -> bool {
        (1..=self.max_slot).contains(&slot)
    }
}
