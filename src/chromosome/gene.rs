//! Gene and expanded slot occurrence.

use serde::{Deserialize, Serialize};

use crate::models::{Room, SessionType, Weekday};

/// One scheduled occurrence of a course session.
///
/// Course, faculty and room details are denormalized onto the gene so the
/// evaluator never needs to look them up.
///
/// # Invariant
/// Genes produced by the generator satisfy
/// `slot_number + span_slots - 1 <= max_slot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gene {
    pub course_id: String,
    pub course_code: String,
    pub course_name: String,
    pub faculty_id: Option<String>,
    pub faculty_name: String,
    pub room_id: String,
    /// Full room identifier as shown in timetables.
    pub venue: String,
    /// Whether the assigned room is a lab room.
    #[serde(default)]
    pub lab_room: bool,
    pub day: Weekday,
    /// First slot occupied (1-based).
    pub slot_number: u8,
    /// Number of consecutive slots occupied (>= 1).
    pub span_slots: u8,
    pub session_type: SessionType,
}

impl Gene {
    /// Creates a one-slot gene with no faculty or room.
    pub fn new(
        course_code: impl Into<String>,
        session_type: SessionType,
        day: Weekday,
        slot_number: u8,
    ) -> Self {
        let course_code = course_code.into();
        Self {
            course_id: course_code.clone(),
            course_name: course_code.clone(),
            course_code,
            faculty_id: None,
            faculty_name: String::new(),
            room_id: String::new(),
            venue: String::new(),
            lab_room: false,
            day,
            slot_number,
            span_slots: 1,
            session_type,
        }
    }

    /// Sets the course id and display name.
    pub fn with_course(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.course_id = id.into();
        self.course_name = name.into();
        self
    }

    /// Sets the faculty.
    pub fn with_faculty(mut self, id: Option<String>, name: impl Into<String>) -> Self {
        self.faculty_id = id;
        self.faculty_name = name.into();
        self
    }

    /// Sets the venue by identifier only, deriving the lab flag from it.
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        let venue = venue.into();
        self.room_id = venue.clone();
        self.lab_room = crate::models::mentions_lab(&venue);
        self.venue = venue;
        self
    }

    /// Sets the span length.
    pub fn with_span(mut self, span_slots: u8) -> Self {
        self.span_slots = span_slots;
        self
    }

    /// Moves the gene into `room`.
    pub fn assign_room(&mut self, room: &Room) {
        self.room_id = room.room_id.clone();
        self.venue = room.venue().to_string();
        self.lab_room = room.is_lab();
    }

    /// Last slot occupied.
    pub fn last_slot(&self) -> u8 {
        self.slot_number
            .saturating_add(self.span_slots.saturating_sub(1))
    }
}

/// One slot of an expanded timetable.
///
/// A spanning gene expands into one primary occurrence followed by
/// `span_slots - 1` continuations, each pointing back at the span start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotOccurrence {
    #[serde(flatten)]
    pub gene: Gene,
    #[serde(default)]
    pub is_continuation: bool,
    /// Start slot of the span this continuation belongs to.
    #[serde(default)]
    pub span_start: Option<u8>,
}

impl SlotOccurrence {
    /// A primary (non-continuation) occurrence.
    pub fn primary(gene: Gene) -> Self {
        Self {
            gene,
            is_continuation: false,
            span_start: None,
        }
    }

    /// A continuation of the span starting at `span_start`.
    pub fn continuation(gene: Gene, span_start: u8) -> Self {
        Self {
            gene,
            is_continuation: true,
            span_start: Some(span_start),
        }
    }
}
