//! Room model.

use serde::{Deserialize, Serialize};

/// A room sessions can be held in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Short room identifier (e.g. `"301"`).
    pub room_id: String,
    /// Human-readable full identifier combining building, floor and block.
    #[serde(default)]
    pub full_room_id: Option<String>,
    /// Seating capacity.
    #[serde(default)]
    pub capacity: u32,
    /// Free-form room type (e.g. `"Lab"`, `"Lecture Hall"`).
    #[serde(default)]
    pub room_type: Option<String>,
}

impl Room {
    /// Creates a room identified only by its short id.
    pub fn new(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            full_room_id: None,
            capacity: 0,
            room_type: None,
        }
    }

    /// Sets the full identifier.
    pub fn with_full_id(mut self, full_room_id: impl Into<String>) -> Self {
        self.full_room_id = Some(full_room_id.into());
        self
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the room type.
    pub fn with_type(mut self, room_type: impl Into<String>) -> Self {
        self.room_type = Some(room_type.into());
        self
    }

    /// The identifier written into timetables: the full id when present.
    pub fn venue(&self) -> &str {
        self.full_room_id.as_deref().unwrap_or(&self.room_id)
    }

    /// Whether this is a lab room.
    ///
    /// A room is a lab when its type or any identifier contains `"LAB"`,
    /// compared case-insensitively.
    pub fn is_lab(&self) -> bool {
        std::iter::once(self.room_id.as_str())
            .chain(self.full_room_id.as_deref())
            .chain(self.room_type.as_deref())
            .any(mentions_lab)
    }
}

/// Case-insensitive substring match on `"LAB"`.
pub(crate) fn mentions_lab(text: &str) -> bool {
    text.to_ascii_uppercase().contains("LAB")
}
