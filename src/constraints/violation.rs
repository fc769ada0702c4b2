use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::HardConstraintId;

/// A hard-constraint violation found in a timetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub constraint_id: HardConstraintId,
    /// Human-readable description.
    pub description: String,
    /// Free-form context (course, day, slot, conflicting parties).
    pub details: BTreeMap<String, String>,
}

impl Violation {
    pub(crate) fn new(constraint_id: HardConstraintId, description: impl Into<String>) -> Self {
        Self {
            constraint_id,
            description: description.into(),
            details: BTreeMap::new(),
        }
    }

    pub(crate) fn with_detail(mut self, key: &str, value: impl ToString) -> Self {
        self.details.insert(key.to_string(), value.to_string());
        self
    }
}
