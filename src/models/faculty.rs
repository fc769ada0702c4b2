use serde::{Deserialize, Serialize};

/// A faculty member.
///
/// Only `name` participates in scheduling: it is the key for
/// double-booking detection and workload scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    /// Unique faculty identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Owning department.
    #[serde(default)]
    pub department: String,
}

impl Faculty {
    /// Creates a faculty member with no department.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: String::new(),
        }
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }
}
