//! Course model.
//!
//! A course declares how much weekly teaching it needs (its credit count
//! or, for labs, one long session) and which faculty teach it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Faculty;

/// Kind of teaching session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SessionType {
    Theory,
    Lab,
    Tutorial,
    Project,
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionType::Theory => "Theory",
            SessionType::Lab => "Lab",
            SessionType::Tutorial => "Tutorial",
            SessionType::Project => "Project",
        };
        f.write_str(s)
    }
}

/// Role of a faculty member on a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FacultyRole {
    Incharge,
    #[default]
    Assisting,
}

/// Reference to a faculty member from a course binding.
///
/// Upstream layers should resolve bindings to `Resolved` before handing
/// courses to the generator; `Unresolved` ids are looked up in the faculty
/// list at generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacultyRef {
    Unresolved(String),
    Resolved { id: String, name: String },
}

impl FacultyRef {
    pub fn id(&self) -> &str {
        match self {
            FacultyRef::Unresolved(id) => id,
            FacultyRef::Resolved { id, .. } => id,
        }
    }
}

/// A faculty member bound to a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyBinding {
    #[serde(rename = "facultyId")]
    pub faculty: FacultyRef,
    #[serde(default)]
    pub role: FacultyRole,
}

impl FacultyBinding {
    /// Binding by bare id.
    pub fn unresolved(id: impl Into<String>, role: FacultyRole) -> Self {
        Self {
            faculty: FacultyRef::Unresolved(id.into()),
            role,
        }
    }

    /// Binding with an already resolved name.
    pub fn resolved(id: impl Into<String>, name: impl Into<String>, role: FacultyRole) -> Self {
        Self {
            faculty: FacultyRef::Resolved {
                id: id.into(),
                name: name.into(),
            },
            role,
        }
    }

    /// Resolves the display name, consulting `faculty` for unresolved ids.
    pub fn resolve_name<'a>(&'a self, faculty: &'a [Faculty]) -> Option<&'a str> {
        match &self.faculty {
            FacultyRef::Resolved { name, .. } => Some(name.as_str()),
            FacultyRef::Unresolved(id) => faculty
                .iter()
                .find(|f| &f.id == id)
                .map(|f| f.name.as_str()),
        }
    }
}

/// One weekly session a course needs scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRequirement {
    pub session_type: SessionType,
    /// Length in consecutive slots.
    pub duration: u8,
}

/// A course to be timetabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    pub course_code: String,
    pub course_name: String,
    /// Weekly credits; drives the number of theory sessions.
    #[serde(default)]
    pub credits: u32,
    /// Session kind. `None` is treated as theory.
    #[serde(default)]
    pub session_type: Option<SessionType>,
    /// Faculty bindings.
    #[serde(default)]
    pub faculty: Vec<FacultyBinding>,
}

impl Course {
    /// Creates a zero-credit theory course with no faculty.
    pub fn new(
        id: impl Into<String>,
        course_code: impl Into<String>,
        course_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            course_code: course_code.into(),
            course_name: course_name.into(),
            credits: 0,
            session_type: None,
            faculty: Vec::new(),
        }
    }

    /// Sets the credit count.
    pub fn with_credits(mut self, credits: u32) -> Self {
        self.credits = credits;
        self
    }

    /// Sets the session type.
    pub fn with_session_type(mut self, session_type: SessionType) -> Self {
        self.session_type = Some(session_type);
        self
    }

    /// Adds a faculty binding.
    pub fn with_faculty(mut self, binding: FacultyBinding) -> Self {
        self.faculty.push(binding);
        self
    }

    /// Whether this is a lab course.
    pub fn is_lab(&self) -> bool {
        self.session_type == Some(SessionType::Lab)
    }

    /// Sessions this course needs each week.
    ///
    /// A lab course yields a single lab session of `lab_span` slots. Any
    /// other course yields `credits` one-slot theory sessions.
    pub fn required_sessions(&self, lab_span: u8) -> Vec<SessionRequirement> {
        if self.is_lab() {
            return vec![SessionRequirement {
                session_type: SessionType::Lab,
                duration: lab_span,
            }];
        }
        (0..self.credits)
            .map(|_| SessionRequirement {
                session_type: SessionType::Theory,
                duration: 1,
            })
            .collect()
    }

    /// The primary binding: the first `Incharge`, else the first binding.
    pub fn primary_faculty(&self) -> Option<&FacultyBinding> {
        self.faculty
            .iter()
            .find(|b| b.role == FacultyRole::Incharge)
            .or_else(|| self.faculty.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theory_sessions_follow_credits() {
        let c = Course::new("c1", "CS101", "Intro").with_credits(3);
        let sessions = c.required_sessions(3);
        assert_eq!(sessions.len(), 3);
        assert!(sessions
            .iter()
            .all(|s| s.session_type == SessionType::Theory && s.duration == 1));
    }

    #[test]
    fn test_lab_is_single_long_session() {
        let c = Course::new("c2", "CS101L", "Intro Lab")
            .with_credits(2)
            .with_session_type(SessionType::Lab);
        let sessions = c.required_sessions(3);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].session_type, SessionType::Lab);
        assert_eq!(sessions[0].duration, 3);
    }

    #[test]
    fn test_tutorial_course_schedules_as_theory() {
        let c = Course::new("c3", "MA201", "Tutorials")
            .with_credits(2)
            .with_session_type(SessionType::Tutorial);
        let sessions = c.required_sessions(3);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].session_type, SessionType::Theory);
    }

    #[test]
    fn test_primary_prefers_incharge() {
        let c = Course::new("c1", "CS101", "Intro")
            .with_faculty(FacultyBinding::unresolved("f1", FacultyRole::Assisting))
            .with_faculty(FacultyBinding::unresolved("f2", FacultyRole::Incharge));
        assert_eq!(c.primary_faculty().map(|b| b.faculty.id()), Some("f2"));
    }

    #[test]
    fn test_primary_falls_back_to_first() {
        let c = Course::new("c1", "CS101", "Intro")
            .with_faculty(FacultyBinding::unresolved("f1", FacultyRole::Assisting))
            .with_faculty(FacultyBinding::unresolved("f2", FacultyRole::Assisting));
        assert_eq!(c.primary_faculty().map(|b| b.faculty.id()), Some("f1"));
        assert!(Course::new("c2", "X", "Y").primary_faculty().is_none());
    }

    #[test]
    fn test_resolve_name() {
        let faculty = vec![Faculty::new("f1", "Dr. Rao")];
        let unresolved = FacultyBinding::unresolved("f1", FacultyRole::Incharge);
        let missing = FacultyBinding::unresolved("f9", FacultyRole::Incharge);
        let resolved = FacultyBinding::resolved("f5", "Dr. Iyer", FacultyRole::Incharge);

        assert_eq!(unresolved.resolve_name(&faculty), Some("Dr. Rao"));
        assert_eq!(missing.resolve_name(&faculty), None);
        assert_eq!(resolved.resolve_name(&faculty), Some("Dr. Iyer"));
    }
}
