//! Input validation for timetable generation.
//!
//! Checks structural integrity of courses, rooms and the slot domain before
//! the GA starts. Detects:
//! - Duplicate course IDs
//! - Courses with no code or no required sessions
//! - Faculty bindings without an id
//! - Missing rooms when sessions must be placed
//! - A slot domain that cannot host the required sessions
//!
//! Every issue is collected so the caller sees them all at once.

use std::collections::HashSet;
use std::fmt;

use crate::catalog::TimetableDomain;
use crate::models::{Course, Room};

/// Validation result.
pub type ValidationResult = Result<(), Vec<InputError>>;

/// An input error.
#[derive(Debug, Clone, PartialEq)]
pub struct InputError {
    /// Error category.
    pub kind: InputErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of input errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputErrorKind {
    /// Two courses share the same ID.
    DuplicateId,
    /// A course has an empty course code.
    MissingCourseCode,
    /// A course requires no sessions (zero credits, not a lab).
    NoSessions,
    /// A faculty binding has an empty faculty id.
    MalformedFacultyBinding,
    /// Sessions must be placed but no rooms were supplied.
    NoRooms,
    /// The slot domain is unusable (no days, no slots, bad lunch slot).
    InvalidDomain,
    /// A session is longer than a day.
    SessionTooLong,
}

impl InputError {
    pub(crate) fn new(kind: InputErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates the input data for a generation run.
///
/// Checks:
/// 1. The domain has working days, at least one slot, and a lunch slot
///    inside the day
/// 2. No duplicate course IDs
/// 3. Every course has a code and at least one required session
/// 4. Every faculty binding carries an id
/// 5. No session is longer than `max_slot`
/// 6. At least one room exists if any session is required
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    courses: &[Course],
    rooms: &[Room],
    domain: &TimetableDomain,
) -> ValidationResult {
    let mut errors = Vec::new();

    if domain.working_days.is_empty() {
        errors.push(InputError::new(
            InputErrorKind::InvalidDomain,
            "No working days configured",
        ));
    }
    if domain.max_slot == 0 {
        errors.push(InputError::new(
            InputErrorKind::InvalidDomain,
            "Slot domain has no slots",
        ));
    } else if !domain.contains_slot(domain.lunch_slot) {
        errors.push(InputError::new(
            InputErrorKind::InvalidDomain,
            format!(
                "Lunch slot {} is outside 1..={}",
                domain.lunch_slot, domain.max_slot
            ),
        ));
    }

    let mut course_ids = HashSet::new();
    let mut total_sessions = 0usize;

    for course in courses {
        if !course_ids.insert(course.id.as_str()) {
            errors.push(InputError::new(
                InputErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", course.id),
            ));
        }

        if course.course_code.trim().is_empty() {
            errors.push(InputError::new(
                InputErrorKind::MissingCourseCode,
                format!("Course '{}' has no course code", course.id),
            ));
        }

        let sessions = course.required_sessions(domain.lab_span);
        if sessions.is_empty() {
            errors.push(InputError::new(
                InputErrorKind::NoSessions,
                format!("Course '{}' requires no sessions", course.id),
            ));
        }
        for session in &sessions {
            if domain.last_start_slot(session.duration).is_none() {
                errors.push(InputError::new(
                    InputErrorKind::SessionTooLong,
                    format!(
                        "Course '{}' has a {}-slot {} session but a day has {} slots",
                        course.id, session.duration, session.session_type, domain.max_slot
                    ),
                ));
                break;
            }
        }
        total_sessions += sessions.len();

        for binding in &course.faculty {
            if binding.faculty.id().trim().is_empty() {
                errors.push(InputError::new(
                    InputErrorKind::MalformedFacultyBinding,
                    format!("Course '{}' has a faculty binding without an id", course.id),
                ));
            }
        }
    }

    if total_sessions > 0 && rooms.is_empty() {
        errors.push(InputError::new(
            InputErrorKind::NoRooms,
            format!("{total_sessions} session(s) required but no rooms supplied"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
