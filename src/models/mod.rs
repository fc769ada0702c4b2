//! Timetabling domain models.
//!
//! Input data supplied by the caller for one generation run. The generator
//! treats every value here as read-only; it never mutates courses, faculty
//! or rooms.
//!
//! | Model | Meaning |
//! |-------|---------|
//! | [`Course`] | A course with its credit count, session kind and faculty bindings |
//! | [`Faculty`] | A teacher, used for name resolution and workload scoring |
//! | [`Room`] | A venue, optionally a lab |
//! | [`Weekday`] | A day of the working week |

mod course;
mod day;
mod faculty;
mod room;

pub use course::{Course, FacultyBinding, FacultyRef, FacultyRole, SessionRequirement, SessionType};
pub use day::Weekday;
pub use faculty::Faculty;
pub use room::Room;

pub(crate) use room::mentions_lab;
