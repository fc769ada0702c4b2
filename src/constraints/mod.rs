//! Constraint evaluation.
//!
//! Pure functions over an expanded timetable (see
//! [`Chromosome::to_timetable`](crate::chromosome::Chromosome::to_timetable)):
//!
//! - [`validate_hard_constraints`]: feasibility scan returning every
//!   [`Violation`] found, in a stable order.
//! - [`calculate_soft_constraint_score`]: 0–100 quality score with a
//!   per-constraint breakdown, combined by catalog weight.
//!
//! Neither function fails on odd input. Unknown faculty, rooms or days
//! simply show up as violations or lower scores.

mod hard;
mod soft;
mod violation;

pub use hard::{validate_hard_constraints, HardConstraintConfig, HardRules};
pub use soft::{
    calculate_soft_constraint_score, daily_balance, lunch_break, no_long_runs, room_changes,
    score_constraint, single_gaps, weighted_score, workload_balance, SoftScore,
};
pub use violation::Violation;
