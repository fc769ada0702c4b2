//! Timetable generation.
//!
//! [`TimetableGenerator`] validates the input, runs the GA over
//! [`TimetableProblem`] and packages the best chromosome as a
//! [`GenerationResult`].
//!
//! # Example
//!
//! ```
//! use u_timetable::generator::{TimetableConfig, TimetableGenerator};
//! use u_timetable::ga::GaConfig;
//! use u_timetable::models::{Course, Faculty, FacultyBinding, FacultyRole, Room};
//!
//! let courses = vec![Course::new("c1", "CS101", "Programming")
//!     .with_credits(3)
//!     .with_faculty(FacultyBinding::unresolved("f1", FacultyRole::Incharge))];
//! let faculty = vec![Faculty::new("f1", "Dr. Rao")];
//! let rooms = vec![Room::new("101")];
//!
//! let config = TimetableConfig::new(GaConfig::default().with_seed(42));
//! let result = TimetableGenerator::new(config)
//!     .generate(&courses, &faculty, &rooms)
//!     .unwrap();
//!
//! assert_eq!(result.best_timetable.timetable_slots.len(), 3);
//! ```

mod operators;
mod problem;

pub use operators::{mutate, random_slot, single_point_crossover, SlotPicker};
pub use problem::{
    Assessment, PlannedSession, TimetableProblem, HARD_VIOLATION_PENALTY, UNKNOWN_FACULTY,
};

use log::{info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::catalog::ConstraintCatalog;
use crate::chromosome::SlotOccurrence;
use crate::constraints::{HardConstraintConfig, SoftScore, Violation};
use crate::error::GenerateError;
use crate::ga::{GaConfig, GaRunner};
use crate::models::{Course, Faculty, Room};

/// Run configuration: GA parameters plus hard-constraint overrides.
///
/// GA fields sit at the top level of the serialized form next to
/// `constraints`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimetableConfig {
    #[serde(flatten)]
    pub ga: GaConfig,
    pub constraints: HardConstraintConfig,
}

impl TimetableConfig {
    pub fn new(ga: GaConfig) -> Self {
        Self {
            ga,
            constraints: HardConstraintConfig::default(),
        }
    }

    /// Sets the hard-constraint overrides.
    pub fn with_constraints(mut self, constraints: HardConstraintConfig) -> Self {
        self.constraints = constraints;
        self
    }
}

/// The best timetable of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    /// Expanded occurrences, each gene followed by its continuations.
    pub timetable_slots: Vec<SlotOccurrence>,
    pub hard_violations: Vec<Violation>,
    /// Soft breakdown, present only for a feasible timetable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soft_score: Option<SoftScore>,
}

/// Outcome of [`TimetableGenerator::generate`].
///
/// A timetable that still has hard violations is a normal result with
/// negative fitness; callers branch on `fitness < 0` or on
/// `best_timetable.hard_violations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub best_timetable: Timetable,
    pub fitness: f64,
    /// The configured generation budget, even after an early stop.
    pub generations: usize,
    pub generations_evaluated: usize,
    /// Whether the fitness threshold was exceeded.
    pub converged: bool,
    /// Best fitness so far after each evaluated generation.
    pub fitness_history: Vec<f64>,
}

impl GenerationResult {
    /// Whether the best timetable has no hard violations.
    pub fn is_feasible(&self) -> bool {
        self.best_timetable.hard_violations.is_empty()
    }
}

/// Generates section timetables with a genetic algorithm.
#[derive(Debug, Clone, Default)]
pub struct TimetableGenerator {
    config: TimetableConfig,
    catalog: ConstraintCatalog,
}

impl TimetableGenerator {
    /// Creates a generator using the default constraint catalog.
    pub fn new(config: TimetableConfig) -> Self {
        Self {
            config,
            catalog: ConstraintCatalog::default(),
        }
    }

    /// Replaces the constraint catalog (weights and slot domain).
    pub fn with_catalog(mut self, catalog: ConstraintCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(&self) -> &TimetableConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ConstraintCatalog {
        &self.catalog
    }

    /// Runs one generation to completion.
    ///
    /// # Errors
    /// [`GenerateError::InvalidConfig`] for out-of-range GA parameters and
    /// [`GenerateError::InvalidInput`] for malformed courses, rooms or slot
    /// domain. Both are raised before the first generation.
    pub fn generate(
        &self,
        courses: &[Course],
        faculty: &[Faculty],
        rooms: &[Room],
    ) -> Result<GenerationResult, GenerateError> {
        self.config
            .ga
            .validate()
            .map_err(GenerateError::InvalidConfig)?;

        let problem = TimetableProblem::new(
            courses,
            faculty,
            rooms,
            &self.catalog,
            self.config.constraints.clone(),
        )?;

        info!(
            "generating timetable: {} course(s), {} session(s), {} room(s), \
             population {}, budget {}",
            courses.len(),
            problem.plan().len(),
            rooms.len(),
            self.config.ga.population_size,
            self.config.ga.max_generations
        );

        let run = GaRunner::run(&problem, &self.config.ga);
        let assessment = problem.assess(&run.best);

        if assessment.violations.is_empty() {
            info!("feasible timetable found, fitness {:.1}", assessment.fitness);
        } else {
            warn!(
                "timetable generation completed with {} hard violation(s)",
                assessment.violations.len()
            );
            for violation in &assessment.violations {
                trace!("{}: {}", violation.constraint_id.as_str(), violation.description);
            }
        }

        Ok(GenerationResult {
            best_timetable: Timetable {
                timetable_slots: assessment.slots,
                hard_violations: assessment.violations,
                soft_score: assessment.soft,
            },
            fitness: assessment.fitness,
            generations: run.generations,
            generations_evaluated: run.generations_evaluated,
            converged: run.converged,
            fitness_history: run.fitness_history,
        })
    }
}

/// Everything one generation call needs, in the caller-facing shape.
///
/// `courses`, `faculty` and `rooms` must be present; an explicitly empty
/// list is fine, a missing one is a deserialization error. Only `config`
/// falls back to its defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub courses: Vec<Course>,
    pub faculty: Vec<Faculty>,
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub config: TimetableConfig,
}

/// Generates a timetable for `request` with the default catalog.
pub fn generate_timetable(request: &GenerationRequest) -> Result<GenerationResult, GenerateError> {
    TimetableGenerator::new(request.config.clone()).generate(
        &request.courses,
        &request.faculty,
        &request.rooms,
    )
}
