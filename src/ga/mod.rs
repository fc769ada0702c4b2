//! Genetic Algorithm framework.
//!
//! A generic GA loop built on trait-based abstractions. The timetable
//! generator plugs in by implementing [`GaProblem`]; nothing in this module
//! knows about courses or rooms.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution carrying its fitness
//! - [`GaProblem`]: Problem definition: initialization, evaluation and operators
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population, elites, rates, threshold)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best individual and run statistics
//!
//! Fitness is maximized.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use selection::tournament;
pub use types::{GaProblem, Individual};
