//! Genetic-algorithm timetable generation for one academic section.
//!
//! Places a section's weekly class sessions onto (day, slot, room) triples
//! while satisfying hard constraints and optimizing soft preferences:
//!
//! - **Models**: courses, faculty bindings, rooms and weekdays, with the
//!   camelCase serde shape callers exchange.
//! - **Catalog**: hard/soft constraint metadata, soft weights and the slot
//!   domain (working days, slots per day, lunch slot, lab span).
//! - **Chromosome**: a candidate timetable as a list of genes, expanded
//!   into per-slot occurrences for evaluation.
//! - **Constraints**: hard-violation scan and weighted soft scoring.
//! - **GA**: a generic maximizing genetic algorithm with tournament
//!   selection, elitism and threshold-based early stopping.
//! - **Generator**: the timetable problem plugged into the GA, plus the
//!   [`TimetableGenerator`](generator::TimetableGenerator) entry point.
//!
//! # Fitness
//!
//! A timetable with `n > 0` hard violations scores `-100 × n`; a feasible
//! one scores its weighted soft total in `[0, 100]`. Infeasibility is
//! reported as data, never as an error.
//!
//! # Architecture
//!
//! The crate is a pure, synchronous library. It performs no I/O and never
//! mutates the caller's courses, faculty or rooms; each run owns its own
//! population.

pub mod catalog;
pub mod chromosome;
pub mod constraints;
pub mod error;
pub mod ga;
pub mod generator;
pub mod models;
pub mod validation;

pub use error::GenerateError;
pub use generator::{
    generate_timetable, GenerationRequest, GenerationResult, Timetable, TimetableConfig,
    TimetableGenerator,
};
