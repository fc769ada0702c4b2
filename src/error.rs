//! Error types.

use thiserror::Error;

use crate::validation::InputError;

/// Errors raised before a generation run starts.
///
/// A run that only finds infeasible timetables is not an error; it returns
/// a result with negative fitness and its violations.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The courses, rooms or slot domain are malformed.
    #[error("invalid input: {}", summarize(.0))]
    InvalidInput(Vec<InputError>),

    /// The GA parameters are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

fn summarize(errors: &[InputError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
