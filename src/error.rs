//! Error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors produced while loading or indexing coverage input.
///
/// The selection loop itself has no failure modes: partial coverage is
/// reported through [`Verification`](crate::selection::Verification),
/// not as an error.
#[derive(Error, Debug)]
pub enum CoverageError {
    /// One or more malformed entries were rejected at construction.
    #[error("invalid input ({} problem(s)): {}", .0.len(), summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// The data source failed to produce input.
    #[error("attendance source failed: {message}")]
    Source { message: String },

    /// A JSON snapshot could not be parsed.
    #[error("snapshot parse failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type CoverageResult<T> = Result<T, CoverageError>;

impl From<Vec<ValidationError>> for CoverageError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors.first() {
        Some(first) if errors.len() > 1 => format!("{first}; ..."),
        Some(first) => first.to_string(),
        None => String::new(),
    }
}
