//! Scheduling error taxonomy.

use serde::Serialize;
use thiserror::Error;

use super::store::StoreError;

/// A single field-level validation problem, reported back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    /// The offending input field.
    pub field: &'static str,
    /// Human-readable description of the problem.
    pub message: String,
}

impl FieldError {
    /// Build a field error.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Errors from lifecycle operations.
#[derive(Debug, Error)]
pub enum SchedulingError {
    /// Malformed input; the request is rejected with field detail and
    /// nothing is written.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// The referenced pickup does not exist, does not belong to the caller,
    /// or is no longer `Scheduled`. The three cases are indistinguishable
    /// so existence is not leaked.
    #[error("pickup not found")]
    NotFound,

    /// The storage backend failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
