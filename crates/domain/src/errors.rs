//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Category label outside the fixed set
    #[error("Unknown category label: {0}")]
    UnknownCategory(String),

    /// Confidence outside [0, 1] or not a finite number
    #[error("Invalid confidence value: {0}")]
    InvalidConfidence(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an invalid-confidence error from the offending value
    pub fn invalid_confidence(value: f64) -> Self {
        Self::InvalidConfidence(value.to_string())
    }
}
