//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Inference/AI error
    #[error("Inference error: {0}")]
    Inference(String),

    /// The engine returned no completion at all
    #[error("Inference returned no completion")]
    EmptyResponse,

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// A screening request is already in flight
    #[error("A screening request is already in flight")]
    Busy,

    /// Request input failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_message() {
        let err = ApplicationError::Busy;
        assert_eq!(err.to_string(), "A screening request is already in flight");
    }

    #[test]
    fn empty_response_message() {
        let err = ApplicationError::EmptyResponse;
        assert_eq!(err.to_string(), "Inference returned no completion");
    }

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::UnknownCategory("x".to_string()).into();
        assert_eq!(err.to_string(), "Unknown category label: x");
    }

    #[test]
    fn invalid_input_message() {
        let err = ApplicationError::InvalidInput("text is empty".to_string());
        assert_eq!(err.to_string(), "Invalid input: text is empty");
    }
}
