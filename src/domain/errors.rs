//! Domain errors for the LPO synchronisation workflows.

use thiserror::Error;

/// Domain-level errors that can occur while talking to the tracker or the
/// spreadsheet service.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Issue not found: {0}")]
    IssueNotFound(String),

    #[error("Transition '{transition}' is not available for issue {key}")]
    TransitionNotFound { key: String, transition: String },

    #[error("Tracker request failed: {0}")]
    TrackerRequest(String),

    #[error("Spreadsheet request failed: {0}")]
    SpreadsheetRequest(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("I/O error: {0}")]
    Io(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err.to_string())
    }
}
