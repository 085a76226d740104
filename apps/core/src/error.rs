use std::io;
use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
///
/// Matching itself never fails; these errors only surface at the edges:
/// loading configuration, loading the intent catalog and talking to the
/// session supervisor.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents configuration-related errors (e.g., an unparseable environment variable).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents an intent catalog that failed to load or validate.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Represents data validation errors (e.g., invalid input format).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents failures talking to the session supervisor actor.
    #[error("Actor error: {0}")]
    Actor(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Represents a request for a chat session the supervisor does not know.
    #[error("Session not found: {0}")]
    SessionNotFound(String),
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Catalog(s) => AppError::Catalog(s.clone()),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Actor(s) => AppError::Actor(s.clone()),
            AppError::Timeout(s) => AppError::Timeout(s.clone()),
            AppError::SessionNotFound(s) => AppError::SessionNotFound(s.clone()),
        }
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}
