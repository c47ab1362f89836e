//! Error types for dayport core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.

use thiserror::Error;

/// Result type alias for dayport operations.
pub type Result<T> = std::result::Result<T, DayportError>;

/// Core error type for dayport operations.
#[derive(Debug, Error)]
pub enum DayportError {
    /// Source export has the wrong top-level shape
    #[error("Schema error: {0}")]
    Schema(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Destination already holds a file with this name
    #[error("File already exists: {0}")]
    AlreadyExists(String),

    /// Invalid user input or settings
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error (fallback)
    #[error("{0}")]
    Other(String),
}

impl DayportError {
    /// Whether this error means the destination name is already taken.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, DayportError::AlreadyExists(_))
    }
}

impl From<std::io::Error> for DayportError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::AlreadyExists => DayportError::AlreadyExists(err.to_string()),
            std::io::ErrorKind::NotFound => DayportError::NotFound(err.to_string()),
            _ => DayportError::Storage(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for DayportError {
    fn from(err: serde_json::Error) -> Self {
        DayportError::Validation(err.to_string())
    }
}

impl From<serde_yaml::Error> for DayportError {
    fn from(err: serde_yaml::Error) -> Self {
        DayportError::Validation(format!("front matter: {}", err))
    }
}
