//! CLI error types for structured error handling.
//!
//! Typed errors map to specific exit codes. Errors coming out of the core
//! library are classified by [`exit_code_for`] so `main` can pick a code
//! without every handler wrapping them.

use std::fmt;

use dayport_core::DayportError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, vault, input folder)
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),

    /// The run completed, but some entries did not make it
    PartialFailure { failed: usize, invalid: usize },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::PartialFailure { failed, invalid } => write!(
                f,
                "{} entries failed and {} entries were invalid",
                failed, invalid
            ),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::PartialFailure { .. } => exit_codes::PARTIAL_FAILURE,
        }
    }
}

/// Pick the process exit code for an error returned by a command handler.
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    if let Some(cli) = error.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    match error.downcast_ref::<DayportError>() {
        Some(DayportError::NotFound(_)) => exit_codes::NOT_FOUND,
        Some(DayportError::InvalidInput(_)) => exit_codes::INVALID_INPUT,
        _ => 1,
    }
}
