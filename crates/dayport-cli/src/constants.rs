//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config, vault, input folder, export file).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// The run finished but some entries failed or were rejected.
    pub const PARTIAL_FAILURE: i32 = 5;
}

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "DAYPORT_CONFIG";

/// Environment variable supplying the vault root.
pub const VAULT_ENV: &str = "DAYPORT_VAULT";

/// Directory name used under the XDG config home.
pub const APP_DIR: &str = "dayport";
