//! Output formatting helpers for the CLI.

mod json;

// Re-export public API
pub use json::run_json;
