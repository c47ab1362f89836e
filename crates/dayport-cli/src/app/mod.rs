//! Application-level utilities for the Dayport CLI.
//!
//! This module provides:
//! - Path resolution for the config file and vault
//! - Lazy config loading through [`AppContext`]
//! - Merging of config settings with command-line overrides

mod context;
mod resolver;
mod settings;

// Re-export public API
pub use context::AppContext;
pub use resolver::resolve_config_path;
pub use settings::merge_settings;
