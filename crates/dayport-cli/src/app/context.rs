//! Application context for the Dayport CLI.
//!
//! Provides a unified context that combines CLI arguments with the
//! lazily-loaded config file.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use crate::cli::Cli;
use crate::config::DayportConfig;
use crate::ui::UiContext;

use super::resolver::{load_config, resolve_vault_path};

/// Application context that bundles CLI args with the config file.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<DayportConfig>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the config file contents, loading them lazily if needed.
    pub fn config(&self) -> anyhow::Result<&DayportConfig> {
        self.config.get_or_try_init(load_config)
    }

    /// Resolve the vault root for this run.
    pub fn vault_path(&self) -> anyhow::Result<PathBuf> {
        resolve_vault_path(self.cli, self.config()?)
    }

    /// Build the UI context from the global output flags.
    pub fn ui_context(&self) -> UiContext {
        UiContext::from_env(
            self.cli.json,
            self.cli.format.as_deref(),
            self.cli.no_color,
            self.cli.ascii,
        )
    }
}
