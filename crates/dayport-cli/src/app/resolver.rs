//! Path resolution for the config file and the vault.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, read_config, DayportConfig};
use crate::constants::CONFIG_ENV;
use crate::errors::CliError;

/// Resolve the config file path, checking DAYPORT_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Load the config file. A missing file yields the defaults.
pub fn load_config() -> anyhow::Result<DayportConfig> {
    let path = resolve_config_path()?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(DayportConfig::default());
    }
    read_config(&path)
}

/// Resolve the vault root from CLI args (or DAYPORT_VAULT) or config.
pub fn resolve_vault_path(cli: &Cli, config: &DayportConfig) -> anyhow::Result<PathBuf> {
    let path = match cli.vault.as_deref().or(config.vault.path.as_deref()) {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => {
            return Err(CliError::not_found(
                "No vault configured",
                "Hint: Pass --vault <DIR>, set DAYPORT_VAULT, or run `dayport config init <DIR>`.",
            )
            .into())
        }
    };

    if !path.is_dir() {
        return Err(CliError::not_found(
            missing_vault_message(&path),
            "Hint: Check the path passed with --vault or recorded in the config file.",
        )
        .into());
    }
    Ok(path)
}

/// Error message when the vault directory is missing.
pub fn missing_vault_message(path: &Path) -> String {
    format!("No vault found at {}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("parse")
    }

    #[test]
    fn test_flag_wins_over_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let flag = dir.path().to_string_lossy().to_string();
        let config = DayportConfig::new(Some(PathBuf::from("/does/not/exist")));

        let path = resolve_vault_path(&cli(&["dayport", "--vault", &flag, "import"]), &config)
            .expect("resolve vault");

        assert_eq!(path, dir.path());
    }

    #[test]
    fn test_missing_vault_directory_is_not_found() {
        let config = DayportConfig::new(Some(PathBuf::from("/does/not/exist/dayport")));
        let err = resolve_vault_path(
            &cli(&["dayport", "--vault", "/does/not/exist/dayport", "import"]),
            &config,
        )
        .unwrap_err();

        let cli_err = err.downcast_ref::<CliError>().expect("cli error");
        assert_eq!(cli_err.exit_code(), 3);
        assert!(err.to_string().contains("No vault found"));
    }
}
