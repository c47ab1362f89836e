use std::path::{Path, PathBuf};

use dayport_core::ImportSettings;
use serde::{Deserialize, Serialize};

use crate::constants::APP_DIR;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DayportConfig {
    #[serde(default)]
    pub vault: VaultSection,
    #[serde(default)]
    pub import: ImportSettings,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VaultSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UiSection {
    /// Zone used when displaying dates and as the fallback for
    /// date-based note names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl DayportConfig {
    pub fn new(vault_path: Option<PathBuf>) -> Self {
        Self {
            vault: VaultSection {
                path: vault_path.map(|path| path.to_string_lossy().to_string()),
            },
            import: ImportSettings::default(),
            ui: UiSection::default(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn read_config(path: &Path) -> anyhow::Result<DayportConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &DayportConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join(APP_DIR));
        }
    }
    Ok(home_dir()?.join(".config").join(APP_DIR))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayport_core::TagCase;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [vault]
            path = "/tmp/vault"

            [import]
            in_directory = "exports"
            out_directory = "journal"
            date_based_file_names = true
            enable_internal_links = true
            tag_case = "kebab"

            [ui]
            timezone = "Europe/London"
        "#;
        let config: DayportConfig = toml::from_str(toml).expect("parse config");
        assert_eq!(config.vault.path.as_deref(), Some("/tmp/vault"));
        assert_eq!(config.import.in_directory, "exports");
        assert_eq!(config.import.out_directory, "journal");
        assert!(config.import.date_based_file_names);
        assert!(config.import.enable_internal_links);
        assert_eq!(config.import.tag_case, TagCase::Kebab);
        assert_eq!(config.ui.timezone.as_deref(), Some("Europe/London"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: DayportConfig = toml::from_str("").expect("parse config");
        assert!(config.vault.path.is_none());
        assert_eq!(config.import, ImportSettings::default());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let config = DayportConfig::new(Some(PathBuf::from("/tmp/vault")));

        write_config(&path, &config).expect("write config");
        let loaded = read_config(&path).expect("read config");

        assert_eq!(loaded.vault.path.as_deref(), Some("/tmp/vault"));
        assert_eq!(loaded.import, ImportSettings::default());
    }

    #[test]
    fn test_xdg_config_dir_uses_env() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        std::env::set_var("XDG_CONFIG_HOME", "/tmp/dayport-config-test");

        let config_dir = xdg_config_dir().expect("config dir");

        assert_eq!(
            config_dir,
            PathBuf::from("/tmp/dayport-config-test").join("dayport")
        );
    }
}
