use std::path::{Path, PathBuf};

use crate::app::{resolve_config_path, AppContext};
use crate::config::{write_config, DayportConfig};
use crate::errors::CliError;
use crate::ui::{header, kv, print, receipt, Badge};

/// Write a config file holding the default settings.
pub fn handle_init(ctx: &AppContext, vault: Option<&str>, force: bool) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let config_path = resolve_config_path()?;

    if config_path.exists() && !force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nHint: Pass --force to overwrite it.",
            config_path.display()
        ))
        .into());
    }

    let vault_path = vault.map(absolute_path).transpose()?;
    let config = DayportConfig::new(vault_path);
    write_config(&config_path, &config)?;

    if ui.mode.is_json() {
        let value = serde_json::json!({
            "config_path": config_path.to_string_lossy(),
            "vault": config.vault.path,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else if !ctx.quiet() {
        let mut items = vec![("Path", config_path.to_string_lossy().to_string())];
        if let Some(path) = &config.vault.path {
            items.push(("Vault", path.clone()));
        }
        print(&ui, &receipt(&ui, Badge::Ok, "Config written", &items));
    }
    Ok(())
}

/// Print the resolved configuration.
pub fn handle_show(ctx: &AppContext) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let config_path = resolve_config_path()?;
    let config = ctx.config()?;

    if ui.mode.is_json() {
        let value = serde_json::json!({
            "config_path": config_path.to_string_lossy(),
            "exists": config_path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let source = if config_path.exists() {
        config_path.to_string_lossy().to_string()
    } else {
        format!("{} (not found, using defaults)", config_path.display())
    };
    if !ctx.quiet() {
        print(&ui, &header(&ui, "config", None));
        print(&ui, &kv(&ui, "Path", &source));
    }
    let rendered =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    print!("{}", rendered);
    Ok(())
}

fn absolute_path(path: &str) -> anyhow::Result<PathBuf> {
    let path = Path::new(path);
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}
