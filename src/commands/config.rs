use anyhow::{Context, Result, bail};
use log::info;
use slot_menus::MenuConfig;
use std::path::PathBuf;

/// Print the effective configuration as TOML
pub fn show_command(file: Option<PathBuf>) -> Result<()> {
    let config = match file {
        Some(path) => MenuConfig::load_from(&path)?,
        None => MenuConfig::load()?,
    };

    let content = toml::to_string_pretty(&config).context("Failed to serialize config")?;
    println!("{}", content);
    Ok(())
}

pub fn path_command() -> Result<()> {
    println!("{}", MenuConfig::get_config_path()?.display());
    Ok(())
}

/// Write the default configuration, refusing to clobber an existing file
pub fn init_command(file: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match file {
        Some(path) => path,
        None => MenuConfig::get_config_path()?,
    };

    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    MenuConfig::default().save_to(&path)?;
    info!("Wrote default config to {:?}", path);
    println!("✓ Wrote default configuration to {}", path.display());
    Ok(())
}
