use crate::item::{Item, ItemBuilder};
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Appearance of a control item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStyle {
    pub material: String,
    pub name: String,
    #[serde(default)]
    pub lore: Vec<String>,
    #[serde(default = "default_enchanted")]
    pub enchanted: bool,
}

fn default_enchanted() -> bool {
    true
}

impl ItemStyle {
    pub fn new(material: &str, name: &str) -> Self {
        Self {
            material: material.to_string(),
            name: name.to_string(),
            lore: Vec::new(),
            enchanted: true,
        }
    }

    pub fn build(&self) -> Item {
        self.build_named(&self.name)
    }

    /// Build with a different (already formatted) display name
    pub fn build_named(&self, name: &str) -> Item {
        ItemBuilder::new(self.material.as_str())
            .display_name(name)
            .lore(&self.lore)
            .enchanted(self.enchanted)
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    pub back: ItemStyle,
    pub previous_page: ItemStyle,
    pub next_page: ItemStyle,
    /// `{page}` is replaced with the current page number
    pub page_info: ItemStyle,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            back: ItemStyle::new("MAGENTA_GLAZED_TERRACOTTA", "&bGo Back"),
            previous_page: ItemStyle::new("RED_CONCRETE", "&bPrevious Page"),
            next_page: ItemStyle::new("GREEN_CONCRETE", "&bNext Page"),
            page_info: ItemStyle::new("PAPER", "&aPage Number:&e {page}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleStyle {
    pub on_material: String,
    pub off_material: String,
    /// Appended to the toggle name when on
    pub on_suffix: String,
    pub off_suffix: String,
}

impl Default for ToggleStyle {
    fn default() -> Self {
        Self {
            on_material: "EMERALD".to_string(),
            off_material: "REDSTONE".to_string(),
            on_suffix: "&7: &a&lON".to_string(),
            off_suffix: "&7: &c&lOFF".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    pub title: String,
    pub confirm: ItemStyle,
    pub deny: ItemStyle,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            title: "&2Verify".to_string(),
            confirm: ItemStyle::new("LIME_CONCRETE", "&a&lConfirm"),
            deny: ItemStyle::new("RED_CONCRETE", "&c&lDeny"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Upper bound on rows of a paginated menu, controls included
    pub max_rows: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { max_rows: 6 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub missing_page: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            missing_page: "&cThis page does not exist.".to_string(),
        }
    }
}

/// Appearance and wording shared by every menu of a registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub controls: Controls,
    pub toggles: ToggleStyle,
    pub confirmation: ConfirmationConfig,
    pub pagination: PaginationConfig,
    pub messages: Messages,
}

impl MenuConfig {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("slot-menus")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".slot-menus")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file doesn't exist, using default config");
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", path);

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: MenuConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
                info!("Created config directory: {:?}", parent);
            }
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        debug!("Saved config to: {:?}", path);
        Ok(())
    }
}
