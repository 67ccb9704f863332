// File: ./src/config.rs
// Optional TOML config at ~/.config/gridate/config.toml
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rows to load instead of the data-dir default.
    pub data_file: Option<PathBuf>,
    /// Initial theme switch state: on = light, off = dark.
    pub light_switch: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        let proj = ProjectDirs::from("com", "trougnouf", "gridate")
            .context("Could not determine config directory")?;
        let path = proj.config_dir().join("config.toml");
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let cfg = toml::from_str(&raw)
            .with_context(|| format!("Could not parse {}", path.display()))?;
        Ok(cfg)
    }

    /// Missing or unreadable config falls back to defaults (dark theme,
    /// data-dir rows).
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
