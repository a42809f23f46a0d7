use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub deck: Option<DeckConfig>,
}

/// Nextcloud server hosting Deck. `password` should be an app password.
#[derive(Debug, Clone, Deserialize)]
pub struct DeckConfig {
    pub url: String,
    pub username: String,
    pub password: String,
}

pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".trello-to-deck")
}

pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Loads the config at `path`, or the default location when `None`.
/// A missing file yields an empty config.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}
