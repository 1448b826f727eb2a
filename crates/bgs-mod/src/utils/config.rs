//! Application configuration stored in `config.toml` next to the executable.

use bgs_game::GameType;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;

/// Application-wide configuration stored in config.toml.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Path to the BSArch executable.
    pub archiver_path: Option<Utf8PathBuf>,
    /// Program used to run the archiver, e.g. `wine`.
    pub archiver_launcher: Option<String>,
    /// Directory holding `<game id>.esp` / `template.esp` plugin templates.
    pub esp_template_dir: Option<Utf8PathBuf>,
    pub default_game: Option<GameType>,
    pub max_chunk_size_gb: Option<f64>,
    pub thread_count: Option<usize>,
}

/// Returns the directory where the current executable resides.
pub fn install_dir() -> Option<Utf8PathBuf> {
    let exe = env::current_exe().ok()?;
    let parent = exe.parent()?;
    Utf8PathBuf::from_path_buf(parent.to_path_buf()).ok()
}

/// Returns the default configuration file path (config.toml).
pub fn default_config_path() -> Option<Utf8PathBuf> {
    install_dir().map(|dir| dir.join("config.toml"))
}

/// Loads the application configuration from config.toml.
/// Returns default configuration if file doesn't exist or cannot be parsed.
pub fn load_config() -> AppConfig {
    default_config_path()
        .map(|path| load_config_from(&path))
        .unwrap_or_default()
}

pub fn load_config_from(path: &Utf8Path) -> AppConfig {
    let Ok(content) = fs::read_to_string(path) else {
        return AppConfig::default();
    };
    match toml::from_str(&content) {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::warn!("Ignoring unreadable config {}: {}", path, err);
            AppConfig::default()
        }
    }
}

/// Saves the application configuration to config.toml.
pub fn save_config(cfg: &AppConfig) -> io::Result<()> {
    let path = default_config_path().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "Could not determine config path")
    })?;
    save_config_to(&path, cfg)
}

pub fn save_config_to(path: &Utf8Path, cfg: &AppConfig) -> io::Result<()> {
    let content = toml::to_string_pretty(cfg).map_err(io::Error::other)?;
    fs::write(path, content)
}

/// Load, modify and save the configuration.
pub fn update_config(update: impl FnOnce(&mut AppConfig)) -> io::Result<AppConfig> {
    let mut cfg = load_config();
    update(&mut cfg);
    save_config(&cfg)?;
    Ok(cfg)
}
