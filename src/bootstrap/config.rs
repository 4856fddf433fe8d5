//! # Configuration Loader
//!
//! Reads the TOML config file into [`AppConfig`]. Pure data loading: sections
//! and keys that are absent take the defaults declared on `AppConfig`, and
//! no validation happens here.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;
use vv_core::config::AppConfig;

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_DIR_NAME: &str = "violetvibes";

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// `AppConfig`.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
}

/// Like [`load_config`], but a missing file yields the defaults.
pub fn load_config_or_default(config_path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match config_path {
        Some(path) if path.exists() => load_config(path),
        Some(path) => {
            debug!(path = %path.display(), "config file not found, using defaults");
            Ok(AppConfig::default())
        }
        None => Ok(AppConfig::default()),
    }
}

/// `<platform config dir>/violetvibes/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}
