//! Configuration loading.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::ConfigError;

use super::types::AppConfig;

/// Global config instance, set once at startup.
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("window-control"))
}

/// Default location of the config file.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    config_dir()
        .map(|p| p.join("config.toml"))
        .ok_or(ConfigError::NoDirFound)
}

/// Load a config file.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_config_from(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFailed)?;
    toml::from_str(&content)
        .map(Some)
        .map_err(ConfigError::ParseFailed)
}

/// Load the config, falling back to defaults on any problem.
///
/// A missing file is silent; an unreadable or invalid one is logged.
pub fn load_app_config(path: Option<&Path>) -> AppConfig {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!("{}, using defaults", e);
                return AppConfig::default();
            }
        },
    };

    match load_config_from(&path) {
        Ok(Some(config)) => {
            tracing::info!("Loaded config from {:?}", path);
            config
        }
        Ok(None) => {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            AppConfig::default()
        }
        Err(e) => {
            tracing::warn!("{} ({:?}), using defaults", e, path);
            AppConfig::default()
        }
    }
}

/// Initialize config from file (call once at daemon startup).
///
/// Loads and validates the configuration, logging any warnings for invalid
/// or unusual values. Later calls return the config from the first one.
pub fn init_config(path: Option<&Path>) -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let loaded = load_app_config(path);
        for warning in super::validation::validate_config(&loaded) {
            tracing::warn!("Config validation: {} - {}", warning.field, warning.message);
        }
        loaded
    })
}
