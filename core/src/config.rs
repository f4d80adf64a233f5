//! Configuration loader (TOML).
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::model::org::{OrgDirectory, OrgTable};

pub const APP_DIR_NAME: &str = ".tardy";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Limits {
    #[serde(default)]
    pub max_minutes_late: Option<u32>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub managers: OrgTable,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("employee '{employee}' is listed under both '{first}' and '{second}'")]
    DuplicateEmployee {
        employee: String,
        first: String,
        second: String,
    },
}

impl AppConfig {
    pub fn from_toml_str(txt: &str) -> Result<Self, ConfigError> {
        let cfg: AppConfig = toml::from_str(txt)?;
        validate(&cfg)?;
        Ok(cfg)
    }

    pub fn org_directory(&self) -> Result<OrgDirectory, ConfigError> {
        OrgDirectory::new(self.managers.clone())
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// `~/.tardy`, or `None` when no home directory can be determined.
pub fn default_app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_DIR_NAME))
}

pub fn default_config_path() -> Option<PathBuf> {
    default_app_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Load TOML config from path
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let txt = std::fs::read_to_string(path)?;
    let cfg = AppConfig::from_toml_str(&txt)?;
    debug!(path = %path.display(), managers = cfg.managers.len(), "loaded config");
    Ok(cfg)
}

/// An explicit path must exist. The default path falls back to an empty
/// config when the file is not there.
pub fn load_config_or_default(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match default_config_path() {
        Some(path) if path.exists() => load_config(&path),
        _ => {
            debug!("no config file, using defaults");
            Ok(AppConfig::default())
        }
    }
}

fn validate(cfg: &AppConfig) -> Result<(), ConfigError> {
    if cfg.limits.max_minutes_late == Some(0) {
        return Err(ConfigError::Validation("limits.max_minutes_late must be positive".into()));
    }
    // Name rules live with the directory; building it here surfaces them at load time.
    OrgDirectory::new(cfg.managers.clone())?;
    Ok(())
}
