//! Where the engine looks for its settings and where the CLI writes logs
//!
//! Two things live under the per-user directory:
//! - `config.yaml`, read by [`EngineConfig::load`](crate::config::EngineConfig::load)
//!   when no `--config` path is given
//! - `logs/`, the daily-rotated `richedit.log.*` files from [`crate::tracing::init`]
//!
//! The directory is `$XDG_CONFIG_HOME/richedit` (falling back to
//! `~/.config/richedit`) everywhere but Windows, where it is
//! `%APPDATA%\richedit`.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::error::ConfigError;

const APP_DIR: &str = "richedit";
const CONFIG_FILE: &str = "config.yaml";
const LOGS_DIR: &str = "logs";

/// Per-user directory holding the engine config and the CLI logs
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// The `EngineConfig` file used when no explicit path is given
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(LOGS_DIR))
}

/// Create `path` and its parents
pub fn ensure_dir(path: &Path) -> Result<(), ConfigError> {
    fs::create_dir_all(path).map_err(|e| {
        ConfigError::Io(format!(
            "Failed to create directory {}: {}",
            path.display(),
            e
        ))
    })
}

/// Create the logs directory if needed and return it
pub fn ensure_logs_dir() -> Result<PathBuf, ConfigError> {
    let logs =
        logs_dir().ok_or_else(|| ConfigError::Io("No config directory available".to_string()))?;
    ensure_dir(&logs)?;
    Ok(logs)
}
