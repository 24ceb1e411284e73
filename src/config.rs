//! Engine configuration persistence
//!
//! Stores preferences in `~/.config/richedit/config.yaml`. Configuration is
//! read once and handed to the engine; the engine never mutates it.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub style: StyleConfig,
}

/// Undo/redo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Maximum number of snapshots kept
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Quiet interval before an edit burst is captured
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// Presentation metrics passed through untouched to the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// `None` renders links in the host's default link color
    #[serde(default)]
    pub link_color: Option<String>,
    #[serde(default = "default_true")]
    pub link_underline: bool,
    #[serde(default = "default_accent")]
    pub bullet_color: String,
    #[serde(default = "default_two")]
    pub bullet_radius: u32,
    #[serde(default = "default_gap")]
    pub bullet_gap: u32,
    #[serde(default = "default_accent")]
    pub quote_color: String,
    #[serde(default = "default_two")]
    pub quote_stripe_width: u32,
    #[serde(default = "default_gap")]
    pub quote_gap: u32,
}

fn default_true() -> bool {
    true
}

fn default_capacity() -> usize {
    100
}

fn default_debounce_ms() -> u64 {
    800
}

fn default_accent() -> String {
    "#0000FF".to_string()
}

fn default_two() -> u32 {
    2
}

fn default_gap() -> u32 {
    8
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            capacity: default_capacity(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl HistoryConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            link_color: None,
            link_underline: default_true(),
            bullet_color: default_accent(),
            bullet_radius: default_two(),
            bullet_gap: default_gap(),
            quote_color: default_accent(),
            quote_stripe_width: default_two(),
            quote_gap: default_gap(),
        }
    }
}

impl EngineConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(config.sanitized())
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| ConfigError::Io("No config directory available".to_string()))?;
        self.save_to(&path)
    }

    /// Save config to an explicit path
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            crate::config_paths::ensure_dir(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| {
            ConfigError::Io(format!("Failed to write config to {}: {}", path.display(), e))
        })?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Clamp values the engine cannot honour
    fn sanitized(mut self) -> Self {
        if self.history.capacity == 0 {
            tracing::warn!("history.capacity must be at least 1, using 1");
            self.history.capacity = 1;
        }
        self
    }
}
