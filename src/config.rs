//! Application configuration.
//!
//! The configuration is loaded from a JSON file at
//! `$XDG_CONFIG_HOME/stackwm/config.json`.  A missing or unreadable file is
//! not an error for the window manager: compiled-in defaults are used.
//! Key bindings are not configurable.
//!
//! # Example
//!
//! ```json
//! {
//!   "terminal": ["alacritty", "-e", "tmux"],
//!   "master_ratio": 0.55
//! }
//! ```

use crate::layout::DEFAULT_MASTER_RATIO;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
///
/// Every field is optional. A minimal `{}` file is valid and all fields
/// fall back to their compiled-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Program (and arguments) started by the launch-terminal binding.
    pub terminal: Vec<String>,
    /// Share of the screen width given to the master window.
    pub master_ratio: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            terminal: vec!["wezterm".into()],
            master_ratio: DEFAULT_MASTER_RATIO,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.terminal.first().map_or(true, |p| p.trim().is_empty()) {
            return Err(ConfigError("terminal must name a program".into()));
        }
        if !self.master_ratio.is_finite() || self.master_ratio <= 0.0 || self.master_ratio >= 1.0 {
            return Err(ConfigError(format!(
                "master_ratio must be between 0 and 1, got {}",
                self.master_ratio
            )));
        }
        Ok(())
    }
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/stackwm`).
pub fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("stackwm")
}

/// Path of the default config file.
pub fn default_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
