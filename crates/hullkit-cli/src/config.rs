//! User preferences
//!
//! Preferences are stored as pretty-printed JSON in the platform config
//! directory (`~/.config/hullkit/preferences.json` on Linux). The
//! `HULLKIT_CONFIG` environment variable points at a different file.

use anyhow::{Context, Result};
use hullkit_naming::DEFAULT_TEMPLATE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the preferences file location.
pub const CONFIG_ENV: &str = "HULLKIT_CONFIG";

/// Persistent user preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// V-HACD executable, or the directory containing it.
    pub executable_path: Option<PathBuf>,
    /// Directory for exported meshes and V-HACD output.
    pub data_path: PathBuf,
    /// Template used to name hulls.
    pub name_template: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            executable_path: None,
            data_path: std::env::temp_dir(),
            name_template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl Preferences {
    /// Get the default preferences file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("hullkit").join("preferences.json"))
    }

    /// Resolves the preferences file path, honoring `HULLKIT_CONFIG`.
    pub fn path() -> Result<PathBuf> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => Self::default_path().context("could not determine config directory"),
        }
    }

    /// Returns `template` unless it is missing or empty, else the configured one.
    pub fn template_or(&self, template: Option<String>) -> String {
        template
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.name_template.clone())
    }

    /// Loads preferences from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no preferences at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read preferences {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("failed to parse preferences {}", path.display()))
    }

    /// Writes preferences to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create config directory {}", parent.display())
                })?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json + "\n")
            .with_context(|| format!("failed to write preferences {}", path.display()))?;
        log::info!("saved preferences to {}", path.display());
        Ok(())
    }
}
