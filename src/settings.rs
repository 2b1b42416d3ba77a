//! Persistent user settings.
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use dirs_next as dirs;
use serde::{Deserialize, Serialize};

use crate::catalog::Language;
use crate::defaults::DefaultSetChoice;

/// Body-weight and waist snapshot captured alongside a training day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMetrics {
    pub day: NaiveDate,
    pub body_weight: f64,
    pub waist: Option<f64>,
}

/// User preferences persisted across runs as a JSON file.
///
/// Every field carries `#[serde(default)]` so files written by older
/// versions keep loading; unknown or unreadable files fall back to the
/// defaults entirely.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language: Language,
    pub default_set: DefaultSetChoice,
    /// One-time flag: built-in exercises have been seeded into the store.
    pub seeded: bool,
    pub last_body_metrics: Option<BodyMetrics>,
}

impl Settings {
    const FILE: &'static str = "repbook_settings.json";

    /// Default settings path under the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("repbook").join(Self::FILE))
    }

    /// Load settings from `path`, falling back to defaults on any failure.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            if let Ok(cfg) = serde_json::from_str(&data) {
                return cfg;
            }
            log::warn!("Settings file unreadable, using defaults");
        }
        Self::default()
    }

    /// Persist the settings, creating parent directories as needed.
    /// Best effort: failures are logged, not propagated.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self) {
            Ok(data) => {
                if let Err(e) = std::fs::write(path, data) {
                    log::warn!("Failed to save settings: {e}");
                }
            }
            Err(e) => log::warn!("Failed to serialize settings: {e}"),
        }
    }
}
