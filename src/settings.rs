use std::path::{Path, PathBuf};

use eframe::egui;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "IQA_DASHBOARD_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "iqa_dashboard.json";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to access settings file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize settings")]
    Serialize(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Theme preference
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSetting {
    Light,
    Dark,
    /// Follow the operating system.
    #[default]
    System,
}

impl ThemeSetting {
    /// The setting after the user hits the theme toggle.
    ///
    /// `System` has no opposite, so it flips away from whatever is
    /// currently shown.
    pub fn toggled(self, currently_dark: bool) -> Self {
        match self {
            ThemeSetting::Light => ThemeSetting::Dark,
            ThemeSetting::Dark => ThemeSetting::Light,
            ThemeSetting::System if currently_dark => ThemeSetting::Light,
            ThemeSetting::System => ThemeSetting::Dark,
        }
    }
}

impl From<ThemeSetting> for egui::ThemePreference {
    fn from(setting: ThemeSetting) -> Self {
        match setting {
            ThemeSetting::Light => egui::ThemePreference::Light,
            ThemeSetting::Dark => egui::ThemePreference::Dark,
            ThemeSetting::System => egui::ThemePreference::System,
        }
    }
}

// ---------------------------------------------------------------------------
// Settings file
// ---------------------------------------------------------------------------

/// User preferences persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemeSetting,
}

/// `$IQA_DASHBOARD_CONFIG`, or `iqa_dashboard.json` in the working directory.
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

impl Settings {
    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from [`config_path`], falling back to defaults on any error.
    pub fn load() -> Self {
        let path = config_path();
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}: {settings:?}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings: {e:#}");
                Self::default()
            }
        }
    }

    /// Persist to [`config_path`]; failures are logged and otherwise ignored.
    pub fn save(&self) {
        let path = config_path();
        if let Err(e) = self.save_to(&path) {
            log::error!("Failed to save settings: {e:#}");
        }
    }
}
