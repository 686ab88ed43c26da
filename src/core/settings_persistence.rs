//! Settings loading
//!
//! Reads [`GameSettings`] from a JSON file. Settings are never written back;
//! edit the file by hand.
//!
//! # File Location
//!
//! `settings.json` in the platform configuration directory, e.g.
//! `~/.config/chess_sync/settings.json` on Linux, unless an explicit path is
//! given with `--config`.
//!
//! # Error Handling
//!
//! [`load_settings`] never fails: a missing or unreadable default file falls
//! back to defaults with a warning. [`read_settings`] is the strict variant
//! used for an explicitly requested file.

use crate::core::error::{CoreError, CoreResult};
use crate::core::GameSettings;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Path of the default settings file
///
/// Falls back to a local `settings.json` if the system config dir cannot be
/// determined.
pub fn default_settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("org", "chess_sync", "chess_sync") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Strictly read settings from `path`
pub fn read_settings(path: &Path) -> CoreResult<GameSettings> {
    if !path.exists() {
        return Err(CoreError::SettingsMissing {
            path: path.to_path_buf(),
        });
    }
    let contents = fs::read_to_string(path)?;
    let settings = serde_json::from_str::<GameSettings>(&contents)?;
    Ok(settings)
}

/// Load settings from `path` or the default location, falling back to defaults
pub fn load_settings(path: Option<&Path>) -> GameSettings {
    let settings_path = path.map(Path::to_path_buf).unwrap_or_else(default_settings_path);

    match read_settings(&settings_path) {
        Ok(settings) => {
            info!("[SETTINGS] Loaded settings from {:?}", settings_path);
            settings
        }
        Err(CoreError::SettingsMissing { .. }) if path.is_none() => {
            info!(
                "[SETTINGS] No settings file found at {:?}. Using defaults.",
                settings_path
            );
            GameSettings::default()
        }
        Err(e) => {
            warn!(
                "[SETTINGS] Failed to load settings file at {:?}: {}. Using defaults.",
                settings_path, e
            );
            GameSettings::default()
        }
    }
}
