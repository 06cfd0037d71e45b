//! Settings persistence
//!
//! Loads and saves [`Settings`] as `settings.json`.
//!
//! # File Location
//!
//! By default the file lives in the platform configuration directory, e.g.
//! `~/.config/peerchess/settings.json` on Linux. If no configuration
//! directory can be found, `settings.json` in the working directory is used.
//! The `--config` flag replaces the path entirely.
//!
//! # Error Handling
//!
//! Loading never fails: a missing, unreadable or invalid file falls back to
//! defaults with a warning. Saving reports its error to the caller.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::error::CoreResult;

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// User preferences for the terminal driver
///
/// Missing fields take their default, so older files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Address the host listens on
    pub listen_addr: String,
    /// Address the guest connects to
    pub peer_addr: String,
    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            listen_addr: "0.0.0.0:7878".to_string(),
            peer_addr: "127.0.0.1:7878".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

/// Default location of `settings.json`
pub fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("org", "peerchess", "peerchess") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Load settings from `path`, falling back to defaults
pub fn load_settings(path: &Path) -> Settings {
    settings_or_default(path, read_settings(path))
}

/// Read `path` without logging; `None` when there is no file yet
///
/// Lets the binary pick its log filter before the subscriber exists.
pub fn read_settings(path: &Path) -> CoreResult<Option<Settings>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&contents)?))
}

/// Resolve a [`read_settings`] result, logging what was used
pub fn settings_or_default(path: &Path, read: CoreResult<Option<Settings>>) -> Settings {
    match read {
        Ok(Some(settings)) => {
            info!("[SETTINGS] Loaded settings from {:?}", path);
            settings
        }
        Ok(None) => {
            info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
            Settings::default()
        }
        Err(e) => {
            warn!(
                "[SETTINGS] Failed to load settings file at {:?}: {}. Using defaults.",
                path, e
            );
            Settings::default()
        }
    }
}

/// Write settings as pretty JSON, creating the parent directory if needed
pub fn save_settings(path: &Path, settings: &Settings) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}
