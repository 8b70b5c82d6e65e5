// Chunk: docs/chunks/shell_settings - Settings persistence
//!
//! User settings for the shell.
//!
//! Settings are stored as pretty-printed JSON at
//! `<config_dir>/deskedit/settings.json`, where `<config_dir>` comes from
//! [`dirs::config_dir`] unless overridden on the command line.
//!
//! Loading is tolerant: unknown fields are ignored and missing fields take
//! their defaults, so a settings file from an older build still loads. A
//! missing file is not an error. A malformed file is reported to the caller
//! of [`Settings::load_from`]; [`Settings::load_or_default`] logs it and
//! falls back to defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::context::Theme;
use crate::debounced_sync::{DEFAULT_CURSOR_REFRESH_MS, DEFAULT_SYNC_DEBOUNCE_MS};
use crate::line_numbers::Padding;
use crate::main_layout::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::resizable_panel::{DEFAULT_SIDE_BAR_WIDTH, MAX_SIDE_BAR_WIDTH, MIN_SIDE_BAR_WIDTH};
use crate::tabs::DEFAULT_DOUBLE_TAP_MS;

/// Application name used for the config directory.
pub const APP_NAME: &str = "deskedit";

/// Settings file name.
pub const SETTINGS_FILENAME: &str = "settings.json";

/// Errors reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine a config directory")]
    NoConfigDir,
    #[error("failed to access settings file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed settings file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// =============================================================================
// Settings
// =============================================================================

/// Persisted user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub font_size: f32,
    pub line_height: f32,
    pub font_family: String,
    pub side_bar_width: f32,
    pub min_side_bar_width: f32,
    pub max_side_bar_width: f32,
    /// Quiet period before view edits reach the buffer.
    pub sync_debounce_ms: u64,
    /// Coalescing window for cursor-driven refreshes.
    pub cursor_refresh_ms: u64,
    /// Two tab-bar activations within this window open a new tab.
    pub double_tap_ms: u64,
    pub line_number_padding: Padding,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            font_size: 16.0,
            line_height: 1.6,
            font_family: "monospace".to_string(),
            side_bar_width: DEFAULT_SIDE_BAR_WIDTH,
            min_side_bar_width: MIN_SIDE_BAR_WIDTH,
            max_side_bar_width: MAX_SIDE_BAR_WIDTH,
            sync_debounce_ms: DEFAULT_SYNC_DEBOUNCE_MS,
            cursor_refresh_ms: DEFAULT_CURSOR_REFRESH_MS,
            double_tap_ms: DEFAULT_DOUBLE_TAP_MS,
            line_number_padding: Padding::Zero,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl Settings {
    /// Loads settings from `path`.
    ///
    /// Returns defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Settings, SettingsError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let settings: Settings =
            serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(settings.sanitized())
    }

    /// Loads settings from `path`, logging any failure and falling back to
    /// defaults.
    pub fn load_or_default(path: &Path) -> Settings {
        match Settings::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "ignoring settings file");
                Settings::default()
            }
        }
    }

    /// Writes settings to `path` as pretty JSON, creating parent directories.
    ///
    /// The write goes to a temporary file first and is renamed into place.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(io_err)?;
        fs::rename(&temp_path, path).map_err(io_err)?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Repairs values that would violate layout invariants.
    ///
    /// Inverted or non-positive side bar bounds fall back to the defaults;
    /// the starting width is clamped into the bounds.
    pub fn sanitized(mut self) -> Settings {
        let bounds_ok = self.min_side_bar_width > 0.0
            && self.min_side_bar_width <= self.max_side_bar_width;
        if !bounds_ok {
            warn!(
                min = self.min_side_bar_width,
                max = self.max_side_bar_width,
                "invalid side bar bounds in settings, using defaults"
            );
            self.min_side_bar_width = MIN_SIDE_BAR_WIDTH;
            self.max_side_bar_width = MAX_SIDE_BAR_WIDTH;
        }
        self.side_bar_width = self
            .side_bar_width
            .clamp(self.min_side_bar_width, self.max_side_bar_width);
        self
    }
}

// =============================================================================
// File Location
// =============================================================================

/// Returns the settings file path.
///
/// `config_dir` overrides the platform config directory; the file then lives
/// directly inside it.
pub fn settings_file_path(config_dir: Option<&Path>) -> Result<PathBuf, SettingsError> {
    match config_dir {
        Some(dir) => Ok(dir.join(SETTINGS_FILENAME)),
        None => {
            let base = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
            Ok(base.join(APP_NAME).join(SETTINGS_FILENAME))
        }
    }
}
