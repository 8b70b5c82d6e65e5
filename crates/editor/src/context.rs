// Chunk: docs/chunks/app_context - Application context and theme
//!
//! Application-wide state passed to constructors.
//!
//! There is no global app or theme handle. `AppContext` is created once at
//! startup with [`AppContext::init`], borrowed by anything that needs the
//! settings or the palette, and torn down with [`AppContext::shutdown`],
//! which persists settings that changed during the session.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::settings::{Settings, SettingsError};

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

// =============================================================================
// Palette
// =============================================================================

/// RGBA colors derived from the theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: [f32; 4],
    pub activity_bar: [f32; 4],
    pub side_bar: [f32; 4],
    pub tab_bar: [f32; 4],
    pub tab_active: [f32; 4],
    pub tab_inactive: [f32; 4],
    pub tab_label: [f32; 4],
    pub close_button: [f32; 4],
    pub status_bar: [f32; 4],
    pub resize_handle: [f32; 4],
    pub resize_handle_hover: [f32; 4],
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Palette {
        match theme {
            Theme::Dark => Palette {
                background: [0.12, 0.12, 0.14, 1.0],
                activity_bar: [0.2, 0.2, 0.2, 1.0],
                side_bar: [0.15, 0.15, 0.17, 1.0],
                tab_bar: [0.12, 0.12, 0.14, 1.0],
                tab_active: [0.22, 0.22, 0.28, 1.0],
                tab_inactive: [0.15, 0.15, 0.18, 1.0],
                tab_label: [0.7, 0.7, 0.75, 1.0],
                close_button: [0.5, 0.5, 0.55, 1.0],
                status_bar: [0.0, 0.48, 0.8, 1.0],
                resize_handle: [0.25, 0.25, 0.25, 1.0],
                resize_handle_hover: [0.0, 0.48, 0.8, 1.0],
            },
            Theme::Light => Palette {
                background: [1.0, 1.0, 1.0, 1.0],
                activity_bar: [0.17, 0.17, 0.17, 1.0],
                side_bar: [0.95, 0.95, 0.95, 1.0],
                tab_bar: [0.93, 0.93, 0.93, 1.0],
                tab_active: [1.0, 1.0, 1.0, 1.0],
                tab_inactive: [0.88, 0.88, 0.88, 1.0],
                tab_label: [0.2, 0.2, 0.2, 1.0],
                close_button: [0.45, 0.45, 0.45, 1.0],
                status_bar: [0.0, 0.48, 0.8, 1.0],
                resize_handle: [0.8, 0.8, 0.8, 1.0],
                resize_handle_hover: [0.0, 0.48, 0.8, 1.0],
            },
        }
    }
}

// =============================================================================
// AppContext
// =============================================================================

/// Settings, theme and palette for one run of the shell.
#[derive(Debug)]
pub struct AppContext {
    settings: Settings,
    settings_path: Option<PathBuf>,
    palette: Palette,
    /// Whether settings changed since load.
    dirty: bool,
}

impl AppContext {
    /// Creates a context that never persists its settings.
    pub fn new(settings: Settings) -> Self {
        let palette = Palette::for_theme(settings.theme);
        Self {
            settings,
            settings_path: None,
            palette,
            dirty: false,
        }
    }

    /// Starts the application context, loading settings from
    /// `settings_path` (defaults when absent or unreadable).
    pub fn init(settings_path: PathBuf) -> Self {
        let settings = Settings::load_or_default(&settings_path);
        info!(
            path = %settings_path.display(),
            theme = settings.theme.name(),
            "application context initialized"
        );
        Self {
            settings_path: Some(settings_path),
            ..Self::new(settings)
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_path(&self) -> Option<&Path> {
        self.settings_path.as_deref()
    }

    pub fn theme(&self) -> Theme {
        self.settings.theme
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Switches the theme and re-derives the palette.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.settings.theme == theme {
            return;
        }
        self.settings.theme = theme;
        self.palette = Palette::for_theme(theme);
        self.dirty = true;
        info!(theme = theme.name(), "theme changed");
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.settings.theme.toggled();
        self.set_theme(theme);
        theme
    }

    /// Records the side bar width so the next run starts with it.
    pub fn remember_side_bar_width(&mut self, width: f32) {
        if self.settings.side_bar_width != width {
            self.settings.side_bar_width = width;
            self.dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Ends the application context, writing settings that changed.
    pub fn shutdown(mut self) -> Result<(), SettingsError> {
        match (&self.settings_path, self.dirty) {
            (Some(path), true) => {
                self.settings.save_to(path)?;
                self.dirty = false;
                info!(path = %path.display(), "settings persisted on shutdown");
            }
            _ => debug!("shutdown with nothing to persist"),
        }
        Ok(())
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle_updates_palette() {
        let mut ctx = AppContext::default();
        let dark = *ctx.palette();
        assert_eq!(ctx.toggle_theme(), Theme::Light);
        assert_ne!(ctx.palette(), &dark);
        assert!(ctx.is_dirty());
    }

    #[test]
    fn test_set_same_theme_is_noop() {
        let mut ctx = AppContext::default();
        ctx.set_theme(Theme::Dark);
        assert!(!ctx.is_dirty());
    }

    #[test]
    fn test_shutdown_persists_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut ctx = AppContext::init(path.clone());
        ctx.set_theme(Theme::Light);
        ctx.remember_side_bar_width(260.0);
        ctx.shutdown().unwrap();

        let reloaded = AppContext::init(path);
        assert_eq!(reloaded.theme(), Theme::Light);
        assert_eq!(reloaded.settings().side_bar_width, 260.0);
    }

    #[test]
    fn test_shutdown_without_changes_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        AppContext::init(path.clone()).shutdown().unwrap();
        assert!(!path.exists());
    }
}
