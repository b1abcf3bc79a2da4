use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use imagescope_core::ZoomLimits;
use imagescope_core::view_state::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, DEFAULT_ZOOM_STEP};

// ---------------------------------------------------------------------------
// Application preferences
// ---------------------------------------------------------------------------

/// User settings. Only configuration lives here; the scale and scroll of a
/// session are never written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppPreferences {
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
    /// Factor applied per zoom step (buttons, keys and wheel).
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
    #[serde(default = "default_max_scale")]
    pub max_scale: f64,
    #[serde(default = "default_true")]
    pub show_minimap: bool,
    /// Minimap box side length: Small=160, Medium=220, Large=300.
    #[serde(default)]
    pub minimap_size: MinimapSize,
    /// Minimap panel opacity 0.0..=1.0 (default 0.85).
    #[serde(default = "default_minimap_opacity")]
    pub minimap_opacity: f32,
    /// HUD panel background opacity 0.0..=1.0 (default 0.65).
    #[serde(default = "default_hud_panel_opacity")]
    pub hud_panel_opacity: f32,
    /// Images opened at startup when none are given on the command line.
    #[serde(default)]
    pub image_paths: Vec<String>,
}

/// Minimap widget size (side length of its square box in points).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinimapSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl MinimapSize {
    pub fn side_points(self) -> f32 {
        match self {
            MinimapSize::Small => 160.0,
            MinimapSize::Medium => 220.0,
            MinimapSize::Large => 300.0,
        }
    }
}

fn default_window_width() -> f32 {
    1280.0
}
fn default_window_height() -> f32 {
    800.0
}
fn default_zoom_step() -> f64 {
    DEFAULT_ZOOM_STEP
}
fn default_max_scale() -> f64 {
    DEFAULT_MAX_SCALE
}
fn default_true() -> bool {
    true
}
fn default_minimap_opacity() -> f32 {
    0.85
}
fn default_hud_panel_opacity() -> f32 {
    0.65
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            zoom_step: default_zoom_step(),
            max_scale: default_max_scale(),
            show_minimap: true,
            minimap_size: MinimapSize::default(),
            minimap_opacity: default_minimap_opacity(),
            hud_panel_opacity: default_hud_panel_opacity(),
            image_paths: Vec::new(),
        }
    }
}

impl AppPreferences {
    /// Load preferences from next to the executable, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(json) => match serde_json::from_str::<AppPreferences>(&json) {
                    Ok(prefs) => {
                        info!("Loaded preferences from {}", path.display());
                        return prefs;
                    }
                    Err(e) => {
                        error!("Failed to parse preferences: {e}");
                    }
                },
                Err(e) => {
                    error!("Failed to read preferences file: {e}");
                }
            }
        } else {
            debug!("No preferences file at {}", path.display());
        }
        Self::default()
    }

    /// Persist preferences to disk.
    pub fn save(&self) {
        let path = config_path();
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, &json) {
                    error!("Failed to write preferences: {e}");
                } else {
                    debug!("Saved preferences");
                }
            }
            Err(e) => error!("Failed to serialize preferences: {e}"),
        }
    }

    /// Zoom limits from the stored settings. `max_scale` may lower the
    /// ceiling but never raise it past `DEFAULT_MAX_SCALE`. Invalid values
    /// fall back to the defaults with a warning.
    pub fn zoom_limits(&self) -> ZoomLimits {
        let max_scale = if self.max_scale > DEFAULT_MAX_SCALE {
            warn!(
                max_scale = self.max_scale,
                "Clamping max_scale to {DEFAULT_MAX_SCALE}"
            );
            DEFAULT_MAX_SCALE
        } else {
            self.max_scale
        };
        ZoomLimits::new(DEFAULT_MIN_SCALE, max_scale, self.zoom_step).unwrap_or_else(|e| {
            warn!("Ignoring zoom settings: {e}");
            ZoomLimits::default()
        })
    }
}

fn config_path() -> PathBuf {
    crate::app_dir::exe_directory().join("preferences.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let prefs: AppPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs.window_width, 1280.0);
        assert_eq!(prefs.zoom_step, 1.2);
        assert_eq!(prefs.max_scale, 5.0);
        assert!(prefs.show_minimap);
        assert_eq!(prefs.minimap_size, MinimapSize::Small);
        assert!(prefs.image_paths.is_empty());
    }

    #[test]
    fn minimap_size_is_snake_case() {
        let prefs: AppPreferences =
            serde_json::from_str(r#"{"minimap_size":"large","image_paths":["a.png"]}"#).unwrap();
        assert_eq!(prefs.minimap_size, MinimapSize::Large);
        assert_eq!(prefs.minimap_size.side_points(), 300.0);
        assert_eq!(prefs.image_paths, vec!["a.png".to_string()]);
    }

    #[test]
    fn invalid_zoom_settings_fall_back() {
        let prefs = AppPreferences {
            zoom_step: 0.5,
            ..AppPreferences::default()
        };
        assert_eq!(prefs.zoom_limits(), ZoomLimits::default());

        let custom = AppPreferences {
            zoom_step: 1.5,
            max_scale: 3.0,
            ..AppPreferences::default()
        };
        let limits = custom.zoom_limits();
        assert_eq!(limits.min_scale, 1.0);
        assert_eq!(limits.max_scale, 3.0);
        assert_eq!(limits.step, 1.5);
    }

    #[test]
    fn max_scale_never_exceeds_default_ceiling() {
        let prefs: AppPreferences =
            serde_json::from_str(r#"{"max_scale":8.0,"zoom_step":1.2}"#).unwrap();
        let limits = prefs.zoom_limits();
        assert_eq!(limits.max_scale, DEFAULT_MAX_SCALE);
        assert_eq!(limits.min_scale, DEFAULT_MIN_SCALE);
        assert_eq!(limits.stepped(4.9, imagescope_core::ZoomDirection::In), 5.0);
    }
}
