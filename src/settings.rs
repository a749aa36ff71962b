//! Runtime settings
//!
//! Persisted as JSON next to the binary; missing or partial files fall back
//! to defaults field by field.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scene extent (also the marching bounds)
    pub width: f32,
    pub height: f32,
    /// Shapes per generated scene
    pub object_count: usize,
    /// Camera field of view in degrees
    pub camera_fov: f32,
    /// Rays in the camera fan
    pub camera_rays: usize,
    /// Step the probe ray automatically each frame
    pub auto_march: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: SCENE_WIDTH,
            height: SCENE_HEIGHT,
            object_count: SCENE_OBJECT_COUNT,
            camera_fov: CAMERA_FOV_DEG,
            camera_rays: CAMERA_RAY_COUNT,
            auto_march: true,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults when the
    /// file is missing or unreadable
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("ignoring malformed settings {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file, using defaults");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON; best effort, failures are logged
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(path, json) {
                    log::warn!("failed to save settings to {}: {err}", path.display());
                }
            }
            Err(err) => log::warn!("failed to serialize settings: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            object_count: 25,
            camera_rays: 64,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, back);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let back: Settings = serde_json::from_str(r#"{"object_count": 3}"#).unwrap();
        assert_eq!(back.object_count, 3);
        assert_eq!(back.camera_rays, Settings::default().camera_rays);
        assert!(back.auto_march);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let settings = Settings::load(Path::new("definitely/not/here.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("raymarch2d-settings-{}.json", std::process::id()));
        let settings = Settings {
            width: 640.0,
            height: 480.0,
            ..Default::default()
        };
        settings.save(&path);
        let back = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(settings, back);
    }
}
