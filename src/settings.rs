//! Game settings and preferences
//!
//! Read from a JSON file next to the executable's working directory. Missing
//! fields take their defaults, so a partial file is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::journal::DEFAULT_LOG_FILE;

/// Default settings file name
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root directory for fonts and images
    pub assets_dir: PathBuf,
    /// Flat-file game log
    pub log_file: PathBuf,
    /// Fixed run seed (None = derive from the clock)
    pub seed: Option<u64>,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Display ===
    /// Sync presentation to the display refresh
    pub vsync: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            seed: None,

            // HUD
            show_fps: false,

            // Display
            vsync: true,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults if the file is
    /// missing or unreadable
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Failed to read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("star-strike-settings-{}-{}.json", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load(Path::new("/no/such/settings.json"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.assets_dir, PathBuf::from("assets"));
        assert_eq!(settings.log_file, PathBuf::from("game.log"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let path = temp_file("partial", r#"{ "show_fps": true, "seed": 42 }"#);
        let settings = Settings::load(&path);
        assert!(settings.show_fps);
        assert_eq!(settings.seed, Some(42));
        assert!(settings.vsync);
        assert_eq!(settings.assets_dir, PathBuf::from("assets"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_invalid_json_gives_defaults() {
        let path = temp_file("invalid", "{ show_fps: ");
        assert_eq!(Settings::load(&path), Settings::default());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            show_fps: true,
            vsync: false,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
        assert_eq!(parsed.present_mode(), wgpu::PresentMode::AutoNoVsync);
    }
}
