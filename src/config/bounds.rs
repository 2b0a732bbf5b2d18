//! Window geometry persisted in its own file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

use crate::constants::window;

/// Outer window geometry in logical points
///
/// Position is optional: a fresh install lets the window manager place the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowBounds {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            width: window::DEFAULT_WIDTH,
            height: window::DEFAULT_HEIGHT,
        }
    }
}

impl WindowBounds {
    /// Load saved bounds, falling back to the default size on any failure
    pub fn load(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No saved window bounds, using default size");
                return Self::default();
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to read window bounds");
                return Self::default();
            }
        };

        match serde_json::from_str::<WindowBounds>(&contents) {
            Ok(mut bounds) => {
                bounds.clamp_to_minimum();
                bounds
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to parse window bounds");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create bounds directory: {}", parent.display()))?;
        }
        let json = serde_json::to_string(self).context("Failed to serialize window bounds")?;
        fs::write(path, json)
            .context(format!("Failed to write window bounds to {}", path.display()))?;
        Ok(())
    }

    /// Raise width/height to the minimum window size
    pub fn clamp_to_minimum(&mut self) {
        if self.width < window::MIN_WIDTH {
            warn!(width = self.width, min = window::MIN_WIDTH, "Saved window width below minimum, clamping");
            self.width = window::MIN_WIDTH;
        }
        if self.height < window::MIN_HEIGHT {
            warn!(height = self.height, min = window::MIN_HEIGHT, "Saved window height below minimum, clamping");
            self.height = window::MIN_HEIGHT;
        }
    }

    pub fn position(&self) -> Option<(i32, i32)> {
        Some((self.x?, self.y?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let bounds = WindowBounds::load(&dir.path().join("window-bounds.json"));
        assert_eq!(bounds, WindowBounds::default());
        assert_eq!((bounds.width, bounds.height), (1000, 700));
    }

    #[test]
    fn test_load_corrupt_file_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("window-bounds.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(WindowBounds::load(&path), WindowBounds::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/window-bounds.json");
        let bounds = WindowBounds { x: Some(-20), y: Some(40), width: 640, height: 480 };
        bounds.save(&path).unwrap();
        assert_eq!(WindowBounds::load(&path), bounds);
    }

    #[test]
    fn test_load_without_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("window-bounds.json");
        fs::write(&path, r#"{"width":800,"height":600}"#).unwrap();
        let bounds = WindowBounds::load(&path);
        assert_eq!(bounds.position(), None);
        assert_eq!(bounds.width, 800);
    }

    #[test]
    fn test_load_clamps_undersized_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("window-bounds.json");
        fs::write(&path, r#"{"x":1,"y":2,"width":100,"height":50}"#).unwrap();
        let bounds = WindowBounds::load(&path);
        assert_eq!((bounds.width, bounds.height), (400, 300));
        assert_eq!(bounds.position(), Some((1, 2)));
    }
}
