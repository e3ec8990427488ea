//! Persisted application settings.
//!
//! JSON on disk, one file, defaults applied field-by-field so configs written
//! by older builds keep loading after new fields appear.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{DEFAULT_BLUR_RADIUS, DEFAULT_MIN_OCR_CONFIDENCE, MIN_SELECTION_SIZE};
use crate::geometry::Shape;

/// Application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Selection cut-out shape (`"rect"` / `"ellipse"`).
    #[serde(default)]
    pub capture_shape: Shape,

    /// Gaussian blur radius of the dimmed overlay backdrop.
    #[serde(default = "default_blur_radius")]
    pub blur_radius: u32,

    /// Drags at or below this size are discarded as accidental.
    #[serde(default = "default_min_selection_size")]
    pub min_selection_size: i32,

    /// Language hint passed to the external recognizer.
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,

    /// OCR word records below this confidence are dropped.
    #[serde(default = "default_min_ocr_confidence")]
    pub min_ocr_confidence: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            capture_shape: Shape::Rectangle,
            blur_radius: default_blur_radius(),
            min_selection_size: default_min_selection_size(),
            ocr_language: default_ocr_language(),
            min_ocr_confidence: default_min_ocr_confidence(),
        }
    }
}

fn default_blur_radius() -> u32 {
    DEFAULT_BLUR_RADIUS
}

fn default_min_selection_size() -> i32 {
    MIN_SELECTION_SIZE
}

fn default_ocr_language() -> String {
    "eng".to_string()
}

fn default_min_ocr_confidence() -> f32 {
    DEFAULT_MIN_OCR_CONFIDENCE
}

impl Settings {
    fn settings_dir() -> PathBuf {
        let home = std::env::var("USERPROFILE")
            .or_else(|_| std::env::var("HOME"))
            .unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".snipcap")
    }

    fn settings_path() -> PathBuf {
        Self::settings_dir().join("settings.json")
    }

    /// Load settings from disk.
    ///
    /// Falls back to defaults (and persists them) if loading fails.
    pub fn load() -> Self {
        if let Ok(content) = fs::read_to_string(Self::settings_path()) {
            if let Ok(settings) = serde_json::from_str::<Settings>(&content) {
                return settings;
            }
        }

        let default_settings = Self::default();
        let _ = default_settings.save();
        default_settings
    }

    /// Save settings to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::settings_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }
}
