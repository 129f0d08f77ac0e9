//! Viewer configuration persistence
//!
//! Stores user preferences in `~/.config/csvtint/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::emit::DisplayOptions;
use crate::scan::ScanSettings;

/// Viewer configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Selected theme id (e.g., "default-dark", "default-light")
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Delimiter, quote, escape and comment characters
    #[serde(default)]
    pub scan: ScanSettings,

    /// Draw glyphs for spaces, tabs and line breaks
    #[serde(default)]
    pub show_whitespace: bool,

    /// Font size in points (RTF output)
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Font family (RTF output)
    #[serde(default = "default_font_name")]
    pub font_name: String,
}

fn default_theme() -> String {
    "default-dark".to_string()
}

fn default_font_size() -> f32 {
    10.0
}

fn default_font_name() -> String {
    "Consolas".to_string()
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            scan: ScanSettings::default(),
            show_whitespace: false,
            font_size: default_font_size(),
            font_name: default_font_name(),
        }
    }
}

impl ViewerConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e))
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            show_whitespace: self.show_whitespace,
            font_size: self.font_size,
            font_name: self.font_name.clone(),
        }
    }
}
