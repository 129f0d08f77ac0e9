//! Theme system for highlighted output
//!
//! Provides YAML-based theming support with compile-time embedded themes
//! and user-defined themes from config directories.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/csvtint/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary

use std::path::Path;

use serde::Deserialize;

use crate::emit::Palette;
use crate::scan::StyleCategory;

// Embed theme YAML files at compile time
pub const DEFAULT_DARK_YAML: &str = include_str!("../themes/default-dark.yaml");
pub const DEFAULT_LIGHT_YAML: &str = include_str!("../themes/default-light.yaml");

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "default-dark")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "default-dark",
        yaml: DEFAULT_DARK_YAML,
    },
    BuiltinTheme {
        id: "default-light",
        yaml: DEFAULT_LIGHT_YAML,
    },
];

/// Where the theme came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    /// User-defined theme in ~/.config/csvtint/themes/
    User,
    /// Built-in theme embedded in binary
    Builtin,
}

/// Information about an available theme
#[derive(Debug, Clone)]
pub struct ThemeInfo {
    /// Stable identifier (e.g., "default-dark", "my-custom-theme")
    pub id: String,
    /// Display name from YAML (e.g., "Default Dark")
    pub name: String,
    /// Where this theme is loaded from
    pub source: ThemeSource,
}

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(user_dir) = crate::config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::info!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

/// List all available themes from all sources
///
/// User themes override builtins with the same id.
pub fn list_available_themes() -> Vec<ThemeInfo> {
    let mut themes = Vec::new();
    let mut seen_ids = std::collections::HashSet::new();

    if let Some(user_dir) = crate::config_paths::themes_dir() {
        if let Ok(entries) = std::fs::read_dir(&user_dir) {
            for entry in entries.filter_map(|e| e.ok()) {
                let path = entry.path();
                if !path
                    .extension()
                    .is_some_and(|ext| ext == "yaml" || ext == "yml")
                {
                    continue;
                }
                let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                if seen_ids.insert(id.to_string()) {
                    let name = from_file(&path)
                        .map(|t| t.name)
                        .unwrap_or_else(|_| id.to_string());
                    themes.push(ThemeInfo {
                        id: id.to_string(),
                        name,
                        source: ThemeSource::User,
                    });
                }
            }
        }
    }

    for builtin in BUILTIN_THEMES {
        if seen_ids.insert(builtin.id.to_string()) {
            let name = Theme::from_yaml(builtin.yaml)
                .map(|t| t.name)
                .unwrap_or_else(|_| builtin.id.to_string());
            themes.push(ThemeInfo {
                id: builtin.id.to_string(),
                name,
                source: ThemeSource::Builtin,
            });
        }
    }

    themes
}

/// RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from "#RRGGBB" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("Invalid color {}: {}", s, e))
        };
        Ok(Color {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub csv: CsvThemeData,
}

/// Category colors (raw strings from YAML)
#[derive(Debug, Clone, Deserialize)]
pub struct CsvThemeData {
    #[serde(default)]
    pub background: Option<String>,
    pub foreground: String,
    pub delimiter: String,
    pub quote: String,
    #[serde(default)]
    pub quoted_content: Option<String>,
    #[serde(default)]
    pub whitespace: Option<String>,
    #[serde(default)]
    pub line_break: Option<String>,
    #[serde(default)]
    pub control: Option<String>,
    #[serde(default)]
    pub non_printable: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub csv: CsvTheme,
}

/// Category colors (resolved)
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTheme {
    /// Document background; `None` leaves the target's default
    pub background: Option<Color>,
    pub foreground: Color,
    pub delimiter: Color,
    pub quote: Color,
    /// Defaults to `quote`
    pub quoted_content: Color,
    pub whitespace: Color,
    pub line_break: Color,
    /// Defaults to `whitespace`
    pub control: Color,
    pub non_printable: Color,
    pub comment: Color,
}

impl CsvTheme {
    /// Color used for a scanned category
    pub fn color_for(&self, category: StyleCategory) -> Color {
        match category {
            StyleCategory::Delimiter => self.delimiter,
            StyleCategory::QuoteMark => self.quote,
            StyleCategory::QuotedContent => self.quoted_content,
            StyleCategory::PlainContent => self.foreground,
            StyleCategory::Whitespace => self.whitespace,
            StyleCategory::LineBreak => self.line_break,
            StyleCategory::ControlChar => self.control,
            StyleCategory::NonPrintable => self.non_printable,
            StyleCategory::Comment => self.comment,
        }
    }
}

fn optional_color(value: &Option<String>, fallback: Color) -> Result<Color, String> {
    value
        .as_deref()
        .map(Color::from_hex)
        .transpose()
        .map(|c| c.unwrap_or(fallback))
}

impl Theme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Theme::from_yaml(entry.yaml)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let csv = &data.csv;
        let foreground = Color::from_hex(&csv.foreground)?;
        let quote = Color::from_hex(&csv.quote)?;
        let whitespace = optional_color(&csv.whitespace, Color::rgb(0x80, 0x80, 0x80))?;

        Ok(Theme {
            name: data.name,
            csv: CsvTheme {
                background: csv.background.as_deref().map(Color::from_hex).transpose()?,
                foreground,
                delimiter: Color::from_hex(&csv.delimiter)?,
                quote,
                quoted_content: optional_color(&csv.quoted_content, quote)?,
                whitespace,
                line_break: optional_color(&csv.line_break, whitespace)?,
                control: optional_color(&csv.control, whitespace)?,
                non_printable: optional_color(&csv.non_printable, Color::rgb(0xFF, 0x00, 0x00))?,
                comment: optional_color(&csv.comment, foreground)?,
            },
        })
    }

    /// Default dark theme (YAML-backed with Rust fallback)
    pub fn default_dark() -> Self {
        match Theme::from_yaml(DEFAULT_DARK_YAML) {
            Ok(theme) => theme,
            Err(e) => {
                tracing::error!("Embedded default theme failed to parse: {}", e);
                Theme {
                    name: "Default Dark".to_string(),
                    csv: CsvTheme {
                        background: Some(Color::rgb(0x1E, 0x1E, 0x1E)),
                        foreground: Color::rgb(0xD4, 0xD4, 0xD4),
                        delimiter: Color::rgb(0xC5, 0x86, 0xC0),
                        quote: Color::rgb(0xCE, 0x91, 0x78),
                        quoted_content: Color::rgb(0xCE, 0x91, 0x78),
                        whitespace: Color::rgb(0x5A, 0x5A, 0x5A),
                        line_break: Color::rgb(0x56, 0x9C, 0xD6),
                        control: Color::rgb(0x5A, 0x5A, 0x5A),
                        non_printable: Color::rgb(0xF4, 0x47, 0x47),
                        comment: Color::rgb(0x6A, 0x99, 0x55),
                    },
                }
            }
        }
    }

    /// Palette with one slot per distinct category color
    pub fn palette(&self) -> Palette {
        Palette::new(|category| self.csv.color_for(category)).with_background(self.csv.background)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}
