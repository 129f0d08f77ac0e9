//! csvtint - delimited text highlighting
//!
//! This crate provides a quote-aware scanner for CSV-like text and an
//! emitter that renders the scanned runs as RTF or ANSI colored output.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod emit;
pub mod scan;
pub mod theme;
pub mod tracing;

// Re-export commonly used types
pub use config::ViewerConfig;
pub use emit::{emit, highlight, AnsiMarkup, DisplayOptions, Markup, Palette, RtfMarkup};
pub use scan::{scan, scan_all, ConfigError, ScanConfig, StyleCategory, StyledRun};
pub use theme::Theme;
