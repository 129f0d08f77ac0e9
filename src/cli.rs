//! Command-line argument parsing
//!
//! Supports:
//! - Reading a file or stdin
//! - Overriding scan characters from the config file
//! - Choosing between terminal, RTF and JSON run output

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::ViewerConfig;
use crate::scan::{detect_delimiter, ConfigError, Delimiter, ScanConfig};

/// Highlight delimited text
#[derive(Parser, Debug)]
#[command(name = "csvtint", version, about = "Highlight CSV, TSV and other delimited text")]
pub struct CliArgs {
    /// File to highlight (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Field delimiter (a single character, `tab`, or `auto`)
    #[arg(short = 'd', long, value_name = "CHAR")]
    pub delimiter: Option<String>,

    /// Quote character
    #[arg(short = 'q', long, value_name = "CHAR")]
    pub quote: Option<String>,

    /// Escape character placed before a literal quote
    #[arg(short = 'e', long, value_name = "CHAR")]
    pub escape: Option<String>,

    /// Line comment character
    #[arg(short = 'c', long, value_name = "CHAR")]
    pub comment: Option<String>,

    /// Classify spaces separately from field text
    #[arg(long)]
    pub mark_whitespace: bool,

    /// Classify tabs that are not the delimiter separately from field text
    #[arg(long)]
    pub mark_tabs: bool,

    /// Draw glyphs for spaces, tabs and line breaks (implies --mark-whitespace)
    #[arg(short = 'w', long)]
    pub show_whitespace: bool,

    /// Theme id
    #[arg(short = 't', long, value_name = "ID")]
    pub theme: Option<String>,

    /// Font size in points (RTF output)
    #[arg(long, value_name = "PT")]
    pub font_size: Option<f32>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Ansi)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// List available themes and exit
    #[arg(long)]
    pub list_themes: bool,

    /// Persist the effective settings (config plus these flags) as the new defaults
    #[arg(long)]
    pub save_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// 24-bit ANSI colors for the terminal
    Ansi,
    /// Rich Text Format document
    Rtf,
    /// JSON array of scanned runs
    Runs,
}

impl CliArgs {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply_to(&self, config: &mut ViewerConfig) {
        if let Some(delimiter) = &self.delimiter {
            config.scan.delimiter = delimiter.clone();
        }
        if let Some(quote) = &self.quote {
            config.scan.quote = quote.clone();
        }
        if let Some(escape) = &self.escape {
            config.scan.escape = escape.clone();
        }
        if let Some(comment) = &self.comment {
            config.scan.line_comment = comment.clone();
        }
        if self.mark_whitespace {
            config.scan.mark_whitespace = true;
        }
        if self.mark_tabs {
            config.scan.mark_tabs = true;
        }
        if self.show_whitespace {
            config.show_whitespace = true;
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if let Some(font_size) = self.font_size {
            config.font_size = font_size;
        }
    }

    /// Delimiter implied by the input file's extension, if any
    pub fn extension_delimiter(&self) -> Option<Delimiter> {
        self.input
            .as_ref()
            .and_then(|path| path.extension())
            .and_then(|ext| ext.to_str())
            .and_then(Delimiter::from_extension)
    }
}

/// Build the scan config, detecting the delimiter when the settings ask for it
///
/// Detection prefers the file extension and falls back to counting candidate
/// characters in the first records of `content`. Showing whitespace glyphs
/// turns on space marking so spaces get the whitespace color.
pub fn resolve_scan_config(
    config: &ViewerConfig,
    extension: Option<Delimiter>,
    content: &str,
) -> Result<ScanConfig, ConfigError> {
    let fallback = if config.scan.wants_detection() {
        let delimiter = extension.unwrap_or_else(|| detect_delimiter(content));
        tracing::debug!("Detected delimiter {:?}", delimiter);
        Some(delimiter.char())
    } else {
        None
    };
    let scan = config.scan.resolve(fallback)?;
    Ok(if config.show_whitespace {
        scan.with_mark_whitespace(true)
    } else {
        scan
    })
}

/// Decode input bytes, replacing invalid UTF-8 instead of rejecting the file
pub fn decode_input(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            let text = String::from_utf8_lossy(e.as_bytes()).into_owned();
            tracing::warn!(
                "Input is not valid UTF-8 (first bad byte at offset {}), invalid sequences replaced",
                e.utf8_error().valid_up_to()
            );
            text
        }
    }
}
