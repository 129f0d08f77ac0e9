//! Delimited text scanner
//!
//! Classifies CSV/TSV/PSV text into styled runs for highlighting:
//! - Quote state tracking (delimiters inside quotes are content)
//! - Doubled-quote and escape-character handling
//! - CRLF/LFCR folding into one line break
//! - Optional whitespace marking and line comments
//!
//! ## Architecture
//!
//! ```text
//! &str + ScanConfig → Scanner (Iterator<Item = StyledRun>) → emit::emit
//! ```
//!
//! Concatenating the text of every run reproduces the input exactly.

mod category;
mod config;
mod scanner;

pub use category::StyleCategory;
pub use config::{detect_delimiter, ConfigError, Delimiter, ScanConfig, ScanSettings};
pub use scanner::{scan, scan_all, Scanner, StyledRun};
