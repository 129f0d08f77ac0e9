//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use csvtint::scan::{scan, ScanConfig, StyleCategory};

/// Scan and collect `(category, text)` pairs
pub fn runs<'a>(text: &'a str, config: &ScanConfig) -> Vec<(StyleCategory, &'a str)> {
    scan(text, config).map(|r| (r.category, r.text)).collect()
}

/// Comma, double quote, no escape
pub fn rfc4180() -> ScanConfig {
    ScanConfig::default()
}

/// Comma, double quote, backslash escape
pub fn backslash_escaped() -> ScanConfig {
    ScanConfig::default()
        .with_escape(Some('\\'))
        .expect("backslash escape is valid")
}

/// Concatenate run texts back into a string
pub fn reassemble(text: &str, config: &ScanConfig) -> String {
    scan(text, config).map(|r| r.text).collect()
}
