//! Scanner configuration
//!
//! `ScanSettings` is the loose, string-typed form read from YAML or the
//! command line. `ScanConfig` is the validated form the scanner consumes;
//! holding one means the characters are known not to collide.

use serde::{Deserialize, Serialize};

use super::category::StyleCategory;
use super::scanner::scan;

/// Common field separators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl Delimiter {
    /// Ties in detection go to the earliest entry
    const DETECTION_ORDER: [Delimiter; 4] = [
        Delimiter::Tab,
        Delimiter::Pipe,
        Delimiter::Semicolon,
        Delimiter::Comma,
    ];

    /// Get the character for this delimiter
    pub fn char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
        }
    }

    /// Detect delimiter from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(Delimiter::Comma),
            "tsv" | "tab" => Some(Delimiter::Tab),
            "psv" => Some(Delimiter::Pipe),
            _ => None,
        }
    }
}

/// Number of records sampled by [`detect_delimiter`]
const DETECTION_RECORDS: usize = 5;

/// Detect delimiter by counting candidates in the first few records
///
/// Candidates inside double-quoted fields are ignored, and a line break
/// inside quotes does not end a record.
pub fn detect_delimiter(content: &str) -> Delimiter {
    let mut counts = [0usize; Delimiter::DETECTION_ORDER.len()];
    let mut records = 0;

    let mut scanner = scan(content, &ScanConfig::default());
    while let Some(run) = scanner.next() {
        match run.category {
            StyleCategory::LineBreak if !scanner.in_quote() => {
                records += 1;
                if records == DETECTION_RECORDS {
                    break;
                }
            }
            StyleCategory::Delimiter | StyleCategory::PlainContent => {
                for (count, delimiter) in counts.iter_mut().zip(Delimiter::DETECTION_ORDER) {
                    *count += run.text.matches(delimiter.char()).count();
                }
            }
            _ => {}
        }
    }

    let max = counts.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return Delimiter::Comma;
    }
    counts
        .iter()
        .zip(Delimiter::DETECTION_ORDER)
        .find_map(|(count, delimiter)| (*count == max).then_some(delimiter))
        .unwrap_or_default()
}

/// Error raised while building a `ScanConfig`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required character was not supplied
    Missing { field: &'static str },
    /// A setting held more than one character
    NotSingleChar { field: &'static str, value: String },
    /// Two roles were given the same character
    Conflict {
        first: &'static str,
        second: &'static str,
        ch: char,
    },
    /// CR and LF always mean "line break" and cannot be reassigned
    LineBreak { field: &'static str },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing { field } => write!(f, "{} character is required", field),
            ConfigError::NotSingleChar { field, value } => {
                write!(f, "{} must be a single character, got {:?}", field, value)
            }
            ConfigError::Conflict { first, second, ch } => {
                write!(f, "{} and {} cannot both be {:?}", first, second, ch)
            }
            ConfigError::LineBreak { field } => {
                write!(f, "{} cannot be a line break character", field)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validated scanner configuration
///
/// Construct with [`ScanConfig::new`] and the `with_*` builders. Every
/// builder re-validates, so an invalid combination never reaches the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    delimiter: char,
    quote: char,
    escape: Option<char>,
    line_comment: Option<char>,
    mark_whitespace: bool,
    mark_tabs: bool,
}

impl Default for ScanConfig {
    /// RFC 4180 style: comma, double quote, quote doubling only
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            escape: None,
            line_comment: None,
            mark_whitespace: false,
            mark_tabs: false,
        }
    }
}

impl ScanConfig {
    pub fn new(delimiter: char, quote: char) -> Result<Self, ConfigError> {
        let config = Self {
            delimiter,
            quote,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_escape(mut self, escape: Option<char>) -> Result<Self, ConfigError> {
        self.escape = escape;
        self.validate()?;
        Ok(self)
    }

    pub fn with_line_comment(mut self, line_comment: Option<char>) -> Result<Self, ConfigError> {
        self.line_comment = line_comment;
        self.validate()?;
        Ok(self)
    }

    /// Classify spaces as `Whitespace`. This is checked before the
    /// delimiter, so a space delimiter is marked as whitespace too.
    pub fn with_mark_whitespace(mut self, mark_whitespace: bool) -> Self {
        self.mark_whitespace = mark_whitespace;
        self
    }

    /// Classify tabs that are not the delimiter as `ControlChar` instead of
    /// field content
    pub fn with_mark_tabs(mut self, mark_tabs: bool) -> Self {
        self.mark_tabs = mark_tabs;
        self
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn quote(&self) -> char {
        self.quote
    }

    pub fn escape(&self) -> Option<char> {
        self.escape
    }

    pub fn line_comment(&self) -> Option<char> {
        self.line_comment
    }

    pub fn mark_whitespace(&self) -> bool {
        self.mark_whitespace
    }

    pub fn mark_tabs(&self) -> bool {
        self.mark_tabs
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let roles = [
            ("delimiter", Some(self.delimiter)),
            ("quote", Some(self.quote)),
            ("escape", self.escape),
            ("line comment", self.line_comment),
        ];

        for (field, ch) in roles {
            if matches!(ch, Some('\r' | '\n')) {
                return Err(ConfigError::LineBreak { field });
            }
        }

        // Escape may share the quote character (doubling convention); every
        // other pair must be distinct.
        for (i, (first, a)) in roles.iter().enumerate() {
            for (second, b) in &roles[i + 1..] {
                let (Some(a), Some(b)) = (a, b) else {
                    continue;
                };
                if a == b && !(*first == "quote" && *second == "escape") {
                    return Err(ConfigError::Conflict {
                        first: *first,
                        second: *second,
                        ch: *a,
                    });
                }
            }
        }

        Ok(())
    }
}

/// String-typed scan settings as they appear in config files and CLI flags
///
/// An empty delimiter means "detect from the file".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSettings {
    #[serde(default)]
    pub delimiter: String,
    #[serde(default = "default_quote")]
    pub quote: String,
    #[serde(default)]
    pub escape: String,
    #[serde(default)]
    pub line_comment: String,
    #[serde(default)]
    pub mark_whitespace: bool,
    #[serde(default)]
    pub mark_tabs: bool,
}

fn default_quote() -> String {
    "\"".to_string()
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            delimiter: String::new(),
            quote: default_quote(),
            escape: String::new(),
            line_comment: String::new(),
            mark_whitespace: false,
            mark_tabs: false,
        }
    }
}

impl ScanSettings {
    /// Resolve into a validated config
    ///
    /// `fallback_delimiter` is used when no delimiter is set, or when it is
    /// set to `auto`.
    pub fn resolve(&self, fallback_delimiter: Option<char>) -> Result<ScanConfig, ConfigError> {
        let delimiter = match parse_char("delimiter", &self.delimiter)? {
            Some(ch) => Some(ch),
            None => fallback_delimiter,
        }
        .ok_or(ConfigError::Missing { field: "delimiter" })?;
        let quote =
            parse_char("quote", &self.quote)?.ok_or(ConfigError::Missing { field: "quote" })?;

        ScanConfig::new(delimiter, quote)?
            .with_escape(parse_char("escape", &self.escape)?)?
            .with_line_comment(parse_char("line comment", &self.line_comment)?)
            .map(|config| {
                config
                    .with_mark_whitespace(self.mark_whitespace)
                    .with_mark_tabs(self.mark_tabs)
            })
    }

    /// True when the delimiter should be detected from the input
    pub fn wants_detection(&self) -> bool {
        self.delimiter.is_empty() || self.delimiter.eq_ignore_ascii_case("auto")
    }
}

/// Parse a one-character setting. Accepts `\t` and `tab` for the tab
/// character since a literal tab is awkward in YAML and shells.
fn parse_char(field: &'static str, value: &str) -> Result<Option<char>, ConfigError> {
    if value.is_empty() || value.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    if value == "\\t" || value.eq_ignore_ascii_case("tab") {
        return Ok(Some('\t'));
    }

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(Some(ch)),
        _ => Err(ConfigError::NotSingleChar {
            field,
            value: value.to_string(),
        }),
    }
}
