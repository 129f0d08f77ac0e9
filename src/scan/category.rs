//! Style categories assigned by the scanner

use serde::Serialize;

/// Classification of a span of delimited text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleCategory {
    /// Field separator outside of quotes
    Delimiter,
    /// Opening or closing quote character
    QuoteMark,
    /// Anything between an opening and closing quote
    QuotedContent,
    /// Unquoted field text
    PlainContent,
    /// A space, only when whitespace marking is on
    Whitespace,
    /// CR, LF, CRLF or LFCR
    LineBreak,
    /// A tab that is not the delimiter, only when tab marking is on
    ControlChar,
    /// Anything outside printable ASCII
    NonPrintable,
    /// A line starting with the configured comment character
    Comment,
}

impl StyleCategory {
    pub const COUNT: usize = 9;

    /// All categories, in declaration order
    pub const ALL: [StyleCategory; Self::COUNT] = [
        StyleCategory::Delimiter,
        StyleCategory::QuoteMark,
        StyleCategory::QuotedContent,
        StyleCategory::PlainContent,
        StyleCategory::Whitespace,
        StyleCategory::LineBreak,
        StyleCategory::ControlChar,
        StyleCategory::NonPrintable,
        StyleCategory::Comment,
    ];

    /// Stable lowercase name used in logs and JSON dumps
    pub fn name(self) -> &'static str {
        match self {
            StyleCategory::Delimiter => "delimiter",
            StyleCategory::QuoteMark => "quote_mark",
            StyleCategory::QuotedContent => "quoted_content",
            StyleCategory::PlainContent => "plain_content",
            StyleCategory::Whitespace => "whitespace",
            StyleCategory::LineBreak => "line_break",
            StyleCategory::ControlChar => "control_char",
            StyleCategory::NonPrintable => "non_printable",
            StyleCategory::Comment => "comment",
        }
    }

    /// Whether adjacent pieces of this category fold into one run.
    /// Each line terminator stays its own run so consumers can count lines.
    pub fn merges(self) -> bool {
        !matches!(self, StyleCategory::LineBreak)
    }
}

impl std::fmt::Display for StyleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
