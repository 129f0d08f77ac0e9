//! Single-pass classifier over delimited text
//!
//! The scanner looks one character ahead (for CRLF pairs and doubled quotes)
//! and one character behind (for escaped quotes). It never fails on
//! malformed input: an unterminated quote simply runs to the end of the text.

use std::ops::Range;

use serde::Serialize;

use super::category::StyleCategory;
use super::config::ScanConfig;

/// A maximal span of text sharing one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledRun<'a> {
    pub category: StyleCategory,
    pub text: &'a str,
    /// Byte range of `text` within the scanned input
    #[serde(skip)]
    pub span: Range<usize>,
}

impl StyledRun<'_> {
    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}

/// A classified unit of one or two characters, not yet merged
#[derive(Debug, Clone, Copy)]
struct Piece {
    category: StyleCategory,
    start: usize,
    end: usize,
}

/// Per-scan mutable state
#[derive(Debug, Clone, Copy)]
struct ScanState {
    in_quote: bool,
    /// Last character consumed, whatever its category
    prev: Option<char>,
    at_line_start: bool,
    in_comment: bool,
}

impl Default for ScanState {
    fn default() -> Self {
        Self {
            in_quote: false,
            prev: None,
            at_line_start: true,
            in_comment: false,
        }
    }
}

impl ScanState {
    /// Classify `c` given the next character `next`.
    /// Returns the category and whether `next` was consumed as well.
    fn step(
        &mut self,
        c: char,
        next: Option<char>,
        config: &ScanConfig,
    ) -> (StyleCategory, bool) {
        let (category, pair) = self.classify(c, next, config);
        self.prev = match (pair, next) {
            (true, Some(second)) => Some(second),
            _ => Some(c),
        };
        (category, pair)
    }

    fn classify(
        &mut self,
        c: char,
        next: Option<char>,
        config: &ScanConfig,
    ) -> (StyleCategory, bool) {
        if c == '\r' || c == '\n' {
            let pair = matches!((c, next), ('\r', Some('\n')) | ('\n', Some('\r')));
            self.at_line_start = true;
            self.in_comment = false;
            return (StyleCategory::LineBreak, pair);
        }

        let at_line_start = std::mem::replace(&mut self.at_line_start, false);

        if self.in_comment {
            return (StyleCategory::Comment, false);
        }

        if at_line_start && !self.in_quote && config.line_comment() == Some(c) {
            self.in_comment = true;
            return (StyleCategory::Comment, false);
        }

        if config.mark_whitespace() && c == ' ' {
            return (StyleCategory::Whitespace, false);
        }

        if c == config.delimiter() && !self.in_quote {
            return (StyleCategory::Delimiter, false);
        }

        if c == config.quote() {
            if !self.in_quote {
                self.in_quote = true;
                return (StyleCategory::QuoteMark, false);
            }
            // Escape wins over doubling: `\""` is an escaped quote followed
            // by the closing quote. The lookbehind is the literal previous
            // character, so with escape == quote a quote right after any
            // quote (the opening one included) is content.
            if config.escape().is_some_and(|escape| self.prev == Some(escape)) {
                return (StyleCategory::QuotedContent, false);
            }
            if next == Some(config.quote()) {
                return (StyleCategory::QuotedContent, true);
            }
            self.in_quote = false;
            return (StyleCategory::QuoteMark, false);
        }

        let content = if self.in_quote {
            StyleCategory::QuotedContent
        } else {
            StyleCategory::PlainContent
        };

        if c == '\t' {
            if config.mark_tabs() {
                return (StyleCategory::ControlChar, false);
            }
            return (content, false);
        }

        if (' '..='\x7F').contains(&c) {
            return (content, false);
        }

        (StyleCategory::NonPrintable, false)
    }
}

/// Lazy iterator of styled runs over a text snapshot
///
/// Created by [`scan`]. The scanner holds no state beyond the current pass;
/// scanning the same text again yields the same runs.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    config: ScanConfig,
    pos: usize,
    state: ScanState,
    pending: Option<Piece>,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str, config: &ScanConfig) -> Self {
        Self {
            text,
            config: *config,
            pos: 0,
            state: ScanState::default(),
            pending: None,
        }
    }

    /// Whether the scan so far has an open quote
    pub fn in_quote(&self) -> bool {
        self.state.in_quote
    }

    fn next_piece(&mut self) -> Option<Piece> {
        let mut chars = self.text[self.pos..].chars();
        let c = chars.next()?;
        let next = chars.next();

        let start = self.pos;
        let (category, pair) = self.state.step(c, next, &self.config);
        self.pos += c.len_utf8();
        if pair {
            // `pair` is only ever set when `next` exists
            self.pos += next.map_or(0, char::len_utf8);
        }

        Some(Piece {
            category,
            start,
            end: self.pos,
        })
    }

    fn run(&self, piece: Piece) -> StyledRun<'a> {
        StyledRun {
            category: piece.category,
            text: &self.text[piece.start..piece.end],
            span: piece.start..piece.end,
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = StyledRun<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut current = match self.pending.take() {
            Some(piece) => piece,
            None => self.next_piece()?,
        };

        while current.category.merges() {
            let Some(piece) = self.next_piece() else {
                break;
            };
            if piece.category == current.category {
                current.end = piece.end;
            } else {
                self.pending = Some(piece);
                break;
            }
        }

        Some(self.run(current))
    }
}

/// Scan `text` lazily
pub fn scan<'a>(text: &'a str, config: &ScanConfig) -> Scanner<'a> {
    Scanner::new(text, config)
}

/// Scan `text` to completion
pub fn scan_all<'a>(text: &'a str, config: &ScanConfig) -> Vec<StyledRun<'a>> {
    let mut scanner = scan(text, config);
    let runs: Vec<_> = scanner.by_ref().collect();
    tracing::debug!(
        bytes = text.len(),
        runs = runs.len(),
        unterminated_quote = scanner.in_quote(),
        "scanned delimited text"
    );
    runs
}
