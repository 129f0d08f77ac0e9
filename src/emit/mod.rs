//! Styled document emitter
//!
//! Turns scanned runs into a single formatted document. The emitter owns
//! the target-independent parts (palette slots, color-switch merging, glyph
//! substitution, control character placeholders) and delegates syntax to a
//! [`Markup`] implementation.

mod ansi;
mod rtf;

pub use ansi::AnsiMarkup;
pub use rtf::RtfMarkup;

use crate::scan::{scan, ScanConfig, StyleCategory, StyledRun};
use crate::theme::{Color, Theme};

/// Glyph drawn for each space when whitespace is shown
pub const SPACE_GLYPH: char = '·';
/// Glyph drawn for each tab when whitespace is shown
pub const TAB_GLYPH: char = '→';
/// Glyph drawn before each line break when whitespace is shown
pub const LINE_BREAK_GLYPH: char = '¶';

/// Rendering options independent of the scan
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOptions {
    /// Substitute visible glyphs for spaces, tabs and line breaks
    pub show_whitespace: bool,
    /// Font size in points
    pub font_size: f32,
    /// Font family for markups that carry one
    pub font_name: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_whitespace: false,
            font_size: 10.0,
            font_name: "Consolas".to_string(),
        }
    }
}

/// Distinct colors plus the slot each category resolves to
///
/// Categories that share a color share a slot, so the emitter can skip
/// redundant color switches between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
    slots: [usize; StyleCategory::COUNT],
    background: Option<Color>,
}

impl Palette {
    pub fn new(mut color_for: impl FnMut(StyleCategory) -> Color) -> Self {
        let mut colors = Vec::new();
        let mut slots = [0; StyleCategory::COUNT];

        for category in StyleCategory::ALL {
            let color = color_for(category);
            let slot = match colors.iter().position(|c| *c == color) {
                Some(slot) => slot,
                None => {
                    colors.push(color);
                    colors.len() - 1
                }
            };
            slots[category as usize] = slot;
        }

        Self {
            colors,
            slots,
            background: None,
        }
    }

    /// Document background, drawn by markups that support one
    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Distinct colors, indexed by slot
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn slot(&self, category: StyleCategory) -> usize {
        self.slots[category as usize]
    }

    pub fn color(&self, category: StyleCategory) -> Color {
        self.colors[self.slot(category)]
    }
}

/// Target document syntax
pub trait Markup {
    /// Document preamble (color table, font, ...)
    fn header(&self, palette: &Palette, options: &DisplayOptions, out: &mut String);

    /// Switch the current color to palette slot `slot`
    fn set_color(&self, slot: usize, color: Color, out: &mut String);

    /// Literal text; the markup escapes whatever its syntax reserves
    fn text(&self, text: &str, out: &mut String);

    /// Paragraph break
    fn line_break(&self, out: &mut String);

    /// Document epilogue
    fn footer(&self, out: &mut String);
}

/// Render runs into a document
pub fn emit<'a, M: Markup + ?Sized>(
    runs: impl IntoIterator<Item = StyledRun<'a>>,
    palette: &Palette,
    options: &DisplayOptions,
    markup: &M,
) -> String {
    let mut out = String::new();
    let mut current_slot = None;
    let mut switches = 0usize;
    let mut scratch = String::new();

    markup.header(palette, options, &mut out);

    for run in runs {
        // A bare paragraph break draws nothing, so it needs no color
        let invisible = run.category == StyleCategory::LineBreak && !options.show_whitespace;
        let slot = palette.slot(run.category);
        if !invisible && current_slot != Some(slot) {
            markup.set_color(slot, palette.colors()[slot], &mut out);
            current_slot = Some(slot);
            switches += 1;
        }

        if run.category == StyleCategory::LineBreak {
            if options.show_whitespace {
                markup.text(LINE_BREAK_GLYPH.encode_utf8(&mut [0; 4]), &mut out);
            }
            markup.line_break(&mut out);
            continue;
        }

        scratch.clear();
        visible_text(&run, options, &mut scratch);
        markup.text(&scratch, &mut out);
    }

    markup.footer(&mut out);

    tracing::debug!(
        colors = palette.colors().len(),
        switches,
        bytes = out.len(),
        "emitted styled document"
    );
    out
}

/// Scan and emit in one step
pub fn highlight<M: Markup + ?Sized>(
    text: &str,
    config: &ScanConfig,
    theme: &Theme,
    options: &DisplayOptions,
    markup: &M,
) -> String {
    emit(scan(text, config), &theme.palette(), options, markup)
}

/// Text to draw for a run, with glyphs and control placeholders applied
///
/// Glyphs replace every space and tab when whitespace is shown, whatever
/// the run's category, so tabs inside field content are visible as well.
fn visible_text(run: &StyledRun<'_>, options: &DisplayOptions, out: &mut String) {
    for ch in run.text.chars() {
        match ch {
            ' ' if options.show_whitespace => out.push(SPACE_GLYPH),
            '\t' if options.show_whitespace => out.push(TAB_GLYPH),
            _ => push_visible(ch, out),
        }
    }
}

/// Push `ch`, replacing control characters other than tab with a numeric
/// placeholder such as `<U+0001>`
fn push_visible(ch: char, out: &mut String) {
    if ch.is_control() && ch != '\t' {
        out.push_str(&format!("<U+{:04X}>", ch as u32));
    } else {
        out.push(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Markup that makes structure visible for assertions
    struct Plain;

    impl Markup for Plain {
        fn header(&self, palette: &Palette, _: &DisplayOptions, out: &mut String) {
            out.push_str(&format!("[{}]", palette.colors().len()));
        }

        fn set_color(&self, slot: usize, _: Color, out: &mut String) {
            out.push_str(&format!("<{}>", slot));
        }

        fn text(&self, text: &str, out: &mut String) {
            out.push_str(text);
        }

        fn line_break(&self, out: &mut String) {
            out.push('|');
        }

        fn footer(&self, out: &mut String) {
            out.push('$');
        }
    }

    fn two_tone() -> Palette {
        Palette::new(|category| match category {
            StyleCategory::Delimiter => Color::rgb(0, 0, 255),
            _ => Color::rgb(0, 0, 0),
        })
    }

    fn render(text: &str, options: &DisplayOptions) -> String {
        let config = ScanConfig::default().with_mark_whitespace(true);
        emit(scan(text, &config), &two_tone(), options, &Plain)
    }

    #[test]
    fn test_palette_dedups_colors() {
        let palette = two_tone();
        assert_eq!(palette.colors().len(), 2);
        assert_eq!(
            palette.slot(StyleCategory::QuoteMark),
            palette.slot(StyleCategory::PlainContent)
        );
        assert_ne!(
            palette.slot(StyleCategory::Delimiter),
            palette.slot(StyleCategory::PlainContent)
        );
    }

    #[test]
    fn test_same_color_runs_share_one_switch() {
        // QuoteMark, QuotedContent and PlainContent all resolve to slot 1
        let out = render("\"a\"b,c", &DisplayOptions::default());
        assert_eq!(out, "[2]<1>\"a\"b<0>,<1>c$");
    }

    #[test]
    fn test_whitespace_glyphs() {
        let options = DisplayOptions {
            show_whitespace: true,
            ..Default::default()
        };
        let out = render("a  b\tc\n", &options);
        assert_eq!(out, "[2]<1>a··b→c¶|$");
    }

    #[test]
    fn test_glyphs_without_scan_marking() {
        let options = DisplayOptions {
            show_whitespace: true,
            ..Default::default()
        };
        let out = emit(
            scan("a b\tc", &ScanConfig::default()),
            &two_tone(),
            &options,
            &Plain,
        );
        assert_eq!(out, "[2]<1>a·b→c$");
    }

    #[test]
    fn test_palette_background() {
        let palette = two_tone();
        assert_eq!(palette.background(), None);
        let palette = palette.with_background(Some(Color::rgb(1, 2, 3)));
        assert_eq!(palette.background(), Some(Color::rgb(1, 2, 3)));
        // The background does not take a category slot
        assert_eq!(palette.colors().len(), 2);
    }

    #[test]
    fn test_hidden_whitespace_is_literal() {
        let out = render("a  b\tc\r\nd", &DisplayOptions::default());
        assert_eq!(out, "[2]<1>a  b\tc|d$");
    }

    #[test]
    fn test_control_char_placeholder() {
        let out = render("a\u{1}b", &DisplayOptions::default());
        assert_eq!(out, "[2]<1>a<U+0001>b$");
        assert!(!out.contains('\u{1}'));
    }

    #[test]
    fn test_printable_non_ascii_is_kept() {
        let out = render("é", &DisplayOptions::default());
        assert_eq!(out, "[2]<1>é$");
    }

    #[test]
    fn test_empty_input_has_header_and_footer_only() {
        assert_eq!(render("", &DisplayOptions::default()), "[2]$");
    }
}
