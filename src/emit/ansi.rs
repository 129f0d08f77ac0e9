//! 24-bit ANSI terminal output

use super::{DisplayOptions, Markup, Palette};
use crate::theme::Color;

const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiMarkup;

impl Markup for AnsiMarkup {
    fn header(&self, palette: &Palette, _options: &DisplayOptions, out: &mut String) {
        if let Some(bg) = palette.background() {
            out.push_str(&format!("\x1b[48;2;{};{};{}m", bg.r, bg.g, bg.b));
        }
    }

    fn set_color(&self, _slot: usize, color: Color, out: &mut String) {
        out.push_str(&format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b));
    }

    fn text(&self, text: &str, out: &mut String) {
        out.push_str(text);
    }

    fn line_break(&self, out: &mut String) {
        out.push('\n');
    }

    fn footer(&self, out: &mut String) {
        out.push_str(RESET);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truecolor_sequence() {
        let mut out = String::new();
        AnsiMarkup.set_color(3, Color::rgb(0xC5, 0x86, 0xC0), &mut out);
        assert_eq!(out, "\x1b[38;2;197;134;192m");
    }

    #[test]
    fn test_header_sets_background() {
        let mut out = String::new();
        AnsiMarkup.header(&Palette::new(|_| Color::default()), &DisplayOptions::default(), &mut out);
        assert!(out.is_empty());

        let palette =
            Palette::new(|_| Color::default()).with_background(Some(Color::rgb(0x1E, 0x1E, 0x1E)));
        AnsiMarkup.header(&palette, &DisplayOptions::default(), &mut out);
        assert_eq!(out, "\x1b[48;2;30;30;30m");
    }

    #[test]
    fn test_footer_resets() {
        let mut out = String::new();
        AnsiMarkup.footer(&mut out);
        assert_eq!(out, RESET);
    }
}
