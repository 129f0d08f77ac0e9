//! Minimal RTF output
//!
//! Produces a single-font document with a color table, `\cfN` switches and
//! `\par` paragraph breaks. Text outside printable ASCII is written as
//! `\uN?` escapes over UTF-16 code units.

use super::{DisplayOptions, Markup, Palette};
use crate::theme::Color;

#[derive(Debug, Clone, Copy, Default)]
pub struct RtfMarkup;

impl RtfMarkup {
    fn push_escaped(ch: char, out: &mut String) {
        match ch {
            '\\' => out.push_str("\\\\"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\t' => out.push_str("\\tab "),
            ' '..='~' => out.push(ch),
            _ => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    // RTF takes signed 16-bit values
                    out.push_str(&format!("\\u{}?", *unit as i16));
                }
            }
        }
    }
}

impl Markup for RtfMarkup {
    fn header(&self, palette: &Palette, options: &DisplayOptions, out: &mut String) {
        let font: String = options
            .font_name
            .chars()
            .filter(|c| !matches!(c, '\\' | '{' | '}' | ';'))
            .collect();
        // \fs is in half-points
        let half_points = (options.font_size * 2.0).round().max(1.0) as u32;

        out.push_str("{\\rtf1\\ansi\\deff0");
        out.push_str(&format!("{{\\fonttbl{{\\f0\\fmodern {};}}}}", font));
        // Index 0 is the "auto" color, so slot N is \cf(N+1). The
        // background, if any, follows the category colors.
        let background = palette.background();
        out.push_str("{\\colortbl ;");
        for color in palette.colors().iter().chain(background.iter()) {
            out.push_str(&format!(
                "\\red{}\\green{}\\blue{};",
                color.r, color.g, color.b
            ));
        }
        out.push_str("}\n");
        out.push_str(&format!("\\f0\\fs{} ", half_points));
        if background.is_some() {
            out.push_str(&format!("\\highlight{} ", palette.colors().len() + 1));
        }
    }

    fn set_color(&self, slot: usize, _color: Color, out: &mut String) {
        out.push_str(&format!("\\cf{} ", slot + 1));
    }

    fn text(&self, text: &str, out: &mut String) {
        for ch in text.chars() {
            Self::push_escaped(ch, out);
        }
    }

    fn line_break(&self, out: &mut String) {
        out.push_str("\\par\n");
    }

    fn footer(&self, out: &mut String) {
        out.push('}');
    }
}
