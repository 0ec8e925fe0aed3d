//! Advance widths for the standard Helvetica faces.
//!
//! Widths are in 1/1000 em, taken from the Adobe core font AFM files.
//! Printable ASCII is a dense table; a handful of WinAnsi punctuation
//! characters used in real documents (bullets, dashes, curly quotes) are
//! looked up separately. Anything else has no width here and is reported
//! as unsupported so the caller can fall back.

/// Helvetica, U+0020..=U+007E.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Helvetica-Bold, U+0020..=U+007E.
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

/// Width table for one standard face.
#[derive(Debug, Clone, Copy)]
pub struct StandardFontMetrics {
    ascii: &'static [u16; 95],
    bold: bool,
}

pub const HELVETICA: StandardFontMetrics = StandardFontMetrics {
    ascii: &HELVETICA_ASCII,
    bold: false,
};

pub const HELVETICA_BOLD: StandardFontMetrics = StandardFontMetrics {
    ascii: &HELVETICA_BOLD_ASCII,
    bold: true,
};

impl StandardFontMetrics {
    /// Advance width of `ch` in 1/1000 em, if this face can draw it.
    pub fn advance(&self, ch: char) -> Option<u16> {
        let code = ch as u32;
        if (0x20..=0x7E).contains(&code) {
            return Some(self.ascii[(code - 0x20) as usize]);
        }
        let width = match (ch, self.bold) {
            ('\u{00A0}', _) => 278,
            ('\u{2022}', _) => 350,
            ('\u{2013}', _) => 556,
            ('\u{2014}', _) => 1000,
            ('\u{2026}', _) => 1000,
            ('\u{2018}' | '\u{2019}', false) => 222,
            ('\u{2018}' | '\u{2019}', true) => 278,
            ('\u{201C}' | '\u{201D}', false) => 333,
            ('\u{201C}' | '\u{201D}', true) => 500,
            _ => return None,
        };
        Some(width)
    }

    /// Width of `ch` at `font_size` in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> Option<f64> {
        self.advance(ch).map(|w| w as f64 / 1000.0 * font_size)
    }
}
