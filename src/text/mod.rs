//! # Text Layout
//!
//! Normalization and greedy word wrapping.
//!
//! Block content comes straight from an editor textarea, so it carries
//! newlines, tabs and the occasional stray control character. All of those
//! collapse to single spaces: a block is one flowing paragraph. Lines are
//! then filled word by word against real measured widths.

use crate::font::{measure_or_estimate, FontRef, TextMeasurer};

/// Replace every control character with a space, collapse ASCII whitespace
/// runs to one space, and trim. A non-breaking space is not whitespace here:
/// it stays inside its word.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect::<String>()
        .split_ascii_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Greedy line breaker bounded by a maximum width.
pub struct LineWrapper<'a> {
    measurer: &'a dyn TextMeasurer,
}

impl<'a> LineWrapper<'a> {
    pub fn new(measurer: &'a dyn TextMeasurer) -> Self {
        Self { measurer }
    }

    /// Break `text` into lines no wider than `max_width`.
    ///
    /// A word is appended to the current line while `line + " " + word`
    /// still fits; the first word that doesn't starts the next line. A
    /// single word wider than `max_width` sits alone on its line, unsplit.
    ///
    /// Text that normalizes to nothing yields exactly one empty line, so an
    /// intentionally blank paragraph still takes up vertical space.
    pub fn wrap(&self, text: &str, font: &FontRef, size: f64, max_width: f64) -> Vec<String> {
        let normalized = normalize_text(text);
        if normalized.is_empty() {
            return vec![String::new()];
        }

        let mut lines = Vec::new();
        let mut words = normalized.split(' ');
        let mut current = words.next().unwrap_or_default().to_string();

        for word in words {
            let candidate = format!("{} {}", current, word);
            let width = measure_or_estimate(self.measurer, &candidate, font, size);
            if width <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);

        lines.retain(|line| !line.is_empty());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontContext;

    fn wrap(text: &str, max_width: f64) -> Vec<String> {
        let ctx = FontContext::new();
        LineWrapper::new(&ctx).wrap(text, &FontRef::helvetica(), 12.0, max_width)
    }

    fn width(text: &str) -> f64 {
        let ctx = FontContext::new();
        ctx.measure(text, &FontRef::helvetica(), 12.0).unwrap()
    }

    #[test]
    fn normalize_collapses_control_chars() {
        assert_eq!(normalize_text("  a\nb\t\tc\r\n d \u{7}e "), "a b c d e");
        assert_eq!(normalize_text("\n\t \r"), "");
    }

    #[test]
    fn normalize_keeps_non_breaking_space() {
        assert_eq!(normalize_text("10\u{A0}kg  of\tflour"), "10\u{A0}kg of flour");
    }

    #[test]
    fn non_breaking_space_holds_words_together() {
        let lines = wrap("mass 10\u{A0}kg", width("mass 10"));
        assert_eq!(lines, vec!["mass", "10\u{A0}kg"]);
        assert!((width("10\u{A0}kg") - width("10 kg")).abs() < 1e-9);
    }

    #[test]
    fn single_line_when_it_fits() {
        assert_eq!(wrap("Hello world", 500.0), vec!["Hello world"]);
    }

    #[test]
    fn breaks_at_word_boundary() {
        let lines = wrap("The quick brown fox jumps over the lazy dog", 100.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(width(line) <= 100.0, "{line:?} too wide");
        }
        assert_eq!(lines.join(" "), "The quick brown fox jumps over the lazy dog");
    }

    #[test]
    fn newlines_do_not_force_breaks() {
        assert_eq!(wrap("one\ntwo\nthree", 500.0), vec!["one two three"]);
    }

    #[test]
    fn blank_text_yields_one_empty_line() {
        assert_eq!(wrap("", 100.0), vec![String::new()]);
        assert_eq!(wrap(" \n\t ", 100.0), vec![String::new()]);
    }

    #[test]
    fn oversized_word_sits_alone() {
        let lines = wrap("a Supercalifragilisticexpialidocious b", 40.0);
        assert_eq!(lines, vec!["a", "Supercalifragilisticexpialidocious", "b"]);
    }

    #[test]
    fn lines_fit_when_width_admits_widest_word() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
                    tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam";
        let widest = normalize_text(text)
            .split(' ')
            .map(width)
            .fold(0.0, f64::max);
        for extra in [0.0, 5.0, 20.0, 60.0, 150.0, 400.0] {
            let max_width = widest + extra;
            for line in wrap(text, max_width) {
                assert!(width(&line) <= max_width, "{line:?} exceeds {max_width}");
            }
        }
    }

    #[test]
    fn rewrapping_is_idempotent() {
        let text = "Creative product designer with 8+ years crafting user-centered digital \
                    experiences. Specialized in design systems, mobile UX, and cross-platform \
                    product design.";
        for max_width in [80.0, 120.0, 200.0, 333.0] {
            let first = wrap(text, max_width);
            let second = wrap(&first.join(" "), max_width);
            assert_eq!(first, second, "boundaries moved at width {max_width}");
        }
    }

    #[test]
    fn unmeasurable_text_still_wraps() {
        // No Helvetica widths for CJK: the estimate (6pt per char at 12pt) drives breaks.
        let lines = wrap("日本語 日本語 日本語", 40.0);
        assert_eq!(lines, vec!["日本語", "日本語", "日本語"]);
    }
}
