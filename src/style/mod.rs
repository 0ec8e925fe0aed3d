//! # Style System
//!
//! The small set of typed style values the layout engine works with: colors,
//! font weight and text alignment. Block styles arrive as loosely-typed editor
//! JSON; everything optional here has an explicit default so the engine never
//! deals with "maybe a property" at layout time.

use serde::{Deserialize, Serialize};

/// An RGB color with components normalized to 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// A neutral gray where all components equal `level`.
    pub fn gray(level: f64) -> Self {
        Self::rgb(level, level, level)
    }

    /// Resolve a `#RGB` or `#RRGGBB` hex string. The leading `#` is optional.
    ///
    /// Anything else (wrong length, non-hex digits, empty) resolves to black.
    /// This never fails: a bad color in one block must not stop the document.
    pub fn hex(hex: &str) -> Self {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Color::BLACK;
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).unwrap_or(0);
        let (r, g, b) = match hex.len() {
            3 => (
                channel(&hex[0..1].repeat(2)),
                channel(&hex[1..2].repeat(2)),
                channel(&hex[2..3].repeat(2)),
            ),
            6 => (
                channel(&hex[0..2]),
                channel(&hex[2..4]),
                channel(&hex[4..6]),
            ),
            _ => return Color::BLACK,
        };
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Resolve an optional hex string; `None` is black.
    pub fn from_optional_hex(hex: Option<&str>) -> Self {
        hex.map(Color::hex).unwrap_or(Color::BLACK)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Font weight. The engine only distinguishes a regular and a bold face:
/// `"bold"` selects the bold face, any other tag is normal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl From<String> for FontWeight {
    fn from(tag: String) -> Self {
        if tag.trim().eq_ignore_ascii_case("bold") {
            FontWeight::Bold
        } else {
            FontWeight::Normal
        }
    }
}

impl From<FontWeight> for String {
    fn from(weight: FontWeight) -> Self {
        match weight {
            FontWeight::Normal => "normal".to_string(),
            FontWeight::Bold => "bold".to_string(),
        }
    }
}

/// Horizontal alignment of a line within its column. Unknown tags
/// (including `"justify"`) align left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl From<String> for TextAlign {
    fn from(tag: String) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "center" => TextAlign::Center,
            "right" => TextAlign::Right,
            _ => TextAlign::Left,
        }
    }
}

impl From<TextAlign> for String {
    fn from(align: TextAlign) -> Self {
        match align {
            TextAlign::Left => "left".to_string(),
            TextAlign::Center => "center".to_string(),
            TextAlign::Right => "right".to_string(),
        }
    }
}
