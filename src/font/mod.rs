//! # Font Management
//!
//! Text measurement for layout. The engine only ever asks one question of a
//! font: "how wide is this string at this size?". That question is the
//! [`TextMeasurer`] trait, so a caller with a different font backend (a
//! shaping engine, a browser canvas) can swap in its own metrics.
//!
//! The built-in measurer is [`FontContext`]: the standard Helvetica faces
//! plus any TrueType/OpenType faces registered at runtime via ttf-parser.
//! A `FontContext` is never mutated during layout, so one instance can be
//! shared by concurrent layout calls.

pub mod metrics;

use std::collections::HashMap;
use std::fmt;

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::FolioError;
use crate::style::FontWeight;
pub use metrics::StandardFontMetrics;

/// Average glyph width, in em, used when a string cannot be measured.
pub const FALLBACK_GLYPH_EM: f64 = 0.5;

/// A reference to a font face: family plus weight.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontRef {
    pub family: String,
    pub weight: FontWeight,
}

impl FontRef {
    pub fn new(family: &str, weight: FontWeight) -> Self {
        Self {
            family: family.to_string(),
            weight,
        }
    }

    pub fn helvetica() -> Self {
        Self::new("Helvetica", FontWeight::Normal)
    }

    pub fn helvetica_bold() -> Self {
        Self::new("Helvetica", FontWeight::Bold)
    }

    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }
}

impl fmt::Display for FontRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.weight {
            FontWeight::Normal => write!(f, "{}", self.family),
            FontWeight::Bold => write!(f, "{}-Bold", self.family),
        }
    }
}

/// Why a string could not be measured.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    #[error("character {ch:?} is not available in {font}")]
    UnsupportedChar { ch: char, font: String },
    #[error("font {font} has no glyph for {ch:?}")]
    MissingGlyph { ch: char, font: String },
    #[error("font size must be positive and finite, got {0}")]
    InvalidSize(f64),
}

/// Width measurement capability used by line wrapping and alignment.
pub trait TextMeasurer: Send + Sync {
    /// Rendered width of `text` in points.
    fn measure(&self, text: &str, font: &FontRef, size: f64) -> Result<f64, MeasureError>;
}

/// Width estimate used when real metrics are unavailable.
pub fn estimate_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * FALLBACK_GLYPH_EM * size
}

/// Measure `text`, falling back to [`estimate_width`] on failure.
///
/// Failures are logged and never propagated: one unmeasurable string must
/// not abort the document.
pub fn measure_or_estimate(
    measurer: &dyn TextMeasurer,
    text: &str,
    font: &FontRef,
    size: f64,
) -> f64 {
    match measurer.measure(text, font, size) {
        Ok(width) => width,
        Err(e) => {
            log::warn!("measuring {:?} in {}: {}; using estimate", text, font, e);
            estimate_width(text, size)
        }
    }
}

/// Parsed metrics from a TrueType/OpenType font via ttf-parser.
#[derive(Debug, Clone)]
pub struct CustomFontMetrics {
    pub units_per_em: u16,
    pub advance_widths: HashMap<char, u16>,
}

impl CustomFontMetrics {
    /// Parse metrics from font data. Covers the Basic Multilingual Plane,
    /// which is everything a block editor can type.
    pub fn from_font_data(data: &[u8]) -> Option<Self> {
        let face = ttf_parser::Face::parse(data, 0).ok()?;
        let units_per_em = face.units_per_em();
        if units_per_em == 0 {
            return None;
        }

        let mut advance_widths = HashMap::new();
        for code in 0x20u32..=0xFFFF {
            if let Some(ch) = char::from_u32(code) {
                if let Some(glyph_id) = face.glyph_index(ch) {
                    let advance = face.glyph_hor_advance(glyph_id).unwrap_or(0);
                    advance_widths.insert(ch, advance);
                }
            }
        }

        Some(CustomFontMetrics {
            units_per_em,
            advance_widths,
        })
    }

    /// Advance width of `ch` in points, if the face has a glyph for it.
    pub fn char_width(&self, ch: char, font_size: f64) -> Option<f64> {
        self.advance_widths
            .get(&ch)
            .map(|w| (*w as f64 / self.units_per_em as f64) * font_size)
    }
}

/// Font data backing a [`FontRef`].
#[derive(Debug, Clone)]
pub enum FontData {
    /// One of the standard PDF faces. No embedding needed.
    Standard(StandardFontMetrics),
    /// A TrueType/OpenType face registered at runtime.
    Custom(CustomFontMetrics),
}

/// Maps family + weight to font data.
#[derive(Debug, Clone)]
pub struct FontRegistry {
    fonts: HashMap<FontRef, FontData>,
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry {
    pub fn new() -> Self {
        let mut fonts = HashMap::new();
        fonts.insert(
            FontRef::helvetica(),
            FontData::Standard(metrics::HELVETICA),
        );
        fonts.insert(
            FontRef::helvetica_bold(),
            FontData::Standard(metrics::HELVETICA_BOLD),
        );
        Self { fonts }
    }

    /// Look up a face, falling back to Helvetica of the same weight.
    pub fn resolve(&self, font: &FontRef) -> &FontData {
        if let Some(data) = self.fonts.get(font) {
            return data;
        }
        match font.weight {
            FontWeight::Bold => &HELVETICA_BOLD_DATA,
            FontWeight::Normal => &HELVETICA_DATA,
        }
    }

    /// Register a custom face from raw TTF/OTF bytes.
    pub fn register(&mut self, family: &str, weight: FontWeight, data: &[u8]) -> Result<(), FolioError> {
        let metrics = CustomFontMetrics::from_font_data(data).ok_or_else(|| {
            FolioError::Font(format!("could not parse font data for family {family:?}"))
        })?;
        self.fonts
            .insert(FontRef::new(family, weight), FontData::Custom(metrics));
        Ok(())
    }

    pub fn contains(&self, font: &FontRef) -> bool {
        self.fonts.contains_key(font)
    }
}

static HELVETICA_DATA: FontData = FontData::Standard(metrics::HELVETICA);
static HELVETICA_BOLD_DATA: FontData = FontData::Standard(metrics::HELVETICA_BOLD);

/// The default [`TextMeasurer`]: a read-only font registry.
#[derive(Debug, Clone, Default)]
pub struct FontContext {
    registry: FontRegistry,
}

impl FontContext {
    pub fn new() -> Self {
        Self {
            registry: FontRegistry::new(),
        }
    }

    /// Register a font supplied as base64 or a base64 data URI.
    pub fn register_base64(
        &mut self,
        family: &str,
        weight: FontWeight,
        src: &str,
    ) -> Result<(), FolioError> {
        let encoded = match src.split_once(";base64,") {
            Some((_, payload)) => payload,
            None => src,
        };
        let data = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| FolioError::Font(format!("font {family:?} is not valid base64: {e}")))?;
        self.registry.register(family, weight, &data)
    }

    /// Access the underlying font registry.
    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }
}

impl TextMeasurer for FontContext {
    fn measure(&self, text: &str, font: &FontRef, size: f64) -> Result<f64, MeasureError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(MeasureError::InvalidSize(size));
        }
        let mut width = 0.0;
        match self.registry.resolve(font) {
            FontData::Standard(std_font) => {
                for ch in text.chars() {
                    width += std_font.char_width(ch, size).ok_or_else(|| {
                        MeasureError::UnsupportedChar {
                            ch,
                            font: font.to_string(),
                        }
                    })?;
                }
            }
            FontData::Custom(m) => {
                for ch in text.chars() {
                    width += m.char_width(ch, size).ok_or_else(|| MeasureError::MissingGlyph {
                        ch,
                        font: font.to_string(),
                    })?;
                }
            }
        }
        Ok(width)
    }
}
