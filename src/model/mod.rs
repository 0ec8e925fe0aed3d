//! # Document Model
//!
//! The input representation for the layout engine. A request is a flat,
//! ordered list of content blocks plus a page/column configuration. This is
//! the shape a block editor naturally produces: every block is a styled run
//! of plain text tagged with what it is (heading, paragraph, ...).
//!
//! Page geometry lives here too. A page is described by a size tag and an
//! orientation, resolved to points once, and then validated into a
//! [`PageBox`] before any layout work begins.

use serde::{Deserialize, Serialize};

use crate::error::FolioError;
use crate::style::{FontWeight, TextAlign};

/// Points per millimetre (72 pt = 1 in = 25.4 mm).
pub const PT_PER_MM: f64 = 72.0 / 25.4;

/// Default inter-column gap in points.
pub const DEFAULT_COLUMN_GAP: f64 = 20.0;

/// Smallest page margin the engine will use, in points.
pub const MIN_MARGIN: f64 = 20.0;

/// Convert millimetres to points.
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * PT_PER_MM
}

/// A complete layout request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    /// The blocks to lay out, in reading order.
    pub content_blocks: Vec<ContentBlock>,

    /// Page size, orientation and column configuration.
    pub layout: LayoutConfig,

    /// Document-wide style settings.
    #[serde(default)]
    pub styles: DocumentStyles,

    /// Optional template tag. When present, a title line for the template
    /// is placed before the first block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Custom fonts to register before layout.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fonts: Vec<FontEntry>,
}

/// A custom font to register with the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontEntry {
    /// Font family name (e.g. "Inter").
    pub family: String,
    /// Base64-encoded font data, or a data URI (e.g. "data:font/ttf;base64,...").
    pub src: String,
    /// Which face of the family this is.
    #[serde(default)]
    pub weight: FontWeight,
}

/// Document-wide style settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Page margin in editor units. The effective margin in points is
    /// `max(margin * 0.75, 20)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<f64>,
}

impl DocumentStyles {
    /// The page margin in points.
    pub fn margin_pt(&self) -> f64 {
        (self.margin.unwrap_or(MIN_MARGIN) * 0.75).max(MIN_MARGIN)
    }
}

/// Page and column configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    #[serde(default)]
    pub page_size: PageSize,
    #[serde(default)]
    pub orientation: Orientation,
    /// Number of text columns. Must be at least 1.
    #[serde(default = "default_columns")]
    pub columns: u32,
    /// Gap between columns in points.
    #[serde(default = "default_gap")]
    pub column_gap: f64,
    /// How lines are balanced across columns.
    #[serde(default)]
    pub balance: BalanceMode,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            columns: 1,
            column_gap: DEFAULT_COLUMN_GAP,
            balance: BalanceMode::Fill,
        }
    }
}

fn default_columns() -> u32 {
    1
}

fn default_gap() -> f64 {
    DEFAULT_COLUMN_GAP
}

/// When the column flow re-runs its column selection.
///
/// Selection always picks the column with the most remaining room (greatest
/// Y, lowest index on ties). `Fill` keeps writing into the active column
/// until a line no longer fits there and only then selects again, so short
/// content stays in column 0. `Line` selects again before every line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceMode {
    #[default]
    Fill,
    Line,
}

/// Standard page sizes. Unrecognized tags deserialize to `Unrecognized`,
/// which resolves to A4 portrait.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PageSize {
    #[default]
    A4,
    A3,
    Letter,
    Legal,
    Unrecognized,
}

impl PageSize {
    /// Parse a size tag ("A4", "a3", "Letter", ...).
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "a4" => PageSize::A4,
            "a3" => PageSize::A3,
            "letter" => PageSize::Letter,
            "legal" => PageSize::Legal,
            _ => PageSize::Unrecognized,
        }
    }

    /// Portrait (width, height) in millimetres.
    pub fn millimetres(&self) -> (f64, f64) {
        match self {
            PageSize::A4 | PageSize::Unrecognized => (210.0, 297.0),
            PageSize::A3 => (297.0, 420.0),
            PageSize::Letter => (216.0, 279.0),
            PageSize::Legal => (216.0, 356.0),
        }
    }

    /// Returns (width, height) in points for the given orientation.
    ///
    /// An unrecognized size is always A4 portrait, whatever the orientation.
    pub fn dimensions(&self, orientation: Orientation) -> (f64, f64) {
        let (w, h) = self.millimetres();
        let (w, h) = (mm_to_pt(w), mm_to_pt(h));
        match (self, orientation) {
            (PageSize::Unrecognized, _) | (_, Orientation::Portrait) => (w, h),
            (_, Orientation::Landscape) => (h, w),
        }
    }
}

impl From<String> for PageSize {
    fn from(tag: String) -> Self {
        PageSize::from_tag(&tag)
    }
}

impl From<PageSize> for String {
    fn from(size: PageSize) -> Self {
        match size {
            PageSize::A4 | PageSize::Unrecognized => "A4".to_string(),
            PageSize::A3 => "A3".to_string(),
            PageSize::Letter => "Letter".to_string(),
            PageSize::Legal => "Legal".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl From<String> for Orientation {
    fn from(tag: String) -> Self {
        if tag.trim().eq_ignore_ascii_case("landscape") {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

impl From<Orientation> for String {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Portrait => "portrait".to_string(),
            Orientation::Landscape => "landscape".to_string(),
        }
    }
}

/// Resolve a page-size tag and orientation tag to (width, height) in points.
pub fn page_dimensions(size: &str, orientation: &str) -> (f64, f64) {
    PageSize::from_tag(size).dimensions(Orientation::from(orientation.to_string()))
}

/// The validated page rectangle: full size plus a uniform margin, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBox {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl PageBox {
    /// Build a page box, rejecting geometry with no usable area.
    pub fn new(width: f64, height: f64, margin: f64) -> Result<Self, FolioError> {
        if !(width.is_finite() && height.is_finite() && margin.is_finite()) {
            return Err(FolioError::invalid("page geometry must be finite"));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(FolioError::invalid(format!(
                "page size must be positive, got {width}x{height}"
            )));
        }
        if margin < 0.0 {
            return Err(FolioError::invalid(format!(
                "margin must not be negative, got {margin}"
            )));
        }
        if margin >= width / 2.0 || margin >= height / 2.0 {
            return Err(FolioError::invalid(format!(
                "margin {margin:.2}pt leaves no usable area on a {width:.2}x{height:.2}pt page"
            )));
        }
        Ok(Self {
            width,
            height,
            margin,
        })
    }

    /// Baseline Y of the first line on a fresh page.
    pub fn top(&self) -> f64 {
        self.height - self.margin
    }

    /// Lowest Y a line may occupy.
    pub fn bottom(&self) -> f64 {
        self.margin
    }

    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }
}

/// A styled unit of text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub styles: BlockStyle,
}

impl ContentBlock {
    /// Create a block with default styling.
    pub fn new(id: &str, kind: BlockKind, content: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            content: content.to_string(),
            styles: BlockStyle::default(),
        }
    }

    pub fn with_style(mut self, styles: BlockStyle) -> Self {
        self.styles = styles;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Heading,
    Paragraph,
    Container,
    Custom,
}

/// Per-block style as sent by the editor. Every field has a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStyle {
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_color")]
    pub color: String,
    /// Line height as a multiplier of font size.
    #[serde(default = "default_line_height")]
    pub line_height: f64,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl Default for BlockStyle {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            font_family: default_font_family(),
            color: default_color(),
            line_height: default_line_height(),
            font_weight: FontWeight::Normal,
            text_align: TextAlign::Left,
            background_color: None,
        }
    }
}

fn default_font_size() -> f64 {
    12.0
}

fn default_font_family() -> String {
    "Helvetica".to_string()
}

fn default_color() -> String {
    "#000000".to_string()
}

fn default_line_height() -> f64 {
    1.5
}
