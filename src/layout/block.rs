//! # Block Rendering Rules
//!
//! Turns an editor block style into the concrete values the flow needs:
//! which face, what size, how tall a line is, where a line starts
//! horizontally, and how much space follows the block.

use serde::Serialize;

use crate::font::FontRef;
use crate::model::{BlockKind, BlockStyle, ContentBlock};
use crate::style::{Color, FontWeight, TextAlign};

/// No block renders smaller than this.
pub const MIN_FONT_SIZE: f64 = 8.0;

/// Headings never render smaller than this.
pub const MIN_HEADING_SIZE: f64 = 18.0;

/// Width of the decorative left border on container/custom blocks.
pub const DECORATION_BORDER_WIDTH: f64 = 4.0;

impl BlockKind {
    /// Vertical space after a block of this kind, in points.
    pub fn spacing_after(&self) -> f64 {
        match self {
            BlockKind::Heading => 15.0,
            BlockKind::Container => 20.0,
            BlockKind::Custom => 18.0,
            BlockKind::Paragraph => 10.0,
        }
    }

    /// Default decoration for this kind. Cosmetic only: never affects geometry.
    pub fn decoration(&self, background: Option<&str>) -> Option<Decoration> {
        let (default_bg, border) = match self {
            BlockKind::Container => ("#F3F4F6", "#8B5CF6"),
            BlockKind::Custom => ("#EFF6FF", "#3B82F6"),
            BlockKind::Heading | BlockKind::Paragraph => return None,
        };
        Some(Decoration {
            background: Color::hex(background.unwrap_or(default_bg)),
            border_left: Some(Border {
                width: DECORATION_BORDER_WIDTH,
                color: Color::hex(border),
            }),
        })
    }
}

/// Background and left-border metadata for decorated blocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decoration {
    pub background: Color,
    pub border_left: Option<Border>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Border {
    pub width: f64,
    pub color: Color,
}

/// Everything the flow needs to place one block's lines.
#[derive(Debug, Clone)]
pub struct ResolvedBlockStyle {
    pub font: FontRef,
    pub font_size: f64,
    /// Absolute line advance in points.
    pub line_height: f64,
    pub color: Color,
    pub text_align: TextAlign,
    pub spacing_after: f64,
    pub decoration: Option<Decoration>,
}

impl ResolvedBlockStyle {
    /// Resolve a content block's effective style.
    pub fn for_block(block: &ContentBlock) -> Self {
        let style: &BlockStyle = &block.styles;
        let mut font_size = style.font_size.max(MIN_FONT_SIZE);
        if block.kind == BlockKind::Heading {
            font_size = font_size.max(MIN_HEADING_SIZE);
        }
        Self {
            font: FontRef::new(&style.font_family, style.font_weight),
            font_size,
            line_height: font_size * style.line_height,
            color: Color::hex(&style.color),
            text_align: style.text_align,
            spacing_after: block.kind.spacing_after(),
            decoration: block.kind.decoration(style.background_color.as_deref()),
        }
    }

    /// A plain left-aligned style with an explicit line advance.
    pub fn plain(font: FontRef, font_size: f64, line_height: f64, color: Color) -> Self {
        Self {
            font,
            font_size,
            line_height,
            color,
            text_align: TextAlign::Left,
            spacing_after: 0.0,
            decoration: None,
        }
    }

    pub fn with_spacing_after(mut self, spacing: f64) -> Self {
        self.spacing_after = spacing;
        self
    }

    /// The document title line placed above the first block when a
    /// template tag is given.
    pub fn template_title() -> Self {
        Self::plain(
            FontRef::new("Helvetica", FontWeight::Bold),
            20.0,
            25.0,
            Color::gray(0.2),
        )
        .with_spacing_after(20.0)
    }
}

/// Title line for a document template tag.
pub fn template_title(tag: &str) -> &'static str {
    match tag {
        "modern" => "Modern Document",
        "classic" => "Classic Report",
        "business" => "Business Document",
        "creative" => "Creative Portfolio",
        "minimal" => "Minimal Design",
        "technical" => "Technical Specification",
        _ => "Generated Document",
    }
}

/// Horizontal start of a line of `text_width` inside the column box
/// `[column_x, column_x + column_width]`.
///
/// For a single full-width column this is `margin`, `(page_width - w) / 2`
/// and `page_width - margin - w` for left, center and right.
pub fn aligned_x(align: TextAlign, column_x: f64, column_width: f64, text_width: f64) -> f64 {
    match align {
        TextAlign::Left => column_x,
        TextAlign::Center => column_x + (column_width - text_width) / 2.0,
        TextAlign::Right => column_x + column_width - text_width,
    }
}
