//! # Page-Aware Layout Engine
//!
//! Folio never lays content out on an infinitely tall canvas and slices it
//! afterwards. It opens a page of known size, and for every line asks: "is
//! there room for this in a column?" If yes, the line is placed and the
//! column's cursor moves down. If no column has room, the next page opens.
//!
//! The pipeline for a document:
//!
//! 1. Resolve the page box (size tag, orientation, margin) and split its
//!    content area into equal columns. Bad geometry is rejected here,
//!    before any output exists.
//! 2. For each block, resolve its effective style ([`block`]).
//! 3. Wrap the block's text to the column width ([`crate::text`]).
//! 4. Hand the lines to a [`PageAccumulator`], which reserves slots from the
//!    [`ColumnFlow`] and emits [`DrawCommand`]s page by page.
//!
//! The output is a list of pages of absolute draw commands. Turning those
//! into PDF bytes belongs to the caller.

pub mod accumulator;
pub mod block;
pub mod columns;

use serde::Serialize;

use crate::cv::Region;
use crate::error::FolioError;
use crate::font::{FontRef, TextMeasurer};
use crate::model::{ContentBlock, DocumentRequest, PageBox};
use crate::style::Color;
use crate::text::LineWrapper;

pub use accumulator::{DrawError, PageAccumulator};
pub use block::{aligned_x, template_title, Border, Decoration, ResolvedBlockStyle};
pub use columns::{Column, ColumnFlow, FlowGeometry, Slot};

// ── Output ──────────────────────────────────────────────────────────

/// One positioned run of text. `y` is the baseline, measured up from the
/// bottom edge of the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawCommand {
    pub page_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub font: FontRef,
    pub size: f64,
    pub color: Color,
}

/// Background (and optional left border) behind a decorated block's lines
/// within one column of one page. `y` is the bottom edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationRect {
    pub column: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub background: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_left: Option<Border>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPage {
    pub index: usize,
    pub commands: Vec<DrawCommand>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub decorations: Vec<DecorationRect>,
}

impl LayoutPage {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            commands: Vec::new(),
            decorations: Vec::new(),
        }
    }
}

/// The result of one layout call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOutput {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    pub pages: Vec<LayoutPage>,
}

impl LayoutOutput {
    /// All commands in emission order.
    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.pages.iter().flat_map(|page| page.commands.iter())
    }
}

// ── Engine ──────────────────────────────────────────────────────────

/// Stateless entry point for block-list layout. Everything mutable lives in
/// the accumulator created per call.
#[derive(Debug, Default)]
pub struct LayoutEngine;

impl LayoutEngine {
    pub fn new() -> Self {
        Self
    }

    /// Lay out a document request into pages of draw commands.
    pub fn layout(
        &self,
        request: &DocumentRequest,
        measurer: &dyn TextMeasurer,
    ) -> Result<LayoutOutput, FolioError> {
        let config = &request.layout;
        let (width, height) = config.page_size.dimensions(config.orientation);
        let page = PageBox::new(width, height, request.styles.margin_pt())?;
        let geometry = FlowGeometry::for_page(&page, config.columns, config.column_gap)?;
        for block in &request.content_blocks {
            validate_block(block)?;
        }

        log::debug!(
            "layout: {} blocks, {:.2}x{:.2}pt, margin {:.2}pt, {} column(s) of {:.2}pt",
            request.content_blocks.len(),
            width,
            height,
            page.margin,
            geometry.count,
            geometry.column_width
        );

        let wrapper = LineWrapper::new(measurer);
        let mut acc = PageAccumulator::new(measurer, ColumnFlow::new(geometry, config.balance), None);

        if let Some(tag) = request.template.as_deref() {
            if !request.content_blocks.is_empty() {
                let style = ResolvedBlockStyle::template_title();
                let lines = wrapper.wrap(
                    template_title(tag),
                    &style.font,
                    style.font_size,
                    geometry.column_width,
                );
                acc.place_block(&lines, &style);
            }
        }

        for block in &request.content_blocks {
            let style = ResolvedBlockStyle::for_block(block);
            let lines = wrapper.wrap(&block.content, &style.font, style.font_size, geometry.column_width);
            acc.place_block(&lines, &style);
        }

        let pages = acc.finish();
        log::debug!("layout: {} page(s)", pages.len());
        Ok(LayoutOutput {
            page_width: width,
            page_height: height,
            margin: page.margin,
            pages,
        })
    }
}

/// Reject styles the flow cannot place: a zero, negative or non-finite size
/// or line height would stall or corrupt the column cursors.
fn validate_block(block: &ContentBlock) -> Result<(), FolioError> {
    let (font_size, line_height) = (block.styles.font_size, block.styles.line_height);
    if !font_size.is_finite() || font_size <= 0.0 {
        return Err(FolioError::invalid(format!(
            "block {:?}: fontSize must be a positive number, got {font_size}",
            block.id
        )));
    }
    if !line_height.is_finite() || line_height <= 0.0 {
        return Err(FolioError::invalid(format!(
            "block {:?}: lineHeight must be a positive number, got {line_height}",
            block.id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontContext;
    use crate::model::{BlockKind, BlockStyle, LayoutConfig};

    fn request(blocks: Vec<ContentBlock>) -> DocumentRequest {
        DocumentRequest {
            content_blocks: blocks,
            layout: LayoutConfig::default(),
            styles: Default::default(),
            template: None,
            fonts: Vec::new(),
        }
    }

    #[test]
    fn empty_document_has_one_empty_page() {
        let out = LayoutEngine::new()
            .layout(&request(Vec::new()), &FontContext::new())
            .unwrap();
        assert_eq!(out.pages.len(), 1);
        assert!(out.pages[0].commands.is_empty());
    }

    #[test]
    fn first_line_sits_at_top_margin() {
        let req = request(vec![ContentBlock::new("p", BlockKind::Paragraph, "Hello")]);
        let out = LayoutEngine::new().layout(&req, &FontContext::new()).unwrap();
        let cmd = out.commands().next().unwrap();
        assert_eq!(cmd.y, out.page_height - out.margin);
        assert_eq!(cmd.x, out.margin);
    }

    #[test]
    fn template_title_comes_first() {
        let mut req = request(vec![ContentBlock::new("p", BlockKind::Paragraph, "Body")]);
        req.template = Some("business".to_string());
        let out = LayoutEngine::new().layout(&req, &FontContext::new()).unwrap();
        let texts: Vec<_> = out.commands().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Business Document", "Body"]);
        let body = out.commands().nth(1).unwrap();
        assert!((body.y - (out.page_height - out.margin - 25.0 - 20.0)).abs() < 1e-9);
    }

    #[test]
    fn template_title_needs_content() {
        let mut req = request(Vec::new());
        req.template = Some("modern".to_string());
        let out = LayoutEngine::new().layout(&req, &FontContext::new()).unwrap();
        assert_eq!(out.commands().count(), 0);
    }

    #[test]
    fn rejects_bad_block_metrics() {
        let ctx = FontContext::new();
        for (size, lh) in [(0.0, 1.5), (-3.0, 1.5), (f64::NAN, 1.5), (12.0, 0.0), (12.0, f64::INFINITY)] {
            let block = ContentBlock::new("p", BlockKind::Paragraph, "x").with_style(BlockStyle {
                font_size: size,
                line_height: lh,
                ..Default::default()
            });
            let err = LayoutEngine::new().layout(&request(vec![block]), &ctx).unwrap_err();
            assert!(matches!(err, FolioError::InvalidInput(_)), "{size}/{lh}");
        }
    }

    #[test]
    fn rejects_zero_columns() {
        let mut req = request(vec![ContentBlock::new("p", BlockKind::Paragraph, "x")]);
        req.layout.columns = 0;
        assert!(LayoutEngine::new().layout(&req, &FontContext::new()).is_err());
    }
}
