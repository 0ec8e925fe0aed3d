//! # Page Accumulator
//!
//! Owns one flow's state for the length of a layout call: the column
//! cursors, the pages opened so far and the commands emitted onto them.
//! Every placement goes through [`PageAccumulator::place_line`]; nothing is
//! kept in module-level state, so independent calls never see each other.
//!
//! Drawing a line can fail when the face cannot render some character. The
//! draw primitive returns that as a [`DrawError`] and the accumulator swaps
//! in a plain fallback line instead, so one bad line never costs the rest of
//! the document.

use thiserror::Error;

use super::block::{aligned_x, Decoration, ResolvedBlockStyle};
use super::columns::{ColumnFlow, Slot};
use super::{DecorationRect, DrawCommand, LayoutPage};
use crate::cv::Region;
use crate::font::{FontRef, MeasureError, TextMeasurer};
use crate::style::Color;

/// Why a line could not be drawn as styled.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrawError {
    #[error("cannot render line: {0}")]
    Unrenderable(#[from] MeasureError),
}

/// Reduce text to printable ASCII, which the fallback face always covers.
pub fn printable_ascii(text: &str) -> String {
    text.chars().filter(|ch| (' '..='~').contains(ch)).collect()
}

/// The vertical extent of a decorated block within one column of one page.
#[derive(Debug, Clone, Copy)]
struct DecorationSpan {
    page_index: usize,
    column: usize,
    x: f64,
    width: f64,
    top: f64,
    bottom: f64,
}

pub struct PageAccumulator<'a> {
    measurer: &'a dyn TextMeasurer,
    flow: ColumnFlow,
    region: Option<Region>,
    pages: Vec<LayoutPage>,
    decoration: Option<Decoration>,
    spans: Vec<DecorationSpan>,
}

impl<'a> PageAccumulator<'a> {
    pub fn new(measurer: &'a dyn TextMeasurer, flow: ColumnFlow, region: Option<Region>) -> Self {
        let mut acc = Self {
            measurer,
            flow,
            region,
            pages: Vec::new(),
            decoration: None,
            spans: Vec::new(),
        };
        acc.ensure_page(acc.flow.page_index());
        acc
    }

    /// Page index and baseline where the next line would start.
    pub fn cursor(&self) -> (usize, f64) {
        self.flow.cursor()
    }

    /// Place every line of a block, then its trailing spacing.
    pub fn place_block(&mut self, lines: &[String], style: &ResolvedBlockStyle) {
        self.begin_block(style);
        for line in lines {
            self.place_line(line, style);
        }
        self.end_block(style.spacing_after);
    }

    pub fn begin_block(&mut self, style: &ResolvedBlockStyle) {
        self.decoration = style.decoration;
        self.spans.clear();
    }

    /// Reserve a slot for `line` and emit its draw command.
    ///
    /// An empty line still takes its vertical space but emits nothing.
    /// Returns `None` when nothing was drawn.
    pub fn place_line(&mut self, line: &str, style: &ResolvedBlockStyle) -> Option<DrawCommand> {
        let slot = self.flow.reserve(style.line_height);
        self.ensure_page(slot.page_index);
        if self.decoration.is_some() {
            self.track_span(&slot, style);
        }
        if line.is_empty() {
            return None;
        }

        let command = match self.draw(line, style, &slot) {
            Ok(command) => command,
            Err(e) => {
                log::warn!(
                    "page {} column {}: {}; drawing plain fallback",
                    slot.page_index,
                    slot.column,
                    e
                );
                self.draw_fallback(line, style, &slot)?
            }
        };
        self.pages[slot.page_index].commands.push(command.clone());
        Some(command)
    }

    /// Close the current block: flush its decoration and apply `spacing`.
    pub fn end_block(&mut self, spacing: f64) {
        if let Some(decoration) = self.decoration.take() {
            for span in self.spans.drain(..) {
                self.pages[span.page_index].decorations.push(DecorationRect {
                    column: span.column,
                    x: span.x,
                    y: span.bottom,
                    width: span.width,
                    height: span.top - span.bottom,
                    background: decoration.background,
                    border_left: decoration.border_left,
                });
            }
        }
        self.flow.advance(spacing);
    }

    /// The pages this accumulator produced, in order.
    pub fn finish(self) -> Vec<LayoutPage> {
        self.pages
    }

    fn draw(&self, line: &str, style: &ResolvedBlockStyle, slot: &Slot) -> Result<DrawCommand, DrawError> {
        let width = self.measurer.measure(line, &style.font, style.font_size)?;
        Ok(DrawCommand {
            page_index: slot.page_index,
            region: self.region,
            x: aligned_x(style.text_align, slot.x, slot.width, width),
            y: slot.y,
            text: line.to_string(),
            font: style.font.clone(),
            size: style.font_size,
            color: style.color,
        })
    }

    /// Regular face, left-aligned, black, printable ASCII only.
    fn draw_fallback(&self, line: &str, style: &ResolvedBlockStyle, slot: &Slot) -> Option<DrawCommand> {
        let text = printable_ascii(line);
        if text.trim().is_empty() {
            log::warn!("dropping line {:?}: nothing printable", line);
            return None;
        }
        Some(DrawCommand {
            page_index: slot.page_index,
            region: self.region,
            x: slot.x,
            y: slot.y,
            text,
            font: FontRef::helvetica(),
            size: style.font_size,
            color: Color::BLACK,
        })
    }

    fn ensure_page(&mut self, index: usize) {
        while self.pages.len() <= index {
            let next = self.pages.len();
            self.pages.push(LayoutPage::new(next));
        }
    }

    /// Line box: `font_size` above the baseline, the rest of the line height below.
    fn track_span(&mut self, slot: &Slot, style: &ResolvedBlockStyle) {
        let top = slot.y + style.font_size;
        let bottom = top - style.line_height;
        match self.spans.last_mut() {
            Some(span) if span.page_index == slot.page_index && span.column == slot.column => {
                span.bottom = bottom;
            }
            _ => self.spans.push(DecorationSpan {
                page_index: slot.page_index,
                column: slot.column,
                x: slot.x,
                width: slot.width,
                top,
                bottom,
            }),
        }
    }
}
