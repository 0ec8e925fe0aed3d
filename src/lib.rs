//! # Folio
//!
//! A deterministic, page-native layout engine for block documents.
//!
//! A block editor produces a flat list of styled blocks: headings,
//! paragraphs, callout containers. Folio turns that list into fixed-size
//! pages of absolutely positioned text runs. Every line is measured against
//! real glyph widths, wrapped to its column, and placed with the page
//! boundary as a hard constraint. Nothing is laid out on an endless canvas
//! and cut up afterwards.
//!
//! The same input always produces the same output. The only shared state is
//! the read-only font metrics in [`FontContext`].
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]    Blocks, page size, columns, margin
//!       ↓
//!   [style]    Colors, weights, alignment
//!       ↓
//!   [font]     Width measurement (Helvetica metrics, custom TTF/OTF)
//!       ↓
//!   [text]     Normalization and greedy wrapping
//!       ↓
//!   [layout]   Column flow, pagination, draw commands
//!       ↓
//!   LayoutOutput (pages of DrawCommands) → caller's PDF writer
//! ```
//!
//! CVs take a side entrance through [`cv`], which partitions sections into
//! regions and flows each region through the same layout machinery.

pub mod cv;
pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod style;
pub mod text;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use cv::CvTemplate;
pub use error::FolioError;
pub use font::{FontContext, TextMeasurer};
pub use layout::{DrawCommand, LayoutEngine, LayoutOutput};
pub use model::DocumentRequest;

/// Lay out a document with the built-in Helvetica metrics plus any fonts
/// the request carries.
///
/// This is the primary entry point.
pub fn layout_document(request: &DocumentRequest) -> Result<LayoutOutput, FolioError> {
    let mut font_context = FontContext::new();
    for font in &request.fonts {
        font_context.register_base64(&font.family, font.weight, &font.src)?;
    }
    layout_document_with(request, &font_context)
}

/// Lay out a document with a caller-supplied measurer. A single
/// [`FontContext`] can be shared by any number of concurrent calls.
pub fn layout_document_with(
    request: &DocumentRequest,
    measurer: &dyn TextMeasurer,
) -> Result<LayoutOutput, FolioError> {
    LayoutEngine::new().layout(request, measurer)
}

/// Lay out a document described as JSON.
pub fn layout_json(json: &str) -> Result<LayoutOutput, FolioError> {
    let request: DocumentRequest = serde_json::from_str(json)?;
    layout_document(&request)
}

/// Lay out a CV template with the built-in metrics.
pub fn layout_cv(template: &CvTemplate) -> Result<LayoutOutput, FolioError> {
    cv::layout_cv(template, &FontContext::new())
}

/// Lay out a CV template described as JSON.
pub fn layout_cv_json(json: &str) -> Result<LayoutOutput, FolioError> {
    let template: CvTemplate = serde_json::from_str(json)?;
    layout_cv(&template)
}

/// Serialize a layout result to JSON.
pub fn output_to_json(output: &LayoutOutput, pretty: bool) -> Result<String, FolioError> {
    let json = if pretty {
        serde_json::to_string_pretty(output)?
    } else {
        serde_json::to_string(output)?
    };
    Ok(json)
}
