//! # CV Layouts
//!
//! A CV is a list of typed sections rather than free blocks. The `personal`
//! section becomes a header (name, professional title, contact line) across
//! the full width of the first page. Everything else is routed into named
//! regions side by side according to the layout tag, see [`partition`].
//!
//! Each region is its own single-column flow with its own accumulator, all
//! starting just below the header. Regions paginate independently; their
//! pages are merged by index at the end, so a long main column simply runs
//! onto more pages than a short sidebar.

pub mod partition;

use serde::{Deserialize, Serialize};

use crate::error::FolioError;
use crate::font::{FontRef, TextMeasurer};
use crate::layout::{ColumnFlow, FlowGeometry, LayoutOutput, LayoutPage, PageAccumulator, ResolvedBlockStyle};
use crate::model::{BalanceMode, Orientation, PageBox, PageSize, DEFAULT_COLUMN_GAP};
use crate::style::{Color, FontWeight};
use crate::text::LineWrapper;
pub use partition::{parse_share, partition, region_for, RegionRule};

/// CV pages are A4 portrait with this margin on every side.
pub const CV_MARGIN: f64 = 50.0;

/// Separator between contact values in the header.
const CONTACT_SEPARATOR: &str = " \u{2022} ";

/// A named region of a CV page. Draw commands carry the region they were
/// flowed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Header,
    Sidebar,
    Main,
    Left,
    Center,
    Right,
}

/// A CV template as the editor stores it. Only `structure` is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvTemplate {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub structure: Vec<CvSection>,
    #[serde(default)]
    pub styles: CvStyles,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvSection {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<CvField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvField {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvStyles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(default)]
    pub layout: CvLayout,
    /// Side region width for sidebar layouts, e.g. `"35%"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_gap: Option<f64>,
}

/// Section type tag. Unknown tags are `Other` and flow into the default
/// region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionKind {
    Personal,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Languages,
    Certifications,
    Other,
}

impl From<String> for SectionKind {
    fn from(tag: String) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "personal" => SectionKind::Personal,
            "summary" => SectionKind::Summary,
            "experience" => SectionKind::Experience,
            "education" => SectionKind::Education,
            "skills" => SectionKind::Skills,
            "projects" => SectionKind::Projects,
            "languages" => SectionKind::Languages,
            "certifications" => SectionKind::Certifications,
            _ => SectionKind::Other,
        }
    }
}

impl From<SectionKind> for String {
    fn from(kind: SectionKind) -> Self {
        let tag = match kind {
            SectionKind::Personal => "personal",
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Languages => "languages",
            SectionKind::Certifications => "certifications",
            SectionKind::Other => "other",
        };
        tag.to_string()
    }
}

/// CV layout tag. Unknown tags resolve to `Classic`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CvLayout {
    #[default]
    Classic,
    Modern,
    Creative,
    Minimal,
    Executive,
    Gradient,
    TwoColumn,
    ThreeColumn,
    Sidebar,
    Grid,
}

impl From<String> for CvLayout {
    fn from(tag: String) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "modern" => CvLayout::Modern,
            "creative" => CvLayout::Creative,
            "minimal" => CvLayout::Minimal,
            "executive" => CvLayout::Executive,
            "gradient" => CvLayout::Gradient,
            "twocolumn" => CvLayout::TwoColumn,
            "threecolumn" => CvLayout::ThreeColumn,
            "sidebar" => CvLayout::Sidebar,
            "grid" => CvLayout::Grid,
            _ => CvLayout::Classic,
        }
    }
}

impl From<CvLayout> for String {
    fn from(layout: CvLayout) -> Self {
        let tag = match layout {
            CvLayout::Classic => "classic",
            CvLayout::Modern => "modern",
            CvLayout::Creative => "creative",
            CvLayout::Minimal => "minimal",
            CvLayout::Executive => "executive",
            CvLayout::Gradient => "gradient",
            CvLayout::TwoColumn => "twocolumn",
            CvLayout::ThreeColumn => "threecolumn",
            CvLayout::Sidebar => "sidebar",
            CvLayout::Grid => "grid",
        };
        tag.to_string()
    }
}

impl CvSection {
    /// Body lines: non-blank lines of `content`, or `"Label: value"` for
    /// each filled field when there is no content.
    pub fn body_lines(&self) -> Vec<String> {
        if !self.content.trim().is_empty() {
            return self
                .content
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();
        }
        self.fields
            .iter()
            .filter(|field| !field.value.trim().is_empty())
            .map(|field| format!("{}: {}", field.label, field.value))
            .collect()
    }
}

/// Header text pulled from the personal section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CvHeader {
    pub name: Option<String>,
    pub title: Option<String>,
    /// Every other filled personal field, joined with bullets.
    pub contact: Option<String>,
}

impl CvHeader {
    pub fn from_sections(sections: &[CvSection]) -> Self {
        let Some(personal) = sections.iter().find(|s| s.kind == SectionKind::Personal) else {
            return Self::default();
        };
        let field = |id: &str| {
            personal
                .fields
                .iter()
                .find(|f| f.id == id && !f.value.trim().is_empty())
                .map(|f| f.value.clone())
        };
        let contact: Vec<&str> = personal
            .fields
            .iter()
            .filter(|f| f.id != "name" && f.id != "title" && !f.value.trim().is_empty())
            .map(|f| f.value.as_str())
            .collect();
        Self {
            name: field("name"),
            title: field("title"),
            contact: (!contact.is_empty()).then(|| contact.join(CONTACT_SEPARATOR)),
        }
    }
}

/// Text styles for the CV pieces.
struct CvTheme {
    name: ResolvedBlockStyle,
    title: ResolvedBlockStyle,
    contact: ResolvedBlockStyle,
    section_title: ResolvedBlockStyle,
    body: ResolvedBlockStyle,
}

impl CvTheme {
    fn new(styles: &CvStyles) -> Self {
        let primary = Color::from_optional_hex(styles.primary_color.as_deref());
        let secondary = Color::from_optional_hex(styles.secondary_color.as_deref());
        let bold = FontRef::new("Helvetica", FontWeight::Bold);
        Self {
            name: ResolvedBlockStyle::plain(bold.clone(), 24.0, 40.0, primary),
            title: ResolvedBlockStyle::plain(FontRef::helvetica(), 16.0, 30.0, secondary),
            contact: ResolvedBlockStyle::plain(FontRef::helvetica(), 10.0, 40.0, Color::gray(0.4)),
            section_title: ResolvedBlockStyle::plain(bold, 16.0, 25.0, primary),
            body: ResolvedBlockStyle::plain(FontRef::helvetica(), 11.0, 15.0, Color::gray(0.2))
                .with_spacing_after(20.0),
        }
    }
}

/// Lay out a CV: header first, then every region from where the header ended.
pub fn layout_cv(template: &CvTemplate, measurer: &dyn TextMeasurer) -> Result<LayoutOutput, FolioError> {
    let (width, height) = PageSize::A4.dimensions(Orientation::Portrait);
    let page = PageBox::new(width, height, CV_MARGIN)?;
    let styles = &template.styles;

    let side_share = match styles.sidebar_width.as_deref() {
        Some(raw) => {
            let share = parse_share(raw);
            if share.is_none() {
                log::warn!("ignoring sidebarWidth {:?}: expected a percentage", raw);
            }
            share
        }
        None => None,
    };
    let rules = styles.layout.regions_with_side_share(side_share);
    let gap = styles.column_gap.unwrap_or(DEFAULT_COLUMN_GAP);
    let geometries = region_geometry(&page, &rules, gap)?;

    let theme = CvTheme::new(styles);
    let wrapper = LineWrapper::new(measurer);

    let header = CvHeader::from_sections(&template.structure);
    let header_geometry = FlowGeometry::single(page.margin, page.content_width(), page.top(), page.bottom());
    let mut header_acc = PageAccumulator::new(
        measurer,
        ColumnFlow::new(header_geometry, BalanceMode::Fill),
        Some(Region::Header),
    );
    for (text, style) in [
        (&header.name, &theme.name),
        (&header.title, &theme.title),
        (&header.contact, &theme.contact),
    ] {
        if let Some(text) = text {
            let lines = wrapper.wrap(text, &style.font, style.font_size, header_geometry.column_width);
            header_acc.place_block(&lines, style);
        }
    }
    let (start_page, start_y) = header_acc.cursor();

    let mut page_sets = vec![header_acc.finish()];
    for ((region, sections), geometry) in partition(&rules, &template.structure).into_iter().zip(geometries) {
        log::debug!(
            "cv region {:?}: {} section(s), x {:.2}, width {:.2}",
            region,
            sections.len(),
            geometry.left,
            geometry.column_width
        );
        let flow = ColumnFlow::starting_at(geometry, BalanceMode::Fill, start_page, start_y);
        let mut acc = PageAccumulator::new(measurer, flow, Some(region));
        for section in sections {
            let title = wrapper.wrap(
                &section.title,
                &theme.section_title.font,
                theme.section_title.font_size,
                geometry.column_width,
            );
            acc.place_block(&title, &theme.section_title);

            let body: Vec<String> = section
                .body_lines()
                .iter()
                .flat_map(|line| {
                    wrapper.wrap(line, &theme.body.font, theme.body.font_size, geometry.column_width)
                })
                .collect();
            acc.place_block(&body, &theme.body);
        }
        page_sets.push(acc.finish());
    }

    Ok(LayoutOutput {
        page_width: width,
        page_height: height,
        margin: page.margin,
        pages: merge_pages(page_sets),
    })
}

/// Column geometry for each region, left to right.
fn region_geometry(page: &PageBox, rules: &[RegionRule], gap: f64) -> Result<Vec<FlowGeometry>, FolioError> {
    if !gap.is_finite() || gap < 0.0 {
        return Err(FolioError::invalid(format!(
            "columnGap must be a non-negative number, got {gap}"
        )));
    }
    let available = page.content_width() - (rules.len() as f64 - 1.0) * gap;
    let mut x = page.margin;
    let mut geometries = Vec::with_capacity(rules.len());
    for rule in rules {
        let width = available * rule.share;
        if !(width > 0.0) {
            return Err(FolioError::invalid(format!(
                "region {:?} has no width ({width:.2}pt) with a {gap}pt gap",
                rule.region
            )));
        }
        geometries.push(FlowGeometry::single(x, width, page.top(), page.bottom()));
        x += width + gap;
    }
    Ok(geometries)
}

/// Merge per-region page lists by page index, header first.
fn merge_pages(page_sets: Vec<Vec<LayoutPage>>) -> Vec<LayoutPage> {
    let count = page_sets.iter().map(Vec::len).max().unwrap_or(0).max(1);
    let mut merged: Vec<LayoutPage> = (0..count).map(LayoutPage::new).collect();
    for pages in page_sets {
        for page in pages {
            let target = &mut merged[page.index];
            target.commands.extend(page.commands);
            target.decorations.extend(page.decorations);
        }
    }
    merged
}
