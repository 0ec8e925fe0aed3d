//! Section-to-region partitioning for the CV layouts.
//!
//! Every multi-region layout is one row of [`CvLayout::regions`]: the
//! regions left to right, each with its share of the content width and the
//! section kinds it claims. The region with no claimed kinds is the default
//! and takes everything unclaimed.

use super::{CvLayout, CvSection, Region, SectionKind};

/// One region of a CV layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionRule {
    pub region: Region,
    /// Fraction of the width left after inter-region gaps.
    pub share: f64,
    /// Section kinds routed here. Empty marks the default region.
    pub members: &'static [SectionKind],
}

const SIDE_SECTIONS: &[SectionKind] = &[
    SectionKind::Skills,
    SectionKind::Education,
    SectionKind::Languages,
    SectionKind::Certifications,
];

const SINGLE: &[RegionRule] = &[RegionRule {
    region: Region::Main,
    share: 1.0,
    members: &[],
}];

const SIDEBAR: &[RegionRule] = &[
    RegionRule {
        region: Region::Sidebar,
        share: 0.30,
        members: SIDE_SECTIONS,
    },
    RegionRule {
        region: Region::Main,
        share: 0.70,
        members: &[],
    },
];

const TWO_COLUMN: &[RegionRule] = &[
    RegionRule {
        region: Region::Left,
        share: 0.35,
        members: SIDE_SECTIONS,
    },
    RegionRule {
        region: Region::Main,
        share: 0.65,
        members: &[],
    },
];

const THREE_COLUMN: &[RegionRule] = &[
    RegionRule {
        region: Region::Left,
        share: 0.25,
        members: &[SectionKind::Skills, SectionKind::Languages],
    },
    RegionRule {
        region: Region::Center,
        share: 0.50,
        members: &[],
    },
    RegionRule {
        region: Region::Right,
        share: 0.25,
        members: &[SectionKind::Education, SectionKind::Certifications],
    },
];

const GRID: &[RegionRule] = &[
    RegionRule {
        region: Region::Main,
        share: 0.50,
        members: &[],
    },
    RegionRule {
        region: Region::Right,
        share: 0.50,
        members: SIDE_SECTIONS,
    },
];

impl CvLayout {
    /// The region table row for this layout.
    pub fn regions(&self) -> &'static [RegionRule] {
        match self {
            CvLayout::Sidebar => SIDEBAR,
            CvLayout::TwoColumn => TWO_COLUMN,
            CvLayout::ThreeColumn => THREE_COLUMN,
            CvLayout::Grid => GRID,
            CvLayout::Classic
            | CvLayout::Modern
            | CvLayout::Creative
            | CvLayout::Minimal
            | CvLayout::Executive
            | CvLayout::Gradient => SINGLE,
        }
    }

    /// Region rules with `side_share` (a fraction in (0, 1)) applied to the
    /// side region of the two-region sidebar layouts.
    pub fn regions_with_side_share(&self, side_share: Option<f64>) -> Vec<RegionRule> {
        let mut rules = self.regions().to_vec();
        if let (Some(share), CvLayout::Sidebar | CvLayout::TwoColumn) = (side_share, self) {
            rules[0].share = share;
            rules[1].share = 1.0 - share;
        }
        rules
    }
}

/// The region a section kind lands in under `rules`.
pub fn region_for(rules: &[RegionRule], kind: SectionKind) -> Region {
    rules
        .iter()
        .find(|rule| rule.members.contains(&kind))
        .or_else(|| rules.iter().find(|rule| rule.members.is_empty()))
        .map(|rule| rule.region)
        .unwrap_or(Region::Main)
}

/// Split the non-personal sections into regions, in table order, keeping
/// each region's sections in their original relative order. Regions that
/// receive nothing are still listed.
pub fn partition<'s>(rules: &[RegionRule], sections: &'s [CvSection]) -> Vec<(Region, Vec<&'s CvSection>)> {
    let mut regions: Vec<(Region, Vec<&CvSection>)> =
        rules.iter().map(|rule| (rule.region, Vec::new())).collect();
    for section in sections.iter().filter(|s| s.kind != SectionKind::Personal) {
        let target = region_for(rules, section.kind);
        if let Some((_, bucket)) = regions.iter_mut().find(|(region, _)| *region == target) {
            bucket.push(section);
        }
    }
    regions
}

/// Parse a width share like `"35%"` or `"35"` into a fraction. Values
/// outside (0, 100) are ignored.
pub fn parse_share(width: &str) -> Option<f64> {
    let percent: f64 = width.trim().trim_end_matches('%').trim().parse().ok()?;
    if percent.is_finite() && percent > 0.0 && percent < 100.0 {
        Some(percent / 100.0)
    } else {
        None
    }
}
