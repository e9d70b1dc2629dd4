//! Heading level assignment.

use std::cmp::Reverse;

use crate::model::{FontProperty, HeadingLevel};

use super::body::BodyFont;
use super::stats::FontStatistics;

/// Mapping from font property to heading level.
///
/// Holds at most three entries, one per level, in H1..H3 order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelMap {
    entries: Vec<(FontProperty, HeadingLevel)>,
}

impl LevelMap {
    /// Level assigned to a property, if any.
    pub fn get(&self, property: &FontProperty) -> Option<HeadingLevel> {
        self.entries
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, level)| *level)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in level order.
    pub fn iter(&self) -> impl Iterator<Item = (FontProperty, HeadingLevel)> + '_ {
        self.entries.iter().copied()
    }
}

/// Whether a property is eligible for a heading level.
///
/// Larger than body text, bold at body size over a regular body, or the
/// document's largest size.
pub fn is_heading_candidate(property: &FontProperty, body: &BodyFont) -> bool {
    let body_key = body.property.size_key();
    property.size_key() > body_key
        || (property.size_key() == body_key && property.is_bold() && !body.property.is_bold())
        || property.size_key() == body.max_size_key
}

/// Assign H1..H3 to the leading heading candidates.
///
/// Candidates are ranked by size (largest first), bold before regular at
/// equal size. `(size, bold)` is unique per property, so the ranking is total.
pub fn assign_levels(stats: &FontStatistics, body: &BodyFont, max_levels: usize) -> LevelMap {
    let mut candidates: Vec<FontProperty> = stats
        .iter()
        .map(|(p, _)| p)
        .filter(|p| is_heading_candidate(p, body))
        .collect();

    candidates.sort_by_key(|p| (Reverse(p.size_key()), !p.is_bold()));

    let entries = candidates
        .into_iter()
        .take(max_levels)
        .enumerate()
        .filter_map(|(rank, p)| HeadingLevel::from_rank(rank).map(|level| (p, level)))
        .collect();

    LevelMap { entries }
}
