//! Font usage statistics for a single document.

use indexmap::IndexMap;

use crate::model::{FontProperty, Span};

/// Occurrence counts per font property, in first-seen order.
///
/// The insertion order is part of the contract: it is the last-resort
/// tie-break when resolving the body font.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontStatistics {
    counts: IndexMap<FontProperty, usize>,
}

impl FontStatistics {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally every non-blank span.
    pub fn from_spans(spans: &[Span]) -> Self {
        let mut stats = Self::new();
        for span in spans.iter().filter(|s| !s.is_blank()) {
            stats.add(span.font_property());
        }
        stats
    }

    /// Add one observation of a font property.
    pub fn add(&mut self, property: FontProperty) {
        *self.counts.entry(property).or_insert(0) += 1;
    }

    /// Occurrences of a property (0 if never seen).
    pub fn count(&self, property: &FontProperty) -> usize {
        self.counts.get(property).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of counted spans.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Properties and counts in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (FontProperty, usize)> + '_ {
        self.counts.iter().map(|(p, c)| (*p, *c))
    }

    /// Statistics restricted to properties at or above `min_size` points.
    pub fn above_floor(&self, min_size: f32) -> Self {
        Self {
            counts: self
                .counts
                .iter()
                .filter(|(p, _)| p.size() >= min_size)
                .map(|(p, c)| (*p, *c))
                .collect(),
        }
    }

    /// The largest size present, as a property size key.
    pub fn max_size_key(&self) -> Option<i32> {
        self.counts.keys().map(FontProperty::size_key).max()
    }
}
