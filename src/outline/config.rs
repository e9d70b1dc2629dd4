//! Heuristic thresholds for outline inference.

use crate::model::HeadingLevel;

/// Spans smaller than this are treated as footnotes or page-number noise.
pub const MIN_FONT_SIZE: f32 = 8.0;

/// Fraction of the page height at the top and bottom treated as running
/// header/footer territory.
pub const MARGIN_RATIO: f32 = 0.05;

/// Minimum heading length in characters.
pub const MIN_TEXT_CHARS: usize = 3;

/// Maximum heading length in characters.
pub const MAX_TEXT_CHARS: usize = 150;

/// A period-terminated span with more words than this reads as prose.
pub const PROSE_WORD_LIMIT: usize = 5;

/// Prefixes that mark a span as a list item rather than a heading.
pub const LIST_MARKERS: [&str; 10] = ["1.", "2.", "3.", "4.", "5.", "a.", "b.", "c.", "-", "*"];

/// Options controlling outline inference.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineConfig {
    /// Font size floor for statistics and heading levels
    pub min_font_size: f32,

    /// Top/bottom page margin ratio excluded from headings
    pub margin_ratio: f32,

    /// Shortest accepted heading, in characters
    pub min_text_chars: usize,

    /// Longest accepted heading, in characters
    pub max_text_chars: usize,

    /// Word count above which a period-terminated span is prose
    pub prose_word_limit: usize,

    /// List-marker prefixes that disqualify a span
    pub list_markers: Vec<String>,

    /// Number of heading levels to assign (1-3)
    pub max_levels: usize,
}

impl OutlineConfig {
    /// Create a config with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font size floor.
    pub fn with_min_font_size(mut self, size: f32) -> Self {
        self.min_font_size = size;
        self
    }

    /// Set the header/footer margin ratio.
    pub fn with_margin_ratio(mut self, ratio: f32) -> Self {
        self.margin_ratio = ratio.clamp(0.0, 0.5);
        self
    }

    /// Set the accepted heading length range, in characters.
    pub fn with_text_chars(mut self, min: usize, max: usize) -> Self {
        self.min_text_chars = min;
        self.max_text_chars = max.max(min);
        self
    }

    /// Set the prose word limit.
    pub fn with_prose_word_limit(mut self, words: usize) -> Self {
        self.prose_word_limit = words;
        self
    }

    /// Replace the list-marker prefixes.
    pub fn with_list_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Set how many heading levels are assigned.
    pub fn with_max_levels(mut self, levels: usize) -> Self {
        self.max_levels = levels.clamp(1, HeadingLevel::ALL.len());
        self
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            min_font_size: MIN_FONT_SIZE,
            margin_ratio: MARGIN_RATIO,
            min_text_chars: MIN_TEXT_CHARS,
            max_text_chars: MAX_TEXT_CHARS,
            prose_word_limit: PROSE_WORD_LIMIT,
            list_markers: LIST_MARKERS.iter().map(|m| m.to_string()).collect(),
            max_levels: HeadingLevel::ALL.len(),
        }
    }
}
