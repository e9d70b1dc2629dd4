//! Heading extraction: the second pass over a document's spans.

use crate::model::{HeadingLevel, OutlineEntry, Span};

use super::config::OutlineConfig;
use super::levels::LevelMap;

/// Why a span was not emitted as a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Too short or too long
    Length,
    /// In the top or bottom page margin
    Margin,
    /// Starts with a list marker
    ListMarker,
    /// Reads like a sentence
    Prose,
    /// Font property has no heading level
    NoLevel,
}

/// Applies layout filters and the level map to spans in document order.
pub struct HeadingExtractor<'a> {
    config: &'a OutlineConfig,
    levels: &'a LevelMap,
}

impl<'a> HeadingExtractor<'a> {
    pub fn new(config: &'a OutlineConfig, levels: &'a LevelMap) -> Self {
        Self { config, levels }
    }

    /// Classify a single span.
    ///
    /// Content and layout filters run before the font lookup, so a
    /// heading-sized list item is still rejected as a list item.
    pub fn classify(&self, span: &Span) -> Result<HeadingLevel, SkipReason> {
        let text = span.text();

        let chars = text.chars().count();
        if chars < self.config.min_text_chars || chars > self.config.max_text_chars {
            return Err(SkipReason::Length);
        }

        let y0 = span.bbox().y0;
        let height = span.page_height();
        if y0 < height * self.config.margin_ratio || y0 > height * (1.0 - self.config.margin_ratio)
        {
            return Err(SkipReason::Margin);
        }

        if self
            .config
            .list_markers
            .iter()
            .any(|marker| text.starts_with(marker.as_str()))
        {
            return Err(SkipReason::ListMarker);
        }

        if is_prose(text, self.config.prose_word_limit) {
            return Err(SkipReason::Prose);
        }

        self.levels
            .get(&span.font_property())
            .ok_or(SkipReason::NoLevel)
    }

    /// Extract outline entries, dropping immediate repeats.
    ///
    /// Only an entry identical to the previously accepted one is dropped;
    /// repeats further apart are kept.
    pub fn extract(&self, spans: &[Span]) -> Vec<OutlineEntry> {
        let mut outline: Vec<OutlineEntry> = Vec::new();

        for span in spans {
            let level = match self.classify(span) {
                Ok(level) => level,
                Err(reason) => {
                    log::trace!(
                        "skip {:?} on page {}: {:?}",
                        span.text(),
                        span.page(),
                        reason
                    );
                    continue;
                }
            };

            let entry = OutlineEntry::new(level, span.text(), span.page());
            if outline.last() == Some(&entry) {
                continue;
            }
            outline.push(entry);
        }

        outline
    }
}

/// A period-terminated, multi-word span that is not shouted is prose.
fn is_prose(text: &str, word_limit: usize) -> bool {
    text.ends_with('.') && text.split_whitespace().count() > word_limit && !is_upper(text)
}

/// True when the text has cased letters and none of them is lower-case.
fn is_upper(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}
