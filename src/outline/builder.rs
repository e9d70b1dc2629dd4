//! Per-document pipeline: statistics, body font, levels, extraction.

use crate::error::{Error, Result};
use crate::model::{DocumentOutline, Span};

use super::body::{resolve_body_font, BodyFont};
use super::config::OutlineConfig;
use super::extract::HeadingExtractor;
use super::levels::{assign_levels, LevelMap};
use super::stats::FontStatistics;

/// Intermediate results of the font analysis for one document.
#[derive(Debug, Clone, Default)]
pub struct OutlineAnalysis {
    /// Counts over all non-blank spans, before the size floor
    pub statistics: FontStatistics,
    /// Resolved body font, or `None` if nothing reached the size floor
    pub body: Option<BodyFont>,
    /// Heading level assignment
    pub levels: LevelMap,
}

impl OutlineAnalysis {
    /// The body font, or `Error::NoText` if the document had no usable text.
    pub fn body_font(&self) -> Result<&BodyFont> {
        self.body.as_ref().ok_or(Error::NoText)
    }
}

/// Builds a [`DocumentOutline`] from a document's spans.
///
/// Holds configuration only; every call works on fresh per-document state.
#[derive(Debug, Clone, Default)]
pub struct OutlineBuilder {
    config: OutlineConfig,
}

impl OutlineBuilder {
    /// Create a builder with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom thresholds.
    pub fn with_config(config: OutlineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Run the font analysis passes without extracting headings.
    pub fn analyze(&self, spans: &[Span]) -> OutlineAnalysis {
        let statistics = FontStatistics::from_spans(spans);
        let floored = statistics.above_floor(self.config.min_font_size);

        let Some(body) = resolve_body_font(&floored) else {
            log::debug!(
                "no font reaches {}pt across {} spans",
                self.config.min_font_size,
                spans.len()
            );
            return OutlineAnalysis {
                statistics,
                body: None,
                levels: LevelMap::default(),
            };
        };

        let levels = assign_levels(&floored, &body, self.config.max_levels);
        log::debug!(
            "body font {} (max {:.2}pt), {} heading level(s) from {} font properties",
            body.property,
            body.max_size(),
            levels.len(),
            statistics.len()
        );

        OutlineAnalysis {
            statistics,
            body: Some(body),
            levels,
        }
    }

    /// Infer the outline for one document.
    pub fn build(&self, spans: &[Span]) -> DocumentOutline {
        let analysis = self.analyze(spans);
        if analysis.levels.is_empty() {
            return DocumentOutline::empty();
        }

        let outline = HeadingExtractor::new(&self.config, &analysis.levels).extract(spans);
        DocumentOutline::new(outline)
    }
}
