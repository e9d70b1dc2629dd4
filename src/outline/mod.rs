//! Font-statistics heading inference.
//!
//! Two passes over a document's spans. The first tallies (size, bold)
//! usage, picks the body text font and assigns up to three heading levels
//! to the fonts that stand out from it. The second walks the spans in order,
//! drops headers, footers, list items and prose, and emits every remaining
//! span whose font carries a level.

mod body;
mod builder;
mod config;
mod extract;
mod levels;
mod stats;

pub use body::{resolve_body_font, BodyFont};
pub use builder::{OutlineAnalysis, OutlineBuilder};
pub use config::{
    OutlineConfig, LIST_MARKERS, MARGIN_RATIO, MAX_TEXT_CHARS, MIN_FONT_SIZE, MIN_TEXT_CHARS,
    PROSE_WORD_LIMIT,
};
pub use extract::{HeadingExtractor, SkipReason};
pub use levels::{assign_levels, is_heading_candidate, LevelMap};
pub use stats::FontStatistics;
