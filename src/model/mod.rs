//! Data model shared by the engine adapter and the outline pipeline.
//!
//! Spans come in, outline entries go out. Everything here is created fresh
//! for each document.

mod outline;
mod span;

pub use outline::{DocumentOutline, HeadingLevel, OutlineEntry};
pub use span::{round2, BBox, FontProperty, Span, DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_WIDTH};
