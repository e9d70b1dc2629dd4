//! Document engine adapter.
//!
//! Opens PDFs through [`LopdfBackend`] and turns their content streams into
//! positioned [`Span`](crate::model::Span) records with [`SpanCollector`].

mod backend;
mod collector;

pub use backend::{
    decode_text_simple, is_bold_font_name, BackendFontInfo, ContentOp, GlyphWidths,
    LopdfBackend, PageId, PdfBackend, PdfValue, DEFAULT_GLYPH_WIDTH,
};
pub use collector::SpanCollector;

use crate::model::Span;

/// Collect every span of a loaded document, in page order.
pub fn collect_spans<B: PdfBackend + ?Sized>(backend: &B) -> Vec<Span> {
    SpanCollector::new(backend).collect()
}
