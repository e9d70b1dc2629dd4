//! # unoutline
//!
//! Heading outline inference for PDF documents.
//!
//! This library reads the text of a PDF together with its typography, works
//! out which font is the body text, and reports the text set in larger or
//! bolder fonts as an H1 to H3 outline.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unoutline::{extract_outline, render};
//!
//! fn main() -> unoutline::Result<()> {
//!     // Never fails: unreadable documents yield an empty outline
//!     let outline = extract_outline("document.pdf");
//!
//!     let json = render::to_json(&outline, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Span collection**: positioned text runs with size and boldness
//! - **Font statistics**: usage counts per (size, bold) pair
//! - **Body font**: the most used font, ignoring the largest size
//! - **Heading levels**: up to three fonts that stand out from the body
//! - **Extraction**: layout and content filters, then the level lookup
//! - **Batch**: whole directories, optionally in parallel with Rayon

pub mod batch;
pub mod detect;
pub mod engine;
pub mod error;
pub mod model;
pub mod outline;
pub mod render;

// Re-export commonly used types
pub use batch::{process_directory, BatchOptions, BatchReport};
pub use detect::{detect_format_from_bytes, detect_format_from_path, PdfFormat};
pub use engine::{collect_spans, LopdfBackend, PdfBackend, SpanCollector};
pub use error::{Error, Result};
pub use model::{BBox, DocumentOutline, FontProperty, HeadingLevel, OutlineEntry, Span};
pub use outline::{OutlineAnalysis, OutlineBuilder, OutlineConfig};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Infer the outline of a document from its spans, with default thresholds.
///
/// Spans must be in reading order: page by page, in content stream order.
///
/// # Example
///
/// ```
/// use unoutline::{outline_from_spans, BBox, HeadingLevel, Span};
///
/// let at = |text: &str, size: f32, bold: bool, y: f32| {
///     Span::new(text, size, bold, 0).with_bbox(BBox::new(72.0, y, 400.0, y + size))
/// };
/// let spans = vec![
///     at("Introduction", 18.0, true, 100.0),
///     at("Body text of the document", 11.0, false, 130.0),
///     at("More body text", 11.0, false, 150.0),
/// ];
/// let outline = outline_from_spans(&spans);
/// assert_eq!(outline.outline[0].level, HeadingLevel::H1);
/// ```
pub fn outline_from_spans(spans: &[Span]) -> DocumentOutline {
    OutlineBuilder::new().build(spans)
}

/// Infer the outline of a document from its spans with custom thresholds.
pub fn outline_from_spans_with_config(spans: &[Span], config: OutlineConfig) -> DocumentOutline {
    OutlineBuilder::with_config(config).build(spans)
}

/// Extract the outline of a PDF file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a usable PDF.
///
/// # Example
///
/// ```no_run
/// use unoutline::try_extract_outline;
///
/// let outline = try_extract_outline("document.pdf")?;
/// println!("{} headings", outline.len());
/// # Ok::<(), unoutline::Error>(())
/// ```
pub fn try_extract_outline<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    let backend = LopdfBackend::load_file(path)?;
    Ok(OutlineBuilder::new().build(&collect_spans(&backend)))
}

/// Extract the outline of a PDF held in memory.
pub fn try_extract_outline_bytes(data: &[u8]) -> Result<DocumentOutline> {
    let backend = LopdfBackend::load_bytes(data)?;
    Ok(OutlineBuilder::new().build(&collect_spans(&backend)))
}

/// Extract the outline of a PDF from a reader.
pub fn try_extract_outline_reader<R: Read>(reader: R) -> Result<DocumentOutline> {
    let backend = LopdfBackend::load_reader(reader)?;
    Ok(OutlineBuilder::new().build(&collect_spans(&backend)))
}

/// Extract the outline of a PDF file, or an empty outline if it cannot be
/// opened.
///
/// # Example
///
/// ```no_run
/// use unoutline::extract_outline;
///
/// let outline = extract_outline("maybe-broken.pdf");
/// for entry in &outline.outline {
///     println!("{} {} (page {})", entry.level, entry.text, entry.page);
/// }
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> DocumentOutline {
    extract_outline_with(path, &OutlineBuilder::new())
}

/// Like [`extract_outline`], using the given builder's thresholds.
pub fn extract_outline_with<P: AsRef<Path>>(path: P, builder: &OutlineBuilder) -> DocumentOutline {
    let path = path.as_ref();
    match LopdfBackend::load_file(path) {
        Ok(backend) => builder.build(&collect_spans(&backend)),
        Err(e) => {
            log::warn!("Cannot open {}: {}", path.display(), e);
            DocumentOutline::empty()
        }
    }
}

/// Extract the outline of an in-memory PDF, or an empty outline if it
/// cannot be opened.
pub fn extract_outline_bytes(data: &[u8]) -> DocumentOutline {
    match try_extract_outline_bytes(data) {
        Ok(outline) => outline,
        Err(e) => {
            log::warn!("Cannot open document: {}", e);
            DocumentOutline::empty()
        }
    }
}

/// Run the font analysis on a PDF file without extracting headings.
///
/// # Example
///
/// ```no_run
/// use unoutline::analyze_file;
///
/// let analysis = analyze_file("document.pdf")?;
/// println!("body font: {}", analysis.body_font()?.property);
/// # Ok::<(), unoutline::Error>(())
/// ```
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<OutlineAnalysis> {
    let backend = LopdfBackend::load_file(path)?;
    Ok(OutlineBuilder::new().analyze(&collect_spans(&backend)))
}
