//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface for the PDF operations span collection
//! needs, isolating the concrete PDF library (lopdf) from the collector.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object};

use crate::detect::detect_format_from_bytes;
use crate::error::{Error, Result};
use crate::model::{DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_WIDTH};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// FontDescriptor flag bit for ForceBold (bit 19, 1-based).
const FORCE_BOLD_FLAG: i64 = 1 << 18;

/// Descriptor weights at or above this are semibold or heavier.
const BOLD_WEIGHT: f32 = 600.0;

/// Glyph advance used when a font has no usable width table, in 1/1000 em.
pub const DEFAULT_GLYPH_WIDTH: f32 = 500.0;

/// Glyph advances of a simple (single-byte) font, in 1/1000 em.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphWidths {
    first_char: u32,
    widths: Vec<f32>,
}

impl GlyphWidths {
    pub fn new(first_char: u32, widths: Vec<f32>) -> Self {
        Self { first_char, widths }
    }

    /// Advance of a single character code.
    pub fn width(&self, code: u8) -> f32 {
        (code as u32)
            .checked_sub(self.first_char)
            .and_then(|i| self.widths.get(i as usize))
            .copied()
            .filter(|w| *w > 0.0)
            .unwrap_or(DEFAULT_GLYPH_WIDTH)
    }

    /// Total advance of a byte string.
    pub fn advance(&self, bytes: &[u8]) -> f32 {
        bytes.iter().map(|&b| self.width(b)).sum()
    }
}

/// Font information returned by the backend.
#[derive(Debug, Clone)]
pub struct BackendFontInfo {
    /// Font resource name (key in the page's font dictionary).
    pub name: Vec<u8>,
    /// Base font name (e.g., "Helvetica-Bold").
    pub base_font: String,
    /// Whether the font renders bold.
    pub is_bold: bool,
    /// Width table for simple fonts; `None` for composite fonts.
    pub widths: Option<GlyphWidths>,
}

/// A value from a PDF content stream operand.
#[derive(Debug, Clone)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    pub fn new(operator: impl Into<String>, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }
}

/// Abstract interface for PDF document access.
pub trait PdfBackend {
    /// Return all pages as (page_number → PageId), 1-based and ordered.
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Page width and height in points.
    fn page_size(&self, page: PageId) -> (f32, f32);

    /// Return font info for a given page.
    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>>;

    /// Return the raw (decompressed) content stream bytes for a page.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;

    /// Parse raw content stream bytes into a sequence of operations.
    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>>;

    /// Decode a text byte sequence using the font's encoding on the given page.
    /// Falls back to simple decoding if the font or encoding is unavailable.
    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String;
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

/// Bold detection from the base font name.
pub fn is_bold_font_name(base_font: &str) -> bool {
    let name = base_font.to_lowercase();
    ["bold", "black", "heavy", "semibold", "demi"]
        .iter()
        .any(|marker| name.contains(marker))
}

// ---------------------------------------------------------------------------
// LopdfBackend: concrete implementation backed by lopdf
// ---------------------------------------------------------------------------

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::load_bytes(&data)
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        detect_format_from_bytes(data)?;

        let doc = LopdfDocument::load_mem(data)?;
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc })
    }

    /// Load from a reader.
    pub fn load_reader<R: std::io::Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::load_bytes(&data)
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Follow a reference to a dictionary, or return an inline dictionary.
    fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dictionary> {
        match obj {
            Object::Reference(id) => self.doc.get_dictionary(*id).ok(),
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    fn resolve_number(&self, obj: &Object) -> Option<f32> {
        match obj {
            Object::Reference(id) => self
                .doc
                .get_object(*id)
                .ok()
                .and_then(|o| self.resolve_number(o)),
            other => get_number(other),
        }
    }

    /// Walk up the page tree to find the MediaBox.
    fn find_media_box(&self, dict: &Dictionary) -> Option<[f32; 4]> {
        if let Ok(obj) = dict.get(b"MediaBox") {
            let array = match obj {
                Object::Reference(id) => self
                    .doc
                    .get_object(*id)
                    .ok()
                    .and_then(|o| o.as_array().ok()),
                other => other.as_array().ok(),
            };
            if let Some(array) = array {
                let nums: Vec<f32> = array.iter().filter_map(|o| self.resolve_number(o)).collect();
                if nums.len() >= 4 {
                    return Some([nums[0], nums[1], nums[2], nums[3]]);
                }
            }
        }

        let parent = dict.get(b"Parent").ok()?.as_reference().ok()?;
        let parent_dict = self.doc.get_dictionary(parent).ok()?;
        self.find_media_box(parent_dict)
    }

    /// Bold detection from a font dictionary: name, ForceBold flag, weight.
    fn font_is_bold(&self, font: &Dictionary, base_font: &str) -> bool {
        if is_bold_font_name(base_font) {
            return true;
        }

        let Some(descriptor) = font
            .get(b"FontDescriptor")
            .ok()
            .and_then(|o| self.resolve_dict(o))
        else {
            return false;
        };

        let force_bold = descriptor
            .get(b"Flags")
            .ok()
            .and_then(|o| o.as_i64().ok())
            .map(|flags| flags & FORCE_BOLD_FLAG != 0)
            .unwrap_or(false);

        let heavy = descriptor
            .get(b"FontWeight")
            .ok()
            .and_then(|o| self.resolve_number(o))
            .map(|weight| weight >= BOLD_WEIGHT)
            .unwrap_or(false);

        force_bold || heavy
    }

    /// Width table from `FirstChar` and `Widths`, for non-composite fonts.
    fn font_widths(&self, font: &Dictionary) -> Option<GlyphWidths> {
        let composite = font
            .get(b"Subtype")
            .ok()
            .and_then(|o| o.as_name().ok())
            .map(|name| name == b"Type0")
            .unwrap_or(false);
        if composite {
            return None;
        }

        let first_char = font.get(b"FirstChar").ok()?.as_i64().ok()?;
        let widths = match font.get(b"Widths").ok()? {
            Object::Reference(id) => self.doc.get_object(*id).ok()?.as_array().ok()?,
            other => other.as_array().ok()?,
        };

        Some(GlyphWidths::new(
            u32::try_from(first_char).ok()?,
            widths
                .iter()
                .map(|w| self.resolve_number(w).unwrap_or(0.0))
                .collect(),
        ))
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_size(&self, page: PageId) -> (f32, f32) {
        self.doc
            .get_dictionary(page)
            .ok()
            .and_then(|dict| self.find_media_box(dict))
            .map(|[x0, y0, x1, y1]| ((x1 - x0).abs(), (y1 - y0).abs()))
            .filter(|(w, h)| *w > 0.0 && *h > 0.0)
            .unwrap_or((DEFAULT_PAGE_WIDTH, DEFAULT_PAGE_HEIGHT))
    }

    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>> {
        let lopdf_fonts = self
            .doc
            .get_page_fonts(page)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut result = Vec::with_capacity(lopdf_fonts.len());
        for (name, font_dict) in &lopdf_fonts {
            let base_font = font_dict
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            let is_bold = self.font_is_bold(font_dict, &base_font);
            result.push(BackendFontInfo {
                name: name.clone(),
                base_font,
                is_bold,
                widths: self.font_widths(font_dict),
            });
        }
        Ok(result)
    }

    fn page_content(&self, page: PageId) -> Result<Vec<u8>> {
        self.doc
            .get_page_content(page)
            .map_err(|e| Error::PdfParse(e.to_string()))
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
        let content =
            lopdf::content::Content::decode(data).map_err(|e| Error::PdfParse(e.to_string()))?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operator: op.operator,
                operands: op.operands.iter().map(convert_object).collect(),
            })
            .collect())
    }

    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String {
        if let Ok(lopdf_fonts) = self.doc.get_page_fonts(page) {
            if let Some(font_dict) = lopdf_fonts.get(font_name) {
                if let Ok(enc) = font_dict.get_font_encoding(&self.doc) {
                    if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                        return text;
                    }
                }
            }
        }
        decode_text_simple(bytes)
    }
}

/// Convert a `lopdf::Object` to [`PdfValue`].
fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Helper: extract a number from a [`PdfValue`].
pub fn get_number_from_value(val: &PdfValue) -> Option<f32> {
    match val {
        PdfValue::Integer(i) => Some(*i as f32),
        PdfValue::Real(r) => Some(*r),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_simple_utf8() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
    }

    #[test]
    fn test_decode_text_simple_latin1() {
        // 0xE9 = 'é' in Latin-1
        let bytes = vec![0x48, 0x65, 0x6C, 0x6C, 0xE9];
        assert_eq!(decode_text_simple(&bytes), "Hellé");
    }

    #[test]
    fn test_decode_text_simple_utf16be() {
        let bytes = vec![0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_text_simple(&bytes), "Hi");
    }

    #[test]
    fn test_bold_font_names() {
        assert!(is_bold_font_name("Helvetica-Bold"));
        assert!(is_bold_font_name("ABCDEF+Arial-BoldMT"));
        assert!(is_bold_font_name("SourceSans-Black"));
        assert!(is_bold_font_name("Futura-DemiBold"));
        assert!(!is_bold_font_name("Times-Roman"));
        assert!(!is_bold_font_name("Helvetica-Oblique"));
    }

    #[test]
    fn test_glyph_widths() {
        let widths = GlyphWidths::new(65, vec![722.0, 667.0, 0.0]);
        assert_eq!(widths.width(b'A'), 722.0);
        assert_eq!(widths.width(b'B'), 667.0);
        // Zero and out-of-range entries fall back to the default.
        assert_eq!(widths.width(b'C'), DEFAULT_GLYPH_WIDTH);
        assert_eq!(widths.width(b' '), DEFAULT_GLYPH_WIDTH);
        assert_eq!(widths.advance(b"AB"), 1389.0);
    }

    #[test]
    fn test_get_number_from_value() {
        assert_eq!(get_number_from_value(&PdfValue::Integer(42)), Some(42.0));
        assert_eq!(get_number_from_value(&PdfValue::Real(2.5)), Some(2.5));
        assert_eq!(get_number_from_value(&PdfValue::Other), None);
    }

    #[test]
    fn test_load_rejects_non_pdf() {
        assert!(matches!(
            LopdfBackend::load_bytes(b"plain text, not a pdf"),
            Err(Error::UnknownFormat)
        ));
    }
}
