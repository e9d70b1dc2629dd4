//! Span-level types: text runs and the font properties used to classify them.

use serde::{Deserialize, Serialize};

/// Letter size, used when a page does not declare a MediaBox.
pub const DEFAULT_PAGE_WIDTH: f32 = 612.0;
pub const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// Round to 2 decimals so near-identical sizes compare equal.
pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Bounding box in page coordinates (origin top-left, y grows downwards).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    /// Create a bounding box; coordinates are rounded to 2 decimals.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: round2(x0),
            y0: round2(y0),
            x1: round2(x1),
            y1: round2(y1),
        }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// One contiguous run of text sharing a font size and weight.
///
/// Spans are immutable once built: the text is trimmed and all measurements
/// are rounded at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    text: String,
    size: f32,
    is_bold: bool,
    page: u32,
    bbox: BBox,
    page_width: f32,
    page_height: f32,
}

impl Span {
    /// Create a span on a Letter-sized page with an empty bounding box.
    ///
    /// `page` is zero-based.
    pub fn new(text: impl AsRef<str>, size: f32, is_bold: bool, page: u32) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
            size: round2(size),
            is_bold,
            page,
            bbox: BBox::default(),
            page_width: DEFAULT_PAGE_WIDTH,
            page_height: DEFAULT_PAGE_HEIGHT,
        }
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, bbox: BBox) -> Self {
        self.bbox = bbox;
        self
    }

    /// Set the page dimensions in points.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = round2(width);
        self.page_height = round2(height);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_bold(&self) -> bool {
        self.is_bold
    }

    /// Zero-based page index.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    pub fn page_height(&self) -> f32 {
        self.page_height
    }

    /// Whether the span carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    /// The (size, bold) key this span is classified under.
    pub fn font_property(&self) -> FontProperty {
        FontProperty::new(self.size, self.is_bold)
    }
}

/// The (size, bold) pair used as a classification key.
///
/// Size is held in hundredths of a point so that equality, hashing and
/// ordering are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontProperty {
    size_centi: i32,
    bold: bool,
}

impl FontProperty {
    pub fn new(size: f32, bold: bool) -> Self {
        Self {
            size_centi: (size * 100.0).round() as i32,
            bold,
        }
    }

    /// Font size in points.
    pub fn size(&self) -> f32 {
        self.size_centi as f32 / 100.0
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Size in hundredths of a point, for exact comparisons.
    pub fn size_key(&self) -> i32 {
        self.size_centi
    }
}

impl std::fmt::Display for FontProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}pt", self.size())?;
        if self.bold {
            write!(f, " bold")?;
        }
        Ok(())
    }
}
