//! Span collection: walks page content streams and emits [`Span`] records.
//!
//! The collector tracks enough of the graphics and text state (CTM, text
//! matrix, leading, current font) to place each text-showing operation on
//! the page. Consecutive runs sharing a font, size and baseline are merged,
//! so a heading split across several `Tj` operations comes out as one span.

use std::collections::HashMap;

use crate::error::Result;
use crate::model::{BBox, Span};

use super::backend::{
    get_number_from_value, BackendFontInfo, ContentOp, PageId, PdfBackend, PdfValue,
    DEFAULT_GLYPH_WIDTH,
};

/// Ascent and descent as fractions of the font size.
const ASCENT: f32 = 0.8;
const DESCENT: f32 = 0.2;

/// TJ adjustments beyond this (in 1/1000 em) read as a word break.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Horizontal gap, relative to font size, that separates two merged runs.
const MERGE_SPACE_RATIO: f32 = 0.15;

/// Baseline tolerance for merging runs, in points.
const BASELINE_TOLERANCE: f32 = 0.5;

/// Widest horizontal gap, in ems, that still joins two runs into one span.
const MAX_MERGE_GAP_EMS: f32 = 1.5;

/// A 2D affine transform `[a b c d e f]` as used by PDF.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translation(tx: f32, ty: f32) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    fn from_operands(operands: &[PdfValue]) -> Option<Self> {
        if operands.len() < 6 {
            return None;
        }
        let n: Vec<f32> = operands[..6]
            .iter()
            .map(|v| get_number_from_value(v).unwrap_or(0.0))
            .collect();
        Some(Self {
            a: n[0],
            b: n[1],
            c: n[2],
            d: n[3],
            e: n[4],
            f: n[5],
        })
    }

    /// `self × other`
    fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn origin(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn horizontal_scale(&self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Text and graphics state relevant to placing text.
#[derive(Debug, Clone)]
struct TextState {
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    tm: Matrix,
    tlm: Matrix,
    leading: f32,
    font: Vec<u8>,
    font_size: f32,
    in_text: bool,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            ctm: Matrix::IDENTITY,
            ctm_stack: Vec::new(),
            tm: Matrix::IDENTITY,
            tlm: Matrix::IDENTITY,
            leading: 0.0,
            font: Vec::new(),
            font_size: 12.0,
            in_text: false,
        }
    }
}

impl TextState {
    fn move_line(&mut self, tx: f32, ty: f32) {
        self.tlm = Matrix::translation(tx, ty).multiply(&self.tlm);
        self.tm = self.tlm;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    /// Advance the text matrix by `tx` unscaled text-space units.
    fn advance(&mut self, tx: f32) {
        self.tm = Matrix::translation(tx, 0.0).multiply(&self.tm);
    }

    fn rendering_matrix(&self) -> Matrix {
        self.tm.multiply(&self.ctm)
    }
}

/// A positioned text run in PDF user space (origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
struct TextRun {
    text: String,
    x: f32,
    baseline: f32,
    width: f32,
    size: f32,
    font: Vec<u8>,
    is_bold: bool,
}

impl TextRun {
    fn right(&self) -> f32 {
        self.x + self.width
    }

    fn continues(&self, next: &TextRun) -> bool {
        self.font == next.font
            && (self.size - next.size).abs() < 0.01
            && (self.baseline - next.baseline).abs() < BASELINE_TOLERANCE
            && next.x >= self.x
            && next.x - self.right() < next.size * MAX_MERGE_GAP_EMS
    }

    fn absorb(&mut self, next: TextRun) {
        let gap = next.x - self.right();
        let joins_words = gap > next.size * MERGE_SPACE_RATIO
            && !self.text.ends_with(char::is_whitespace)
            && !next.text.starts_with(char::is_whitespace)
            && !(self.text.chars().last().is_some_and(is_spaceless_script_char)
                && next.text.chars().next().is_some_and(is_spaceless_script_char));
        if joins_words {
            self.text.push(' ');
        }
        self.text.push_str(&next.text);
        self.width = self.width.max(next.right() - self.x);
    }

    /// Convert to a span with a top-left origin on a page of `height`.
    fn into_span(self, page: u32, width: f32, height: f32) -> Span {
        let top = self.baseline + self.size * ASCENT;
        let bottom = self.baseline - self.size * DESCENT;
        Span::new(&self.text, self.size, self.is_bold, page)
            .with_bbox(BBox::new(
                self.x,
                height - top,
                self.right(),
                height - bottom,
            ))
            .with_page_size(width, height)
    }
}

/// Collects spans from every page of a document, in page order.
pub struct SpanCollector<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: PdfBackend + ?Sized> SpanCollector<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Collect all non-blank spans, page by page.
    ///
    /// A page whose content cannot be read is logged and skipped.
    pub fn collect(&self) -> Vec<Span> {
        let mut spans = Vec::new();
        for (index, (page_num, page_id)) in self.backend.pages().into_iter().enumerate() {
            match self.collect_page(index as u32, page_id) {
                Ok(page_spans) => spans.extend(page_spans),
                Err(e) => log::warn!("Skipping page {}: {}", page_num, e),
            }
        }
        log::debug!("Collected {} spans", spans.len());
        spans
    }

    /// Collect spans for one page; `index` is zero-based.
    pub fn collect_page(&self, index: u32, page_id: PageId) -> Result<Vec<Span>> {
        let (width, height) = self.backend.page_size(page_id);

        let fonts: HashMap<Vec<u8>, BackendFontInfo> = match self.backend.page_fonts(page_id) {
            Ok(fonts) => fonts.into_iter().map(|f| (f.name.clone(), f)).collect(),
            Err(e) => {
                log::warn!("No font resources on page {}: {}", index + 1, e);
                HashMap::new()
            }
        };

        let content = self.backend.page_content(page_id)?;
        let ops = self.backend.decode_content(&content)?;
        let runs = self.walk(page_id, &ops, &fonts);

        Ok(merge_runs(runs)
            .into_iter()
            .map(|run| run.into_span(index, width, height))
            .filter(|span| !span.is_blank())
            .collect())
    }

    fn walk(
        &self,
        page_id: PageId,
        ops: &[ContentOp],
        fonts: &HashMap<Vec<u8>, BackendFontInfo>,
    ) -> Vec<TextRun> {
        let mut state = TextState::default();
        let mut runs = Vec::new();

        for op in ops {
            match op.operator.as_str() {
                "q" => state.ctm_stack.push(state.ctm),
                "Q" => {
                    if let Some(ctm) = state.ctm_stack.pop() {
                        state.ctm = ctm;
                    }
                }
                "cm" => {
                    if let Some(m) = Matrix::from_operands(&op.operands) {
                        state.ctm = m.multiply(&state.ctm);
                    }
                }
                "BT" => {
                    state.in_text = true;
                    state.tm = Matrix::IDENTITY;
                    state.tlm = Matrix::IDENTITY;
                }
                "ET" => state.in_text = false,
                "Tf" => {
                    if let Some(PdfValue::Name(name)) = op.operands.first() {
                        state.font = name.clone();
                    }
                    if let Some(size) = op.operands.get(1).and_then(get_number_from_value) {
                        state.font_size = size;
                    }
                }
                "TL" => {
                    if let Some(leading) = op.operands.first().and_then(get_number_from_value) {
                        state.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    let tx = op.operands.first().and_then(get_number_from_value);
                    let ty = op.operands.get(1).and_then(get_number_from_value);
                    if let (Some(tx), Some(ty)) = (tx, ty) {
                        if op.operator == "TD" {
                            state.leading = -ty;
                        }
                        state.move_line(tx, ty);
                    }
                }
                "Tm" => {
                    if let Some(m) = Matrix::from_operands(&op.operands) {
                        state.tm = m;
                        state.tlm = m;
                    }
                }
                "T*" => state.next_line(),
                "Tj" | "TJ" | "'" | "\"" => {
                    if op.operator == "'" || op.operator == "\"" {
                        state.next_line();
                    }
                    if !state.in_text {
                        continue;
                    }
                    let operand = match op.operator.as_str() {
                        "\"" => op.operands.get(2),
                        _ => op.operands.first(),
                    };
                    if let Some(operand) = operand {
                        if let Some(run) = self.show_text(page_id, &mut state, operand, fonts) {
                            runs.push(run);
                        }
                    }
                }
                _ => {}
            }
        }

        runs
    }

    /// Decode one text-showing operand and advance the text matrix past it.
    fn show_text(
        &self,
        page_id: PageId,
        state: &mut TextState,
        operand: &PdfValue,
        fonts: &HashMap<Vec<u8>, BackendFontInfo>,
    ) -> Option<TextRun> {
        let font = fonts.get(&state.font);
        let trm = state.rendering_matrix();
        let (x, baseline) = trm.origin();
        let size = state.font_size * trm.vertical_scale();

        let mut text = String::new();
        let mut advance = 0.0f32;

        let show_string = |bytes: &[u8], text: &mut String| -> f32 {
            let decoded = self.backend.decode_text(page_id, &state.font, bytes);
            let glyphs = match font.and_then(|f| f.widths.as_ref()) {
                Some(widths) => widths.advance(bytes),
                None => decoded.chars().count() as f32 * DEFAULT_GLYPH_WIDTH,
            };
            text.push_str(&decoded);
            glyphs
        };

        match operand {
            PdfValue::Str(bytes) => advance += show_string(bytes, &mut text),
            PdfValue::Array(items) => {
                for item in items {
                    match item {
                        PdfValue::Str(bytes) => advance += show_string(bytes, &mut text),
                        other => {
                            if let Some(adjustment) = get_number_from_value(other) {
                                advance -= adjustment;
                                if -adjustment > TJ_SPACE_THRESHOLD
                                    && !text.is_empty()
                                    && !text.ends_with(char::is_whitespace)
                                    && !text.chars().last().is_some_and(is_spaceless_script_char)
                                {
                                    text.push(' ');
                                }
                            }
                        }
                    }
                }
            }
            _ => return None,
        }

        let tx = advance / 1000.0 * state.font_size;
        let width = tx * trm.horizontal_scale();
        state.advance(tx);

        if text.is_empty() {
            return None;
        }

        Some(TextRun {
            text,
            x,
            baseline,
            width,
            size,
            font: state.font.clone(),
            is_bold: font.map(|f| f.is_bold).unwrap_or(false),
        })
    }
}

/// Merge consecutive runs that continue the same line in the same font.
fn merge_runs(runs: Vec<TextRun>) -> Vec<TextRun> {
    let mut merged: Vec<TextRun> = Vec::with_capacity(runs.len());
    for run in runs {
        match merged.last_mut() {
            Some(last) if last.continues(&run) => last.absorb(run),
            _ => merged.push(run),
        }
    }
    merged
}

/// Han and kana characters, whose scripts put no spaces between words.
/// Hangul is written with spaces and is not included.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(
        c as u32,
        0x3000..=0x303F // CJK symbols and punctuation
            | 0x3040..=0x30FF // hiragana, katakana
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xF900..=0xFAFF
    )
}
