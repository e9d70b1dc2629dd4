//! Integration tests for outline inference over span sequences.

use unoutline::outline::{OutlineBuilder, OutlineConfig};
use unoutline::render::{to_json, JsonFormat};
use unoutline::{
    outline_from_spans, outline_from_spans_with_config, BBox, DocumentOutline, HeadingLevel,
    OutlineEntry, Span,
};

const PAGE_HEIGHT: f32 = 800.0;

fn span(text: &str, size: f32, bold: bool, page: u32, y0: f32) -> Span {
    Span::new(text, size, bold, page)
        .with_bbox(BBox::new(72.0, y0, 540.0, y0 + size))
        .with_page_size(612.0, PAGE_HEIGHT)
}

fn body(text: &str, page: u32, y0: f32) -> Span {
    span(text, 12.0, false, page, y0)
}

#[test]
fn test_single_chapter_heading() {
    let spans = vec![
        span("Chapter 1", 18.0, true, 0, 0.3 * PAGE_HEIGHT),
        body(
            "This is the opening paragraph of the chapter and it continues for a while.",
            0,
            0.4 * PAGE_HEIGHT,
        ),
    ];

    let outline = outline_from_spans(&spans);
    assert_eq!(
        outline.outline,
        vec![OutlineEntry::new(HeadingLevel::H1, "Chapter 1", 0)]
    );
    assert_eq!(outline.title, "");
}

#[test]
fn test_two_heading_sizes_on_different_pages() {
    let spans = vec![
        span("Background", 18.0, true, 0, 100.0),
        body("Some body text on the first page", 0, 150.0),
        body("More body text follows here", 0, 170.0),
        span("Prior Work", 14.0, true, 1, 100.0),
        body("Body text on the second page", 1, 150.0),
    ];

    let builder = OutlineBuilder::new();
    let analysis = builder.analyze(&spans);
    let levels: Vec<_> = analysis.levels.iter().collect();
    assert_eq!(levels.len(), 2);
    assert_eq!(levels[0].1, HeadingLevel::H1);
    assert_eq!(levels[0].0.size(), 18.0);
    assert_eq!(levels[1].1, HeadingLevel::H2);
    assert_eq!(levels[1].0.size(), 14.0);

    let outline = builder.build(&spans);
    assert_eq!(
        outline.outline,
        vec![
            OutlineEntry::new(HeadingLevel::H1, "Background", 0),
            OutlineEntry::new(HeadingLevel::H2, "Prior Work", 1),
        ]
    );
}

#[test]
fn test_uniform_font_becomes_h1() {
    let spans = vec![
        body("Plain Title Line", 0, 100.0),
        body("another short line", 0, 120.0),
        body("This line reads like an ordinary sentence of prose.", 0, 140.0),
        body("ok", 0, 160.0),
    ];

    let outline = outline_from_spans(&spans);
    assert_eq!(
        outline.outline,
        vec![
            OutlineEntry::new(HeadingLevel::H1, "Plain Title Line", 0),
            OutlineEntry::new(HeadingLevel::H1, "another short line", 0),
        ]
    );
}

#[test]
fn test_list_marker_beats_heading_font() {
    let spans = vec![
        span("1. Introduction", 18.0, true, 0, 100.0),
        span("Introduction", 18.0, true, 0, 200.0),
        body("body text line one", 0, 250.0),
        body("body text line two", 0, 270.0),
    ];

    let outline = outline_from_spans(&spans);
    assert_eq!(
        outline.outline,
        vec![OutlineEntry::new(HeadingLevel::H1, "Introduction", 0)]
    );
}

#[test]
fn test_empty_document_json() {
    let outline = outline_from_spans(&[]);
    assert_eq!(outline, DocumentOutline::empty());
    assert_eq!(
        to_json(&outline, JsonFormat::Compact).unwrap(),
        r#"{"title":"","outline":[]}"#
    );
}

#[test]
fn test_blank_spans_are_ignored() {
    let spans = vec![span("   ", 30.0, true, 0, 100.0), span("", 30.0, true, 0, 120.0)];
    assert!(outline_from_spans(&spans).is_empty());
}

#[test]
fn test_headers_and_footers_excluded() {
    let spans = vec![
        span("Running Header", 18.0, true, 0, 10.0),
        span("Methods", 18.0, true, 0, 200.0),
        body("regular body copy", 0, 250.0),
        body("more regular body copy", 0, 270.0),
        span("Page Footer", 18.0, true, 0, 790.0),
    ];

    let outline = outline_from_spans(&spans);
    for entry in &outline.outline {
        assert_ne!(entry.text, "Running Header");
        assert_ne!(entry.text, "Page Footer");
    }
    assert_eq!(outline.len(), 1);
}

#[test]
fn test_small_bold_text_never_heading() {
    let spans = vec![
        span("Footnote Label", 7.0, true, 0, 600.0),
        span("Summary", 16.0, true, 0, 100.0),
        body("regular body copy", 0, 150.0),
    ];

    let outline = outline_from_spans(&spans);
    assert!(outline.outline.iter().all(|e| e.text != "Footnote Label"));
}

#[test]
fn test_non_adjacent_duplicates_kept() {
    let spans = vec![
        span("Results", 18.0, true, 0, 100.0),
        span("Discussion", 18.0, true, 0, 300.0),
        span("Results", 18.0, true, 0, 500.0),
        body("body words here", 0, 550.0),
    ];

    let texts: Vec<_> = outline_from_spans(&spans)
        .outline
        .into_iter()
        .map(|e| e.text)
        .collect();
    assert_eq!(texts, vec!["Results", "Discussion", "Results"]);
}

#[test]
fn test_bold_body_size_heading() {
    let spans = vec![
        span("Title Text", 20.0, true, 0, 80.0),
        span("Bold Run-in Heading", 12.0, true, 0, 150.0),
        body("regular body copy", 0, 170.0),
        body("more regular body copy", 0, 190.0),
    ];

    let outline = outline_from_spans(&spans);
    assert_eq!(
        outline.outline,
        vec![
            OutlineEntry::new(HeadingLevel::H1, "Title Text", 0),
            OutlineEntry::new(HeadingLevel::H2, "Bold Run-in Heading", 0),
        ]
    );
}

#[test]
fn test_at_most_three_levels() {
    let spans = vec![
        span("Level One", 24.0, true, 0, 100.0),
        span("Level Two", 20.0, true, 0, 150.0),
        span("Level Three", 16.0, true, 0, 200.0),
        span("Level Four", 14.0, true, 0, 250.0),
        body("regular body copy", 0, 300.0),
        body("more regular body copy", 0, 320.0),
    ];

    let outline = outline_from_spans(&spans);
    assert_eq!(outline.len(), 3);
    assert_eq!(outline.count_at(HeadingLevel::H1), 1);
    assert_eq!(outline.count_at(HeadingLevel::H2), 1);
    assert_eq!(outline.count_at(HeadingLevel::H3), 1);
    assert!(outline.outline.iter().all(|e| e.text != "Level Four"));
}

#[test]
fn test_custom_margin_ratio() {
    let spans = vec![
        span("Near The Top", 18.0, true, 0, 60.0),
        body("regular body copy", 0, 300.0),
    ];

    assert_eq!(outline_from_spans(&spans).len(), 1);

    let config = OutlineConfig::new().with_margin_ratio(0.1);
    assert!(outline_from_spans_with_config(&spans, config).is_empty());
}

#[test]
fn test_deterministic_output() {
    let spans = vec![
        span("Overview", 16.0, false, 0, 100.0),
        span("Details", 16.0, true, 0, 200.0),
        body("body copy alpha", 0, 250.0),
        span("bold body copy", 12.0, true, 0, 270.0),
        body("body copy beta", 1, 300.0),
        span("bold body again", 12.0, true, 1, 320.0),
    ];

    let first = to_json(&outline_from_spans(&spans), JsonFormat::Pretty).unwrap();
    let second = to_json(&outline_from_spans(&spans), JsonFormat::Pretty).unwrap();
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn test_body_tie_prefers_smaller_size() {
    let spans = vec![
        span("Large Words", 14.0, false, 0, 100.0),
        span("Small Words", 11.0, false, 0, 120.0),
        span("Larger Again", 14.0, false, 0, 140.0),
        span("Smaller Again", 11.0, false, 0, 160.0),
        span("Top Heading", 22.0, true, 0, 60.0),
    ];

    let analysis = OutlineBuilder::new().analyze(&spans);
    let body = analysis.body_font().unwrap();
    assert_eq!(body.property.size(), 11.0);
    assert!(!body.property.is_bold());
}
