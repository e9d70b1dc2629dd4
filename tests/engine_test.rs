//! Integration tests: PDF bytes through span collection to the outline.

mod common;

use common::{build_pdf, line, sample_report};
use unoutline::engine::{collect_spans, LopdfBackend, PdfBackend};
use unoutline::{
    extract_outline, extract_outline_bytes, try_extract_outline_bytes, Error, HeadingLevel,
    OutlineEntry,
};

#[test]
fn test_report_outline() {
    let outline = try_extract_outline_bytes(&sample_report()).unwrap();
    assert_eq!(outline.title, "");
    assert_eq!(
        outline.outline,
        vec![
            OutlineEntry::new(HeadingLevel::H1, "Annual Report", 0),
            OutlineEntry::new(HeadingLevel::H2, "Overview", 0),
            OutlineEntry::new(HeadingLevel::H2, "Outlook", 1),
        ]
    );
}

#[test]
fn test_spans_carry_geometry() {
    let backend = LopdfBackend::load_bytes(&sample_report()).unwrap();
    assert_eq!(backend.page_count(), 2);

    let pages = backend.pages();
    let first = *pages.values().next().unwrap();
    assert_eq!(backend.page_size(first), (612.0, 792.0));

    let spans = collect_spans(&backend);
    let title = spans.iter().find(|s| s.text() == "Annual Report").unwrap();
    assert_eq!(title.size(), 24.0);
    assert!(title.is_bold());
    assert_eq!(title.page(), 0);
    assert_eq!(title.bbox().x0, 72.0);
    // Top-left origin: 792 - (700 + 0.8 * 24)
    assert!((title.bbox().y0 - 72.8).abs() < 0.01);

    let outlook = spans.iter().find(|s| s.text() == "Outlook").unwrap();
    assert_eq!(outlook.page(), 1);
}

#[test]
fn test_footer_text_is_collected_but_not_emitted() {
    let bytes = sample_report();
    let backend = LopdfBackend::load_bytes(&bytes).unwrap();
    let spans = collect_spans(&backend);
    assert!(spans.iter().any(|s| s.text() == "Confidential"));

    let outline = extract_outline_bytes(&bytes);
    assert!(outline.outline.iter().all(|e| e.text != "Confidential"));
}

#[test]
fn test_page_without_text() {
    let bytes = build_pdf(&[vec![]]);
    let outline = try_extract_outline_bytes(&bytes).unwrap();
    assert!(outline.is_empty());
}

#[test]
fn test_list_items_filtered_in_document() {
    let bytes = build_pdf(&[vec![
        line("Requirements", 18, true, 700),
        line("1. Install the toolchain", 18, true, 670),
        line("Every step is described below", 12, false, 640),
        line("Follow them in order", 12, false, 625),
    ]]);

    let outline = extract_outline_bytes(&bytes);
    assert_eq!(
        outline.outline,
        vec![OutlineEntry::new(HeadingLevel::H1, "Requirements", 0)]
    );
}

#[test]
fn test_invalid_bytes() {
    assert!(matches!(
        try_extract_outline_bytes(b"hello world"),
        Err(Error::UnknownFormat)
    ));
    assert!(extract_outline_bytes(b"hello world").is_empty());
    assert!(extract_outline_bytes(&[]).is_empty());
}

#[test]
fn test_truncated_pdf_recovers_to_empty() {
    let mut bytes = sample_report();
    bytes.truncate(64);
    assert!(extract_outline_bytes(&bytes).is_empty());
}

#[test]
fn test_extract_outline_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, sample_report()).unwrap();

    let outline = extract_outline(&path);
    assert_eq!(outline.len(), 3);
    assert_eq!(outline.count_at(HeadingLevel::H1), 1);
}
