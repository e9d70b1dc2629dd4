//! Shared fixtures: small PDFs built in memory with lopdf.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One line of text placed on a page.
pub struct Line {
    pub text: &'static str,
    pub size: i64,
    pub bold: bool,
    pub x: i64,
    pub y: i64,
}

pub fn line(text: &'static str, size: i64, bold: bool, y: i64) -> Line {
    Line {
        text,
        size,
        bold,
        x: 72,
        y,
    }
}

/// Build a Letter-sized PDF with one page per slice of lines.
///
/// `F1` is Helvetica and `F2` Helvetica-Bold. The MediaBox sits on the page
/// tree root, so pages inherit it.
pub fn build_pdf(pages: &[Vec<Line>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for l in lines {
            let font = if l.bold { "F2" } else { "F1" };
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec![font.into(), l.size.into()]));
            operations.push(Operation::new("Td", vec![l.x.into(), l.y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(l.text)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("save fixture");
    bytes
}

/// A two-page report: a title, two sections and body text.
pub fn sample_report() -> Vec<u8> {
    build_pdf(&[
        vec![
            line("Annual Report", 24, true, 700),
            line("Prepared for the board of directors", 11, false, 660),
            line("Overview", 16, true, 620),
            line("Revenue grew across every region", 11, false, 590),
            line("Costs stayed flat for the year", 11, false, 575),
            line("Confidential", 11, false, 20),
        ],
        vec![
            line("Outlook", 16, true, 700),
            line("We expect steady growth next year", 11, false, 670),
            line("Hiring will continue in engineering", 11, false, 655),
        ],
    ])
}
