//! Generated cover page.
//!
//! Builds a one-page in-memory document carrying a centered title, which
//! the assembler routes through the same page-extraction path as real
//! sources. Nothing touches the filesystem, so there is no transient cover
//! artifact to clean up after the compile.
//!
//! The layout is fixed and cosmetic: Helvetica-Bold 24pt, centered on a
//! US-letter page. Its only correctness constraint is that it renders
//! without error.

use lopdf::content::{Content, Operation};
use lopdf::dictionary;
use lopdf::{Document, Object, Stream};
use std::path::PathBuf;

use crate::error::{AssemblyError, Result};

/// US-letter page size in points.
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;

/// Title font size in points.
const FONT_SIZE: f32 = 24.0;

/// Average glyph advance of Helvetica-Bold, as a fraction of the font size.
/// Good enough for centering; there is no text metrics table here.
const GLYPH_WIDTH_FACTOR: f32 = 0.55;

const LEFT_MARGIN: f32 = 36.0;

/// Build a one-page document with `title` centered on it.
pub fn title_page(title: &str) -> Result<Document> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(lopdf::dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });

    let resources_id = doc.add_object(lopdf::dictionary! {
        "Font" => lopdf::dictionary! {
            "F1" => font_id,
        },
    });

    let text_width = title.chars().count() as f32 * FONT_SIZE * GLYPH_WIDTH_FACTOR;
    let x = ((PAGE_WIDTH - text_width) / 2.0).max(LEFT_MARGIN);
    let y = PAGE_HEIGHT / 2.0;

    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(title)]),
            Operation::new("ET", vec![]),
        ],
    };

    let content_bytes = content
        .encode()
        .map_err(|e| AssemblyError::malformed(PathBuf::from("<generated cover>"), e.to_string()))?;
    let content_id = doc.add_object(Stream::new(lopdf::Dictionary::new(), content_bytes));

    let page_id = doc.add_object(lopdf::dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        "Resources" => resources_id,
        "Contents" => content_id,
    });

    let pages_dict = lopdf::dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, pages_dict.into());

    let catalog_id = doc.add_object(lopdf::dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}
