//! In-memory PDF fixtures for unit tests.
//!
//! Each generated page carries a `"{label} {page_number}"` text marker in
//! its content stream, so tests can assert exactly which source page ended
//! up where in an assembled document.

use lopdf::content::{Content, Operation};
use lopdf::dictionary;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Build an n-page document whose pages are marked `"{label} {i}"`.
///
/// Resources and MediaBox live on the Pages node, not the pages, so
/// extraction has to materialize inherited attributes to keep the pages
/// renderable.
pub fn create_labeled_pdf(label: &str, pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(lopdf::dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut page_ids = Vec::new();
    for i in 1..=pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(format!("{label} {i}"))]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

        let page_id = doc.add_object(lopdf::dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let pages_dict = lopdf::dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids
            .iter()
            .map(|&id| Object::Reference(id))
            .collect::<Vec<Object>>(),
        "Count" => pages as i64,
        "Resources" => lopdf::dictionary! {
            "Font" => lopdf::dictionary! {
                "F1" => font_id,
            },
        },
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, pages_dict.into());

    let catalog_id = doc.add_object(lopdf::dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Build an n-page document with generic page markers.
pub fn create_multi_page_pdf(pages: usize) -> Document {
    create_labeled_pdf("Page", pages)
}

/// Save a document into a temp dir, returning its path.
pub fn write_pdf(dir: &TempDir, name: &str, mut doc: Document) -> PathBuf {
    let path = dir.path().join(name);
    doc.save(&path).unwrap();
    path
}

/// Extract the text shown by one page's content stream.
pub fn page_text(doc: &Document, page_id: ObjectId) -> String {
    let data = doc.get_page_content(page_id).unwrap();
    let content = Content::decode(&data).unwrap();

    content
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first())
        .filter_map(|operand| operand.as_str().ok())
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text markers of every page, in page order.
pub fn page_markers(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .into_values()
        .map(|page_id| page_text(doc, page_id))
        .collect()
}

/// Load a written output PDF and return its page markers.
pub async fn output_markers(path: &Path) -> Vec<String> {
    let doc = Document::load(path).await.unwrap();
    page_markers(&doc)
}
