//! End-to-end assembly tests against real files on disk.

use lopdf::content::{Content, Operation};
use lopdf::dictionary;
use lopdf::{Dictionary, Document, Object, Stream};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use pagebind::assemble::Assembler;
use pagebind::error::AssemblyError;
use pagebind::plan::{CompilationPlan, CoverSpec, MissingSelectionPolicy, PlannedSource};
use pagebind::session::Session;

/// Build an n-page document whose pages are marked `"{label} {i}"`.
fn labeled_pdf(label: &str, pages: usize) -> Document {
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

fn write_pdf(dir: &TempDir, name: &str, mut doc: Document) -> PathBuf {
    let path = dir.path().join(name);
    doc.save(&path).unwrap();
    path
}

/// Text markers of every page of a written PDF, in page order.
async fn output_markers(path: &Path) -> Vec<String> {
    let doc = Document::load(path).await.unwrap();
    doc.get_pages()
        .into_values()
        .map(|page_id| {
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
        })
        .collect()
}

#[tokio::test]
async fn selections_from_three_sources_land_in_caller_order() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(&temp_dir, "a.pdf", labeled_pdf("A", 3));
    let b = write_pdf(&temp_dir, "b.pdf", labeled_pdf("B", 5));
    let c = write_pdf(&temp_dir, "c.pdf", labeled_pdf("C", 2));
    let output = temp_dir.path().join("out.pdf");

    let plan = CompilationPlan::new(vec![
        PlannedSource::selected(a, vec![1, 3]),
        PlannedSource::selected(b, vec![2, 4]),
        PlannedSource::selected(c, vec![1, 2]),
    ]);

    let report = Assembler::new().compile(&plan, &output).await.unwrap();
    assert_eq!(report.pages_written, 6);
    assert_eq!(report.sources_used, 3);

    let markers = output_markers(&output).await;
    assert_eq!(markers, vec!["A 1", "A 3", "B 2", "B 4", "C 1", "C 2"]);
}

#[tokio::test]
async fn cover_pull_is_independent_of_first_sources_selection() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(&temp_dir, "a.pdf", labeled_pdf("A", 3));
    let output = temp_dir.path().join("out.pdf");

    // Page 1 as cover material AND page 2 as the regular selection; the
    // cover pull does not consume or shadow the regular one.
    let plan = CompilationPlan::new(vec![PlannedSource::selected(a, vec![2])]).with_cover(
        CoverSpec {
            title: None,
            pages: vec![1],
        },
    );

    let report = Assembler::new().compile(&plan, &output).await.unwrap();
    assert_eq!(report.cover_pages, 1);

    let markers = output_markers(&output).await;
    assert_eq!(markers, vec!["A 1", "A 2"]);
}

#[tokio::test]
async fn full_cover_title_then_cover_pages_then_sources() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(&temp_dir, "a.pdf", labeled_pdf("A", 3));
    let b = write_pdf(&temp_dir, "b.pdf", labeled_pdf("B", 3));
    let output = temp_dir.path().join("out.pdf");

    let plan = CompilationPlan::new(vec![
        PlannedSource::selected(a, vec![3]),
        PlannedSource::selected(b, vec![1]),
    ])
    .with_cover(CoverSpec {
        title: Some("Quarterly Binder".to_string()),
        pages: vec![1, 2],
    });

    let report = Assembler::new().compile(&plan, &output).await.unwrap();
    assert_eq!(report.pages_written, 5);
    assert_eq!(report.cover_pages, 3);

    let markers = output_markers(&output).await;
    assert!(markers[0].contains("Quarterly Binder"));
    assert_eq!(&markers[1..], &["A 1", "A 2", "A 3", "B 1"]);
}

#[tokio::test]
async fn unselected_sources_are_excluded_by_default() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(&temp_dir, "a.pdf", labeled_pdf("A", 2));
    let b = write_pdf(&temp_dir, "b.pdf", labeled_pdf("B", 2));
    let output = temp_dir.path().join("out.pdf");

    let plan = CompilationPlan::new(vec![
        PlannedSource::selected(a, vec![1]),
        PlannedSource::unselected(b),
    ]);

    let report = Assembler::new().compile(&plan, &output).await.unwrap();
    assert_eq!(report.sources_used, 1);
    assert_eq!(output_markers(&output).await, vec!["A 1"]);
}

#[tokio::test]
async fn append_all_policy_pulls_unselected_sources_in_full() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(&temp_dir, "a.pdf", labeled_pdf("A", 2));
    let b = write_pdf(&temp_dir, "b.pdf", labeled_pdf("B", 2));
    let output = temp_dir.path().join("out.pdf");

    let plan = CompilationPlan::new(vec![
        PlannedSource::selected(a, vec![1]),
        PlannedSource::unselected(b),
    ])
    .with_missing_selection(MissingSelectionPolicy::AppendAll);

    let report = Assembler::new().compile(&plan, &output).await.unwrap();
    assert_eq!(report.sources_used, 2);
    assert_eq!(output_markers(&output).await, vec!["A 1", "B 1", "B 2"]);
}

#[tokio::test]
async fn compiling_the_same_plan_twice_is_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(&temp_dir, "a.pdf", labeled_pdf("A", 4));
    let first = temp_dir.path().join("first.pdf");
    let second = temp_dir.path().join("second.pdf");

    let plan = CompilationPlan::new(vec![PlannedSource::selected(a, vec![1, 2, 4])])
        .with_cover(CoverSpec::titled("Stable"));

    let assembler = Assembler::new();
    assembler.compile(&plan, &first).await.unwrap();
    assembler.compile(&plan, &second).await.unwrap();

    let first_bytes = std::fs::read(&first).unwrap();
    let second_bytes = std::fs::read(&second).unwrap();
    assert_eq!(first_bytes, second_bytes);
}

#[tokio::test]
async fn failed_compile_leaves_no_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(&temp_dir, "a.pdf", labeled_pdf("A", 2));
    let b = write_pdf(&temp_dir, "b.pdf", labeled_pdf("B", 2));
    let output = temp_dir.path().join("out.pdf");

    // The second source fails on an out-of-range page after the first
    // already contributed; nothing may reach disk.
    let plan = CompilationPlan::new(vec![
        PlannedSource::selected(a, vec![1, 2]),
        PlannedSource::selected(b, vec![7]),
    ]);

    let err = Assembler::new().compile(&plan, &output).await.unwrap_err();
    assert!(matches!(err, AssemblyError::PageOutOfBounds { page: 7, .. }));
    assert!(!output.exists());
}

#[tokio::test]
async fn session_to_plan_compiles_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(&temp_dir, "a.pdf", labeled_pdf("A", 3));
    let b = write_pdf(&temp_dir, "b.pdf", labeled_pdf("B", 3));
    let output = temp_dir.path().join("out.pdf");

    let mut session = Session::new();
    let a_id = session.add(&a, 3);
    let b_id = session.add(&b, 3);
    session.set_selection(a_id, "2-3").unwrap();
    session.set_selection(b_id, "1,3").unwrap();

    let cover = CoverSpec {
        title: Some("Bound".to_string()),
        pages: session.resolve_cover_pages("1").unwrap(),
    };
    let plan = session.to_plan(Some(cover), MissingSelectionPolicy::Exclude);

    Assembler::new().compile(&plan, &output).await.unwrap();

    let markers = output_markers(&output).await;
    assert!(markers[0].contains("Bound"));
    assert_eq!(&markers[1..], &["A 1", "A 2", "A 3", "B 1", "B 3"]);
}

#[tokio::test]
async fn selections_that_resolve_to_nothing_are_an_empty_plan() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(&temp_dir, "a.pdf", labeled_pdf("A", 2));
    let output = temp_dir.path().join("out.pdf");

    let plan = CompilationPlan::new(vec![PlannedSource::selected(a, vec![])]);

    let err = Assembler::new().compile(&plan, &output).await.unwrap_err();
    assert!(matches!(err, AssemblyError::EmptyPlan));
    assert!(!output.exists());
}
