mod common;

use chapter_extract::{
    CancelFlag, Chapter, ContentMode, EpubExtractor, ExtractError, ExtractOptions, Extractor,
};
use common::{EpubResource, copy_zip_without, write_epub};

fn extract(path: &std::path::Path, options: &ExtractOptions) -> chapter_extract::Extraction {
    EpubExtractor
        .extract(path, options, &CancelFlag::new())
        .unwrap()
}

#[test]
fn test_titled_and_untitled_resources() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.epub");
    write_epub(
        &path,
        &[
            EpubResource {
                id: "c1",
                href: "c1.html",
                toc_label: Some("Intro"),
                body: b"Hello",
            },
            EpubResource {
                id: "c2",
                href: "c2.html",
                toc_label: None,
                body: b"World",
            },
        ],
    );

    let extraction = extract(&path, &ExtractOptions::default());
    assert!(extraction.errors.is_empty());
    assert_eq!(
        extraction.chapters,
        vec![
            Chapter::new(
                Some("Intro".to_string()),
                "c1.html",
                Some("Hello".to_string())
            ),
            Chapter::new(None, "c2.html", Some("World".to_string())),
        ]
    );
}

#[test]
fn test_one_chapter_per_resource_in_reading_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("long.epub");
    let bodies: Vec<String> = (1..=5)
        .map(|i| format!("<html><body><p>Part {}</p></body></html>", i))
        .collect();
    let ids: Vec<String> = (1..=5).map(|i| format!("ch{}", i)).collect();
    let hrefs: Vec<String> = (1..=5).map(|i| format!("text/ch{}.xhtml", i)).collect();
    let labels: Vec<String> = (1..=5).map(|i| format!("Chapter {}", i)).collect();

    let resources: Vec<EpubResource<'_>> = (0..5)
        .map(|i| EpubResource {
            id: &ids[i],
            href: &hrefs[i],
            toc_label: Some(&labels[i]),
            body: bodies[i].as_bytes(),
        })
        .collect();
    write_epub(&path, &resources);

    let extraction = extract(&path, &ExtractOptions::default());
    assert_eq!(extraction.chapters.len(), 5);
    for (i, chapter) in extraction.chapters.iter().enumerate() {
        assert_eq!(chapter.source_reference(), hrefs[i]);
        assert_eq!(chapter.title(), Some(labels[i].as_str()));
        assert_eq!(chapter.content(), Some(bodies[i].as_str()));
    }
}

#[test]
fn test_undecodable_resource_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.epub");
    write_epub(
        &path,
        &[
            EpubResource {
                id: "c1",
                href: "c1.html",
                toc_label: Some("One"),
                body: b"first",
            },
            EpubResource {
                id: "c2",
                href: "c2.html",
                toc_label: Some("Two"),
                body: &[0xc3, 0x28, 0xa0, 0xa1],
            },
            EpubResource {
                id: "c3",
                href: "c3.html",
                toc_label: Some("Three"),
                body: b"third",
            },
        ],
    );

    let extraction = extract(&path, &ExtractOptions::default());
    let refs: Vec<_> = extraction
        .chapters
        .iter()
        .map(Chapter::source_reference)
        .collect();
    assert_eq!(refs, vec!["c1.html", "c3.html"]);

    assert_eq!(extraction.errors.len(), 1);
    assert!(matches!(
        &extraction.errors[0],
        ExtractError::UnitDecode { reference, .. } if reference == "c2.html"
    ));
}

#[test]
fn test_resource_missing_from_archive_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let complete = dir.path().join("complete.epub");
    write_epub(
        &complete,
        &[
            EpubResource {
                id: "c1",
                href: "c1.html",
                toc_label: Some("One"),
                body: b"first",
            },
            EpubResource {
                id: "c2",
                href: "c2.html",
                toc_label: Some("Two"),
                body: b"second",
            },
            EpubResource {
                id: "c3",
                href: "c3.html",
                toc_label: Some("Three"),
                body: b"third",
            },
        ],
    );
    let path = dir.path().join("incomplete.epub");
    copy_zip_without(&complete, &path, "c2.html");

    let extraction = extract(&path, &ExtractOptions::default());
    let refs: Vec<_> = extraction
        .chapters
        .iter()
        .map(Chapter::source_reference)
        .collect();
    assert_eq!(refs, vec!["c1.html", "c3.html"]);
    assert_eq!(extraction.chapters[1].title(), Some("Three"));

    assert_eq!(extraction.errors.len(), 1);
    assert!(matches!(
        &extraction.errors[0],
        ExtractError::UnitRead { reference, .. } if reference == "c2.html"
    ));
    assert!(!extraction.errors[0].is_fatal());
}

#[test]
fn test_plain_text_mode_renders_html() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("styled.epub");
    write_epub(
        &path,
        &[EpubResource {
            id: "c1",
            href: "c1.html",
            toc_label: Some("  Chapter   1 "),
            body: b"<html><body><p>It was \xe2\x80\x9cquiet\xe2\x80\x9d.</p></body></html>",
        }],
    );

    let options = ExtractOptions::new().with_content_mode(ContentMode::PlainText);
    let extraction = extract(&path, &options);
    let chapter = &extraction.chapters[0];
    assert_eq!(chapter.title(), Some("Chapter 1"));
    let content = chapter.content().unwrap();
    assert!(content.contains("It was \"quiet\"."));
    assert!(!content.contains("<p>"));
}

#[test]
fn test_corrupt_epub_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.epub");
    std::fs::write(&path, b"PK\x03\x04 this is not really a zip").unwrap();

    let err = EpubExtractor
        .extract(&path, &ExtractOptions::default(), &CancelFlag::new())
        .unwrap_err();
    assert!(matches!(err, ExtractError::ContainerOpen { .. }));
}
