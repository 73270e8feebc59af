//! Fixture builders shared by the integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// One content document of a test EPUB.
pub struct EpubResource<'a> {
    pub id: &'a str,
    pub href: &'a str,
    /// Table of contents label; `None` leaves the resource out of the TOC
    pub toc_label: Option<&'a str>,
    pub body: &'a [u8],
}

const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>
"#;

/// Write a minimal EPUB 2 with the package document at the archive root.
pub fn write_epub(path: &Path, resources: &[EpubResource<'_>]) {
    let mut manifest = String::from(
        r#"    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
"#,
    );
    let mut spine = String::new();
    let mut nav_points = String::new();

    for (i, resource) in resources.iter().enumerate() {
        manifest.push_str(&format!(
            "    <item id=\"{}\" href=\"{}\" media-type=\"application/xhtml+xml\"/>\n",
            resource.id, resource.href
        ));
        spine.push_str(&format!("    <itemref idref=\"{}\"/>\n", resource.id));
        if let Some(label) = resource.toc_label {
            nav_points.push_str(&format!(
                "    <navPoint id=\"nav{i}\" playOrder=\"{order}\">\n      <navLabel><text>{label}</text></navLabel>\n      <content src=\"{href}\"/>\n    </navPoint>\n",
                i = i,
                order = i + 1,
                label = label,
                href = resource.href
            ));
        }
    }

    let opf = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="bookid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:title>Fixture Book</dc:title>
    <dc:identifier id="bookid">urn:uuid:fixture-book</dc:identifier>
    <dc:language>en</dc:language>
  </metadata>
  <manifest>
{manifest}  </manifest>
  <spine toc="ncx">
{spine}  </spine>
</package>
"#
    );

    let ncx = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
    <meta name="dtb:uid" content="urn:uuid:fixture-book"/>
  </head>
  <docTitle><text>Fixture Book</text></docTitle>
  <navMap>
{nav_points}  </navMap>
</ncx>
"#
    );

    let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    writer.start_file("mimetype", stored).unwrap();
    writer.write_all(b"application/epub+zip").unwrap();

    let deflated = SimpleFileOptions::default();
    writer.start_file("META-INF/container.xml", deflated).unwrap();
    writer.write_all(CONTAINER_XML.as_bytes()).unwrap();
    writer.start_file("content.opf", deflated).unwrap();
    writer.write_all(opf.as_bytes()).unwrap();
    writer.start_file("toc.ncx", deflated).unwrap();
    writer.write_all(ncx.as_bytes()).unwrap();

    for resource in resources {
        writer.start_file(resource.href, deflated).unwrap();
        writer.write_all(resource.body).unwrap();
    }

    writer.finish().unwrap();
}

/// Write a ZIP archive; names ending in `/` become directory entries.
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
    for (name, data) in entries {
        if let Some(dir) = name.strip_suffix('/') {
            writer
                .add_directory(dir, SimpleFileOptions::default())
                .unwrap();
        } else {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(data).unwrap();
        }
    }
    writer.finish().unwrap();
}

/// Copy the ZIP archive at `src` to `dst` without re-compressing, leaving out the entry named `skip`.
pub fn copy_zip_without(src: &Path, dst: &Path, skip: &str) {
    let mut archive = zip::ZipArchive::new(File::open(src).unwrap()).unwrap();
    let mut writer = zip::ZipWriter::new(File::create(dst).unwrap());
    for i in 0..archive.len() {
        let file = archive.by_index_raw(i).unwrap();
        if file.name() == skip {
            continue;
        }
        writer.raw_copy_file(file).unwrap();
    }
    writer.finish().unwrap();
}

/// Write a PDF with one line of Courier text per page.
pub fn write_pdf(path: &Path, pages: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}
