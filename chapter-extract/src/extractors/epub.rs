// EPUB content resources, in reading order

use std::path::{Path, PathBuf};

use epub::doc::{EpubDoc, NavPoint};

use super::{Extraction, Extractor};
use crate::chapter::Chapter;
use crate::coordinator::{CancelFlag, ExtractOptions};
use crate::error::{ExtractError, Result};
use crate::format::DocumentFormat;
use crate::title::normalize_title;

/// Reads each content resource of an EPUB as one chapter.
///
/// Titles come from the table of contents entry pointing at the resource, if any.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpubExtractor;

impl Extractor for EpubExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Epub
    }

    fn extract(
        &self,
        path: &Path,
        options: &ExtractOptions,
        cancel: &CancelFlag,
    ) -> Result<Extraction> {
        let mut doc =
            EpubDoc::new(path).map_err(|e| ExtractError::open(path, DocumentFormat::Epub, e))?;

        let toc = TocTitles::from_nav_points(&doc.toc);
        let mut extraction = Extraction::default();

        if doc.spine.is_empty() {
            return Ok(extraction);
        }

        // Titles are resolved once every spine reference is known.
        let mut units = Vec::with_capacity(doc.spine.len());
        let mut position = 0;
        loop {
            cancel.check(path)?;

            let reference = doc
                .get_current_path()
                .map(|p| resource_reference(&p))
                .unwrap_or_else(|| format!("spine #{}", position));
            units.push((reference, doc.get_current().map(|(bytes, _mime)| bytes)));

            if !doc.go_next() {
                break;
            }
            position += 1;
        }

        let references: Vec<&str> = units.iter().map(|(r, _)| r.as_str()).collect();
        let titles: Vec<Option<String>> = references
            .iter()
            .map(|reference| toc.lookup(reference, &references))
            .collect();

        for ((reference, bytes), title) in units.into_iter().zip(titles) {
            match bytes {
                Some(bytes) => match String::from_utf8(bytes) {
                    Ok(html) => {
                        let content = options.render_html(html);
                        extraction
                            .chapters
                            .push(Chapter::new(title, reference, Some(content)));
                    }
                    Err(e) => extraction.skip(ExtractError::decode(reference, e.utf8_error())),
                },
                None => extraction.skip(ExtractError::read(
                    reference,
                    "resource listed in the spine is missing from the container",
                )),
            }
        }

        Ok(extraction)
    }
}

/// Forward-slash form of a resource path inside the container
fn resource_reference(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Table of contents labels keyed by target resource, in document order.
#[derive(Debug, Default)]
struct TocTitles {
    entries: Vec<(PathBuf, String)>,
}

impl TocTitles {
    fn from_nav_points(points: &[NavPoint]) -> Self {
        let mut titles = Self::default();
        titles.collect(points);
        titles
    }

    fn collect(&mut self, points: &[NavPoint]) {
        for point in points {
            let target = point.content.to_string_lossy();
            let target = target.split('#').next().unwrap_or_default();
            if let Some(label) = normalize_title(Some(&point.label)) {
                if !target.is_empty() {
                    self.entries.push((PathBuf::from(target.replace('\\', "/")), label));
                }
            }
            self.collect(&point.children);
        }
    }

    /// Label for the resource at `reference`.
    ///
    /// An exact target wins. A relative or rooted target that only matches by
    /// path suffix is used when it identifies exactly one of `spine`.
    fn lookup(&self, reference: &str, spine: &[&str]) -> Option<String> {
        let resource = Path::new(reference);
        if let Some((_, label)) = self.entries.iter().find(|(target, _)| target == resource) {
            return Some(label.clone());
        }

        self.entries
            .iter()
            .find(|(target, _)| {
                suffix_match(target, resource)
                    && spine
                        .iter()
                        .filter(|other| suffix_match(target, Path::new(other)))
                        .count()
                        == 1
            })
            .map(|(_, label)| label.clone())
    }
}

fn suffix_match(target: &Path, resource: &Path) -> bool {
    resource.ends_with(target) || target.ends_with(resource)
}
