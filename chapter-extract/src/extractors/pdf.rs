// Linear PDF text extraction

use std::path::Path;

use lopdf::Document;

use super::{Extraction, Extractor};
use crate::chapter::Chapter;
use crate::coordinator::{CancelFlag, ExtractOptions};
use crate::error::{ExtractError, Result};
use crate::format::DocumentFormat;

/// Title given to the single chapter produced from a PDF
pub const PDF_CHAPTER_TITLE: &str = "PDF Content";

/// Reads a whole PDF as one chapter: page texts concatenated in page order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl Extractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn extract(
        &self,
        path: &Path,
        options: &ExtractOptions,
        cancel: &CancelFlag,
    ) -> Result<Extraction> {
        // Dropped at the end of this call on every path.
        let document =
            Document::load(path).map_err(|e| ExtractError::open(path, DocumentFormat::Pdf, e))?;

        let mut extraction = Extraction::default();
        let reference = path.to_string_lossy().to_string();
        let pages = document.get_pages();

        let mut page_texts = Vec::with_capacity(pages.len());

        for page_number in pages.keys().copied() {
            cancel.check(path)?;

            match document.extract_text(&[page_number]) {
                Ok(page_text) => page_texts.push(Some(page_text)),
                Err(e) => {
                    extraction.skip(ExtractError::read(
                        format!("{}#page={}", reference, page_number),
                        e,
                    ));
                    page_texts.push(None);
                }
            }
        }

        let text = join_pages(page_texts);
        log::debug!(
            "Extracted {} characters from {} page(s) of {}",
            text.as_ref().map_or(0, String::len),
            pages.len(),
            path.display()
        );

        let content = text.map(|text| options.render_pdf(text));
        extraction.chapters.push(Chapter::new(
            Some(PDF_CHAPTER_TITLE.to_string()),
            reference,
            content,
        ));

        Ok(extraction)
    }
}

/// Concatenate page texts in page order, leaving out pages that failed.
///
/// A document with no pages has empty content; one whose every page failed has none.
fn join_pages(page_texts: Vec<Option<String>>) -> Option<String> {
    if page_texts.is_empty() {
        return Some(String::new());
    }
    if page_texts.iter().all(Option::is_none) {
        return None;
    }
    Some(page_texts.into_iter().flatten().collect())
}
