//! Format-specific extraction strategies

mod epub;
mod pdf;
mod zip_html;

pub use epub::EpubExtractor;
pub use pdf::{PDF_CHAPTER_TITLE, PdfExtractor};
pub use zip_html::ZipHtmlExtractor;

use std::path::Path;

use crate::chapter::Chapter;
use crate::coordinator::{CancelFlag, ExtractOptions};
use crate::error::{ExtractError, Result};
use crate::format::DocumentFormat;

/// Chapters read from one container plus the units that had to be skipped.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Chapters in container order
    pub chapters: Vec<Chapter>,
    /// Non-fatal, per-unit errors
    pub errors: Vec<ExtractError>,
}

impl Extraction {
    pub(crate) fn skip(&mut self, error: ExtractError) {
        log::debug!("{}", error);
        self.errors.push(error);
    }
}

/// Converts one container into chapters.
///
/// Failing to open the container is returned as `Err`; a unit that cannot be
/// read is recorded in [`Extraction::errors`] and the next unit is processed.
/// Container handles never outlive the call.
pub trait Extractor {
    /// The format this extractor reads
    fn format(&self) -> DocumentFormat;

    /// Read every unit of the container at `path`.
    fn extract(
        &self,
        path: &Path,
        options: &ExtractOptions,
        cancel: &CancelFlag,
    ) -> Result<Extraction>;
}

/// Get the extractor for a format
pub fn extractor_for(format: DocumentFormat) -> &'static dyn Extractor {
    match format {
        DocumentFormat::Epub => &EpubExtractor,
        DocumentFormat::Pdf => &PdfExtractor,
        DocumentFormat::ZipHtml => &ZipHtmlExtractor,
    }
}
