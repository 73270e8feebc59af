//! Routes documents to their extractor and appends the results to a caller-owned collection.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::chapter::ChapterCollection;
use crate::error::{ExtractError, Result};
use crate::extractors::extractor_for;
use crate::format::{self, DocumentFormat};
use crate::text;
use crate::title::TitleValidator;

/// How unit text is stored in a chapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentMode {
    /// Decoded text exactly as found in the container
    #[default]
    Raw,
    /// HTML rendered to text, PDF lines re-joined, typography cleaned
    PlainText,
}

/// Options shared by all extractors.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub content_mode: ContentMode,
    /// Extensions (without the dot) of ZIP entries treated as HTML chapters
    pub html_extensions: Vec<String>,
    /// Advisory heading classifier used for logging and reporting
    pub title_validator: TitleValidator,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            content_mode: ContentMode::Raw,
            html_extensions: vec!["html".to_string()],
            title_validator: TitleValidator::default(),
        }
    }
}

impl ExtractOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the content mode.
    pub fn with_content_mode(mut self, mode: ContentMode) -> Self {
        self.content_mode = mode;
        self
    }

    /// Replace the accepted HTML extensions. Leading dots are ignored.
    pub fn with_html_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.html_extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    /// Set the heading classifier.
    pub fn with_title_validator(mut self, validator: TitleValidator) -> Self {
        self.title_validator = validator;
        self
    }

    /// Whether an archive entry name carries one of the HTML extensions
    pub fn is_html_entry(&self, name: &str) -> bool {
        let Some((stem, ext)) = name.rsplit_once('.') else {
            return false;
        };
        !stem.is_empty()
            && !stem.ends_with('/')
            && self
                .html_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }

    pub(crate) fn render_html(&self, html: String) -> String {
        match self.content_mode {
            ContentMode::Raw => html,
            ContentMode::PlainText => text::html_to_text(&html),
        }
    }

    pub(crate) fn render_pdf(&self, raw: String) -> String {
        match self.content_mode {
            ContentMode::Raw => raw,
            ContentMode::PlainText => text::pdf_to_text(&raw),
        }
    }
}

/// Cooperative cancellation, checked between container units.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that running and future extractions stop at the next unit.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub(crate) fn check(&self, path: &Path) -> Result<()> {
        if self.is_cancelled() {
            Err(ExtractError::Cancelled {
                path: path.to_path_buf(),
            })
        } else {
            Ok(())
        }
    }
}

/// Outcome of one successful coordinator call.
#[derive(Debug)]
pub struct ExtractionReport {
    /// Format the document was read as
    pub format: DocumentFormat,
    /// Chapters appended to the collection by this call
    pub appended: usize,
    /// Units skipped during this call
    pub errors: Vec<ExtractError>,
}

/// Dispatches documents to the matching extractor.
#[derive(Debug, Clone, Default)]
pub struct Coordinator {
    options: ExtractOptions,
    cancel: CancelFlag,
}

impl Coordinator {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            cancel: CancelFlag::new(),
        }
    }

    /// Share an externally owned cancellation flag.
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    /// Extract `path` and append its chapters to `collection`.
    ///
    /// The format is `declared` if given, otherwise detected from the file
    /// itself with the extension as fallback. On `Err` the collection is left
    /// exactly as it was.
    pub fn run_extraction(
        &self,
        path: &Path,
        declared: Option<DocumentFormat>,
        collection: &mut ChapterCollection,
    ) -> Result<ExtractionReport> {
        let format = format::resolve(path, declared)?;
        log::debug!("Extracting {} as {}", path.display(), format);

        let extraction = extractor_for(format).extract(path, &self.options, &self.cancel)?;

        for chapter in &extraction.chapters {
            let structured = chapter.is_structured_heading(&self.options.title_validator);
            log::debug!(
                "{} [{}] title {:?}{}",
                format,
                chapter.source_reference(),
                chapter.title(),
                if structured { " (structured heading)" } else { "" }
            );
        }

        let appended = collection.append(extraction.chapters);
        log::debug!(
            "{}: {} chapter(s) appended, {} unit(s) skipped",
            path.display(),
            appended,
            extraction.errors.len()
        );

        Ok(ExtractionReport {
            format,
            appended,
            errors: extraction.errors,
        })
    }

    /// Extract `path` into a fresh collection.
    pub fn extract_new(
        &self,
        path: &Path,
        declared: Option<DocumentFormat>,
    ) -> Result<(ChapterCollection, ExtractionReport)> {
        let mut collection = ChapterCollection::new();
        let report = self.run_extraction(path, declared, &mut collection)?;
        Ok((collection, report))
    }
}
