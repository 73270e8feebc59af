//! Chapter extraction for EPUB, PDF and zipped HTML documents
//!
//! Each container format exposes chapter-like units differently:
//! - EPUB: content resources in reading order, titled from the table of contents
//! - PDF: the whole document as a single chapter of linear page text
//! - ZIP: every `.html` entry, in archive order
//!
//! The [`Coordinator`] picks the extractor for a file and appends the chapters
//! to a [`ChapterCollection`] owned by the caller. A unit that cannot be read is
//! skipped and reported; a container that cannot be opened fails the call
//! without touching the collection.

pub mod chapter;
pub mod coordinator;
pub mod error;
pub mod extractors;
pub mod format;
pub mod text;
pub mod title;

pub use chapter::{Chapter, ChapterCollection, ChapterSummary, DEFAULT_SUMMARY_LENGTH};
pub use coordinator::{CancelFlag, ContentMode, Coordinator, ExtractOptions, ExtractionReport};
pub use error::{ExtractError, Result};
pub use extractors::{
    EpubExtractor, Extraction, Extractor, PDF_CHAPTER_TITLE, PdfExtractor, ZipHtmlExtractor,
    extractor_for,
};
pub use format::DocumentFormat;
pub use title::{TitleValidator, is_structured_heading, normalize_title};
