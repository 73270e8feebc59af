//! Chapter records and the ordered collection they are appended to.

use std::fmt;

use serde::Serialize;

use crate::title::TitleValidator;

/// Characters of body text kept by [`Chapter::summarize`].
pub const DEFAULT_SUMMARY_LENGTH: usize = 100;

/// Shown in place of a missing title
pub const UNTITLED_PLACEHOLDER: &str = "Untitled chapter";

/// Shown in place of missing content
pub const NO_CONTENT_PLACEHOLDER: &str = "Content unavailable";

/// One extracted unit of a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    title: Option<String>,
    source_reference: String,
    content: Option<String>,
}

impl Chapter {
    /// Create a chapter.
    ///
    /// `source_reference` names the unit inside its container (archive entry,
    /// resource path, or the document path) and must not be empty.
    pub fn new(
        title: Option<String>,
        source_reference: impl Into<String>,
        content: Option<String>,
    ) -> Self {
        let source_reference = source_reference.into();
        debug_assert!(!source_reference.is_empty(), "empty source reference");
        Self {
            title,
            source_reference,
            content,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn source_reference(&self) -> &str {
        &self.source_reference
    }

    /// Extracted text; `None` when the unit was recorded but its text could not be produced.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Approximate word count of the content
    pub fn word_count(&self) -> usize {
        self.content
            .as_deref()
            .map(|c| c.split_whitespace().count())
            .unwrap_or(0)
    }

    /// Whether the title looks like a structured heading under `validator`.
    pub fn is_structured_heading(&self, validator: &TitleValidator) -> bool {
        validator.is_structured_heading(self.title())
    }

    /// Short preview with the default body length.
    pub fn summarize(&self) -> ChapterSummary<'_> {
        self.summarize_with(DEFAULT_SUMMARY_LENGTH)
    }

    /// Short preview keeping at most `max_chars` characters of the body.
    pub fn summarize_with(&self, max_chars: usize) -> ChapterSummary<'_> {
        let title = self.title.as_deref().unwrap_or(UNTITLED_PLACEHOLDER);
        let body = self.content.as_deref().unwrap_or(NO_CONTENT_PLACEHOLDER);
        ChapterSummary {
            title,
            body: truncate_chars(body, max_chars),
        }
    }
}

/// Preview of a chapter, displayed as `title : body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterSummary<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

impl fmt::Display for ChapterSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.title, self.body)
    }
}

/// Longest prefix of `text` holding at most `max_chars` characters.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Chapters in discovery order, owned by the caller across extraction runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChapterCollection {
    chapters: Vec<Chapter>,
}

impl ChapterCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one chapter. Duplicated source references are kept, never merged.
    pub fn push(&mut self, chapter: Chapter) {
        self.chapters.push(chapter);
    }

    /// Append chapters preserving their order; returns how many were added.
    pub fn append(&mut self, chapters: Vec<Chapter>) -> usize {
        let added = chapters.len();
        self.chapters.extend(chapters);
        added
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chapter> {
        self.chapters.iter()
    }

    pub fn as_slice(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn into_vec(self) -> Vec<Chapter> {
        self.chapters
    }

    /// Number of chapters whose title is a structured heading
    pub fn structured_count(&self, validator: &TitleValidator) -> usize {
        self.chapters
            .iter()
            .filter(|c| c.is_structured_heading(validator))
            .count()
    }

    /// Total word count across all chapters (approximate)
    pub fn total_words(&self) -> usize {
        self.chapters.iter().map(Chapter::word_count).sum()
    }
}

impl<'a> IntoIterator for &'a ChapterCollection {
    type Item = &'a Chapter;
    type IntoIter = std::slice::Iter<'a, Chapter>;

    fn into_iter(self) -> Self::IntoIter {
        self.chapters.iter()
    }
}

impl IntoIterator for ChapterCollection {
    type Item = Chapter;
    type IntoIter = std::vec::IntoIter<Chapter>;

    fn into_iter(self) -> Self::IntoIter {
        self.chapters.into_iter()
    }
}
