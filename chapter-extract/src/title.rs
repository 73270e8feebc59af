//! Chapter title classification and normalization.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::error::Result;

/// Default heading shape: a "chapter"/"section" token, whitespace, then a number.
pub const DEFAULT_HEADING_PATTERN: &str = r"^(?:chapitre|chapter|section)\s+\d+";

static DEFAULT_HEADING: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(DEFAULT_HEADING_PATTERN)
        .case_insensitive(true)
        .build()
        .expect("default heading pattern is valid")
});

/// Classifies candidate titles as structured chapter headings.
///
/// Purely advisory: chapters are recorded whether or not their title matches.
#[derive(Debug, Clone)]
pub struct TitleValidator {
    pattern: Regex,
}

impl Default for TitleValidator {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_HEADING.clone(),
        }
    }
}

impl TitleValidator {
    /// Build a validator from a custom pattern, compiled case-insensitively.
    ///
    /// A pattern without a leading `^` is anchored to the start of the title.
    pub fn new(pattern: &str) -> Result<Self> {
        let anchored = if pattern.starts_with('^') {
            pattern.to_string()
        } else {
            format!("^(?:{})", pattern)
        };
        let pattern = RegexBuilder::new(&anchored)
            .case_insensitive(true)
            .build()?;
        Ok(Self { pattern })
    }

    /// The compiled pattern source
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Whether `title` starts with a structured heading. Absent titles never match.
    pub fn is_structured_heading(&self, title: Option<&str>) -> bool {
        title.is_some_and(|t| self.pattern.is_match(t.trim_start()))
    }
}

/// Classify with the default pattern.
pub fn is_structured_heading(title: Option<&str>) -> bool {
    title.is_some_and(|t| DEFAULT_HEADING.is_match(t.trim_start()))
}

/// Collapse whitespace runs and trim; empty results become `None`.
pub fn normalize_title(raw: Option<&str>) -> Option<String> {
    let collapsed = raw?.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}
