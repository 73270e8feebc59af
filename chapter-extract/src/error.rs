use std::path::PathBuf;

use thiserror::Error;

use crate::format::DocumentFormat;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Cannot open {format} container {}: {reason}", .path.display())]
    ContainerOpen {
        path: PathBuf,
        format: DocumentFormat,
        reason: String,
    },

    #[error("Skipped {reference}: not valid UTF-8 text ({reason})")]
    UnitDecode { reference: String, reason: String },

    #[error("Skipped {reference}: could not be read ({reason})")]
    UnitRead { reference: String, reason: String },

    #[error("Unsupported document format for {}{}", .path.display(), .detail.as_ref().map(|d| format!(": {}", d)).unwrap_or_default())]
    UnsupportedFormat {
        path: PathBuf,
        detail: Option<String>,
    },

    #[error("Extraction of {} was cancelled", .path.display())]
    Cancelled { path: PathBuf },

    #[error("Invalid heading pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl ExtractError {
    /// Whether this error aborted the whole call rather than a single unit.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::UnitDecode { .. } | Self::UnitRead { .. })
    }

    pub(crate) fn open(path: &std::path::Path, format: DocumentFormat, reason: impl ToString) -> Self {
        Self::ContainerOpen {
            path: path.to_path_buf(),
            format,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn decode(reference: impl Into<String>, reason: impl ToString) -> Self {
        Self::UnitDecode {
            reference: reference.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn read(reference: impl Into<String>, reason: impl ToString) -> Self {
        Self::UnitRead {
            reference: reference.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
