//! Container format selection: caller declaration, content sniffing, then file extension.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{ExtractError, Result};

const PDF_MAGIC: &[u8] = b"%PDF-";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// End-of-central-directory record, the first bytes of an archive with no entries.
const ZIP_EMPTY_MAGIC: &[u8] = b"PK\x05\x06";
const EPUB_MIMETYPE_ENTRY: &[u8] = b"mimetype";
const EPUB_MIMETYPE: &[u8] = b"application/epub+zip";

/// Bytes read from the head of a file for sniffing.
const SNIFF_LEN: usize = 128;

/// Supported container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentFormat {
    Epub,
    Pdf,
    ZipHtml,
}

impl DocumentFormat {
    /// Guess the format from the path's extension alone
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "epub" => Some(Self::Epub),
            "pdf" => Some(Self::Pdf),
            "zip" => Some(Self::ZipHtml),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Epub => "EPUB",
            Self::Pdf => "PDF",
            Self::ZipHtml => "ZIP/HTML",
        };
        f.write_str(name)
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "epub" => Ok(Self::Epub),
            "pdf" => Ok(Self::Pdf),
            "zip" | "zip-html" | "zip_html" | "html-zip" => Ok(Self::ZipHtml),
            _ => Err(format!("Unknown document format: {}", s)),
        }
    }
}

/// Outcome of inspecting a file's leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sniffed {
    /// The signature identifies exactly one format.
    Known(DocumentFormat),
    /// A ZIP archive without the EPUB `mimetype` marker as its first entry.
    Zip,
    /// No recognised signature.
    Unknown,
}

/// Classify raw leading bytes of a container.
pub fn sniff_bytes(head: &[u8]) -> Sniffed {
    if head.starts_with(PDF_MAGIC) {
        return Sniffed::Known(DocumentFormat::Pdf);
    }
    if head.starts_with(ZIP_EMPTY_MAGIC) {
        return Sniffed::Zip;
    }
    if !head.starts_with(ZIP_MAGIC) || head.len() < 30 {
        return Sniffed::Unknown;
    }

    // Local file header: name length at 26, extra field length at 28, name at 30.
    let name_len = u16::from_le_bytes([head[26], head[27]]) as usize;
    let extra_len = u16::from_le_bytes([head[28], head[29]]) as usize;
    let name_end = 30 + name_len;
    let data_start = name_end + extra_len;

    let is_epub = head.get(30..name_end) == Some(EPUB_MIMETYPE_ENTRY)
        && head
            .get(data_start..)
            .is_some_and(|data| data.starts_with(EPUB_MIMETYPE));

    if is_epub {
        Sniffed::Known(DocumentFormat::Epub)
    } else {
        Sniffed::Zip
    }
}

/// Read the head of `path` and classify it.
pub fn sniff(path: &Path) -> std::io::Result<Sniffed> {
    let mut head = Vec::with_capacity(SNIFF_LEN);
    File::open(path)?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut head)?;
    Ok(sniff_bytes(&head))
}

/// Pick the format for `path`.
///
/// A declared format always wins. Otherwise the file's signature is used, and
/// the extension only settles what the signature leaves open.
pub fn resolve(path: &Path, declared: Option<DocumentFormat>) -> Result<DocumentFormat> {
    if let Some(format) = declared {
        return Ok(format);
    }

    let by_extension = DocumentFormat::from_extension(path);
    let sniffed = sniff(path).map_err(|e| {
        ExtractError::open(path, by_extension.unwrap_or(DocumentFormat::ZipHtml), e)
    })?;

    let format = match sniffed {
        Sniffed::Known(format) => Some(format),
        Sniffed::Zip => match by_extension {
            Some(DocumentFormat::Epub) => Some(DocumentFormat::Epub),
            _ => Some(DocumentFormat::ZipHtml),
        },
        Sniffed::Unknown => by_extension,
    };

    log::debug!(
        "Format for {}: sniffed {:?}, extension {:?} -> {:?}",
        path.display(),
        sniffed,
        by_extension,
        format
    );

    format.ok_or_else(|| ExtractError::UnsupportedFormat {
        path: path.to_path_buf(),
        detail: Some("no known signature or extension".to_string()),
    })
}
