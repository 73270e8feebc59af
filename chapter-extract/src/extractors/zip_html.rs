// Generic ZIP archives of HTML fragments

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use zip::ZipArchive;

use super::{Extraction, Extractor};
use crate::chapter::Chapter;
use crate::coordinator::{CancelFlag, ExtractOptions};
use crate::error::{ExtractError, Result};
use crate::format::DocumentFormat;

/// Reads every HTML entry of a ZIP archive, in directory order, as one untitled chapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipHtmlExtractor;

impl Extractor for ZipHtmlExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::ZipHtml
    }

    fn extract(
        &self,
        path: &Path,
        options: &ExtractOptions,
        cancel: &CancelFlag,
    ) -> Result<Extraction> {
        let file =
            File::open(path).map_err(|e| ExtractError::open(path, DocumentFormat::ZipHtml, e))?;
        let mut archive = ZipArchive::new(BufReader::new(file))
            .map_err(|e| ExtractError::open(path, DocumentFormat::ZipHtml, e))?;

        let mut extraction = Extraction::default();

        for index in 0..archive.len() {
            cancel.check(path)?;

            let mut entry = match archive.by_index(index) {
                Ok(entry) => entry,
                Err(e) => {
                    extraction.skip(ExtractError::read(format!("entry #{}", index), e));
                    continue;
                }
            };

            if entry.is_dir() {
                continue;
            }

            let name = entry.name().to_string();
            if !options.is_html_entry(&name) {
                log::trace!("Ignoring non-HTML entry {}", name);
                continue;
            }

            let mut bytes = Vec::new();
            if let Err(e) = entry.read_to_end(&mut bytes) {
                extraction.skip(ExtractError::read(name, e));
                continue;
            }

            match String::from_utf8(bytes) {
                Ok(html) => {
                    let content = options.render_html(html);
                    extraction.chapters.push(Chapter::new(None, name, Some(content)));
                }
                Err(e) => extraction.skip(ExtractError::decode(name, e.utf8_error())),
            }
        }

        Ok(extraction)
    }
}
