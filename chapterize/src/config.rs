//! chapterize configuration management.

use anyhow::{Context, Result};
use chapter_extract::title::DEFAULT_HEADING_PATTERN;
use chapter_extract::{ContentMode, DEFAULT_SUMMARY_LENGTH, ExtractOptions, TitleValidator};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterizeConfig {
    /// Pattern recognising structured chapter headings (case-insensitive)
    #[serde(default = "default_heading_pattern")]
    pub heading_pattern: String,

    /// Characters of chapter text shown in summaries
    #[serde(default = "default_summary_length")]
    pub summary_length: usize,

    /// Render HTML and PDF text to plain text instead of keeping it raw
    #[serde(default)]
    pub plain_text: bool,

    /// Extensions of archive entries read as chapters
    #[serde(default = "default_html_extensions")]
    pub html_extensions: Vec<String>,
}

fn default_heading_pattern() -> String {
    DEFAULT_HEADING_PATTERN.to_string()
}

fn default_summary_length() -> usize {
    DEFAULT_SUMMARY_LENGTH
}

fn default_html_extensions() -> Vec<String> {
    vec!["html".to_string()]
}

impl Default for ChapterizeConfig {
    fn default() -> Self {
        Self {
            heading_pattern: default_heading_pattern(),
            summary_length: default_summary_length(),
            plain_text: false,
            html_extensions: default_html_extensions(),
        }
    }
}

impl ChapterizeConfig {
    /// Get the config file path: ~/.config/cli-programs/chapterize.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Neither HOME nor USERPROFILE is set")?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("cli-programs")
            .join("chapterize.toml"))
    }

    /// Load config from file, returning default if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ChapterizeConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Build extraction options from this configuration.
    pub fn extract_options(&self) -> Result<ExtractOptions> {
        let validator = TitleValidator::new(&self.heading_pattern)
            .with_context(|| format!("Invalid heading pattern: {}", self.heading_pattern))?;
        let mode = if self.plain_text {
            ContentMode::PlainText
        } else {
            ContentMode::Raw
        };
        Ok(ExtractOptions::new()
            .with_content_mode(mode)
            .with_html_extensions(&self.html_extensions)
            .with_title_validator(validator))
    }
}
