//! chapterize - Split EPUB, PDF and zipped HTML documents into text chapters

mod config;

use anyhow::{Context, Result};
use chapter_extract::{ChapterCollection, Coordinator, DocumentFormat, TitleValidator};
use clap::{Parser, Subcommand};
use config::ChapterizeConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chapterize")]
#[command(about = "Split EPUB, PDF and zipped HTML documents into text chapters", long_about = None)]
#[command(version, args_conflicts_with_subcommands = true)]
struct Args {
    /// Documents to extract, in order; chapters accumulate across files
    files: Vec<PathBuf>,

    /// Force the container format (epub, pdf, zip) instead of detecting it
    #[arg(short, long)]
    format: Option<DocumentFormat>,

    /// Render HTML and PDF text to plain text
    #[arg(long, default_value_t = false)]
    plain_text: bool,

    /// Print the chapters as JSON instead of summaries
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Characters of chapter text shown per summary (default from config: 100)
    #[arg(long)]
    summary_length: Option<usize>,

    /// Enable debug output
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the structured heading pattern
    SetPattern {
        /// Regular expression, matched case-insensitively at the start of a title
        pattern: String,
    },
    /// Set the default summary length
    SetSummaryLength {
        /// Number of characters
        value: usize,
    },
    /// Enable or disable plain-text rendering by default
    SetPlainText {
        /// true or false
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    if let Some(Commands::Config { action }) = &args.command {
        return handle_config_command(action);
    }

    if args.files.is_empty() {
        anyhow::bail!("At least one document is required. Run 'chapterize --help' for usage.");
    }

    let mut config = ChapterizeConfig::load().context("Failed to load configuration")?;
    if args.plain_text {
        config.plain_text = true;
    }
    let summary_length = args.summary_length.unwrap_or(config.summary_length);
    let options = config.extract_options()?;
    let validator = options.title_validator.clone();
    let coordinator = Coordinator::new(options);

    let mut collection = ChapterCollection::new();
    let mut failed = 0;

    for path in &args.files {
        match coordinator.run_extraction(path, args.format, &mut collection) {
            Ok(report) => {
                eprintln!(
                    "{}: {} chapter(s) read as {}",
                    path.display(),
                    report.appended,
                    report.format
                );
                for error in &report.errors {
                    eprintln!("  warning: {}", error);
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("Error: {}", e);
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&collection)?);
    } else {
        print_summaries(&collection, summary_length, &validator);
    }

    if failed == args.files.len() {
        anyhow::bail!("No document could be extracted");
    }

    Ok(())
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn print_summaries(collection: &ChapterCollection, summary_length: usize, validator: &TitleValidator) {
    for chapter in collection {
        println!("{}", chapter.summarize_with(summary_length));
    }

    eprintln!(
        "Chapters: {}, Words: ~{}, Structured headings: {}",
        collection.len(),
        collection.total_words(),
        collection.structured_count(validator)
    );
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = ChapterizeConfig::load()?;
            println!("Configuration file: {:?}", ChapterizeConfig::config_path()?);
            println!();
            println!("heading_pattern = {:?}", config.heading_pattern);
            println!("summary_length = {}", config.summary_length);
            println!("plain_text = {}", config.plain_text);
            println!("html_extensions = {:?}", config.html_extensions);
        }
        ConfigAction::SetPattern { pattern } => {
            TitleValidator::new(pattern)
                .with_context(|| format!("Invalid heading pattern: {}", pattern))?;
            let mut config = ChapterizeConfig::load()?;
            config.heading_pattern = pattern.clone();
            config.save()?;
            println!("Heading pattern set to: {}", pattern);
        }
        ConfigAction::SetSummaryLength { value } => {
            let mut config = ChapterizeConfig::load()?;
            config.summary_length = *value;
            config.save()?;
            println!("Default summary length set to: {}", config.summary_length);
        }
        ConfigAction::SetPlainText { enabled } => {
            let mut config = ChapterizeConfig::load()?;
            config.plain_text = *enabled;
            config.save()?;
            println!("Plain-text rendering {}", if *enabled { "enabled" } else { "disabled" });
        }
    }
    Ok(())
}
