//! Optional plain-text rendering of extracted units.

mod cleaner;
mod reflow;

pub use cleaner::clean_text;
pub use reflow::reflow_lines;

/// Line width handed to the HTML renderer; wide enough that it never wraps prose.
const RENDER_WIDTH: usize = 1000;

/// Render an HTML document to readable plain text.
///
/// Lines inside a paragraph are joined with spaces, paragraphs stay separated
/// by a blank line.
pub fn html_to_text(html: &str) -> String {
    let rendered = html2text::from_read(html.as_bytes(), RENDER_WIDTH);
    clean_text(&join_paragraph_lines(&rendered))
}

/// Render linearly extracted PDF text to readable plain text.
pub fn pdf_to_text(text: &str) -> String {
    clean_text(&reflow_lines(text))
}

fn join_paragraph_lines(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pending_break = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            pending_break = !result.is_empty();
            continue;
        }

        if pending_break {
            result.push_str("\n\n");
            pending_break = false;
        } else if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(trimmed);
    }

    result
}
