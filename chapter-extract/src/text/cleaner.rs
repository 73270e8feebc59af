//! Character-level cleanup of rendered chapter text.

/// Typographic characters mapped to plain equivalents.
const REPLACEMENTS: &[(char, &str)] = &[
    ('\u{2018}', "'"),   // Left single quote
    ('\u{2019}', "'"),   // Right single quote
    ('\u{201c}', "\""),  // Left double quote
    ('\u{201d}', "\""),  // Right double quote
    ('\u{00ab}', "\""),  // Left guillemet
    ('\u{00bb}', "\""),  // Right guillemet
    ('\u{2013}', "-"),   // En dash
    ('\u{2014}', "-"),   // Em dash
    ('\u{2011}', "-"),   // Non-breaking hyphen
    ('\u{2026}', "..."), // Ellipsis
    ('\u{00a0}', " "),   // Non-breaking space
    ('\u{202f}', " "),   // Narrow no-break space
    ('\u{00ad}', ""),    // Soft hyphen
    ('\u{200b}', ""),    // Zero-width space
    ('\u{200c}', ""),    // Zero-width non-joiner
    ('\u{200d}', ""),    // Zero-width joiner
    ('\u{feff}', ""),    // BOM
];

/// Clean rendered text.
///
/// - Replaces typographic quotes, dashes and invisible characters
/// - Drops control characters other than newline and tab
/// - Collapses runs of spaces/tabs and limits blank lines to one
pub fn clean_text(text: &str) -> String {
    let mut replaced = String::with_capacity(text.len());

    for c in text.chars() {
        match REPLACEMENTS.iter().find(|(ch, _)| *ch == c) {
            Some((_, r)) => replaced.push_str(r),
            None if c == '\n' || c == '\t' || !c.is_control() => replaced.push(c),
            None => {}
        }
    }

    collapse_whitespace(&replaced)
}

fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_space = false;
    let mut newline_count = 0;

    for c in text.chars() {
        match c {
            '\n' => {
                // Trailing spaces before a line break are dropped.
                if prev_was_space {
                    result.pop();
                }
                prev_was_space = false;
                newline_count += 1;
                if newline_count <= 2 {
                    result.push('\n');
                }
            }
            ' ' | '\t' => {
                if !prev_was_space && newline_count == 0 {
                    result.push(' ');
                    prev_was_space = true;
                }
            }
            _ => {
                newline_count = 0;
                prev_was_space = false;
                result.push(c);
            }
        }
    }

    result.trim().to_string()
}
