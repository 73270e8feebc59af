//! Re-joining of hard-wrapped lines from linear PDF text.

/// Characters that end a line on purpose.
const LINE_TERMINATORS: &[char] = &['.', '!', '?', ':', '"', '\''];

/// Join hard-wrapped lines.
///
/// A line keeps its break when it ends with sentence punctuation or the next
/// non-empty line starts with an upper-case letter; otherwise it is joined to
/// the next one with a space. Blank lines are dropped.
pub fn reflow_lines(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut result = String::with_capacity(text.len());
    for (i, line) in lines.iter().enumerate() {
        result.push_str(line);

        let Some(next) = lines.get(i + 1) else {
            break;
        };
        let next_starts_upper = next.chars().next().is_some_and(char::is_uppercase);
        if line.ends_with(LINE_TERMINATORS) || next_starts_upper {
            result.push('\n');
        } else {
            result.push(' ');
        }
    }

    result
}
