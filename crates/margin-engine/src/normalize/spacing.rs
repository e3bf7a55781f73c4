/// Drops whitespace-only lines from the start of `content`.
pub fn strip_leading_blank_lines(content: &str) -> &str {
    let mut rest = content;
    while let Some(idx) = rest.find('\n') {
        if !rest[..idx].trim().is_empty() {
            break;
        }
        rest = &rest[idx + 1..];
    }
    rest
}

/// Drops whitespace-only lines, and the newline before them, from the end of `content`.
pub fn strip_trailing_blank_lines(content: &str) -> &str {
    let mut rest = content;
    while let Some(idx) = rest.rfind('\n') {
        if !rest[idx + 1..].trim().is_empty() {
            break;
        }
        rest = &rest[..idx];
    }
    rest
}

/// Stops the model's own paragraph spacing from stacking on the document's.
///
/// Leading blank lines go when a newline sits right before the insertion
/// point; trailing blank lines go when a newline sits right after it.
pub fn trim_boundary_blank_lines(
    content: &str,
    before: Option<char>,
    after: Option<char>,
) -> &str {
    let mut out = content;
    if before == Some('\n') {
        out = strip_leading_blank_lines(out);
    }
    if after == Some('\n') {
        out = strip_trailing_blank_lines(out);
    }
    out
}

/// Spacing for content landing on a blank line.
///
/// Each side gets one newline when the neighbouring line has text, keeping a
/// single blank line between paragraphs, and none when the neighbour is blank
/// or missing, so gaps never grow to three lines.
pub fn normalize_paragraph_spacing(content: &str, text_above: bool, text_below: bool) -> String {
    let core = strip_trailing_blank_lines(strip_leading_blank_lines(content));
    if core.trim().is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(core.len() + 2);
    if text_above {
        out.push('\n');
    }
    out.push_str(core);
    if text_below {
        out.push('\n');
    }
    out
}
