use super::span::Span;

/// A reference to a single line of a document with its byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRef<'a> {
    /// Byte span of the line, excluding the terminating newline.
    pub span: Span,
    /// The line text without its terminating newline.
    pub text: &'a str,
    /// Whether a `\n` follows this line.
    pub terminated: bool,
}

/// Returns an iterator over lines with their byte spans.
///
/// Splits on `\n` only, so a document ending in a newline yields a final
/// empty line, matching how editors number lines.
pub fn lines_with_spans(text: &str) -> impl Iterator<Item = LineRef<'_>> + '_ {
    let total = text.len();
    let mut offset = 0usize;
    text.split('\n').map(move |line| {
        let start = offset;
        let end = start + line.len();
        offset = end + 1;
        LineRef {
            span: Span { start, end },
            text: line,
            terminated: end < total,
        }
    })
}
