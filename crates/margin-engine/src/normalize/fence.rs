use crate::classify::CodeFence;

/// Drops the outer fence when the first and last non-blank lines are
/// boundaries of the same style. The destination fence already supplies them.
pub fn strip_outer_fence(content: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());

    if let (Some(first), Some(last)) = (first, last)
        && first < last
        && let Some(open) = CodeFence::sig(lines[first])
        && CodeFence::closes(open, lines[last])
    {
        return lines[first + 1..last].join("\n");
    }
    content.to_string()
}

/// Exactly one trailing newline, so a following closing fence stays on its own line.
pub fn ensure_single_trailing_newline(content: &str) -> String {
    let mut out = content.trim_end_matches(['\n', '\r']).to_string();
    out.push('\n');
    out
}
