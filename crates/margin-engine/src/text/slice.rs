/// Largest char boundary in `text` that is `<= offset`.
pub fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Up to `chars` characters of `text` ending at byte `offset`.
pub fn window_before(text: &str, offset: usize, chars: usize) -> &str {
    let offset = floor_char_boundary(text, offset);
    let head = &text[..offset];
    if chars == 0 {
        return "";
    }
    let start = head
        .char_indices()
        .rev()
        .nth(chars - 1)
        .map_or(0, |(i, _)| i);
    &head[start..]
}

/// Up to `chars` characters of `text` starting at byte `offset`.
pub fn window_after(text: &str, offset: usize, chars: usize) -> &str {
    let offset = floor_char_boundary(text, offset);
    let tail = &text[offset..];
    let end = tail.char_indices().nth(chars).map_or(tail.len(), |(i, _)| i);
    &tail[..end]
}

/// Truncates `text` to at most `max` bytes with a "..." suffix if needed.
///
/// Used for log lines, which should never carry whole documents.
pub fn preview(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut s = text[..floor_char_boundary(text, max)].to_string();
    s.push_str("...");
    s
}
