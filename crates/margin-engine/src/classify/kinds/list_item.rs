/// A list item line split into indent, marker and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Leading whitespace, verbatim.
    pub indent: String,
    /// `-`, `*`, `+` or `N.`, with a task checkbox folded in (`- [ ]`).
    pub marker: String,
    /// Text after the marker and its separating whitespace.
    pub content: String,
    /// True when the content is empty or whitespace.
    pub is_stub: bool,
}

impl ListItem {
    /// `indent + marker + " "`: what a line of this item starts with.
    pub fn prefix(&self) -> String {
        format!("{}{} ", self.indent, self.marker)
    }

    /// Whitespace that aligns continuation text under this item's text column.
    pub fn continuation_indent(&self) -> String {
        format!(
            "{}{}",
            self.indent,
            " ".repeat(self.marker.chars().count() + 1)
        )
    }
}

/// List marker syntax.
pub struct ListMarker;

impl ListMarker {
    pub const BULLETS: [char; 3] = ['-', '*', '+'];
    pub const CHECKBOXES: [&'static str; 3] = ["[ ]", "[x]", "[X]"];
    const MAX_ORDINAL_DIGITS: usize = 9;

    /// Parses a list item line: indent, marker, optional whitespace, content.
    /// `-B` is an item with content `B`.
    pub fn parse(line: &str) -> Option<ListItem> {
        let line = line.trim_end_matches(['\r', '\n']);
        let rest = line.trim_start_matches([' ', '\t']);
        let indent = &line[..line.len() - rest.len()];

        let marker_len = Self::marker_len(rest)?;
        let (marker, after) = rest.split_at(marker_len);

        let mut marker = marker.to_string();
        let mut content = after.trim_start_matches([' ', '\t']);
        if let Some(checkbox) = Self::checkbox(content) {
            marker = format!("{marker} {checkbox}");
            content = content[checkbox.len()..].trim_start_matches([' ', '\t']);
        }

        Some(ListItem {
            indent: indent.to_string(),
            marker,
            is_stub: content.trim().is_empty(),
            content: content.to_string(),
        })
    }

    fn marker_len(rest: &str) -> Option<usize> {
        let first = rest.chars().next()?;
        if Self::BULLETS.contains(&first) {
            return Some(1);
        }
        let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
        if (1..=Self::MAX_ORDINAL_DIGITS).contains(&digits)
            && rest.as_bytes().get(digits) == Some(&b'.')
        {
            Some(digits + 1)
        } else {
            None
        }
    }

    fn checkbox(content: &str) -> Option<&'static str> {
        let found = Self::CHECKBOXES
            .into_iter()
            .find(|cb| content.starts_with(cb))?;
        let after = &content[found.len()..];
        (after.is_empty() || after.starts_with([' ', '\t'])).then_some(found)
    }
}
