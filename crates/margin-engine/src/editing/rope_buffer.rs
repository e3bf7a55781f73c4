use std::ops::Range;

use log::debug;
use xi_rope::{Rope, delta::DeltaElement};

use super::{Buffer, Patch, SelectionEnd};
use crate::text::{Position, floor_char_boundary};

/// An xi-rope backed [`Buffer`].
///
/// Every write compiles to a single `Delta` and bumps the version, so one
/// logical edit is always one patch.
#[derive(Debug, Clone)]
pub struct RopeBuffer {
    buffer: Rope,
    /// Byte offsets, always `start <= end`.
    selection: Range<usize>,
    version: u64,
}

impl RopeBuffer {
    /// Cursor starts at the end of the text.
    pub fn new(text: &str) -> Self {
        let buffer = Rope::from(text);
        let len = buffer.len();
        Self {
            buffer,
            selection: len..len,
            version: 0,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, std::str::Utf8Error> {
        Ok(Self::new(std::str::from_utf8(bytes)?))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_string().into_bytes()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    /// Sets the selection, ordering and clamping the ends.
    pub fn set_selection(&mut self, selection: Range<usize>) {
        let text = self.buffer.to_string();
        let a = floor_char_boundary(&text, selection.start);
        let b = floor_char_boundary(&text, selection.end);
        self.selection = a.min(b)..a.max(b);
    }

    /// Selects `from..to` given as positions.
    pub fn select(&mut self, from: Position, to: Position) {
        let range = self.offset_of(from)..self.offset_of(to);
        self.set_selection(range);
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_of_offset(self.buffer.len()) + 1
    }

    /// Byte range of a line, excluding its newline.
    fn line_bounds(&self, line: usize) -> Range<usize> {
        let len = self.buffer.len();
        let start = self.buffer.offset_of_line(line).min(len);
        let end = if line + 1 < self.line_count() {
            self.buffer.offset_of_line(line + 1).saturating_sub(1)
        } else {
            len
        };
        start..end.max(start)
    }

    /// Replaces `range` with `text` as one delta.
    pub fn apply(&mut self, range: Range<usize>, text: &str) -> Patch {
        let len = self.buffer.len();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);

        let mut builder = xi_rope::delta::Builder::new(len);
        builder.replace(start..end, Rope::from(text));
        let delta = builder.build();

        let mut changed = Vec::new();
        let mut cursor = 0;
        for op in delta.els.iter() {
            match op {
                DeltaElement::Copy(from, to) => {
                    cursor += to - from;
                }
                DeltaElement::Insert(inserted) => {
                    let start = cursor;
                    let end = cursor + inserted.len();
                    changed.push(start..end);
                    cursor = end;
                }
            }
        }

        self.buffer = delta.apply(&self.buffer);

        let caret = start + text.len();
        self.selection = caret..caret;
        self.version += 1;

        Patch {
            changed,
            new_selection: self.selection.clone(),
            version: self.version,
        }
    }
}

impl Buffer for RopeBuffer {
    fn text(&self) -> String {
        self.buffer.to_string()
    }

    fn selection_text(&self) -> String {
        self.buffer
            .slice_to_cow(self.selection.clone())
            .into_owned()
    }

    fn cursor(&self, end: SelectionEnd) -> Position {
        match end {
            SelectionEnd::From => self.position_of(self.selection.start),
            SelectionEnd::To => self.position_of(self.selection.end),
        }
    }

    fn offset_of(&self, pos: Position) -> usize {
        let line = pos.line.min(self.line_count() - 1);
        let bounds = self.line_bounds(line);
        let text = self.buffer.slice_to_cow(bounds.clone());
        bounds.start + floor_char_boundary(&text, pos.column)
    }

    fn position_of(&self, offset: usize) -> Position {
        let offset = offset.min(self.buffer.len());
        let line = self.buffer.line_of_offset(offset);
        let start = self.buffer.offset_of_line(line);
        Position::new(line, offset - start)
    }

    fn replace_selection(&mut self, text: &str) {
        let patch = self.apply(self.selection(), text);
        log_patch(&patch);
    }

    fn replace_range(&mut self, text: &str, from: Position, to: Option<Position>) {
        let start = self.offset_of(from);
        let end = to.map_or(start, |to| self.offset_of(to));
        let patch = self.apply(start.min(end)..start.max(end), text);
        log_patch(&patch);
    }
}

fn log_patch(patch: &Patch) {
    debug!(
        "edit v{}: changed {:?}, cursor {:?}",
        patch.version, patch.changed, patch.new_selection
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cursor_starts_at_end() {
        let buf = RopeBuffer::new("ab\ncd");
        assert_eq!(buf.cursor(SelectionEnd::To), Position::new(1, 2));
        assert_eq!(buf.selection_text(), "");
    }

    #[test]
    fn positions_and_offsets_agree() {
        let text = "one\ntwo\n\nfour";
        let buf = RopeBuffer::new(text);
        for offset in 0..=text.len() {
            assert_eq!(buf.offset_of(buf.position_of(offset)), offset);
        }
    }

    #[test]
    fn offset_of_clamps() {
        let buf = RopeBuffer::new("ab\ncd");
        assert_eq!(buf.offset_of(Position::new(0, 99)), 2);
        assert_eq!(buf.offset_of(Position::new(9, 0)), 3);
    }

    #[test]
    fn selection_is_ordered() {
        let mut buf = RopeBuffer::new("hello world");
        buf.set_selection(11..6);
        assert_eq!(buf.selection(), 6..11);
        assert_eq!(buf.selection_text(), "world");
        assert_eq!(buf.cursor(SelectionEnd::From), Position::new(0, 6));
    }

    #[test]
    fn apply_reports_changed_range_and_bumps_version() {
        let mut buf = RopeBuffer::new("Hello World");
        let patch = buf.apply(6..11, "Universe");
        assert_eq!(buf.text(), "Hello Universe");
        assert_eq!(patch.changed, vec![6..14]);
        assert_eq!(patch.new_selection, 14..14);
        assert_eq!(patch.version, 1);
        assert_eq!(buf.version(), 1);
    }

    #[test]
    fn deletion_has_no_changed_range() {
        let mut buf = RopeBuffer::new("Hello World");
        let patch = buf.apply(5..11, "");
        assert_eq!(buf.text(), "Hello");
        assert!(patch.changed.is_empty());
    }

    #[test]
    fn replace_range_inserts_when_to_is_absent() {
        let mut buf = RopeBuffer::new("- A\n- C");
        buf.replace_range("- B\n", Position::new(1, 0), None);
        assert_eq!(buf.text(), "- A\n- B\n- C");
    }

    #[test]
    fn replace_selection_overwrites() {
        let mut buf = RopeBuffer::new("one two three");
        buf.select(Position::new(0, 4), Position::new(0, 7));
        buf.replace_selection("2");
        assert_eq!(buf.text(), "one 2 three");
    }

    #[test]
    fn from_bytes_rejects_invalid_utf8() {
        assert!(RopeBuffer::from_bytes(&[0xff, 0xfe]).is_err());
        let buf = RopeBuffer::from_bytes(b"ok").unwrap();
        assert_eq!(buf.to_bytes(), b"ok");
    }
}
