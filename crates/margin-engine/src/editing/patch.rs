use std::ops::Range;

/// Result of applying one edit to a [`RopeBuffer`](super::RopeBuffer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Byte ranges in the new text that were inserted by this edit.
    pub changed: Vec<Range<usize>>,
    /// Cursor after the edit: collapsed at the end of the inserted text.
    pub new_selection: Range<usize>,
    pub version: u64,
}
