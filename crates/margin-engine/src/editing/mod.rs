//! # Buffer Capability
//!
//! The live document as the edit session sees it: read the text, read the
//! selection, convert positions, and make one write. Editors implement
//! [`Buffer`] over their own storage; [`RopeBuffer`] is the in-process
//! implementation over an `xi_rope::Rope`.

pub mod patch;
pub mod rope_buffer;

pub use patch::Patch;
pub use rope_buffer::RopeBuffer;

use crate::text::Position;

/// Which end of the selection to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEnd {
    From,
    To,
}

pub trait Buffer {
    /// Full document text.
    fn text(&self) -> String;

    /// Text of the current selection; empty for a bare cursor.
    fn selection_text(&self) -> String;

    /// One end of the selection. `From` is never after `To`.
    fn cursor(&self, end: SelectionEnd) -> Position;

    /// Byte offset of a position, clamped to the document.
    fn offset_of(&self, pos: Position) -> usize;

    /// Position of a byte offset, clamped to the document.
    fn position_of(&self, offset: usize) -> Position;

    fn replace_selection(&mut self, text: &str);

    /// Replaces `from..to`, or inserts at `from` when `to` is `None`.
    fn replace_range(&mut self, text: &str, from: Position, to: Option<Position>);
}
