//! # Line Classification
//!
//! Reports the structural role of a single line: list item, blockquote,
//! fence boundary or plain text. Classification is local to the line and
//! never fails; anything unrecognised is plain text, including blank lines.
//!
//! Syntax knowledge lives with each kind in [`kinds`]; this module only
//! decides precedence between them.

pub mod kinds;

pub use kinds::{BlockQuote, CodeFence, FenceKind, ListItem, ListMarker, Quote};

/// Structural role of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    Plain,
    ListItem(ListItem),
    BlockQuote(Quote),
    FenceBoundary(FenceKind),
}

impl LineClass {
    /// A marker or prefix with nothing after it: the anchor for an insertion.
    pub fn is_stub(&self) -> bool {
        match self {
            LineClass::ListItem(item) => item.is_stub,
            LineClass::BlockQuote(quote) => quote.is_stub,
            LineClass::Plain | LineClass::FenceBoundary(_) => false,
        }
    }
}

/// Classifies one line. Trailing `\r` / `\n` are ignored.
pub fn classify(line: &str) -> LineClass {
    if let Some(kind) = CodeFence::sig(line) {
        return LineClass::FenceBoundary(kind);
    }
    if let Some(item) = ListMarker::parse(line) {
        return LineClass::ListItem(item);
    }
    if let Some(quote) = BlockQuote::parse(line) {
        return LineClass::BlockQuote(quote);
    }
    LineClass::Plain
}
