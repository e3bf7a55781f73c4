use crate::error::EditError;

use super::{
    lines::{LineRef, lines_with_spans},
    position::Position,
};

/// Immutable view over one document string, taken at the start of an edit.
///
/// Every normalization and planning decision is made against a snapshot, so
/// the pipeline stays a pure function of (snapshot, insertion point, model text).
#[derive(Debug, Clone)]
pub struct TextSnapshot<'a> {
    text: &'a str,
    lines: Vec<LineRef<'a>>,
}

impl<'a> TextSnapshot<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            lines: lines_with_spans(text).collect(),
        }
    }

    /// Line text without its newline.
    pub fn line(&self, index: usize) -> Option<&'a str> {
        self.lines.get(index).map(|l| l.text)
    }

    pub fn line_ref(&self, index: usize) -> Option<LineRef<'a>> {
        self.lines.get(index).copied()
    }

    pub fn lines(&self) -> Vec<&'a str> {
        self.lines.iter().map(|l| l.text).collect()
    }

    /// Converts a position to a byte offset.
    ///
    /// Unlike an editor buffer this does not clamp: a position outside the
    /// snapshot means the caller and the document disagree, which is a
    /// pipeline error.
    pub fn offset_of(&self, pos: Position) -> Result<usize, EditError> {
        let line = self.lines.get(pos.line).ok_or_else(|| {
            EditError::Pipeline(format!(
                "line {} is outside a document of {} lines",
                pos.line,
                self.lines.len()
            ))
        })?;
        if pos.column > line.text.len() || !line.text.is_char_boundary(pos.column) {
            return Err(EditError::Pipeline(format!(
                "column {} is not a valid position on line {}",
                pos.column, pos.line
            )));
        }
        Ok(line.span.start + pos.column)
    }

    pub fn char_before(&self, offset: usize) -> Option<char> {
        self.text.get(..offset)?.chars().next_back()
    }

    pub fn char_after(&self, offset: usize) -> Option<char> {
        self.text.get(offset..)?.chars().next()
    }
}
