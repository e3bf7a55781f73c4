//! Fence tracking: which lines sit inside a fenced code block.
//!
//! Fence state is rescanned from the top of the document on every query.
//! Documents at interactive scale make a linear scan cheap, and a rescan can
//! never drift out of sync with the buffer.

use log::debug;

use crate::classify::{CodeFence, FenceKind};

/// A closed fence: `start` is the opening line, `end` the closing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FenceSpan {
    pub start: usize,
    pub end: usize,
    pub kind: FenceKind,
}

impl FenceSpan {
    /// Content lines and the closing line count as inside; the opener does not.
    pub fn covers(&self, line_index: usize) -> bool {
        self.start < line_index && line_index <= self.end
    }
}

/// Every closed fence in the document, top to bottom.
///
/// A boundary of the other marker style inside an open fence is content. An
/// opener that is never closed yields no span, so a malformed document reads
/// as "not inside a fence" instead of swallowing everything after the opener.
pub fn fence_spans<S: AsRef<str>>(lines: &[S]) -> Vec<FenceSpan> {
    let mut spans = Vec::new();
    let mut open: Option<(usize, FenceKind)> = None;

    for (i, line) in lines.iter().enumerate() {
        let Some(kind) = CodeFence::sig(line.as_ref()) else {
            continue;
        };
        match open {
            None => open = Some((i, kind)),
            Some((start, open_kind)) if open_kind == kind => {
                spans.push(FenceSpan {
                    start,
                    end: i,
                    kind,
                });
                open = None;
            }
            Some(_) => {}
        }
    }

    if let Some((start, kind)) = open {
        debug!(
            "unterminated {} fence opened on line {start}",
            kind.delimiter()
        );
    }
    spans
}

/// Whether `line_index` lies inside a closed fence (closing line included).
pub fn is_inside_fence<S: AsRef<str>>(lines: &[S], line_index: usize) -> bool {
    enclosing_fence(lines, line_index).is_some()
}

/// Local search for the fence around `line_index`.
///
/// Looks backward (inclusive) for the nearest boundary line, then forward
/// (inclusive) for the nearest boundary line of either style, and pairs the
/// two. That holds inside a fence with no boundary-looking content lines;
/// otherwise the pair can be wrong. [`fence_spans`] is exact.
pub fn find_fence_bounds<S: AsRef<str>>(lines: &[S], line_index: usize) -> Option<FenceSpan> {
    if line_index >= lines.len() {
        return None;
    }
    let (start, kind) = (0..=line_index)
        .rev()
        .find_map(|i| CodeFence::sig(lines[i].as_ref()).map(|kind| (i, kind)))?;
    let end = (line_index..lines.len()).find(|&i| CodeFence::sig(lines[i].as_ref()).is_some())?;
    (start != end).then_some(FenceSpan { start, end, kind })
}

/// The closed fence covering `line_index`, from a whole-document scan.
pub fn enclosing_fence<S: AsRef<str>>(lines: &[S], line_index: usize) -> Option<FenceSpan> {
    fence_spans(lines)
        .into_iter()
        .find(|span| span.covers(line_index))
}
