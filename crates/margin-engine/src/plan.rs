//! # Insertion Planning
//!
//! Turns raw model output plus the structure around the insertion point into
//! exactly one buffer write: a replacement of a line range, or a pure
//! insertion at a point.
//!
//! ## Pass order
//!
//! 1. Fences first, and exclusively: inside a fence the outer fence of the
//!    output is stripped and no other heuristic runs.
//! 2. Otherwise the destination line decides: a stub list line gets list
//!    rewriting, a blockquote line gets prefix reapplication.
//! 3. Everything else is plain text: boundary blank lines are trimmed, and on
//!    a blank line paragraph spacing is matched to the neighbours.

use log::debug;

use crate::{
    classify::{LineClass, classify},
    error::EditError,
    fence::{FenceSpan, enclosing_fence},
    normalize::{
        continue_quote, ensure_single_trailing_newline, normalize_paragraph_spacing,
        reapply_quote_prefix, rewrite_for_list_stub, strip_outer_fence, trim_boundary_blank_lines,
    },
    text::{Position, TextSnapshot, preview},
};

/// Which rule placed the text. Carried for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Replaced a blank line inside a fence, newline included.
    FenceBlankLine,
    /// Inserted just before the fence's closing line.
    FenceClose,
    /// Replaced a stub list line.
    ListStub,
    /// Replaced a prefix-only blockquote line.
    QuoteStub,
    /// Inserted into a blockquote line that already has text.
    QuoteContinuation,
    /// Inserted on a blank line with paragraph spacing applied.
    Paragraph,
    /// Inserted at the cursor as-is.
    Inline,
}

/// A single atomic write: replace `from..to` with `text`, or insert when they are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub from: Position,
    pub to: Position,
    pub text: String,
    pub strategy: Strategy,
}

impl Plan {
    fn insert(at: Position, text: String, strategy: Strategy) -> Self {
        Self {
            from: at,
            to: at,
            text,
            strategy,
        }
    }

    fn replace(from: Position, to: Position, text: String, strategy: Strategy) -> Self {
        Self {
            from,
            to,
            text,
            strategy,
        }
    }

    pub fn is_insertion(&self) -> bool {
        self.from == self.to
    }
}

/// What the insertion line is, as far as placement cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Inside a closed fence; `span.end` is its closing line.
    Fence { span: FenceSpan },
    Line(LineClass),
}

impl Destination {
    pub fn resolve(snapshot: &TextSnapshot<'_>, line_index: usize) -> Self {
        if let Some(span) = enclosing_fence(&snapshot.lines(), line_index) {
            return Destination::Fence { span };
        }
        Destination::Line(classify(snapshot.line(line_index).unwrap_or_default()))
    }
}

/// Plans how `raw` model output lands at `point`.
pub fn plan_insertion(
    snapshot: &TextSnapshot<'_>,
    point: Position,
    raw: &str,
) -> Result<Plan, EditError> {
    let offset = snapshot.offset_of(point)?;
    let destination = Destination::resolve(snapshot, point.line);
    let plan = plan(snapshot, point, offset, raw, destination)?;
    debug!(
        "planned {:?} at {}..{}: {:?}",
        plan.strategy,
        plan.from,
        plan.to,
        preview(&plan.text, 80)
    );
    Ok(plan)
}

/// Normalizes `raw` for `destination` and decides the range it replaces.
///
/// `offset` must be the byte offset of `point` in `snapshot`.
pub fn plan(
    snapshot: &TextSnapshot<'_>,
    point: Position,
    offset: usize,
    raw: &str,
    destination: Destination,
) -> Result<Plan, EditError> {
    let line_ref = snapshot
        .line_ref(point.line)
        .ok_or_else(|| EditError::Pipeline(format!("no line {} in snapshot", point.line)))?;
    let line = line_ref.text;
    let line_start = Position::line_start(point.line);
    let line_end = Position::new(point.line, line.len());

    let plan = match destination {
        Destination::Fence { span } => {
            let text = ensure_single_trailing_newline(&strip_outer_fence(raw));
            if line.trim().is_empty() && line_ref.terminated {
                Plan::replace(
                    line_start,
                    Position::line_start(point.line + 1),
                    text,
                    Strategy::FenceBlankLine,
                )
            } else {
                Plan::insert(Position::line_start(span.end), text, Strategy::FenceClose)
            }
        }
        Destination::Line(LineClass::ListItem(item)) if item.is_stub => Plan::replace(
            line_start,
            line_end,
            rewrite_for_list_stub(raw, &item),
            Strategy::ListStub,
        ),
        Destination::Line(LineClass::BlockQuote(quote)) if quote.is_stub => Plan::replace(
            line_start,
            line_end,
            reapply_quote_prefix(raw, &quote),
            Strategy::QuoteStub,
        ),
        Destination::Line(LineClass::BlockQuote(quote)) => Plan::insert(
            point,
            continue_quote(raw, &quote, point.column == line.len()),
            Strategy::QuoteContinuation,
        ),
        Destination::Line(class) => {
            let trimmed = trim_boundary_blank_lines(
                raw,
                snapshot.char_before(offset),
                snapshot.char_after(offset),
            );
            if line.trim().is_empty() {
                let text_above = point
                    .line
                    .checked_sub(1)
                    .and_then(|i| snapshot.line(i))
                    .is_some_and(|l| !l.trim().is_empty());
                let text_below = snapshot
                    .line(point.line + 1)
                    .is_some_and(|l| !l.trim().is_empty());
                Plan::insert(
                    point,
                    normalize_paragraph_spacing(trimmed, text_above, text_below),
                    Strategy::Paragraph,
                )
            } else {
                let mut text = trimmed.to_string();
                // New content after a filled bullet starts its own line.
                if matches!(class, LineClass::ListItem(_))
                    && point.column == line.len()
                    && !text.is_empty()
                    && !text.starts_with('\n')
                {
                    text.insert(0, '\n');
                }
                Plan::insert(point, text, Strategy::Inline)
            }
        }
    };

    Ok(plan)
}
