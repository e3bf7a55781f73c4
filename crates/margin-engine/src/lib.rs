//! # margin-engine
//!
//! Splices language-model output into a live Markdown buffer without
//! duplicating list markers, breaking fences or piling up blank lines.
//!
//! The pipeline for one edit:
//!
//! 1. [`classify`] reports what kind of line the cursor is on.
//! 2. [`fence`] decides whether that line is inside a fenced code block.
//! 3. [`normalize`] reshapes the model text for that context.
//! 4. [`plan`] picks the one range the result replaces.
//! 5. [`session`] drives it end to end against a [`editing::Buffer`].
//!
//! Everything up to [`session`] is a pure function of the document text, the
//! cursor position and the model output.

pub mod classify;
pub mod editing;
pub mod error;
pub mod fence;
pub mod generate;
pub mod normalize;
pub mod plan;
pub mod session;
pub mod text;

pub use classify::{LineClass, classify};
pub use editing::{Buffer, Patch, RopeBuffer, SelectionEnd};
pub use error::EditError;
pub use fence::{FenceSpan, enclosing_fence, fence_spans, find_fence_bounds, is_inside_fence};
pub use generate::{GenerationError, GenerationRequest, Generator, Mode};
pub use plan::{Plan, Strategy, plan_insertion};
pub use session::{
    DEFAULT_CONTEXT_WINDOW, EditOutcome, EditSession, SessionSettings, SilentStatus,
    StatusReporter,
};
pub use text::{Position, TextSnapshot};
