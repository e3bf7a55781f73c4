//! Document text model: positions, spans, line splitting and snapshots.

pub mod lines;
pub mod position;
pub mod slice;
pub mod snapshot;
pub mod span;

pub use lines::{LineRef, lines_with_spans};
pub use position::Position;
pub use slice::{floor_char_boundary, preview, window_after, window_before};
pub use snapshot::TextSnapshot;
pub use span::Span;
