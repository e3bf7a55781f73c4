//! The generation capability consumed by the edit session.
//!
//! The network client, its schema negotiation and fallbacks live behind the
//! [`Generator`] trait. This module only defines what goes in (a
//! [`GenerationRequest`]) and the single error kind that comes out.

use serde::Serialize;

use crate::text::{window_after, window_before};

/// Whether the model output overwrites the selection or is spliced in at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Replace,
    Insert,
}

impl Mode {
    /// Replace when something is selected, insert otherwise.
    pub fn auto(selection: &str) -> Self {
        if selection.is_empty() {
            Mode::Insert
        } else {
            Mode::Replace
        }
    }
}

/// Any failure from the generation capability.
///
/// Refusals, truncated responses, transport failures and schema mismatches
/// all fold into this one kind; only the message differs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Generation failed: {message}")]
pub struct GenerationError {
    pub message: String,
}

impl GenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Payload handed to the generator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub mode: Mode,
    pub instruction: String,
    pub document: String,
    pub selection: String,
    /// Fixed-size window of text ending at the operative point.
    pub context_before: String,
    /// Fixed-size window of text starting after the operative point.
    pub context_after: String,
    /// Character offset of the operative point.
    pub offset: usize,
    /// `offset` as a fraction of the document's character count, in `0..=1`.
    pub offset_fraction: f64,
}

impl GenerationRequest {
    /// Builds the payload around `operative`, a byte range into `document`.
    ///
    /// For inserts the range is empty; for replacements it is the selection,
    /// and the windows are taken outside it on each side.
    pub fn new(
        mode: Mode,
        instruction: &str,
        document: &str,
        selection: &str,
        operative: std::ops::Range<usize>,
        window: usize,
    ) -> Self {
        let start = operative.start.min(document.len());
        let end = operative.end.clamp(start, document.len());
        let context_before = window_before(document, start, window).to_string();
        let context_after = window_after(document, end, window).to_string();

        let offset = document[..crate::text::floor_char_boundary(document, start)]
            .chars()
            .count();
        let total = document.chars().count();
        let offset_fraction = if total == 0 {
            0.0
        } else {
            offset as f64 / total as f64
        };

        Self {
            mode,
            instruction: instruction.to_string(),
            document: document.to_string(),
            selection: selection.to_string(),
            context_before,
            context_after,
            offset,
            offset_fraction,
        }
    }
}

/// Produces text for a request. Blocking: the caller owns scheduling.
pub trait Generator {
    fn generate(&mut self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

impl<F> Generator for F
where
    F: FnMut(&GenerationRequest) -> Result<String, GenerationError>,
{
    fn generate(&mut self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self(request)
    }
}
