//! # Edit Session
//!
//! One invocation: snapshot the buffer, ask the generator, then write the
//! result back as exactly one buffer mutation.
//!
//! Replace mode overwrites the selection verbatim. Insert mode runs the
//! planner, which normalizes the output for the structure around the cursor.

use log::{debug, info, warn};

use crate::{
    editing::{Buffer, SelectionEnd},
    error::EditError,
    generate::{GenerationError, GenerationRequest, Generator, Mode},
    plan::plan_insertion,
    text::{Position, TextSnapshot, preview},
};

/// Characters of context sent on each side of the operative point.
pub const DEFAULT_CONTEXT_WINDOW: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub context_window: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }
}

/// User-visible status: a busy indicator and a transient confirmation.
pub trait StatusReporter {
    fn busy(&mut self, message: &str);
    fn clear(&mut self);
    fn notify(&mut self, message: &str);
}

/// A reporter that shows nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentStatus;

impl StatusReporter for SilentStatus {
    fn busy(&mut self, _message: &str) {}
    fn clear(&mut self) {}
    fn notify(&mut self, _message: &str) {}
}

/// Holds the busy indicator; clears it when dropped.
struct BusyGuard<'a, S: StatusReporter> {
    status: &'a mut S,
}

impl<'a, S: StatusReporter> BusyGuard<'a, S> {
    fn new(status: &'a mut S, message: &str) -> Self {
        status.busy(message);
        Self { status }
    }
}

impl<S: StatusReporter> Drop for BusyGuard<'_, S> {
    fn drop(&mut self) {
        self.status.clear();
    }
}

/// What a successful run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub mode: Mode,
    pub from: Position,
    pub to: Position,
    pub text: String,
}

pub struct EditSession<G, S> {
    generator: G,
    status: S,
    settings: SessionSettings,
}

impl<G: Generator, S: StatusReporter> EditSession<G, S> {
    pub fn new(generator: G, status: S) -> Self {
        Self::with_settings(generator, status, SessionSettings::default())
    }

    pub fn with_settings(generator: G, status: S, settings: SessionSettings) -> Self {
        Self {
            generator,
            status,
            settings,
        }
    }

    pub fn status(&self) -> &S {
        &self.status
    }

    /// Runs one edit against `buffer`.
    ///
    /// On any error the buffer is untouched.
    pub fn run<B: Buffer>(
        &mut self,
        buffer: &mut B,
        mode: Mode,
        instruction: &str,
    ) -> Result<EditOutcome, EditError> {
        let document = buffer.text();
        let selection = buffer.selection_text();
        let from = buffer.cursor(SelectionEnd::From);
        let to = buffer.cursor(SelectionEnd::To);

        if mode == Mode::Replace && selection.is_empty() {
            return Err(EditError::Mode);
        }

        let operative = match mode {
            Mode::Replace => buffer.offset_of(from)..buffer.offset_of(to),
            Mode::Insert => {
                let at = buffer.offset_of(to);
                at..at
            }
        };
        let request = GenerationRequest::new(
            mode,
            instruction,
            &document,
            &selection,
            operative,
            self.settings.context_window,
        );
        debug!(
            "{:?} request at char {} ({:.2}): {:?}",
            mode,
            request.offset,
            request.offset_fraction,
            preview(instruction, 80)
        );

        let generated = {
            let _busy = BusyGuard::new(&mut self.status, "Generating...");
            self.generator.generate(&request)
        }
        .inspect_err(|e| warn!("{e}"))?;

        if generated.trim().is_empty() {
            return Err(GenerationError::new("model returned no text").into());
        }

        if buffer.text() != document {
            warn!("document changed during generation; discarding result");
            return Err(EditError::StaleDocument);
        }

        let outcome = match mode {
            Mode::Replace => {
                buffer.replace_selection(&generated);
                EditOutcome {
                    mode,
                    from,
                    to,
                    text: generated,
                }
            }
            Mode::Insert => {
                let snapshot = TextSnapshot::new(&document);
                let plan = plan_insertion(&snapshot, to, &generated)?;
                let end = (!plan.is_insertion()).then_some(plan.to);
                buffer.replace_range(&plan.text, plan.from, end);
                EditOutcome {
                    mode,
                    from: plan.from,
                    to: plan.to,
                    text: plan.text,
                }
            }
        };

        info!(
            "{:?} wrote {} bytes at {}",
            outcome.mode,
            outcome.text.len(),
            outcome.from
        );
        self.status.notify(match mode {
            Mode::Replace => "Selection replaced",
            Mode::Insert => "Text inserted",
        });
        Ok(outcome)
    }
}
