use crate::generate::GenerationError;

/// Everything that can abort an edit.
///
/// Every variant aborts the invocation before any buffer mutation and is
/// surfaced to the user as a single message. Nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// A hosted endpoint is configured without the credential it needs.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Replace mode needs a non-empty selection")]
    Mode,

    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// A normalization or planning invariant did not hold.
    #[error("Could not place generated text: {0}")]
    Pipeline(String),

    #[error("The document changed while the model was generating; edit discarded")]
    StaleDocument,
}
