//! Typed failures surfaced by the prompt engine.
//!
//! Recoverable conditions never appear here: a validation message re-enters
//! the state machine, and cancellation is an [`crate::Outcome`] variant, not
//! an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    /// Programmer error caught at construction (zero options, malformed
    /// initial values). Never retried.
    #[error("invalid prompt configuration: {0}")]
    Config(String),

    /// The validator itself failed (as opposed to returning an error
    /// message). Terminates the prompt.
    #[error("validator failed")]
    Validator(#[source] anyhow::Error),

    /// Terminal or input I/O failure. Fatal; retry has no well-defined
    /// semantics for terminal state.
    #[error("terminal i/o failed")]
    Io(#[source] anyhow::Error),
}
