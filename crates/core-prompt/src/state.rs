//! The per-prompt state machine.
//!
//! `Initial` and `Active` render identically; `Initial` exists so the first
//! paint can hide the cursor exactly once. `Error` is re-entrant: any
//! further keystroke returns to `Active`. `Submit` and `Cancel` are
//! terminal; no further input is accepted once either is reached.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    Initial,
    Active,
    Error,
    Submit,
    Cancel,
}

impl PromptState {
    pub fn is_terminal(self) -> bool {
        matches!(self, PromptState::Submit | PromptState::Cancel)
    }
}
