//! The strategy seam between the generic engine and concrete prompts.

use crate::state::PromptState;
use core_events::{Action, KeyEvent};
use core_render::Frame;

/// Everything a render function needs besides the model's own state.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub state: PromptState,
    /// The configured prompt message.
    pub message: &'a str,
    /// Validation message while the prompt is in the error state.
    pub error: Option<&'a str>,
    /// Terminal width in columns, for wrapping and sizing.
    pub columns: u16,
}

/// A prompt kind: pure state plus a render function and a reducer.
///
/// `update` consumes and returns the model: one immutable-per-step state
/// value threaded through the engine, never mutated behind its back. The
/// engine resolves the recognized [`Action`] (with the session's key
/// bindings) before calling `update`, so models handle semantic actions
/// first and fall back to the raw key for text entry.
pub trait PromptModel: Sized {
    type Value;

    fn render(&self, ctx: &RenderContext<'_>) -> Frame;

    fn update(self, key: &KeyEvent, action: Option<Action>) -> Self;

    /// The value the prompt resolves with on submit.
    fn value(&self) -> Self::Value;
}
