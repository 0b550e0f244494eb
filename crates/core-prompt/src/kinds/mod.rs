//! The thin declarative prompt kinds.
//!
//! Each kind is a small state value implementing [`crate::PromptModel`]:
//! a pure reducer and a render function on top of the generic engine.
//! Shared here: the state symbol vocabulary and the common frame scaffold
//! (message header, optional error footer).

mod confirm;
mod multi_select;
mod password;
mod select;
mod text;

pub use confirm::ConfirmPrompt;
pub use multi_select::MultiSelectPrompt;
pub use password::PasswordPrompt;
pub use select::{SelectOption, SelectPrompt};
pub use text::TextPrompt;

use crate::model::RenderContext;
use crate::state::PromptState;
use core_render::Frame;

pub(crate) const REVERSE: &str = "\x1b[7m";
pub(crate) const REVERSE_OFF: &str = "\x1b[27m";
pub(crate) const DIM: &str = "\x1b[2m";
pub(crate) const RESET: &str = "\x1b[0m";

fn symbol(state: PromptState) -> &'static str {
    match state {
        PromptState::Initial | PromptState::Active => "◆",
        PromptState::Error => "▲",
        PromptState::Submit => "◇",
        PromptState::Cancel => "■",
    }
}

/// `"◆ message"` header line. Public so models in other crates can share
/// the frame scaffold.
pub fn header(ctx: &RenderContext<'_>) -> String {
    format!("{} {}", symbol(ctx.state), ctx.message)
}

/// Assemble the common frame shape: header, body lines, error footer.
pub fn assemble(ctx: &RenderContext<'_>, body: Vec<String>) -> Frame {
    let mut lines = vec![header(ctx)];
    lines.extend(body);
    if let Some(error) = ctx.error {
        lines.push(format!("✘ {error}"));
    }
    Frame::from_lines(lines)
}
