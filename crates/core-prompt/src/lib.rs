//! The prompt engine.
//!
//! One generic control loop drives every prompt kind: a [`PromptModel`]
//! supplies a pure `(state, key) -> state` update and a `state -> Frame`
//! render; the [`Session`] owns the terminal lifecycle around them: raw
//! mode via the stream arbiter, keystroke dispatch, the
//! `initial → active ⇄ error → submit | cancel` state machine, diff-based
//! partial redraw, and unconditional teardown on every exit path.
//!
//! Concrete prompt kinds (text, confirm, select, multi-select, password)
//! are configuration plus these two functions, not subclasses; see
//! [`kinds`].

pub mod config;
pub mod error;
pub mod kinds;
pub mod model;
pub mod session;
pub mod state;

pub use config::PromptConfig;
pub use error::PromptError;
pub use kinds::{ConfirmPrompt, MultiSelectPrompt, PasswordPrompt, SelectPrompt, TextPrompt};
pub use model::{PromptModel, RenderContext};
pub use session::{Outcome, Session, Step};
pub use state::PromptState;
