//! Normalized key events, action bindings, cancellation, and input sources.
//!
//! The prompt engine never sees raw terminal input. Everything arrives as a
//! [`KeyEvent`], one keystroke already decoded, pulled from an
//! [`InputSource`]. Three sources ship here: the crossterm-backed terminal
//! reader, a crossbeam channel adapter (for callers that route keys through
//! their own plumbing), and a scripted queue for tests.
//!
//! Cancellation is a shared atomic flag ([`CancelSignal`]), not an error:
//! producers trigger it, the engine observes it at loop boundaries.

pub mod bindings;
pub mod key;
pub mod source;

pub use bindings::{Action, KeyBindings};
pub use key::{Key, KeyEvent};
pub use source::{channel_source, ChannelInput, CrosstermInput, InputSource, ScriptedInput};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag shared between a signal producer (Ctrl-C
/// handler, composing caller, test) and any number of prompt sessions.
///
/// Cloning is cheap and shares the underlying flag. Once triggered the
/// signal stays triggered.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    flag: Arc<AtomicBool>,
}

impl CancelSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
