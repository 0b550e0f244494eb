//! Per-prompt configuration.
//!
//! Key aliases, cancellation and the validator are explicit values handed
//! to the session at construction, never ambient process state.

use core_events::{CancelSignal, KeyBindings};
use std::time::Duration;

/// Validator: `Ok(None)` passes, `Ok(Some(msg))` is a recoverable
/// validation failure, `Err` is a validator crash and fails the prompt.
pub type Validator<V> = Box<dyn Fn(&V) -> Result<Option<String>, anyhow::Error>>;

pub struct PromptConfig<V> {
    /// The question shown above the input.
    pub message: String,
    pub bindings: KeyBindings,
    pub cancel: CancelSignal,
    /// Invoked only on Enter.
    pub validate: Option<Validator<V>>,
    /// How often the run loop wakes to check the cancellation signal while
    /// idle.
    pub poll_interval: Duration,
}

impl<V> Default for PromptConfig<V> {
    fn default() -> Self {
        Self {
            message: String::new(),
            bindings: KeyBindings::default(),
            cancel: CancelSignal::new(),
            validate: None,
            poll_interval: Duration::from_millis(50),
        }
    }
}

impl<V> PromptConfig<V> {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn validate(
        mut self,
        f: impl Fn(&V) -> Result<Option<String>, anyhow::Error> + 'static,
    ) -> Self {
        self.validate = Some(Box::new(f));
        self
    }
}
