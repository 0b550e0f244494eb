//! The prompt control loop.
//!
//! A [`Session`] owns one logical prompt from construction to resolution:
//! it leases the shared terminal, paints frames through the diff path, and
//! walks the state machine on every keystroke. The blocking run loop is one
//! way to drive it; [`Session::render_once`] and [`Session::handle_key`]
//! are the composition entry points for callers that multiplex several
//! sessions over one input listener.
//!
//! Teardown discipline: on every exit path (submit, cancel, signal abort,
//! I/O failure) the cursor is parked below the final frame, the input
//! poll stops, and the stream lease is released (restoring cursor
//! visibility and the prior raw-mode flag). The lease's RAII guard covers
//! the panic path.

use crate::config::PromptConfig;
use crate::error::PromptError;
use crate::model::{PromptModel, RenderContext};
use crate::state::PromptState;
use core_events::{Action, InputSource, KeyEvent};
use core_render::Painter;
use core_terminal::{SharedStream, StreamLease};

/// How a prompt resolved. Cancellation is a value, not an error; callers
/// test with [`Outcome::is_cancelled`] instead of catching anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Submitted(T),
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    pub fn submitted(self) -> Option<T> {
        match self {
            Outcome::Submitted(v) => Some(v),
            Outcome::Cancelled => None,
        }
    }
}

/// Result of feeding one keystroke to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Submitted,
    Cancelled,
}

pub struct Session<M: PromptModel> {
    stream: SharedStream,
    lease: Option<StreamLease>,
    painter: Painter,
    // Always `Some` outside of `update` application.
    model: Option<M>,
    state: PromptState,
    error: Option<String>,
    config: PromptConfig<M::Value>,
}

impl<M: PromptModel> Session<M> {
    /// Construction performs no terminal side effects; the lease is taken
    /// on first render.
    pub fn new(stream: &SharedStream, model: M, config: PromptConfig<M::Value>) -> Self {
        Self {
            stream: stream.clone(),
            lease: None,
            painter: Painter::new(),
            model: Some(model),
            state: PromptState::Initial,
            error: None,
            config,
        }
    }

    pub fn state(&self) -> PromptState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn model(&self) -> Option<&M> {
        self.model.as_ref()
    }

    /// Drive the prompt to resolution with a blocking poll/dispatch loop.
    ///
    /// Keystrokes are processed strictly in arrival order and every render
    /// reflects the fully applied transition before the loop polls again.
    pub fn run(&mut self, source: &mut dyn InputSource) -> Result<Outcome<M::Value>, PromptError> {
        if self.config.cancel.is_triggered() {
            // Aborted before start: resolve immediately, no raw mode, no
            // frame.
            self.state = PromptState::Cancel;
            tracing::debug!(target: "prompt.engine", "cancelled before start");
            return Ok(Outcome::Cancelled);
        }
        let result = self.run_loop(source);
        let teardown = self.teardown();
        match result {
            Err(err) => Err(err),
            Ok(outcome) => teardown.map(|()| outcome),
        }
    }

    fn run_loop(&mut self, source: &mut dyn InputSource) -> Result<Outcome<M::Value>, PromptError> {
        self.render_once()?;
        loop {
            if self.config.cancel.is_triggered() {
                self.state = PromptState::Cancel;
                tracing::debug!(target: "prompt.engine", "cancelled by signal");
                self.render_once()?;
                return Ok(Outcome::Cancelled);
            }
            let Some(key) = source
                .poll_key(self.config.poll_interval)
                .map_err(PromptError::Io)?
            else {
                continue;
            };
            match self.handle_key(&key)? {
                Step::Continue => self.render_once()?,
                Step::Cancelled => {
                    self.render_once()?;
                    return Ok(Outcome::Cancelled);
                }
                Step::Submitted => {
                    self.render_once()?;
                    let Some(value) = self.model.as_ref().map(PromptModel::value) else {
                        return Err(PromptError::Config("prompt model missing".into()));
                    };
                    return Ok(Outcome::Submitted(value));
                }
            }
        }
    }

    /// Paint the current state. Safe to call repeatedly; unchanged frames
    /// write nothing.
    pub fn render_once(&mut self) -> Result<(), PromptError> {
        self.ensure_lease()?;
        let Some(lease) = self.lease.as_ref() else {
            return Ok(());
        };
        let Some(model) = self.model.as_ref() else {
            return Ok(());
        };
        let (columns, _) = lease.with(|t| t.size()).map_err(PromptError::Io)?;
        let ctx = RenderContext {
            state: self.state,
            message: &self.config.message,
            error: self.error.as_deref(),
            columns,
        };
        let frame = model.render(&ctx);
        let painter = &mut self.painter;
        lease
            .with(|t| painter.paint(t, frame))
            .map_err(PromptError::Io)?;
        if self.state == PromptState::Initial {
            self.state = PromptState::Active;
        }
        Ok(())
    }

    /// Apply one keystroke to the state machine. The composing caller is
    /// responsible for rendering afterwards (the run loop does both).
    pub fn handle_key(&mut self, key: &KeyEvent) -> Result<Step, PromptError> {
        if self.state.is_terminal() {
            return Ok(match self.state {
                PromptState::Submit => Step::Submitted,
                _ => Step::Cancelled,
            });
        }
        let action = self.config.bindings.action_for(key);
        match action {
            Some(Action::Cancel) => {
                self.state = PromptState::Cancel;
                tracing::debug!(target: "prompt.engine", "cancelled by key");
                Ok(Step::Cancelled)
            }
            Some(Action::Enter) => {
                let verdict = match (&self.config.validate, &self.model) {
                    (Some(validate), Some(model)) => {
                        validate(&model.value()).map_err(PromptError::Validator)?
                    }
                    _ => None,
                };
                match verdict {
                    Some(message) => {
                        tracing::debug!(
                            target: "prompt.engine",
                            len = message.len(),
                            "validation failed"
                        );
                        self.state = PromptState::Error;
                        self.error = Some(message);
                        Ok(Step::Continue)
                    }
                    None => {
                        self.state = PromptState::Submit;
                        Ok(Step::Submitted)
                    }
                }
            }
            other => {
                // Error is re-entrant: any further keystroke returns to
                // active before the reducer sees it.
                if self.state == PromptState::Error {
                    self.state = PromptState::Active;
                    self.error = None;
                }
                if let Some(model) = self.model.take() {
                    self.model = Some(model.update(key, other));
                }
                Ok(Step::Continue)
            }
        }
    }

    fn ensure_lease(&mut self) -> Result<(), PromptError> {
        if self.lease.is_none() {
            let lease = self.stream.acquire().map_err(PromptError::Io)?;
            self.lease = Some(lease);
        }
        Ok(())
    }

    /// Release terminal resources: park the cursor below the final frame,
    /// then give up the lease (which restores cursor visibility and the
    /// prior raw-mode flag on last release).
    fn teardown(&mut self) -> Result<(), PromptError> {
        if let Some(lease) = self.lease.take() {
            let painter = &mut self.painter;
            lease
                .with(|t| painter.finish(t))
                .map_err(PromptError::Io)?;
            lease.release().map_err(PromptError::Io)?;
        }
        Ok(())
    }
}
