//! Yes/no confirmation.

use super::{assemble, REVERSE, REVERSE_OFF};
use crate::model::{PromptModel, RenderContext};
use crate::state::PromptState;
use core_events::{Action, KeyEvent};
use core_render::Frame;

#[derive(Debug, Clone)]
pub struct ConfirmPrompt {
    value: bool,
    active_label: String,
    inactive_label: String,
}

impl Default for ConfirmPrompt {
    fn default() -> Self {
        Self {
            value: true,
            active_label: "Yes".to_string(),
            inactive_label: "No".to_string(),
        }
    }
}

impl ConfirmPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial_value(mut self, value: bool) -> Self {
        self.value = value;
        self
    }

    pub fn labels(mut self, yes: impl Into<String>, no: impl Into<String>) -> Self {
        self.active_label = yes.into();
        self.inactive_label = no.into();
        self
    }

    fn option(&self, label: &str, selected: bool) -> String {
        if selected {
            format!("{REVERSE} {label} {REVERSE_OFF}")
        } else {
            format!(" {label} ")
        }
    }
}

impl PromptModel for ConfirmPrompt {
    type Value = bool;

    fn render(&self, ctx: &RenderContext<'_>) -> Frame {
        match ctx.state {
            PromptState::Submit => Frame::from_lines(vec![
                super::header(ctx),
                format!(
                    "  {}",
                    if self.value {
                        &self.active_label
                    } else {
                        &self.inactive_label
                    }
                ),
            ]),
            PromptState::Cancel => Frame::from_lines(vec![super::header(ctx)]),
            _ => assemble(
                ctx,
                vec![format!(
                    "│ {} / {}",
                    self.option(&self.active_label, self.value),
                    self.option(&self.inactive_label, !self.value)
                )],
            ),
        }
    }

    fn update(mut self, key: &KeyEvent, action: Option<Action>) -> Self {
        match action {
            Some(Action::Left | Action::Right | Action::Up | Action::Down | Action::Space) => {
                self.value = !self.value;
            }
            _ => match key.sequence.as_str() {
                "y" | "Y" => self.value = true,
                "n" | "N" => self.value = false,
                _ => {}
            },
        }
        self
    }

    fn value(&self) -> bool {
        self.value
    }
}
