//! Single-choice list.

use super::{assemble, DIM, RESET};
use crate::error::PromptError;
use crate::model::{PromptModel, RenderContext};
use crate::state::PromptState;
use core_events::{Action, KeyEvent};
use core_render::Frame;

/// One selectable entry. The label is what the list shows; the value is
/// what submission yields.
#[derive(Debug, Clone)]
pub struct SelectOption<T> {
    pub value: T,
    pub label: String,
    pub hint: Option<String>,
}

impl<T> SelectOption<T> {
    pub fn new(value: T, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            hint: None,
        }
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct SelectPrompt<T> {
    options: Vec<SelectOption<T>>,
    cursor: usize,
}

impl<T: Clone> SelectPrompt<T> {
    /// Fails fast rather than presenting a list nothing can resolve.
    pub fn new(options: Vec<SelectOption<T>>) -> Result<Self, PromptError> {
        if options.is_empty() {
            return Err(PromptError::Config("select prompt needs options".into()));
        }
        Ok(Self { options, cursor: 0 })
    }

    pub fn initial_cursor(mut self, index: usize) -> Self {
        self.cursor = index.min(self.options.len() - 1);
        self
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn row(&self, index: usize) -> String {
        let option = &self.options[index];
        let marker = if index == self.cursor { "●" } else { "○" };
        match &option.hint {
            Some(hint) if index == self.cursor => {
                format!("│ {marker} {} {DIM}({hint}){RESET}", option.label)
            }
            _ if index == self.cursor => format!("│ {marker} {}", option.label),
            _ => format!("│ {marker} {DIM}{}{RESET}", option.label),
        }
    }
}

impl<T: Clone> PromptModel for SelectPrompt<T> {
    type Value = T;

    fn render(&self, ctx: &RenderContext<'_>) -> Frame {
        match ctx.state {
            PromptState::Submit => Frame::from_lines(vec![
                super::header(ctx),
                format!("  {}", self.options[self.cursor].label),
            ]),
            PromptState::Cancel => Frame::from_lines(vec![super::header(ctx)]),
            _ => assemble(ctx, (0..self.options.len()).map(|i| self.row(i)).collect()),
        }
    }

    fn update(mut self, _key: &KeyEvent, action: Option<Action>) -> Self {
        match action {
            // Movement clamps at the edges rather than wrapping.
            Some(Action::Up | Action::Left) => self.cursor = self.cursor.saturating_sub(1),
            Some(Action::Down | Action::Right) => {
                self.cursor = (self.cursor + 1).min(self.options.len() - 1);
            }
            _ => {}
        }
        self
    }

    fn value(&self) -> T {
        self.options[self.cursor].value.clone()
    }
}
