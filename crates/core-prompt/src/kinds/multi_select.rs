//! Multiple-choice list with checkbox toggles.

use super::{assemble, DIM, RESET};
use crate::error::PromptError;
use crate::kinds::SelectOption;
use crate::model::{PromptModel, RenderContext};
use crate::state::PromptState;
use core_events::{Action, KeyEvent};
use core_render::Frame;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct MultiSelectPrompt<T> {
    options: Vec<SelectOption<T>>,
    cursor: usize,
    // Checked option indices, kept sorted so submission order is stable.
    checked: BTreeSet<usize>,
}

impl<T: Clone> MultiSelectPrompt<T> {
    pub fn new(options: Vec<SelectOption<T>>) -> Result<Self, PromptError> {
        if options.is_empty() {
            return Err(PromptError::Config(
                "multi-select prompt needs options".into(),
            ));
        }
        Ok(Self {
            options,
            cursor: 0,
            checked: BTreeSet::new(),
        })
    }

    pub fn initial_checked(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        let len = self.options.len();
        self.checked = indices.into_iter().filter(|&i| i < len).collect();
        self
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn checked(&self) -> &BTreeSet<usize> {
        &self.checked
    }

    fn row(&self, index: usize) -> String {
        let option = &self.options[index];
        let box_mark = if self.checked.contains(&index) {
            "◼"
        } else {
            "◻"
        };
        if index == self.cursor {
            match &option.hint {
                Some(hint) => format!("│ {box_mark} {} {DIM}({hint}){RESET}", option.label),
                None => format!("│ {box_mark} {}", option.label),
            }
        } else {
            format!("│ {box_mark} {DIM}{}{RESET}", option.label)
        }
    }
}

impl<T: Clone> PromptModel for MultiSelectPrompt<T> {
    type Value = Vec<T>;

    fn render(&self, ctx: &RenderContext<'_>) -> Frame {
        match ctx.state {
            PromptState::Submit => {
                let labels: Vec<&str> = self
                    .checked
                    .iter()
                    .map(|&i| self.options[i].label.as_str())
                    .collect();
                let shown = if labels.is_empty() {
                    "none".to_string()
                } else {
                    labels.join(", ")
                };
                Frame::from_lines(vec![super::header(ctx), format!("  {shown}")])
            }
            PromptState::Cancel => Frame::from_lines(vec![super::header(ctx)]),
            _ => assemble(ctx, (0..self.options.len()).map(|i| self.row(i)).collect()),
        }
    }

    fn update(mut self, _key: &KeyEvent, action: Option<Action>) -> Self {
        match action {
            Some(Action::Up | Action::Left) => self.cursor = self.cursor.saturating_sub(1),
            Some(Action::Down | Action::Right) => {
                self.cursor = (self.cursor + 1).min(self.options.len() - 1);
            }
            Some(Action::Space) => {
                if !self.checked.remove(&self.cursor) {
                    self.checked.insert(self.cursor);
                }
            }
            _ => {}
        }
        self
    }

    fn value(&self) -> Vec<T> {
        self.checked
            .iter()
            .map(|&i| self.options[i].value.clone())
            .collect()
    }
}
