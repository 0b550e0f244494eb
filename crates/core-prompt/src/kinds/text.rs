//! Single-line text entry.

use super::{assemble, REVERSE, REVERSE_OFF};
use crate::model::{PromptModel, RenderContext};
use crate::state::PromptState;
use core_events::{Action, Key, KeyEvent};
use core_render::Frame;
use unicode_segmentation::UnicodeSegmentation;

/// Edit-buffer state for a plain text prompt. The cursor is a byte offset
/// that always sits on a grapheme cluster boundary.
#[derive(Debug, Clone, Default)]
pub struct TextPrompt {
    buffer: String,
    cursor: usize,
    default_value: Option<String>,
    placeholder: Option<String>,
}

impl TextPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-filled editable content; the cursor starts at its end.
    pub fn initial_value(mut self, value: impl Into<String>) -> Self {
        self.buffer = value.into();
        self.cursor = self.buffer.len();
        self
    }

    /// Returned when the prompt is submitted with an empty buffer.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Dimmed hint shown while the buffer is empty.
    pub fn placeholder(mut self, value: impl Into<String>) -> Self {
        self.placeholder = Some(value.into());
        self
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .grapheme_indices(true)
            .last()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .graphemes(true)
            .next()
            .map_or(self.cursor, |g| self.cursor + g.len())
    }

    /// The buffer with the cursor cell shown in reverse video.
    pub(crate) fn buffer_with_cursor(&self) -> String {
        let end = self.next_boundary();
        if self.cursor >= self.buffer.len() {
            format!("{}{REVERSE} {REVERSE_OFF}", self.buffer)
        } else {
            format!(
                "{}{REVERSE}{}{REVERSE_OFF}{}",
                &self.buffer[..self.cursor],
                &self.buffer[self.cursor..end],
                &self.buffer[end..]
            )
        }
    }

    pub(crate) fn apply_edit(&mut self, key: &KeyEvent, action: Option<Action>) {
        match (action, key.name) {
            (Some(Action::Left), _) => self.cursor = self.prev_boundary(),
            (Some(Action::Right), _) => self.cursor = self.next_boundary(),
            (_, Some(Key::Home)) => self.cursor = 0,
            (_, Some(Key::End)) => self.cursor = self.buffer.len(),
            (_, Some(Key::Backspace)) => {
                if self.cursor > 0 {
                    let start = self.prev_boundary();
                    self.buffer.replace_range(start..self.cursor, "");
                    self.cursor = start;
                }
            }
            (_, Some(Key::Delete)) => {
                if self.cursor < self.buffer.len() {
                    let end = self.next_boundary();
                    self.buffer.replace_range(self.cursor..end, "");
                }
            }
            _ => {
                if let Some(c) = key.printable() {
                    self.buffer.insert(self.cursor, c);
                    self.cursor += c.len_utf8();
                }
            }
        }
    }
}

impl PromptModel for TextPrompt {
    type Value = String;

    fn render(&self, ctx: &RenderContext<'_>) -> Frame {
        match ctx.state {
            PromptState::Submit => {
                Frame::from_lines(vec![super::header(ctx), format!("  {}", self.value())])
            }
            PromptState::Cancel => Frame::from_lines(vec![super::header(ctx)]),
            _ => {
                let shown = if self.buffer.is_empty() {
                    match &self.placeholder {
                        Some(hint) => format!(
                            "{REVERSE} {REVERSE_OFF}{}{hint}{}",
                            super::DIM,
                            super::RESET
                        ),
                        None => self.buffer_with_cursor(),
                    }
                } else {
                    self.buffer_with_cursor()
                };
                assemble(ctx, vec![format!("│ {shown}")])
            }
        }
    }

    fn update(mut self, key: &KeyEvent, action: Option<Action>) -> Self {
        self.apply_edit(key, action);
        self
    }

    fn value(&self) -> String {
        if self.buffer.is_empty() {
            self.default_value.clone().unwrap_or_default()
        } else {
            self.buffer.clone()
        }
    }
}
