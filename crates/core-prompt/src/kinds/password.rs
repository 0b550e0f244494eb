//! Masked text entry.

use super::{assemble, REVERSE, REVERSE_OFF};
use crate::kinds::TextPrompt;
use crate::model::{PromptModel, RenderContext};
use crate::state::PromptState;
use core_events::{Action, KeyEvent};
use core_render::Frame;
use unicode_segmentation::UnicodeSegmentation;

/// Text entry that echoes a mask character per cluster. Editing semantics
/// are exactly those of [`TextPrompt`]; only the rendering differs.
#[derive(Debug, Clone)]
pub struct PasswordPrompt {
    inner: TextPrompt,
    mask: char,
}

impl Default for PasswordPrompt {
    fn default() -> Self {
        Self {
            inner: TextPrompt::new(),
            mask: '•',
        }
    }
}

impl PasswordPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mask(mut self, mask: char) -> Self {
        self.mask = mask;
        self
    }

    fn masked_with_cursor(&self) -> String {
        let buffer = self.inner.buffer();
        let clusters_before = buffer[..self.inner.cursor()].graphemes(true).count();
        let total = buffer.graphemes(true).count();
        let mut out = String::new();
        for i in 0..total {
            if i == clusters_before {
                out.push_str(REVERSE);
                out.push(self.mask);
                out.push_str(REVERSE_OFF);
            } else {
                out.push(self.mask);
            }
        }
        if clusters_before == total {
            out.push_str(REVERSE);
            out.push(' ');
            out.push_str(REVERSE_OFF);
        }
        out
    }
}

impl PromptModel for PasswordPrompt {
    type Value = String;

    fn render(&self, ctx: &RenderContext<'_>) -> Frame {
        match ctx.state {
            PromptState::Submit => {
                let dots: String = std::iter::repeat(self.mask)
                    .take(self.inner.buffer().graphemes(true).count())
                    .collect();
                Frame::from_lines(vec![super::header(ctx), format!("  {dots}")])
            }
            PromptState::Cancel => Frame::from_lines(vec![super::header(ctx)]),
            _ => assemble(ctx, vec![format!("│ {}", self.masked_with_cursor())]),
        }
    }

    fn update(mut self, key: &KeyEvent, action: Option<Action>) -> Self {
        self.inner = self.inner.update(key, action);
        self
    }

    fn value(&self) -> String {
        self.inner.buffer().to_string()
    }
}
