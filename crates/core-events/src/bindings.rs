//! Action recognition and configurable key aliases.
//!
//! Which keys mean "up", "confirm" or "cancel" is configuration supplied at
//! construction, not process-wide state. [`KeyBindings::default`] covers the
//! conventional set (arrows, Enter, Space, Escape, Ctrl-C); callers layer
//! aliases on top (`k`/`j` for list navigation, `q` for cancel, …).

use crate::key::{Key, KeyEvent};
use std::collections::HashMap;

/// Cursor/action events the prompt engine recognizes ahead of the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Cancel,
}

/// Maps named keys and printable aliases onto [`Action`]s.
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    aliases: HashMap<String, Action>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a printable sequence (for example `"k"`) to an action.
    pub fn bind(mut self, sequence: impl Into<String>, action: Action) -> Self {
        self.aliases.insert(sequence.into(), action);
        self
    }

    /// Conventional vim-style list navigation aliases.
    pub fn with_vim_navigation(self) -> Self {
        self.bind("k", Action::Up)
            .bind("j", Action::Down)
            .bind("h", Action::Left)
            .bind("l", Action::Right)
    }

    /// Resolve a keystroke to an action, if it is one.
    ///
    /// Ctrl-C and Escape always cancel; named keys resolve before aliases so
    /// an alias can never shadow a real arrow key.
    pub fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        if key.is_interrupt() {
            return Some(Action::Cancel);
        }
        if let Some(name) = key.name {
            let action = match name {
                Key::Up => Action::Up,
                Key::Down => Action::Down,
                Key::Left => Action::Left,
                Key::Right => Action::Right,
                Key::Space => Action::Space,
                Key::Enter => Action::Enter,
                Key::Escape => Action::Cancel,
                _ => return None,
            };
            return Some(action);
        }
        if key.ctrl || key.meta {
            return None;
        }
        self.aliases.get(&key.sequence).copied()
    }
}
