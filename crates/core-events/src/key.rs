//! Normalized keystroke description.
//!
//! A [`KeyEvent`] is independent of the host's raw input encoding: the
//! `sequence` field carries the printable text the key produces (empty for
//! purely named keys), `name` identifies recognized non-printable keys, and
//! the modifier bools are already resolved.

use std::fmt;

/// Named non-printable (or semantically named) keys the engine recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Escape,
    Backspace,
    Delete,
    Tab,
    Home,
    End,
    PageUp,
    PageDown,
}

/// One normalized keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Printable text produced by the key, if any.
    pub sequence: String,
    /// Recognized key identity, if any.
    pub name: Option<Key>,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyEvent {
    /// A plain printable character.
    pub fn char(c: char) -> Self {
        Self {
            sequence: c.to_string(),
            name: if c == ' ' { Some(Key::Space) } else { None },
            ctrl: false,
            meta: false,
            shift: false,
        }
    }

    /// A named key with no printable payload.
    pub fn named(name: Key) -> Self {
        Self {
            sequence: match name {
                Key::Space => " ".to_string(),
                Key::Enter => "\r".to_string(),
                Key::Tab => "\t".to_string(),
                _ => String::new(),
            },
            name: Some(name),
            ctrl: false,
            meta: false,
            shift: false,
        }
    }

    /// A control chord such as Ctrl-C.
    pub fn ctrl(c: char) -> Self {
        Self {
            sequence: c.to_string(),
            name: None,
            ctrl: true,
            meta: false,
            shift: false,
        }
    }

    /// True for Ctrl-C, the universal interrupt.
    pub fn is_interrupt(&self) -> bool {
        self.ctrl && self.sequence.eq_ignore_ascii_case("c")
    }

    /// The printable character this key contributes to an edit buffer, if
    /// any. Control chords and named keys contribute nothing.
    pub fn printable(&self) -> Option<char> {
        if self.ctrl || self.meta {
            return None;
        }
        match self.name {
            None | Some(Key::Space) => {
                let mut chars = self.sequence.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() => Some(c),
                    _ => None,
                }
            }
            Some(_) => None,
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "ctrl-")?;
        }
        if self.meta {
            write!(f, "meta-")?;
        }
        match self.name {
            Some(name) => write!(f, "{:?}", name),
            None => write!(f, "{:?}", self.sequence),
        }
    }
}
