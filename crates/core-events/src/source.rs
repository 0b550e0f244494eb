//! Input sources feeding normalized keystrokes to the engine.
//!
//! The engine runs a blocking poll/dispatch loop: it asks the source for the
//! next key with a timeout, letting it observe the cancellation signal
//! between keystrokes. Sources never block indefinitely.

use crate::key::{Key, KeyEvent};
use anyhow::Result;
use crossterm::event::{
    Event as CtEvent, KeyCode as CtKeyCode, KeyEvent as CtKeyEvent, KeyEventKind as CtKeyEventKind,
    KeyModifiers as CtKeyModifiers,
};
use std::collections::VecDeque;
use std::time::Duration;

pub trait InputSource {
    /// Next keystroke, or `None` if the timeout elapsed first.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>>;
}

/// Reads from the physical terminal via crossterm. Requires the terminal to
/// be in raw mode (the stream arbiter's job).
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl CrosstermInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for CrosstermInput {
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if !crossterm::event::poll(timeout)? {
            return Ok(None);
        }
        match crossterm::event::read()? {
            CtEvent::Key(event) if event.kind != CtKeyEventKind::Release => {
                Ok(translate_key(&event))
            }
            // Resize and focus events are not keystrokes; the caller's next
            // poll picks up whatever follows.
            _ => Ok(None),
        }
    }
}

/// Map a crossterm key event into the normalized form. Returns `None` for
/// keys the engine has no use for (media keys, lock keys, …).
fn translate_key(event: &CtKeyEvent) -> Option<KeyEvent> {
    let (sequence, name) = match event.code {
        CtKeyCode::Char(c) => (
            c.to_string(),
            if c == ' ' { Some(Key::Space) } else { None },
        ),
        CtKeyCode::Enter => ("\r".to_string(), Some(Key::Enter)),
        CtKeyCode::Esc => (String::new(), Some(Key::Escape)),
        CtKeyCode::Backspace => (String::new(), Some(Key::Backspace)),
        CtKeyCode::Delete => (String::new(), Some(Key::Delete)),
        CtKeyCode::Tab | CtKeyCode::BackTab => ("\t".to_string(), Some(Key::Tab)),
        CtKeyCode::Up => (String::new(), Some(Key::Up)),
        CtKeyCode::Down => (String::new(), Some(Key::Down)),
        CtKeyCode::Left => (String::new(), Some(Key::Left)),
        CtKeyCode::Right => (String::new(), Some(Key::Right)),
        CtKeyCode::Home => (String::new(), Some(Key::Home)),
        CtKeyCode::End => (String::new(), Some(Key::End)),
        CtKeyCode::PageUp => (String::new(), Some(Key::PageUp)),
        CtKeyCode::PageDown => (String::new(), Some(Key::PageDown)),
        _ => return None,
    };
    Some(KeyEvent {
        sequence,
        name,
        ctrl: event.modifiers.contains(CtKeyModifiers::CONTROL),
        meta: event.modifiers.contains(CtKeyModifiers::ALT),
        shift: event.modifiers.contains(CtKeyModifiers::SHIFT),
    })
}

/// Receives keystrokes over a crossbeam channel. Lets a composing caller
/// own the single physical input listener and fan keys out to whichever
/// session currently has focus.
pub struct ChannelInput {
    rx: crossbeam_channel::Receiver<KeyEvent>,
}

/// Create a connected sender/source pair.
pub fn channel_source() -> (crossbeam_channel::Sender<KeyEvent>, ChannelInput) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (tx, ChannelInput { rx })
}

impl InputSource for ChannelInput {
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        match self.rx.recv_timeout(timeout) {
            Ok(key) => Ok(Some(key)),
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => Ok(None),
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                Err(anyhow::anyhow!("input channel disconnected"))
            }
        }
    }
}

/// Pre-scripted keystrokes for tests. Yields each queued key immediately,
/// then reports the queue as exhausted.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    keys: VecDeque<KeyEvent>,
}

impl ScriptedInput {
    pub fn new(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn push(&mut self, key: KeyEvent) {
        self.keys.push_back(key);
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll_key(&mut self, _timeout: Duration) -> Result<Option<KeyEvent>> {
        match self.keys.pop_front() {
            Some(key) => Ok(Some(key)),
            None => Err(anyhow::anyhow!("scripted input exhausted")),
        }
    }
}
