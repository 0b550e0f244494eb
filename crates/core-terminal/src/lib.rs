//! Terminal output boundary and the shared-stream arbiter.
//!
//! [`Terminal`] is the narrow surface the render path is allowed to touch:
//! raw-mode toggling, cursor visibility, relative movement, line/screen
//! erase, and queued text writes flushed once per redraw step. Two
//! implementations: [`CrosstermTerminal`] for a real terminal and
//! [`MemoryTerminal`] for tests, which records every operation.
//!
//! [`SharedStream`] arbitrates one physical terminal among several logical
//! prompt sessions by reference counting; see the `arbiter` module docs.

pub mod arbiter;
pub mod memory;

pub use arbiter::{SharedStream, StreamLease};
pub use memory::{MemoryTerminal, TermOp};

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveDown, MoveLeft, MoveRight, MoveToColumn, MoveUp, Show},
    queue,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, is_raw_mode_enabled, Clear, ClearType},
};
use std::io::{self, Write};

/// The one shared mutable resource in the system. All methods queue;
/// nothing reaches the terminal until [`Terminal::flush`].
pub trait Terminal {
    fn set_raw_mode(&mut self, enabled: bool) -> Result<()>;
    fn is_raw_mode(&self) -> Result<bool>;
    fn hide_cursor(&mut self) -> Result<()>;
    fn show_cursor(&mut self) -> Result<()>;
    /// Relative cursor move; positive `dx` is right, positive `dy` is down.
    fn move_cursor(&mut self, dx: i16, dy: i16) -> Result<()>;
    fn move_to_column(&mut self, column: u16) -> Result<()>;
    fn clear_line(&mut self) -> Result<()>;
    fn clear_down(&mut self) -> Result<()>;
    fn print(&mut self, text: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    /// (columns, rows).
    fn size(&self) -> Result<(u16, u16)>;
}

/// Crossterm-backed terminal writing to stdout.
pub struct CrosstermTerminal {
    out: io::Stdout,
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermTerminal {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Terminal for CrosstermTerminal {
    fn set_raw_mode(&mut self, enabled: bool) -> Result<()> {
        if enabled {
            enable_raw_mode()?;
        } else {
            disable_raw_mode()?;
        }
        Ok(())
    }

    fn is_raw_mode(&self) -> Result<bool> {
        Ok(is_raw_mode_enabled()?)
    }

    fn hide_cursor(&mut self) -> Result<()> {
        queue!(self.out, Hide)?;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        queue!(self.out, Show)?;
        Ok(())
    }

    fn move_cursor(&mut self, dx: i16, dy: i16) -> Result<()> {
        if dx > 0 {
            queue!(self.out, MoveRight(dx as u16))?;
        } else if dx < 0 {
            queue!(self.out, MoveLeft(dx.unsigned_abs()))?;
        }
        if dy > 0 {
            queue!(self.out, MoveDown(dy as u16))?;
        } else if dy < 0 {
            queue!(self.out, MoveUp(dy.unsigned_abs()))?;
        }
        Ok(())
    }

    fn move_to_column(&mut self, column: u16) -> Result<()> {
        queue!(self.out, MoveToColumn(column))?;
        Ok(())
    }

    fn clear_line(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::CurrentLine))?;
        Ok(())
    }

    fn clear_down(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::FromCursorDown))?;
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<()> {
        queue!(self.out, Print(text))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok(crossterm::terminal::size()?)
    }
}
