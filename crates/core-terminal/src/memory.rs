//! In-memory terminal for tests.
//!
//! Records every operation in order so tests can assert on the exact
//! command stream a redraw produced (number of flushes, what was cleared,
//! what was rewritten) without a real terminal. Clones share the same
//! recording, so a test can keep a handle while the terminal itself is
//! boxed behind `dyn Terminal`.

use crate::Terminal;
use anyhow::Result;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermOp {
    SetRawMode(bool),
    HideCursor,
    ShowCursor,
    MoveCursor(i16, i16),
    MoveToColumn(u16),
    ClearLine,
    ClearDown,
    Print(String),
    Flush,
}

#[derive(Debug, Clone)]
pub struct MemoryTerminal {
    ops: Rc<RefCell<Vec<TermOp>>>,
    raw: Rc<Cell<bool>>,
    size: (u16, u16),
}

impl Default for MemoryTerminal {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl MemoryTerminal {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            ops: Rc::new(RefCell::new(Vec::new())),
            raw: Rc::new(Cell::new(false)),
            size: (columns, rows),
        }
    }

    pub fn ops(&self) -> Vec<TermOp> {
        self.ops.borrow().clone()
    }

    pub fn clear_ops(&self) {
        self.ops.borrow_mut().clear();
    }

    pub fn raw_mode(&self) -> bool {
        self.raw.get()
    }

    /// Concatenation of everything printed, ignoring cursor movement.
    pub fn printed(&self) -> String {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                TermOp::Print(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn flush_count(&self) -> usize {
        self.ops
            .borrow()
            .iter()
            .filter(|op| **op == TermOp::Flush)
            .count()
    }

    fn push(&self, op: TermOp) {
        self.ops.borrow_mut().push(op);
    }
}

impl Terminal for MemoryTerminal {
    fn set_raw_mode(&mut self, enabled: bool) -> Result<()> {
        self.raw.set(enabled);
        self.push(TermOp::SetRawMode(enabled));
        Ok(())
    }

    fn is_raw_mode(&self) -> Result<bool> {
        Ok(self.raw.get())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.push(TermOp::HideCursor);
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.push(TermOp::ShowCursor);
        Ok(())
    }

    fn move_cursor(&mut self, dx: i16, dy: i16) -> Result<()> {
        self.push(TermOp::MoveCursor(dx, dy));
        Ok(())
    }

    fn move_to_column(&mut self, column: u16) -> Result<()> {
        self.push(TermOp::MoveToColumn(column));
        Ok(())
    }

    fn clear_line(&mut self) -> Result<()> {
        self.push(TermOp::ClearLine);
        Ok(())
    }

    fn clear_down(&mut self) -> Result<()> {
        self.push(TermOp::ClearDown);
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<()> {
        self.push(TermOp::Print(text.to_string()));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.push(TermOp::Flush);
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok(self.size)
    }
}
