//! Applies a frame diff to the terminal.
//!
//! Cursor discipline: after every paint the cursor rests on the frame's
//! bottom line. Every write path sets its column explicitly before
//! printing, so only the row position is tracked between paints. All
//! commands for one redraw are queued and flushed in a single write.

use crate::diff::{classify, FrameDiff};
use crate::frame::Frame;
use anyhow::Result;
use core_terminal::Terminal;

#[derive(Debug, Default)]
pub struct Painter {
    prev: Option<Frame>,
}

impl Painter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Height of the frame currently on screen.
    pub fn height(&self) -> usize {
        self.prev.as_ref().map_or(0, Frame::height)
    }

    /// Forget the previous frame; the next paint rewrites in full.
    pub fn reset(&mut self) {
        self.prev = None;
    }

    /// Render `next`, writing only what the diff against the previous frame
    /// requires.
    pub fn paint(&mut self, term: &mut dyn Terminal, next: Frame) -> Result<()> {
        let Some(prev) = &self.prev else {
            write_lines(term, next.lines())?;
            term.flush()?;
            self.prev = Some(next);
            return Ok(());
        };

        let diff = classify(prev, &next);
        tracing::trace!(target: "render.diff", ?diff, height = next.height(), "paint");
        match diff {
            FrameDiff::Unchanged => {}
            FrameDiff::SingleLine(k) => {
                let bottom = prev.height() - 1;
                move_rows(term, k as i32 - bottom as i32)?;
                term.move_to_column(0)?;
                term.clear_line()?;
                term.print(next.line(k).unwrap_or(""))?;
                move_rows(term, bottom as i32 - k as i32)?;
                term.flush()?;
            }
            FrameDiff::FromLine(k) => {
                let bottom = prev.height() - 1;
                move_rows(term, k as i32 - bottom as i32)?;
                term.move_to_column(0)?;
                term.clear_down()?;
                let rest = &next.lines()[k.min(next.height())..];
                write_lines(term, rest)?;
                if rest.is_empty() {
                    // The frame shrank to above the clear point; settle on
                    // the new bottom line.
                    move_rows(term, next.height() as i32 - 1 - k as i32)?;
                }
                term.flush()?;
            }
            FrameDiff::Full => {
                let bottom = prev.height() - 1;
                move_rows(term, -(bottom as i32))?;
                term.move_to_column(0)?;
                term.clear_down()?;
                write_lines(term, next.lines())?;
                term.flush()?;
            }
        }
        self.prev = Some(next);
        Ok(())
    }

    /// Leave the final frame in the scrollback and drop the cursor onto a
    /// fresh line below it.
    pub fn finish(&mut self, term: &mut dyn Terminal) -> Result<()> {
        if self.prev.is_some() {
            term.print("\r\n")?;
            term.flush()?;
        }
        self.prev = None;
        Ok(())
    }
}

fn write_lines(term: &mut dyn Terminal, lines: &[String]) -> Result<()> {
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            term.print("\r\n")?;
        }
        term.print(line)?;
    }
    Ok(())
}

fn move_rows(term: &mut dyn Terminal, dy: i32) -> Result<()> {
    if dy != 0 {
        term.move_cursor(0, dy as i16)?;
    }
    Ok(())
}
