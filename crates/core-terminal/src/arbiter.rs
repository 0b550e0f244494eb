//! Reference-counted arbitration of one physical terminal.
//!
//! Several logical prompt sessions (fields of a composite dashboard, say)
//! can time-share a terminal. Only the 0→1 acquire performs the physical
//! side effects (remember the prior raw-mode flag, enable raw mode, hide
//! the cursor) and only the 1→0 release undoes them. Everything in between
//! touches nothing but the count.
//!
//! Focus (which session currently receives keystrokes) is the composing
//! caller's concern, not the arbiter's.
//!
//! All access is single-threaded (see the engine's concurrency model); the
//! reference count is the sole synchronization primitive and must stay
//! correct when a lease is dropped early or released explicitly.

use crate::Terminal;
use anyhow::Result;
use std::cell::RefCell;
use std::rc::Rc;

struct Inner {
    term: Box<dyn Terminal>,
    holders: usize,
    prior_raw: bool,
}

/// Shared handle to one physical terminal.
#[derive(Clone)]
pub struct SharedStream {
    inner: Rc<RefCell<Inner>>,
}

impl SharedStream {
    pub fn new(term: impl Terminal + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                term: Box::new(term),
                holders: 0,
                prior_raw: false,
            })),
        }
    }

    /// Acquire a lease. The first concurrent holder switches the terminal
    /// into prompt mode (raw input, hidden cursor); later holders are
    /// no-ops with respect to physical state.
    pub fn acquire(&self) -> Result<StreamLease> {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.holders == 0 {
                inner.prior_raw = inner.term.is_raw_mode()?;
                inner.term.set_raw_mode(true)?;
                inner.term.hide_cursor()?;
                inner.term.flush()?;
                tracing::debug!(target: "stream.arbiter", "terminal entered prompt mode");
            }
            inner.holders += 1;
            tracing::trace!(target: "stream.arbiter", holders = inner.holders, "acquired");
        }
        Ok(StreamLease {
            inner: Rc::clone(&self.inner),
            released: false,
        })
    }

    pub fn holder_count(&self) -> usize {
        self.inner.borrow().holders
    }

    /// Run `f` against the underlying terminal without acquiring.
    pub fn with_terminal<R>(&self, f: impl FnOnce(&mut dyn Terminal) -> R) -> R {
        let mut inner = self.inner.borrow_mut();
        f(inner.term.as_mut())
    }
}

/// One holder's stake in the shared terminal. Dropping the lease releases
/// it; [`StreamLease::release`] does the same but surfaces restore errors.
pub struct StreamLease {
    inner: Rc<RefCell<Inner>>,
    released: bool,
}

impl StreamLease {
    /// Run `f` against the shared terminal.
    pub fn with<R>(&self, f: impl FnOnce(&mut dyn Terminal) -> R) -> R {
        let mut inner = self.inner.borrow_mut();
        f(inner.term.as_mut())
    }

    /// Release explicitly, propagating any terminal-restore failure.
    pub fn release(mut self) -> Result<()> {
        self.release_inner()
    }

    fn release_inner(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        let mut inner = self.inner.borrow_mut();
        // A lease can only be released once (guarded above), so the count
        // is positive here.
        inner.holders -= 1;
        tracing::trace!(target: "stream.arbiter", holders = inner.holders, "released");
        if inner.holders == 0 {
            let prior = inner.prior_raw;
            inner.term.show_cursor()?;
            inner.term.set_raw_mode(prior)?;
            inner.term.flush()?;
            tracing::debug!(target: "stream.arbiter", "terminal restored");
        }
        Ok(())
    }
}

impl Drop for StreamLease {
    fn drop(&mut self) {
        if let Err(err) = self.release_inner() {
            tracing::warn!(target: "stream.arbiter", %err, "restore failed during lease drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryTerminal, TermOp};

    fn raw_toggles(mem: &MemoryTerminal) -> Vec<TermOp> {
        mem.ops()
            .into_iter()
            .filter(|op| matches!(op, TermOp::SetRawMode(_)))
            .collect()
    }

    #[test]
    fn first_acquire_last_release_touch_physical_state() {
        let mem = MemoryTerminal::new(80, 24);
        let stream = SharedStream::new(mem.clone());
        let a = stream.acquire().unwrap();
        let b = stream.acquire().unwrap();
        assert_eq!(stream.holder_count(), 2);
        // Only the first acquire toggled raw mode.
        assert_eq!(raw_toggles(&mem), vec![TermOp::SetRawMode(true)]);

        a.release().unwrap();
        assert_eq!(stream.holder_count(), 1);
        assert_eq!(raw_toggles(&mem), vec![TermOp::SetRawMode(true)]);

        b.release().unwrap();
        assert_eq!(stream.holder_count(), 0);
        assert_eq!(
            raw_toggles(&mem),
            vec![TermOp::SetRawMode(true), TermOp::SetRawMode(false)]
        );
    }

    #[test]
    fn drop_releases_like_an_explicit_release() {
        let mem = MemoryTerminal::new(80, 24);
        let stream = SharedStream::new(mem.clone());
        {
            let _lease = stream.acquire().unwrap();
            assert_eq!(stream.holder_count(), 1);
        }
        assert_eq!(stream.holder_count(), 0);
        assert!(!mem.raw_mode());
    }

    #[test]
    fn reacquire_after_full_release_reenters() {
        let mem = MemoryTerminal::new(80, 24);
        let stream = SharedStream::new(mem.clone());
        stream.acquire().unwrap().release().unwrap();
        let lease = stream.acquire().unwrap();
        assert!(mem.raw_mode());
        lease.release().unwrap();
        assert_eq!(raw_toggles(&mem).len(), 4, "two full enter/restore cycles");
    }

    #[test]
    fn prior_raw_mode_is_restored() {
        let mut mem = MemoryTerminal::new(80, 24);
        mem.set_raw_mode(true).unwrap();
        let stream = SharedStream::new(mem.clone());
        stream.acquire().unwrap().release().unwrap();
        // The terminal was already raw before arbitration began; the last
        // release must put it back to raw, not force it cooked.
        assert!(mem.raw_mode());
    }

    #[test]
    fn cursor_hidden_on_enter_shown_on_restore() {
        let mem = MemoryTerminal::new(80, 24);
        let stream = SharedStream::new(mem.clone());
        let lease = stream.acquire().unwrap();
        assert!(mem.ops().contains(&TermOp::HideCursor));
        lease.release().unwrap();
        assert!(mem.ops().contains(&TermOp::ShowCursor));
    }
}
