//! Line diff classification between successive frames.
//!
//! Redraw cost is bounded by the size of the change, not the frame:
//! * exactly one changed line → reposition, clear and rewrite that line;
//! * a changed tail starting at line `k` → clear from `k` down and rewrite
//!   the remainder (this also covers frames that grew or shrank while
//!   keeping a common prefix);
//! * no common prefix → erase and rewrite the whole frame.

use crate::frame::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDiff {
    /// Frames are identical; write nothing.
    Unchanged,
    /// Exactly one line changed, heights equal.
    SingleLine(usize),
    /// Everything from this line down must be rewritten.
    FromLine(usize),
    /// No usable common prefix; full erase and rewrite.
    Full,
}

pub fn classify(prev: &Frame, next: &Frame) -> FrameDiff {
    if prev.lines() == next.lines() {
        return FrameDiff::Unchanged;
    }
    let common = prev
        .lines()
        .iter()
        .zip(next.lines())
        .take_while(|(a, b)| a == b)
        .count();
    if prev.height() == next.height() {
        let changed: Vec<usize> = (0..prev.height())
            .filter(|&i| prev.line(i) != next.line(i))
            .collect();
        if changed.len() == 1 {
            return FrameDiff::SingleLine(changed[0]);
        }
    }
    if common > 0 {
        FrameDiff::FromLine(common)
    } else {
        FrameDiff::Full
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_frames_are_unchanged() {
        let a = Frame::new("x\ny");
        assert_eq!(classify(&a, &a.clone()), FrameDiff::Unchanged);
    }

    #[test]
    fn one_changed_line_is_single() {
        let a = Frame::new("header\nvalue: 1\nfooter");
        let b = Frame::new("header\nvalue: 2\nfooter");
        assert_eq!(classify(&a, &b), FrameDiff::SingleLine(1));
    }

    #[test]
    fn changed_tail_rewrites_from_first_difference() {
        let a = Frame::new("header\nrow a\nrow b");
        let b = Frame::new("header\nrow x\nrow y");
        assert_eq!(classify(&a, &b), FrameDiff::FromLine(1));
    }

    #[test]
    fn growth_with_shared_prefix_rewrites_tail() {
        let a = Frame::new("header\nrow a");
        let b = Frame::new("header\nrow a\nrow b\nrow c");
        assert_eq!(classify(&a, &b), FrameDiff::FromLine(2));
    }

    #[test]
    fn shrink_with_shared_prefix_rewrites_tail() {
        let a = Frame::new("header\nrow a\nrow b");
        let b = Frame::new("header");
        assert_eq!(classify(&a, &b), FrameDiff::FromLine(1));
    }

    #[test]
    fn no_common_prefix_is_full() {
        let a = Frame::new("alpha\nbeta");
        let b = Frame::new("gamma\ndelta");
        assert_eq!(classify(&a, &b), FrameDiff::Full);
    }

    #[test]
    fn same_height_two_changes_is_tail_rewrite() {
        let a = Frame::new("keep\nchange me\nkeep\nchange me too");
        let b = Frame::new("keep\nchanged\nkeep\nchanged too");
        assert_eq!(classify(&a, &b), FrameDiff::FromLine(1));
    }
}
