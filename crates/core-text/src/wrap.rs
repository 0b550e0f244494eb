//! Column wrapping that keeps ANSI styling valid across breaks.
//!
//! Contract:
//! - No produced line exceeds the column budget as measured by the
//!   measurement pass (escapes are free, clusters count whole).
//! - Existing newlines are preserved as hard breaks.
//! - Any SGR styling or OSC 8 hyperlink open at a break point is closed
//!   before the break and reopened after it, so every emitted line renders
//!   correctly in isolation while the joined output styles identically to
//!   the input.
//! - Wrapping already-wrapped text at the same column count is a no-op.

use crate::ansi::{escape_len, hyperlink_kind, is_sgr, is_sgr_reset};
use crate::measure::display_width;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapOptions {
    /// Split oversize unbreakable tokens at cluster boundaries instead of
    /// pushing them whole onto their own line.
    pub hard_wrap: bool,
    /// Trim trailing whitespace from each produced line.
    pub trim: bool,
    /// Prefer breaking at word boundaries. When false the text is treated
    /// as a raw cluster stream and broken exactly at the column budget.
    pub word_wrap: bool,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            hard_wrap: false,
            trim: true,
            word_wrap: true,
        }
    }
}

/// Wrap with default options.
pub fn wrap(text: &str, columns: usize) -> String {
    wrap_with(text, columns, &WrapOptions::default())
}

pub fn wrap_with(text: &str, columns: usize, opts: &WrapOptions) -> String {
    let columns = columns.max(1);
    let mut w = Wrapper {
        out: String::with_capacity(text.len()),
        styles: StyleTracker::default(),
        cur_width: 0,
        columns,
        opts: *opts,
    };
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            w.hard_break();
        }
        w.wrap_line(line);
    }
    if w.opts.trim {
        w.trim_trailing();
    }
    w.out
}

/// Styling state observed so far: the stack of open SGR codes and the open
/// hyperlink, replayed around every line boundary.
#[derive(Default)]
struct StyleTracker {
    active: Vec<String>,
    link_open: Option<String>,
}

const LINK_CLOSE: &str = "\x1b]8;;\x1b\\";
const SGR_RESET: &str = "\x1b[0m";

impl StyleTracker {
    /// Update state from every complete escape sequence inside `chunk`.
    fn observe(&mut self, chunk: &str) {
        let mut i = 0;
        while i < chunk.len() {
            if let Some(len) = escape_len(chunk, i) {
                let seq = &chunk[i..i + len];
                if is_sgr(seq) {
                    if is_sgr_reset(seq) {
                        self.active.clear();
                    } else {
                        self.active.push(seq.to_string());
                    }
                } else if let Some(open) = hyperlink_kind(seq) {
                    self.link_open = open.then(|| seq.to_string());
                }
                i += len;
            } else {
                i = crate::ansi::next_char_boundary(chunk, i);
            }
        }
    }

    fn close(&self) -> String {
        let mut s = String::new();
        if self.link_open.is_some() {
            s.push_str(LINK_CLOSE);
        }
        if !self.active.is_empty() {
            s.push_str(SGR_RESET);
        }
        s
    }

    fn reopen(&self) -> String {
        let mut s = String::new();
        for code in &self.active {
            s.push_str(code);
        }
        if let Some(link) = &self.link_open {
            s.push_str(link);
        }
        s
    }
}

struct Wrapper {
    out: String,
    styles: StyleTracker,
    cur_width: usize,
    columns: usize,
    opts: WrapOptions,
}

impl Wrapper {
    fn wrap_line(&mut self, line: &str) {
        if !self.opts.word_wrap {
            self.emit_clusters(line);
            return;
        }
        for (wi, word) in line.split(' ').enumerate() {
            let width = display_width(word);
            if wi > 0 {
                if self.cur_width + 1 + width <= self.columns || width > self.columns {
                    // Oversize words get their separator, then overflow
                    // handling below decides where they land.
                    self.out.push(' ');
                    self.cur_width += 1;
                } else {
                    self.soft_break();
                }
            }
            self.place(word, width);
        }
    }

    fn place(&mut self, word: &str, width: usize) {
        if width <= self.columns {
            if self.cur_width + width > self.columns {
                self.soft_break();
            }
            self.out.push_str(word);
            self.styles.observe(word);
            self.cur_width += width;
            return;
        }
        // Oversize token. Soft policy: whole word on its own line. Hard
        // policy: split at cluster boundaries.
        if !self.opts.hard_wrap {
            if self.cur_width > 0 {
                self.soft_break();
            }
            self.out.push_str(word);
            self.styles.observe(word);
            self.cur_width += width;
            return;
        }
        self.emit_clusters(word);
    }

    /// Emit text cluster by cluster, breaking exactly at the budget.
    fn emit_clusters(&mut self, text: &str) {
        let mut i = 0;
        while i < text.len() {
            if let Some(len) = escape_len(text, i) {
                let seq = &text[i..i + len];
                self.out.push_str(seq);
                self.styles.observe(seq);
                i += len;
                continue;
            }
            // Safe: `i` is a char boundary outside any escape.
            let cluster = match text[i..].graphemes(true).next() {
                Some(g) => g,
                None => break,
            };
            let cw = crate::width::cluster_width(cluster);
            if self.cur_width + cw > self.columns && self.cur_width > 0 {
                self.soft_break();
            }
            self.out.push_str(cluster);
            self.cur_width += cw;
            i += cluster.len();
        }
    }

    /// Break at a newline that already exists in the input. Always emitted,
    /// so intentional blank lines survive.
    fn hard_break(&mut self) {
        if self.opts.trim {
            self.trim_trailing();
        }
        let close = self.styles.close();
        self.out.push_str(&close);
        self.out.push('\n');
        let reopen = self.styles.reopen();
        self.out.push_str(&reopen);
        self.cur_width = 0;
    }

    /// Break inserted by the wrapper. A line that trimmed down to nothing is
    /// collapsed instead of emitting a blank line (a run of separators at the
    /// break point would otherwise produce one).
    fn soft_break(&mut self) {
        if self.opts.trim {
            self.trim_trailing();
            if self.out.is_empty() || self.out.ends_with('\n') {
                self.cur_width = 0;
                return;
            }
        }
        self.hard_break();
    }

    fn trim_trailing(&mut self) {
        while self.out.ends_with(' ') {
            self.out.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::display_width;

    fn visible_lines_fit(wrapped: &str, columns: usize) -> bool {
        wrapped.split('\n').all(|l| display_width(l) <= columns)
    }

    #[test]
    fn packs_words_greedily() {
        assert_eq!(wrap("the quick brown fox", 10), "the quick\nbrown fox");
    }

    #[test]
    fn preserves_existing_newlines() {
        assert_eq!(wrap("one\ntwo three", 20), "one\ntwo three");
    }

    #[test]
    fn soft_policy_pushes_long_word_whole() {
        let out = wrap("hi averyveryverylongtoken", 10);
        assert_eq!(out, "hi\naveryveryverylongtoken");
    }

    #[test]
    fn hard_policy_splits_long_word() {
        let opts = WrapOptions {
            hard_wrap: true,
            ..Default::default()
        };
        let out = wrap_with("abcdefghij", 4, &opts);
        assert_eq!(out, "abcd\nefgh\nij");
        assert!(visible_lines_fit(&out, 4));
    }

    #[test]
    fn hard_split_respects_wide_clusters() {
        let opts = WrapOptions {
            hard_wrap: true,
            ..Default::default()
        };
        // Five double-width glyphs at three columns: one per line.
        let out = wrap_with("漢漢漢漢漢", 3, &opts);
        assert_eq!(out.split('\n').count(), 5);
        assert!(visible_lines_fit(&out, 3));
    }

    #[test]
    fn styles_reopened_after_break() {
        let out = wrap("\x1b[31mred red red red\x1b[0m", 7);
        let lines: Vec<&str> = out.split('\n').collect();
        assert!(lines.len() > 1);
        // Every continuation line must restate the open color.
        for line in &lines[1..] {
            assert!(
                line.starts_with("\x1b[31m"),
                "line not reopened: {:?}",
                line
            );
        }
        // Every line but the last must close what it opened.
        for line in &lines[..lines.len() - 1] {
            assert!(line.ends_with("\x1b[0m"), "line not closed: {:?}", line);
        }
    }

    #[test]
    fn hyperlink_reopened_after_break() {
        let link = "\x1b]8;;https://example.com\x1b\\";
        let text = format!("{link}click here please now\x1b]8;;\x1b\\");
        let out = wrap(&text, 8);
        let lines: Vec<&str> = out.split('\n').collect();
        assert!(lines.len() > 1);
        for line in &lines[1..] {
            assert!(line.starts_with(link), "link not reopened: {:?}", line);
        }
    }

    #[test]
    fn trims_trailing_whitespace() {
        assert_eq!(wrap("hello      world", 6), "hello\nworld");
    }

    #[test]
    fn trim_disabled_keeps_whitespace() {
        let opts = WrapOptions {
            trim: false,
            ..Default::default()
        };
        let out = wrap_with("hi  ", 10, &opts);
        assert_eq!(out, "hi  ");
    }

    #[test]
    fn no_word_wrap_breaks_at_budget() {
        let opts = WrapOptions {
            word_wrap: false,
            ..Default::default()
        };
        let out = wrap_with("ab cd ef", 3, &opts);
        assert!(visible_lines_fit(&out, 3));
        assert_eq!(out.split('\n').count(), 3);
    }

    #[test]
    fn idempotent_at_fixed_columns() {
        let cases = [
            "the quick brown fox jumps over the lazy dog",
            "\x1b[1mbold words wrap across lines here\x1b[0m",
            "short",
            "multi\nline input with breaks",
            "wide 漢字 mixed into ascii text",
        ];
        for case in cases {
            for columns in [4usize, 9, 14, 80] {
                let once = wrap(case, columns);
                let twice = wrap(&once, columns);
                assert_eq!(once, twice, "not idempotent at {} cols: {:?}", columns, case);
            }
        }
    }

    #[test]
    fn all_lines_within_budget() {
        let text = "a selection of reasonably sized words 漢字 and 😀 emoji";
        for columns in 2..30 {
            let out = wrap(text, columns);
            for line in out.split('\n') {
                // Soft policy may overflow only for single unbreakable tokens.
                let oversize_token = !line.trim().contains(' ')
                    && display_width(line.trim()) > columns;
                assert!(
                    display_width(line) <= columns || oversize_token,
                    "line {:?} exceeds {} columns",
                    line,
                    columns
                );
            }
        }
    }
}
