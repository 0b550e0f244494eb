//! Grapheme cluster display width.
//!
//! One authoritative function, [`cluster_width`], maps a single extended
//! grapheme cluster to the number of terminal cells it occupies. Base
//! widths come from the `unicode-width` East-Asian-width tables; the
//! classifier on top handles the composed-emoji forms those tables
//! mis-measure when summed per code point (ZWJ sequences, flags, keycaps,
//! skin tone modifiers).
//!
//! The classifier favors over-estimation: an extra blank cell is harmless,
//! an under-estimate makes every subsequent cell drift.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ZWJ: char = '\u{200D}';
const VS16: char = '\u{FE0F}';
const KEYCAP: char = '\u{20E3}';

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

fn is_skin_tone(c: char) -> bool {
    ('\u{1F3FB}'..='\u{1F3FF}').contains(&c)
}

/// Heuristic Extended Pictographic membership: the primary emoji planes
/// plus the legacy Misc Symbols / Dingbats blocks.
fn is_pictographic(c: char) -> bool {
    ('\u{1F300}'..='\u{1FAFF}').contains(&c) || ('\u{2600}'..='\u{27BF}').contains(&c)
}

/// Display column width of one extended grapheme cluster.
///
/// Precondition: `cluster` is a single EGC slice; callers segment first and
/// we do not re-validate to avoid double scanning. Control characters and
/// escape sequences are the measurement pass's concern, not this function's.
pub fn cluster_width(cluster: &str) -> usize {
    let mut chars = cluster.chars();
    let Some(first) = chars.next() else {
        return 0;
    };
    if chars.next().is_none() {
        // Single code point: pictographic singletons render as emoji in
        // modern terminals; everything else defers to the width table.
        if is_pictographic(first) && first >= '\u{1F000}' {
            return 2;
        }
        return first.width().unwrap_or(0);
    }

    let mut pictographic = 0usize;
    let mut regional = 0usize;
    let mut has_zwj = false;
    let mut has_skin = false;
    let mut has_vs16 = false;
    let mut last = first;
    let mut count = 0usize;
    for c in cluster.chars() {
        count += 1;
        last = c;
        if is_pictographic(c) {
            pictographic += 1;
        }
        if is_regional_indicator(c) {
            regional += 1;
        }
        match c {
            ZWJ => has_zwj = true,
            VS16 => has_vs16 = true,
            _ => {}
        }
        if is_skin_tone(c) {
            has_skin = true;
        }
    }

    // Keycap: digit/#/* (+ optional VS16) + combining keycap.
    if last == KEYCAP && (first.is_ascii_digit() || first == '#' || first == '*') {
        return 2;
    }
    // Flag: regional indicator pair.
    if regional == 2 && count == 2 {
        return 2;
    }
    // Composed emoji: any ZWJ join, tone modifier, or VS16 presentation of
    // a pictographic base collapses to one double cell.
    if (has_zwj && pictographic >= 1) || (has_skin && pictographic >= 1) {
        return 2;
    }
    if has_vs16 && pictographic >= 1 {
        return 2;
    }

    // Base + combining marks (or other benign composition): the summed
    // table width already assigns zero to combining marks.
    let w = cluster.width();
    if w == 0 {
        // A cluster of nothing but marks still occupies its base cell.
        return 1;
    }
    // Conservative widen: a pictographic signal never renders narrow.
    if w == 1 && (pictographic > 0 || regional > 0) {
        return 2;
    }
    w.min(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii() {
        assert_eq!(cluster_width("a"), 1);
    }

    #[test]
    fn wide_cjk() {
        assert_eq!(cluster_width("界"), 2);
        assert_eq!(cluster_width("한"), 2);
        assert_eq!(cluster_width("カ"), 2);
    }

    #[test]
    fn emoji_simple() {
        assert_eq!(cluster_width("😀"), 2);
    }

    #[test]
    fn emoji_flag_pair() {
        assert_eq!(cluster_width("🇺🇸"), 2);
    }

    #[test]
    fn emoji_zwj_family() {
        assert_eq!(cluster_width("👨\u{200D}👩\u{200D}👧\u{200D}👦"), 2);
    }

    #[test]
    fn emoji_skin_tone() {
        assert_eq!(cluster_width("👍🏻"), 2);
    }

    #[test]
    fn emoji_keycap() {
        assert_eq!(cluster_width("1\u{FE0F}\u{20E3}"), 2);
        assert_eq!(cluster_width("2\u{20E3}"), 2);
    }

    #[test]
    fn combining_mark_attaches_to_base() {
        assert_eq!(cluster_width("e\u{0301}"), 1);
        assert_eq!(cluster_width("界\u{0301}"), 2);
    }

    #[test]
    fn lone_regional_indicator_widens() {
        assert_eq!(cluster_width("🇺"), 2);
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(cluster_width(""), 0);
    }
}
