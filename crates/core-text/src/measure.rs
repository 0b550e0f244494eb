//! Display width measurement with truncation tracking.
//!
//! Contract:
//! - Input: raw text that may interleave escape sequences, control
//!   characters, tabs and arbitrary grapheme clusters.
//! - Output: a [`Measurement`] giving the visible width and, when a limit
//!   is supplied, a byte offset at which the text can be cut so the kept
//!   prefix plus a one-cell ellipsis still fits.
//! - Guarantees: reported width never exceeds the limit; the truncation
//!   offset is a grapheme cluster boundary and never splits an escape
//!   sequence; escape sequences are width zero and never trigger
//!   truncation on their own.
//!
//! The scan is a single left-to-right pass classifying maximal runs:
//! escape sequences, tabs, raw control characters, then grapheme clusters
//! measured via [`crate::cluster_width`]. Malformed escapes fall through to
//! the cluster path and measure as literal text.

use crate::ansi::escape_len;
use crate::width::cluster_width;
use unicode_segmentation::UnicodeSegmentation;

/// Reserved width for the truncation ellipsis (`…`).
pub const ELLIPSIS: &str = "…";
const ELLIPSIS_WIDTH: usize = 1;

/// Per-unit widths for the configurable run categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureOptions {
    /// Cells occupied by a tab character. Default 8.
    pub tab_width: usize,
    /// Cells occupied by a raw (non-escape) control character. Default 0.
    pub control_width: usize,
}

impl Default for MeasureOptions {
    fn default() -> Self {
        Self {
            tab_width: 8,
            control_width: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    /// Visible width of the text (of the kept prefix when truncated).
    pub width: usize,
    /// Byte offset at which to cut; `text.len()` when nothing is cut.
    pub truncation_index: usize,
    /// Whether the text exceeded the supplied limit.
    pub truncated: bool,
    /// Whether the one-cell ellipsis itself fits inside the limit.
    pub ellipsis_fits: bool,
}

/// Measure with default run widths.
pub fn measure(text: &str, limit: Option<usize>) -> Measurement {
    measure_with(text, limit, &MeasureOptions::default())
}

/// Measure `text`, optionally tracking the latest cut point that keeps
/// `width + ellipsis` within `limit`.
pub fn measure_with(text: &str, limit: Option<usize>, opts: &MeasureOptions) -> Measurement {
    let mut width = 0usize;
    let mut fit_index = 0usize;
    let mut fit_width = 0usize;
    let mut truncated = false;

    let mut i = 0usize;
    while i < text.len() {
        let (run_width, run_len) = if let Some(len) = escape_len(text, i) {
            (0, len)
        } else {
            let c = match text[i..].chars().next() {
                Some(c) => c,
                None => break,
            };
            if c == '\t' {
                (opts.tab_width, 1)
            } else if c.is_control() {
                (opts.control_width, c.len_utf8())
            } else {
                // Safe: `i` sits on a char boundary, so a cluster starts here.
                let cluster = text[i..].graphemes(true).next().unwrap_or_default();
                (cluster_width(cluster), cluster.len().max(1))
            }
        };

        width += run_width;
        i += run_len;

        if let Some(limit) = limit {
            if width > limit {
                truncated = true;
                break;
            }
            if width + ELLIPSIS_WIDTH <= limit {
                fit_index = i;
                fit_width = width;
            }
        }
    }

    match limit {
        None => Measurement {
            width,
            truncation_index: text.len(),
            truncated: false,
            ellipsis_fits: true,
        },
        Some(limit) if !truncated => Measurement {
            width,
            truncation_index: text.len(),
            truncated: false,
            ellipsis_fits: limit >= ELLIPSIS_WIDTH,
        },
        Some(limit) => Measurement {
            width: fit_width,
            truncation_index: fit_index,
            truncated: true,
            ellipsis_fits: limit >= ELLIPSIS_WIDTH,
        },
    }
}

/// Visible width of `text` with default options.
pub fn display_width(text: &str) -> usize {
    measure(text, None).width
}

/// Cut `text` to `limit` cells, appending an ellipsis when it fits.
pub fn truncate(text: &str, limit: usize) -> String {
    let m = measure(text, Some(limit));
    if !m.truncated {
        return text.to_string();
    }
    let mut out = text[..m.truncation_index].to_string();
    if m.ellipsis_fits {
        out.push_str(ELLIPSIS);
    }
    out
}
