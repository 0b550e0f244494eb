//! Unicode-aware text measurement and ANSI-preserving wrapping.
//!
//! Everything that needs to know how wide a piece of text will render on a
//! terminal goes through this crate. Two public surfaces:
//!
//! * [`measure`] / [`Measurement`]: display width classification over runs
//!   of printable text, escape sequences, control characters, tabs and
//!   grapheme clusters, with optional truncation offsets.
//! * [`wrap`] / [`WrapOptions`]: line wrapping to a column budget that keeps
//!   open SGR styling and hyperlinks valid across inserted breaks.
//!
//! Invariants:
//! * All width decisions flow through [`cluster_width`]; no caller queries
//!   `unicode_width` directly.
//! * Escape sequences never contribute width and never trigger truncation.
//! * Truncation offsets are always grapheme cluster boundaries.

pub mod ansi;
pub mod measure;
pub mod width;
pub mod wrap;

pub use ansi::{escape_len, strip_ansi};
pub use measure::{display_width, measure, measure_with, truncate, MeasureOptions, Measurement};
pub use width::cluster_width;
pub use wrap::{wrap, wrap_with, WrapOptions};
