//! Frame construction, diff classification, and the paint path.
//!
//! A prompt renders to a [`Frame`]: the complete text (escape sequences
//! included) of its current visual state. Frames are immutable once built;
//! successive frames are compared line by line and the difference is
//! classified into the cheapest redraw instruction that repairs the screen.

pub mod diff;
pub mod frame;
pub mod painter;

pub use diff::{classify, FrameDiff};
pub use frame::Frame;
pub use painter::Painter;
