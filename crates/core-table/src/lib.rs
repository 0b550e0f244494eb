//! Pure table state, a virtualized renderer, and a table prompt model.
//!
//! [`TableState`] is a value transformed by pure transitions: navigation
//! with a sliding viewport, selection keyed by original-dataset identity,
//! a two-state sort cycle with a distinct clear, and filtering that is
//! always applied before sorting. [`TableView`] renders exactly the
//! visible window, so render cost tracks the page size rather than the
//! dataset. [`TablePrompt`] plugs both into the prompt engine.

pub mod column;
pub mod config;
pub mod error;
pub mod prompt;
pub mod state;
pub mod view;

pub use column::{Align, CellValue, Column, ColumnWidth};
pub use config::{Selectable, SortDirection, SortSpec, TableOptions};
pub use error::TableError;
pub use prompt::TablePrompt;
pub use state::TableState;
pub use view::TableView;
