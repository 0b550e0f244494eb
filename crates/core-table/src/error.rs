//! Construction-time misconfiguration. These are programmer errors and
//! fail fast; nothing here is retried or recovered at runtime.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("table needs at least one column")]
    NoColumns,
    #[error("initial sort key {0:?} matches no column")]
    UnknownSortKey(String),
    #[error("initial selection index {index} out of range for {len} rows")]
    SelectionOutOfRange { index: usize, len: usize },
}
