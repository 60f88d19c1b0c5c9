use thiserror::Error;

use crate::cell::Cell;

/// Errors raised while setting up a grid or a session. Everything after construction is total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("start cell {start} lies outside the {rows}x{cols} grid")]
    StartOutOfBounds { start: Cell, rows: usize, cols: usize },
}
