use thiserror::Error;

use crate::{Index, Priority};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    #[error("invalid priority {priority}, the buffer has {priority_count} priority levels")]
    InvalidPriority {
        priority: Priority,
        priority_count: usize,
    },

    /// The buffer is full and everything in it outranks the new element.
    ///
    /// This is routine backpressure, not a fault.
    #[error("buffer full, priority {priority} is below the lowest stored priority {lowest}")]
    Rejected { priority: Priority, lowest: Priority },

    #[error("ring links are inconsistent: {0}")]
    Remap(#[from] RemapError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrieveError {
    #[error("buffer is empty")]
    Empty,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemapError {
    #[error("cell index {index} out of bounds for capacity {capacity}")]
    OutOfBounds { index: Index, capacity: usize },

    #[error("cell {target} is not linked after cell {before}")]
    NotLinked { before: Index, target: Index },
}
