use rawstore::AllocError;
use thiserror::Error;

/// Error types for `RingList` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum RingListError {
    /// Index is beyond the current list length
    #[error("Index out of bounds: index {index} is beyond list length {length}")]
    IndexOutOfBounds {
        /// Index that was accessed
        index: usize,
        /// Current length of the list
        length: usize,
    },
    /// Position does not name a live node of this list
    #[error("Invalid position: the node is gone or belongs to another list")]
    InvalidPosition,
    /// Operation needs a node but was given the end position
    #[error("Position is end: the end position holds no element")]
    PositionIsEnd,
    /// The allocation policy could not provide storage
    #[error(transparent)]
    Alloc(#[from] AllocError),
}
