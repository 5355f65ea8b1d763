use rawstore::AllocError;
use thiserror::Error;

/// Error types for `SeqVec` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum SeqVecError {
    /// Index is beyond the current sequence length
    #[error("Index out of bounds: index {index} is beyond sequence length {length}")]
    IndexOutOfBounds {
        /// Index that was accessed
        index: usize,
        /// Current length of the sequence
        length: usize,
    },
    /// Range is reversed or reaches past the end of the sequence
    #[error("Invalid range: {start}..{end} does not fit sequence length {length}")]
    InvalidRange {
        /// Resolved start of the range
        start: usize,
        /// Resolved end of the range
        end: usize,
        /// Current length of the sequence
        length: usize,
    },
    /// The allocation policy could not provide storage
    #[error(transparent)]
    Alloc(#[from] AllocError),
}
