use rawstore::AllocError;
use thiserror::Error;

/// Error types for `CharBuf` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum CharBufError {
    /// Offset lies outside the buffer
    #[error("Out of range: position {pos} is outside buffer length {length}")]
    OutOfRange {
        /// Offset that was requested
        pos: usize,
        /// Current length of the buffer in code units
        length: usize,
    },
    /// The allocation policy could not provide storage
    #[error(transparent)]
    Alloc(#[from] AllocError),
}
