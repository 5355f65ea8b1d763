use thiserror::Error;

/// Error types for allocation requests made through a `RawStorage` policy
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum AllocError {
    /// The requested block size is not representable as a memory layout
    #[error("Capacity overflow: {count} elements of {elem_size} bytes exceed addressable memory")]
    CapacityOverflow {
        /// Number of elements requested
        count: usize,
        /// Size of one element in bytes
        elem_size: usize,
    },
    /// The allocation policy refused or failed to provide the block
    #[error("Out of memory: failed to allocate {bytes} bytes (align {align})")]
    OutOfMemory {
        /// Size of the refused block in bytes
        bytes: usize,
        /// Alignment of the refused block
        align: usize,
    },
}
