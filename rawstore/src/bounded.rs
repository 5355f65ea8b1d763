use alloc::rc::Rc;
use core::alloc::Layout;
use core::cell::Cell;
use core::ptr::NonNull;

use log::debug;

use crate::error::AllocError;
use crate::global::Global;
use crate::RawStorage;

/// A budgeted allocation policy.
///
/// Requests that would push the live byte count past the limit are refused
/// with `AllocError::OutOfMemory`. Clones share one budget and one set of
/// counters, so every container built from clones of the same `Bounded`
/// draws from the same pool.
///
/// The counters make leaks observable: once every container using the
/// policy is dropped, `live_blocks()` and `live_bytes()` are back to zero.
///
/// ```
/// # use rawstore::{AllocError, Bounded, RawStorage};
/// let budget = Bounded::new(64);
///
/// let block = budget.allocate::<u64>(4).unwrap();
/// assert_eq!(budget.live_bytes(), 32);
/// assert!(matches!(
///     budget.allocate::<u64>(5),
///     Err(AllocError::OutOfMemory { bytes: 40, .. })
/// ));
///
/// unsafe { budget.deallocate(block, 4) };
/// assert_eq!(budget.live_blocks(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Bounded {
    state: Rc<Budget>,
}

#[derive(Debug)]
struct Budget {
    limit: usize,
    live_bytes: Cell<usize>,
    live_blocks: Cell<usize>,
    total_blocks: Cell<usize>,
}

impl Bounded {
    /// Creates a policy that hands out at most `limit` live bytes.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            state: Rc::new(Budget {
                limit,
                live_bytes: Cell::new(0),
                live_blocks: Cell::new(0),
                total_blocks: Cell::new(0),
            }),
        }
    }

    /// Creates a policy without a byte limit, useful for its counters alone.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::new(usize::MAX)
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.state.limit
    }

    /// Bytes currently allocated and not yet returned.
    #[must_use]
    pub fn live_bytes(&self) -> usize {
        self.state.live_bytes.get()
    }

    /// Blocks currently allocated and not yet returned.
    #[must_use]
    pub fn live_blocks(&self) -> usize {
        self.state.live_blocks.get()
    }

    /// Number of successful allocations since the budget was created.
    #[must_use]
    pub fn total_allocations(&self) -> usize {
        self.state.total_blocks.get()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.state.limit - self.state.live_bytes.get()
    }
}

// SAFETY: blocks are obtained from and returned to `Global`; the budget only
// adds bookkeeping around them.
unsafe impl RawStorage for Bounded {
    fn allocate_bytes(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let remaining = self.remaining();
        if layout.size() > remaining {
            debug!(
                "bounded storage refused {} bytes, {} of {} remaining",
                layout.size(),
                remaining,
                self.state.limit
            );
            return Err(AllocError::OutOfMemory {
                bytes: layout.size(),
                align: layout.align(),
            });
        }

        let block = Global.allocate_bytes(layout)?;
        let state = &self.state;
        state.live_bytes.set(state.live_bytes.get() + layout.size());
        state.live_blocks.set(state.live_blocks.get() + 1);
        state.total_blocks.set(state.total_blocks.get() + 1);
        Ok(block)
    }

    unsafe fn deallocate_bytes(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: the block was produced by `allocate_bytes` above, which got it from `Global`.
        unsafe { Global.deallocate_bytes(ptr, layout) };
        let state = &self.state;
        state.live_bytes.set(state.live_bytes.get() - layout.size());
        state.live_blocks.set(state.live_blocks.get() - 1);
    }
}
