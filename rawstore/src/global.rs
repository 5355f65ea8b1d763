use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::AllocError;
use crate::RawStorage;

/// The process allocator, used by every container unless another policy is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Global;

// SAFETY: blocks come straight from `alloc::alloc::alloc` with the requested
// layout and are handed back to `alloc::alloc::dealloc` with the same layout.
unsafe impl RawStorage for Global {
    fn allocate_bytes(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(layout.size() != 0, "zero-sized requests never reach the allocator");

        // SAFETY: the layout has a non-zero size.
        let raw = unsafe { alloc::alloc::alloc(layout) };
        NonNull::new(raw).ok_or(AllocError::OutOfMemory {
            bytes: layout.size(),
            align: layout.align(),
        })
    }

    unsafe fn deallocate_bytes(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: see the trait contract.
        unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}
