#![no_std]

//! `rawstore`: the allocation policy shared by the `seqvec`, `ringlist` and
//! `charbuf` containers.
//!
//! A container never calls the global allocator directly. It owns a value
//! implementing [`RawStorage`] and routes every step of an element's memory
//! lifetime through it:
//!
//! 1. `allocate` raw, uninitialized slots,
//! 2. `construct` a value into a slot,
//! 3. `destroy` a value, leaving the slot raw again,
//! 4. `deallocate` the slots.
//!
//! Allocation failures surface as [`AllocError`] values which containers
//! propagate to their callers; nothing is truncated or retried.
//!
//! Two policies are provided:
//!
//! - [`Global`]: the process allocator, zero-sized and `Copy`.
//! - [`Bounded`]: a byte budget with live-block counters, shared between clones.
//!
//! ```
//! # use rawstore::{Global, RawStorage};
//! let slots = Global.allocate::<u32>(3).unwrap();
//! unsafe {
//!     Global.construct(slots.as_ptr(), 7);
//!     assert_eq!(*slots.as_ptr(), 7);
//!     Global.destroy(slots.as_ptr());
//!     Global.deallocate(slots, 3);
//! }
//! ```
//!
//! ## `no_std` Compatibility
//!
//! The crate needs only `core` and `alloc`. Enable the `std` feature to
//! implement `std::error::Error` through `thiserror/std`.

extern crate alloc;

mod bounded;
mod error;
mod global;

use core::alloc::Layout;
use core::mem;
use core::ptr::{self, NonNull};

pub use bounded::Bounded;
pub use error::AllocError;
pub use global::Global;

/// A source of raw storage for container elements.
///
/// # Safety
///
/// Implementors must return blocks that are valid for reads and writes of
/// `layout.size()` bytes, aligned to `layout.align()`, and not aliased by any
/// other live block until they are passed back to `deallocate_bytes`.
pub unsafe trait RawStorage {
    /// Allocates a block for `layout`, which always has a non-zero size.
    ///
    /// # Errors
    ///
    /// Returns `AllocError::OutOfMemory` if the block cannot be provided.
    fn allocate_bytes(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Returns a block to the policy.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate_bytes` on this policy (or a clone
    /// sharing its state) with the same `layout`, and must not be used again.
    unsafe fn deallocate_bytes(&self, ptr: NonNull<u8>, layout: Layout);

    /// Allocates uninitialized room for `count` values of `T`.
    ///
    /// Zero-byte requests do not reach the policy and yield a dangling,
    /// well-aligned pointer.
    ///
    /// # Errors
    ///
    /// Returns `AllocError::CapacityOverflow` if the block size overflows and
    /// `AllocError::OutOfMemory` if the policy refuses the block.
    fn allocate<T>(&self, count: usize) -> Result<NonNull<T>, AllocError> {
        let layout = array_layout::<T>(count)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        Ok(self.allocate_bytes(layout)?.cast())
    }

    /// Releases room for `count` values of `T`. No value is dropped.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate::<T>(count)` on this policy.
    unsafe fn deallocate<T>(&self, ptr: NonNull<T>, count: usize) {
        let Ok(layout) = array_layout::<T>(count) else {
            return;
        };
        if layout.size() != 0 {
            // SAFETY: see the caller contract.
            unsafe { self.deallocate_bytes(ptr.cast(), layout) }
        }
    }

    /// Moves `value` into a raw slot.
    ///
    /// # Safety
    ///
    /// `slot` must be valid for writes and hold no live value.
    unsafe fn construct<T>(&self, slot: *mut T, value: T) {
        // SAFETY: see the caller contract.
        unsafe { slot.write(value) }
    }

    /// Drops the value in `slot`, leaving the slot raw.
    ///
    /// # Safety
    ///
    /// `slot` must hold a live value that is not used afterwards.
    unsafe fn destroy<T>(&self, slot: *mut T) {
        // SAFETY: see the caller contract.
        unsafe { ptr::drop_in_place(slot) }
    }
}

fn array_layout<T>(count: usize) -> Result<Layout, AllocError> {
    Layout::array::<T>(count).map_err(|_| AllocError::CapacityOverflow {
        count,
        elem_size: mem::size_of::<T>(),
    })
}

/// Turns an allocation failure into the process-level failure.
///
/// Used by infallible trait impls such as `Clone`, which have no way to
/// return the error.
pub fn abort_on(err: AllocError) -> ! {
    if let AllocError::OutOfMemory { bytes, align } = err {
        if let Ok(layout) = Layout::from_size_align(bytes, align) {
            alloc::alloc::handle_alloc_error(layout);
        }
    }
    panic!("{err}");
}
