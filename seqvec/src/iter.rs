use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ptr::{self, NonNull};
use core::slice;

use rawstore::{Global, RawStorage};

use crate::core::SeqVec;

/// Owning iterator over the elements of a `SeqVec`.
///
/// Elements not yet yielded are dropped, and the storage released, when the
/// iterator is dropped.
pub struct IntoIter<T, S: RawStorage = Global> {
    ptr: NonNull<T>,
    cap: usize,
    storage: S,
    front: usize,
    back: usize,
    _owns: PhantomData<T>,
}

// SAFETY: the iterator owns the remaining values like `SeqVec` does.
unsafe impl<T: Send, S: RawStorage + Send> Send for IntoIter<T, S> {}
// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync, S: RawStorage + Sync> Sync for IntoIter<T, S> {}

impl<T, S: RawStorage> IntoIter<T, S> {
    /// The elements not yet yielded.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [front, back) are still live.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr().add(self.front), self.back - self.front) }
    }
}

impl<T, S: RawStorage> Iterator for IntoIter<T, S> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: slot `front` is live and leaves the live range here.
        let item = unsafe { ptr::read(self.ptr.as_ptr().add(self.front)) };
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T, S: RawStorage> DoubleEndedIterator for IntoIter<T, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: slot `back` was live and leaves the live range here.
        Some(unsafe { ptr::read(self.ptr.as_ptr().add(self.back)) })
    }
}

impl<T, S: RawStorage> ExactSizeIterator for IntoIter<T, S> {}

impl<T, S: RawStorage> FusedIterator for IntoIter<T, S> {}

impl<T, S: RawStorage> Drop for IntoIter<T, S> {
    fn drop(&mut self) {
        let remaining = self.back - self.front;
        let live = ptr::slice_from_raw_parts_mut(
            // SAFETY: `front` is within the block.
            unsafe { self.ptr.as_ptr().add(self.front) },
            remaining,
        );
        self.front = self.back;
        // SAFETY: the slots in `live` were never yielded.
        unsafe { ptr::drop_in_place(live) };
        if self.cap != 0 {
            // SAFETY: the block came from `allocate::<T>(cap)` on this storage.
            unsafe { self.storage.deallocate(self.ptr, self.cap) };
        }
    }
}

impl<T: fmt::Debug, S: RawStorage> fmt::Debug for IntoIter<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, S: RawStorage> IntoIterator for SeqVec<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T, S>;

    fn into_iter(self) -> Self::IntoIter {
        let (ptr, len, cap, storage) = self.into_raw_parts();
        IntoIter {
            ptr,
            cap,
            storage,
            front: 0,
            back: len,
            _owns: PhantomData,
        }
    }
}

impl<'a, T, S: RawStorage> IntoIterator for &'a SeqVec<T, S> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, S: RawStorage> IntoIterator for &'a mut SeqVec<T, S> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
