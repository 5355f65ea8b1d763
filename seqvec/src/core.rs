use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::mem;
use core::ops::{Bound, Deref, DerefMut, Index, IndexMut, RangeBounds};
use core::ptr::{self, NonNull};
use core::slice::{self, SliceIndex};

use log::trace;
use rawstore::{abort_on, AllocError, Global, RawStorage};

use crate::cursor::{Cursor, CursorMut};
use crate::error::SeqVecError;

/// Smallest capacity a growing sequence jumps to.
const MIN_GROWTH: usize = 1;

/// A contiguous growable sequence whose storage comes from an explicit
/// allocation policy.
///
/// Slots `[0, len)` hold live values, slots `[len, capacity)` are raw.
pub struct SeqVec<T, S: RawStorage = Global> {
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
    storage: S,
    _owns: PhantomData<T>,
}

// SAFETY: `SeqVec` owns its values like `Vec` does.
unsafe impl<T: Send, S: RawStorage + Send> Send for SeqVec<T, S> {}
// SAFETY: shared access only hands out `&T` and `&S`.
unsafe impl<T: Sync, S: RawStorage + Sync> Sync for SeqVec<T, S> {}

impl<T> SeqVec<T> {
    /// Creates an empty sequence using the process allocator. Nothing is allocated.
    #[must_use]
    pub fn new() -> Self {
        Self::new_in(Global)
    }

    /// Creates a sequence with room for exactly `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns `SeqVecError::Alloc` if the storage cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self, SeqVecError> {
        Self::with_capacity_in(capacity, Global)
    }

    /// Creates a sequence holding clones of `items`, in order.
    ///
    /// # Errors
    ///
    /// Returns `SeqVecError::Alloc` if the storage cannot be allocated.
    pub fn try_from_slice(items: &[T]) -> Result<Self, SeqVecError>
    where
        T: Clone,
    {
        Self::try_from_slice_in(items, Global)
    }

    /// Creates a sequence by moving the elements of `items`, in order.
    ///
    /// # Errors
    ///
    /// Returns `SeqVecError::Alloc` if the storage cannot be allocated.
    pub fn from_array<const N: usize>(items: [T; N]) -> Result<Self, SeqVecError> {
        Self::from_array_in(items, Global)
    }
}

impl<T, S: RawStorage> SeqVec<T, S> {
    /// Creates an empty sequence drawing storage from `storage`. Nothing is allocated.
    #[must_use]
    pub fn new_in(storage: S) -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            cap: 0,
            storage,
            _owns: PhantomData,
        }
    }

    /// # Errors
    ///
    /// Returns `SeqVecError::Alloc` if the storage cannot be allocated.
    pub fn with_capacity_in(capacity: usize, storage: S) -> Result<Self, SeqVecError> {
        let mut seq = Self::new_in(storage);
        seq.reserve(capacity)?;
        Ok(seq)
    }

    /// # Errors
    ///
    /// Returns `SeqVecError::Alloc` if the storage cannot be allocated.
    pub fn try_from_slice_in(items: &[T], storage: S) -> Result<Self, SeqVecError>
    where
        T: Clone,
    {
        let mut seq = Self::with_capacity_in(items.len(), storage)?;
        seq.extend_from_slice(items)?;
        Ok(seq)
    }

    /// # Errors
    ///
    /// Returns `SeqVecError::Alloc` if the storage cannot be allocated.
    pub fn from_array_in<const N: usize>(items: [T; N], storage: S) -> Result<Self, SeqVecError> {
        let mut seq = Self::with_capacity_in(N, storage)?;
        seq.insert_iter(0, items)?;
        Ok(seq)
    }

    /// Creates a sequence from any iterator, growing as needed.
    ///
    /// # Errors
    ///
    /// Returns `SeqVecError::Alloc` if the storage cannot be allocated.
    pub fn try_from_iter_in<I>(items: I, storage: S) -> Result<Self, SeqVecError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut seq = Self::new_in(storage);
        for item in items {
            seq.push(item)?;
        }
        Ok(seq)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots, live or raw.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// The allocation policy this sequence draws from.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [0, len) are live and the pointer is aligned (dangling when cap is 0).
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and `&mut self` guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Grows the storage to exactly `capacity` slots.
    ///
    /// Does nothing when `capacity` does not exceed the current capacity.
    /// The new block is allocated before any element is moved, so a failed
    /// allocation leaves the sequence untouched.
    ///
    /// # Errors
    ///
    /// Returns `SeqVecError::Alloc` if the storage cannot be allocated.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), SeqVecError> {
        Ok(self.reserve_exact(capacity)?)
    }

    fn reserve_exact(&mut self, capacity: usize) -> Result<(), AllocError> {
        if capacity <= self.cap {
            return Ok(());
        }

        let fresh = self.storage.allocate::<T>(capacity)?;
        trace!(
            "seqvec reallocating: {} -> {} slots, {} live",
            self.cap,
            capacity,
            self.len
        );

        // SAFETY: both blocks hold at least `len` slots and are distinct
        // allocations. The old slots become raw by the move.
        unsafe { ptr::copy_nonoverlapping(self.ptr.as_ptr(), fresh.as_ptr(), self.len) };
        self.release_block();
        self.ptr = fresh;
        self.cap = capacity;
        Ok(())
    }

    /// Makes room for `additional` more elements using amortized doubling.
    fn grow_for(&mut self, additional: usize) -> Result<(), AllocError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(AllocError::CapacityOverflow {
                count: usize::MAX,
                elem_size: mem::size_of::<T>(),
            })?;
        if required <= self.cap {
            return Ok(());
        }
        let doubled = self.cap.saturating_mul(2).max(MIN_GROWTH);
        self.reserve_exact(doubled.max(required))
    }

    fn release_block(&mut self) {
        if self.cap != 0 {
            // SAFETY: the block came from `allocate::<T>(cap)` on this storage.
            unsafe { self.storage.deallocate(self.ptr, self.cap) };
        }
    }

    /// Appends `value`, doubling the capacity when the sequence is full.
    ///
    /// # Errors
    ///
    /// Returns `SeqVecError::Alloc` if growing fails; the sequence is unchanged.
    pub fn push(&mut self, value: T) -> Result<(), SeqVecError> {
        self.grow_for(1)?;
        // SAFETY: `grow_for` guarantees slot `len` exists and is raw.
        unsafe { self.storage.construct(self.ptr.as_ptr().add(self.len), value) };
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the last element.
    ///
    /// Returns `None` if the sequence is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was live and is now outside the live range.
        Some(unsafe { ptr::read(self.ptr.as_ptr().add(self.len)) })
    }

    /// Inserts `value` at `index`, shifting the elements after it toward the end.
    ///
    /// # Errors
    ///
    /// Returns `SeqVecError::IndexOutOfBounds` if `index > len`, and
    /// `SeqVecError::Alloc` if growing fails. In both cases the sequence is unchanged.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), SeqVecError> {
        self.check_insert_index(index)?;
        self.grow_for(1)?;

        // SAFETY: capacity covers len + 1 slots; the tail is shifted by one
        // before the freed slot is written.
        unsafe {
            let slot = self.ptr.as_ptr().add(index);
            ptr::copy(slot, slot.add(1), self.len - index);
            self.storage.construct(slot, value);
        }
        self.len += 1;
        Ok(())
    }

    /// Inserts `count` clones of `value` at `index`.
    ///
    /// # Errors
    ///
    /// Same as [`SeqVec::insert`].
    pub fn insert_n(&mut self, index: usize, count: usize, value: &T) -> Result<(), SeqVecError>
    where
        T: Clone,
    {
        self.insert_iter(index, (0..count).map(|_| value.clone()))
    }

    /// Inserts clones of `items` at `index`, keeping their order.
    ///
    /// # Errors
    ///
    /// Same as [`SeqVec::insert`].
    pub fn insert_slice(&mut self, index: usize, items: &[T]) -> Result<(), SeqVecError>
    where
        T: Clone,
    {
        self.insert_iter(index, items.iter().cloned())
    }

    /// Inserts the items of an exact-size iterator at `index`.
    ///
    /// Capacity for the final length is reserved in one step, the tail is
    /// shifted once by the item count, then the items are moved into the gap.
    /// If the iterator panics or yields fewer items than it announced, the gap
    /// is closed again and the items written so far stay in place.
    ///
    /// # Errors
    ///
    /// Same as [`SeqVec::insert`].
    pub fn insert_iter<I>(&mut self, index: usize, items: I) -> Result<(), SeqVecError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        self.check_insert_index(index)?;
        let mut items = items.into_iter();
        let count = items.len();
        if count == 0 {
            return Ok(());
        }
        self.grow_for(count)?;

        let base = self.ptr.as_ptr();
        let tail = self.len - index;
        // SAFETY: capacity covers len + count slots.
        unsafe { ptr::copy(base.add(index), base.add(index + count), tail) };
        self.len = index;

        let mut gap = Gap {
            base,
            len: &mut self.len,
            index,
            count,
            tail,
            filled: 0,
        };
        for item in items.by_ref().take(count) {
            // SAFETY: slots of the gap are raw until filled.
            unsafe { self.storage.construct(base.add(index + gap.filled), item) };
            gap.filled += 1;
        }
        drop(gap);
        Ok(())
    }

    /// Appends clones of `items`.
    ///
    /// # Errors
    ///
    /// Returns `SeqVecError::Alloc` if growing fails.
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<(), SeqVecError>
    where
        T: Clone,
    {
        self.insert_slice(self.len, items)
    }

    /// Removes and returns the element at `index`, shifting the tail into its slot.
    ///
    /// # Errors
    ///
    /// Returns `SeqVecError::IndexOutOfBounds` if `index >= len`, which
    /// includes every index of an empty sequence.
    pub fn remove(&mut self, index: usize) -> Result<T, SeqVecError> {
        if index >= self.len {
            return Err(SeqVecError::IndexOutOfBounds {
                index,
                length: self.len,
            });
        }

        // SAFETY: slot `index` is live; after reading it the tail moves down
        // by one and the last slot becomes raw.
        let value = unsafe {
            let slot = self.ptr.as_ptr().add(index);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            value
        };
        self.len -= 1;
        Ok(value)
    }

    /// Destroys the elements in `range` and shifts the tail into the gap.
    ///
    /// # Errors
    ///
    /// Returns `SeqVecError::InvalidRange` if the range is reversed or ends
    /// past `len`; the sequence is unchanged.
    pub fn erase<R>(&mut self, range: R) -> Result<(), SeqVecError>
    where
        R: RangeBounds<usize>,
    {
        let (start, end) = self.resolve_range(&range)?;
        if start == end {
            return Ok(());
        }

        let base = self.ptr.as_ptr();
        let tail = self.len - end;
        self.len = start;
        let closer = Closer {
            base,
            len: &mut self.len,
            start,
            end,
            tail,
        };
        // SAFETY: slots [start, end) are live and no longer counted by `len`.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(start), end - start)) };
        drop(closer);
        Ok(())
    }

    /// Destroys the elements from `len` on. Does nothing if `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let dropped = self.len - len;
        self.len = len;
        // SAFETY: the slots were live and are now outside the live range.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.ptr.as_ptr().add(len),
                dropped,
            ));
        }
    }

    /// Destroys every element. The storage is kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Checked access.
    ///
    /// # Errors
    ///
    /// Returns `SeqVecError::IndexOutOfBounds` if `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T, SeqVecError> {
        let length = self.len;
        self.as_slice()
            .get(index)
            .ok_or(SeqVecError::IndexOutOfBounds { index, length })
    }

    /// Checked mutable access.
    ///
    /// # Errors
    ///
    /// Returns `SeqVecError::IndexOutOfBounds` if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, SeqVecError> {
        let length = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(SeqVecError::IndexOutOfBounds { index, length })
    }

    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Exchanges the contents of two sequences without touching any element.
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Replaces the contents with clones of `other`'s elements.
    ///
    /// A full copy is built first and then swapped in, so on failure `self`
    /// is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns `SeqVecError::Alloc` if the copy cannot be allocated.
    pub fn assign_from(&mut self, other: &Self) -> Result<(), SeqVecError>
    where
        T: Clone,
        S: Clone,
    {
        let mut fresh = other.try_clone()?;
        self.swap_with(&mut fresh);
        Ok(())
    }

    /// Moves the contents out, leaving an empty sequence on the same policy.
    #[must_use]
    pub fn take(&mut self) -> Self
    where
        S: Clone,
    {
        let empty = Self::new_in(self.storage.clone());
        mem::replace(self, empty)
    }

    /// Deep copy on a clone of the same allocation policy.
    ///
    /// # Errors
    ///
    /// Returns `SeqVecError::Alloc` if the copy cannot be allocated.
    pub fn try_clone(&self) -> Result<Self, SeqVecError>
    where
        T: Clone,
        S: Clone,
    {
        Ok(self.clone_raw()?)
    }

    fn clone_raw(&self) -> Result<Self, AllocError>
    where
        T: Clone,
        S: Clone,
    {
        let mut copy = Self::new_in(self.storage.clone());
        copy.reserve_exact(self.len)?;
        for item in self.as_slice() {
            // SAFETY: capacity is exactly `self.len`; `copy.len` counts the
            // slots written so far, so a panicking clone drops only those.
            unsafe { copy.storage.construct(copy.ptr.as_ptr().add(copy.len), item.clone()) };
            copy.len += 1;
        }
        Ok(copy)
    }

    /// Read-only cursor on the first slot.
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), 0)
    }

    /// Read-only cursor one past the last element.
    #[must_use]
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), self.len)
    }

    #[must_use]
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self.as_mut_slice(), 0)
    }

    #[must_use]
    pub fn end_mut(&mut self) -> CursorMut<'_, T> {
        let len = self.len;
        CursorMut::new(self.as_mut_slice(), len)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Iterates from the last element to the first.
    pub fn iter_rev(&self) -> core::iter::Rev<slice::Iter<'_, T>> {
        self.as_slice().iter().rev()
    }

    fn check_insert_index(&self, index: usize) -> Result<(), SeqVecError> {
        if index > self.len {
            return Err(SeqVecError::IndexOutOfBounds {
                index,
                length: self.len,
            });
        }
        Ok(())
    }

    fn resolve_range<R: RangeBounds<usize>>(&self, range: &R) -> Result<(usize, usize), SeqVecError> {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.len,
        };
        if start > end || end > self.len {
            return Err(SeqVecError::InvalidRange {
                start,
                end,
                length: self.len,
            });
        }
        Ok((start, end))
    }

    /// Hands the raw parts to an owning iterator; `self` must not be dropped afterwards.
    pub(crate) fn into_raw_parts(self) -> (NonNull<T>, usize, usize, S) {
        let this = mem::ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the storage is read out exactly once.
        let storage = unsafe { ptr::read(&this.storage) };
        (this.ptr, this.len, this.cap, storage)
    }
}

/// Closes the gap left by `insert_iter` once filling stops, normally or by unwinding.
struct Gap<'a, T> {
    base: *mut T,
    len: &'a mut usize,
    index: usize,
    count: usize,
    tail: usize,
    filled: usize,
}

impl<T> Drop for Gap<'_, T> {
    fn drop(&mut self) {
        if self.filled < self.count {
            // SAFETY: the tail sits at index + count; moving it down to the
            // end of the filled prefix keeps every live slot contiguous.
            unsafe {
                ptr::copy(
                    self.base.add(self.index + self.count),
                    self.base.add(self.index + self.filled),
                    self.tail,
                );
            }
        }
        *self.len = self.index + self.filled + self.tail;
    }
}

/// Shifts the tail over an erased range, even if an element's `Drop` panics.
struct Closer<'a, T> {
    base: *mut T,
    len: &'a mut usize,
    start: usize,
    end: usize,
    tail: usize,
}

impl<T> Drop for Closer<'_, T> {
    fn drop(&mut self) {
        // SAFETY: [end, end + tail) is live, [start, end) has been destroyed.
        unsafe { ptr::copy(self.base.add(self.end), self.base.add(self.start), self.tail) };
        *self.len = self.start + self.tail;
    }
}

/// Hands the block back to the policy when dropped, also while unwinding
/// out of an element's `Drop`.
struct BlockGuard<'a, T, S: RawStorage> {
    ptr: NonNull<T>,
    cap: usize,
    storage: &'a S,
}

impl<T, S: RawStorage> Drop for BlockGuard<'_, T, S> {
    fn drop(&mut self) {
        if self.cap != 0 {
            // SAFETY: the block came from `allocate::<T>(cap)` on this storage.
            unsafe { self.storage.deallocate(self.ptr, self.cap) };
        }
    }
}

impl<T, S: RawStorage> Drop for SeqVec<T, S> {
    fn drop(&mut self) {
        let live = ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len);
        self.len = 0;
        let _block = BlockGuard {
            ptr: self.ptr,
            cap: self.cap,
            storage: &self.storage,
        };
        // SAFETY: [0, len) was live; slice drop glue keeps dropping the rest
        // after a panic, and the guard frees the block either way.
        unsafe { ptr::drop_in_place(live) };
    }
}

impl<T, S: RawStorage + Default> Default for SeqVec<T, S> {
    fn default() -> Self {
        Self::new_in(S::default())
    }
}

impl<T: Clone, S: RawStorage + Clone> Clone for SeqVec<T, S> {
    fn clone(&self) -> Self {
        self.clone_raw().unwrap_or_else(|err| abort_on(err))
    }
}

impl<T, S: RawStorage> Deref for SeqVec<T, S> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, S: RawStorage> DerefMut for SeqVec<T, S> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

/// Unchecked-category access: panics instead of reading outside the live range.
impl<T, S: RawStorage, I: SliceIndex<[T]>> Index<I> for SeqVec<T, S> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, S: RawStorage, I: SliceIndex<[T]>> IndexMut<I> for SeqVec<T, S> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T: fmt::Debug, S: RawStorage> fmt::Debug for SeqVec<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T, U, S1, S2> PartialEq<SeqVec<U, S2>> for SeqVec<T, S1>
where
    T: PartialEq<U>,
    S1: RawStorage,
    S2: RawStorage,
{
    fn eq(&self, other: &SeqVec<U, S2>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U, S: RawStorage> PartialEq<[U]> for SeqVec<T, S> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, S: RawStorage> PartialEq<&[U]> for SeqVec<T, S> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, S: RawStorage, const N: usize> PartialEq<[U; N]> for SeqVec<T, S> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, S: RawStorage> Eq for SeqVec<T, S> {}

impl<T: PartialOrd, S: RawStorage> PartialOrd for SeqVec<T, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, S: RawStorage> Ord for SeqVec<T, S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash, S: RawStorage> Hash for SeqVec<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rawstore::Bounded;

    #[test]
    fn test_grow_for_doubles_from_one() {
        let mut seq: SeqVec<u8> = SeqVec::new();
        let mut seen = [0usize; 6];
        for slot in &mut seen {
            seq.push(0).unwrap();
            *slot = seq.capacity();
        }
        assert_eq!(seen, [1, 2, 4, 4, 8, 8]);
    }

    #[test]
    fn test_multi_insert_reserves_final_size_once() {
        let budget = Bounded::unlimited();
        let mut seq = SeqVec::new_in(budget.clone());
        seq.push(1u32).unwrap();
        seq.insert_slice(0, &[7, 7, 7, 7, 7]).unwrap();

        assert_eq!(seq.capacity(), 6);
        assert_eq!(budget.total_allocations(), 2);
    }

    #[test]
    fn test_resolve_range_bounds() {
        let seq = SeqVec::from_array([1, 2, 3, 4]).unwrap();
        assert_eq!(seq.resolve_range(&(1..=2)).unwrap(), (1, 3));
        assert_eq!(seq.resolve_range(&(..)).unwrap(), (0, 4));
        assert!(seq.resolve_range(&(3..2)).is_err());
        assert!(seq.resolve_range(&(0..=usize::MAX)).is_err());
    }
}
