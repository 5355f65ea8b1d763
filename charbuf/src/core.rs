use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem;
use core::ops::{Deref, DerefMut, Index, IndexMut};
use core::ptr::{self, NonNull};
use core::slice::{self, SliceIndex};

use log::trace;
use rawstore::{abort_on, AllocError, Global, RawStorage};

use crate::code_unit::CodeUnit;
use crate::error::CharBufError;

/// Slot count of the first block.
const INITIAL_SLOTS: usize = 8;

/// A growable buffer of code units, always followed by a `NUL` terminator
/// once storage exists.
///
/// `capacity()` counts slots, terminator included, so an allocated buffer
/// always has `capacity() >= len() + 1`.
pub struct CharBuf<C: CodeUnit = u8, S: RawStorage = Global> {
    ptr: NonNull<C>,
    len: usize,
    cap: usize,
    storage: S,
}

// SAFETY: `CharBuf` owns its units like `Vec<C>` does.
unsafe impl<C: CodeUnit + Send, S: RawStorage + Send> Send for CharBuf<C, S> {}
// SAFETY: shared access only hands out `&C` and `&S`.
unsafe impl<C: CodeUnit + Sync, S: RawStorage + Sync> Sync for CharBuf<C, S> {}

impl<C: CodeUnit> CharBuf<C> {
    /// Creates an empty buffer using the process allocator. Nothing is allocated.
    #[must_use]
    pub fn new() -> Self {
        Self::new_in(Global)
    }

    /// # Errors
    ///
    /// Returns `CharBufError::Alloc` if the storage cannot be allocated.
    pub fn with_capacity(units: usize) -> Result<Self, CharBufError> {
        Self::with_capacity_in(units, Global)
    }

    /// # Errors
    ///
    /// Returns `CharBufError::Alloc` if the storage cannot be allocated.
    pub fn try_from_units(units: &[C]) -> Result<Self, CharBufError> {
        Self::try_from_units_in(units, Global)
    }

    /// Copies the units before the first `NUL`, or all of them if there is none.
    ///
    /// # Errors
    ///
    /// Returns `CharBufError::Alloc` if the storage cannot be allocated.
    pub fn try_from_nul_terminated(units: &[C]) -> Result<Self, CharBufError> {
        Self::try_from_nul_terminated_in(units, Global)
    }
}

impl CharBuf<u8> {
    /// # Errors
    ///
    /// Returns `CharBufError::Alloc` if the storage cannot be allocated.
    pub fn try_from_str(text: &str) -> Result<Self, CharBufError> {
        Self::try_from_units(text.as_bytes())
    }
}

impl<C: CodeUnit, S: RawStorage> CharBuf<C, S> {
    /// Creates an empty buffer drawing storage from `storage`. Nothing is allocated.
    #[must_use]
    pub fn new_in(storage: S) -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            cap: 0,
            storage,
        }
    }

    /// Creates a buffer with room for exactly `units` units plus the terminator.
    ///
    /// # Errors
    ///
    /// Returns `CharBufError::Alloc` if the storage cannot be allocated.
    pub fn with_capacity_in(units: usize, storage: S) -> Result<Self, CharBufError> {
        let mut buf = Self::new_in(storage);
        buf.reserve(units)?;
        Ok(buf)
    }

    /// # Errors
    ///
    /// Returns `CharBufError::Alloc` if the storage cannot be allocated.
    pub fn try_from_units_in(units: &[C], storage: S) -> Result<Self, CharBufError> {
        let mut buf = Self::with_capacity_in(units.len(), storage)?;
        buf.append(units)?;
        Ok(buf)
    }

    /// # Errors
    ///
    /// Returns `CharBufError::Alloc` if the storage cannot be allocated.
    pub fn try_from_nul_terminated_in(units: &[C], storage: S) -> Result<Self, CharBufError> {
        let len = units.iter().position(|&unit| unit == C::NUL).unwrap_or(units.len());
        Self::try_from_units_in(&units[..len], storage)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots, the terminator's included. `0` before the
    /// first allocation.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub fn as_slice(&self) -> &[C] {
        // SAFETY: slots [0, len) are initialized; dangling and empty when cap is 0.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [C] {
        // SAFETY: as above, with exclusive access through `&mut self`.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// The units followed by their `NUL` terminator.
    ///
    /// A buffer that never allocated returns a shared static terminator.
    #[must_use]
    pub fn as_nul_terminated(&self) -> &[C] {
        if self.cap == 0 {
            return C::EMPTY;
        }
        // SAFETY: an allocated buffer keeps slot `len` initialized to `NUL`.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len + 1) }
    }

    /// Checked access.
    ///
    /// # Errors
    ///
    /// Returns `CharBufError::OutOfRange` if `pos >= len`.
    pub fn at(&self, pos: usize) -> Result<&C, CharBufError> {
        let length = self.len;
        self.as_slice()
            .get(pos)
            .ok_or(CharBufError::OutOfRange { pos, length })
    }

    /// # Errors
    ///
    /// Returns `CharBufError::OutOfRange` if `pos >= len`.
    pub fn at_mut(&mut self, pos: usize) -> Result<&mut C, CharBufError> {
        let length = self.len;
        self.as_mut_slice()
            .get_mut(pos)
            .ok_or(CharBufError::OutOfRange { pos, length })
    }

    #[must_use]
    pub fn front(&self) -> Option<&C> {
        self.as_slice().first()
    }

    #[must_use]
    pub fn back(&self) -> Option<&C> {
        self.as_slice().last()
    }

    /// Grows the storage to exactly `units + 1` slots.
    ///
    /// Does nothing when that many slots already exist.
    ///
    /// # Errors
    ///
    /// Returns `CharBufError::Alloc` if the storage cannot be allocated.
    pub fn reserve(&mut self, units: usize) -> Result<(), CharBufError> {
        let slots = slots_for::<C>(units)?;
        if slots > self.cap {
            self.reallocate(slots)?;
        }
        Ok(())
    }

    /// Makes room for `need` units plus the terminator.
    ///
    /// A full buffer grows to twice its slots, or to 8 slots from empty,
    /// or to exactly `need + 1` when that is larger.
    fn ensure(&mut self, need: usize) -> Result<(), AllocError> {
        let slots = slots_for::<C>(need)?;
        if slots <= self.cap {
            return Ok(());
        }
        let grown = if self.cap == 0 {
            INITIAL_SLOTS
        } else {
            self.cap.saturating_mul(2)
        };
        self.reallocate(grown.max(slots))
    }

    fn reallocate(&mut self, slots: usize) -> Result<(), AllocError> {
        let fresh = self.storage.allocate::<C>(slots)?;
        trace!(
            "charbuf reallocating: {} -> {} slots, {} units",
            self.cap,
            slots,
            self.len
        );

        // SAFETY: both blocks hold at least `len + 1` slots and are distinct.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), fresh.as_ptr(), self.len);
            fresh.as_ptr().add(self.len).write(C::NUL);
        }
        self.release_block();
        self.ptr = fresh;
        self.cap = slots;
        Ok(())
    }

    fn release_block(&mut self) {
        if self.cap != 0 {
            // SAFETY: the block came from `allocate::<C>(cap)` on this storage.
            unsafe { self.storage.deallocate(self.ptr, self.cap) };
        }
    }

    /// Sets the length and rewrites the terminator behind it.
    ///
    /// # Safety
    ///
    /// Slots `[0, len)` must be initialized and `len < cap` unless both are 0.
    unsafe fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.cap != 0 {
            // SAFETY: see the caller contract.
            unsafe { self.ptr.as_ptr().add(len).write(C::NUL) };
        }
    }

    /// Appends one unit.
    ///
    /// # Errors
    ///
    /// Returns `CharBufError::Alloc` if growing fails; the buffer is unchanged.
    pub fn push(&mut self, unit: C) -> Result<(), CharBufError> {
        self.ensure(self.len + 1)?;
        // SAFETY: `ensure` made slots [0, len + 2) available.
        unsafe {
            self.ptr.as_ptr().add(self.len).write(unit);
            self.set_len(self.len + 1);
        }
        Ok(())
    }

    /// Removes and returns the last unit; `None` when empty.
    pub fn pop(&mut self) -> Option<C> {
        let last = *self.back()?;
        // SAFETY: shrinking keeps every remaining slot initialized.
        unsafe { self.set_len(self.len - 1) };
        Some(last)
    }

    /// Appends `units`.
    ///
    /// # Errors
    ///
    /// Returns `CharBufError::Alloc` if growing fails; the buffer is unchanged.
    pub fn append(&mut self, units: &[C]) -> Result<(), CharBufError> {
        let end = self.len;
        self.insert_units(end, units)
    }

    /// Appends the units of another buffer, possibly on another policy.
    ///
    /// # Errors
    ///
    /// Returns `CharBufError::Alloc` if growing fails.
    pub fn append_buf<S2: RawStorage>(&mut self, other: &CharBuf<C, S2>) -> Result<(), CharBufError> {
        self.append(other.as_slice())
    }

    /// A new buffer holding these units followed by `units`, on a clone of
    /// this buffer's policy.
    ///
    /// # Errors
    ///
    /// Returns `CharBufError::Alloc` if the new buffer cannot be allocated.
    pub fn concat(&self, units: &[C]) -> Result<Self, CharBufError>
    where
        S: Clone,
    {
        let total = self.len.saturating_add(units.len());
        let mut joined = Self::with_capacity_in(total, self.storage.clone())?;
        joined.append(self.as_slice())?;
        joined.append(units)?;
        Ok(joined)
    }

    /// Shortens to `len` units, or extends with copies of `fill`.
    ///
    /// # Errors
    ///
    /// Returns `CharBufError::Alloc` if growing fails; the buffer is unchanged.
    pub fn resize(&mut self, len: usize, fill: C) -> Result<(), CharBufError> {
        if len <= self.len {
            self.truncate(len);
            return Ok(());
        }
        let extra = len - self.len;
        let end = self.len;
        self.insert_n(end, extra, fill)
    }

    /// Drops the units from `len` on. Does nothing if `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            // SAFETY: shrinking keeps every remaining slot initialized.
            unsafe { self.set_len(len) };
        }
    }

    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Shifts the tail up by `count` slots and returns the start of the gap.
    ///
    /// The gap is filled with `NUL` so every unit below `len` stays
    /// initialized, whatever the caller does next.
    fn open_gap(&mut self, pos: usize, count: usize) -> Result<*mut C, CharBufError> {
        self.check_offset(pos)?;
        if count == 0 {
            return Ok(self.ptr.as_ptr());
        }
        let need = self.len.checked_add(count).ok_or(AllocError::CapacityOverflow {
            count: usize::MAX,
            elem_size: mem::size_of::<C>(),
        })?;
        self.ensure(need)?;

        let base = self.ptr.as_ptr();
        // SAFETY: capacity covers need + 1 slots; the tail moves up by `count`
        // and the gap is overwritten before the length grows over it.
        unsafe {
            let gap = base.add(pos);
            ptr::copy(gap, gap.add(count), self.len - pos);
            for offset in 0..count {
                gap.add(offset).write(C::NUL);
            }
            self.set_len(need);
            Ok(gap)
        }
    }

    /// Inserts one unit before `pos`.
    ///
    /// # Errors
    ///
    /// Returns `CharBufError::OutOfRange` if `pos > len`, and
    /// `CharBufError::Alloc` if growing fails. The buffer is unchanged then.
    pub fn insert(&mut self, pos: usize, unit: C) -> Result<(), CharBufError> {
        self.insert_n(pos, 1, unit)
    }

    /// Inserts `count` copies of `unit` before `pos`.
    ///
    /// # Errors
    ///
    /// Same as [`CharBuf::insert`].
    pub fn insert_n(&mut self, pos: usize, count: usize, unit: C) -> Result<(), CharBufError> {
        let gap = self.open_gap(pos, count)?;
        for offset in 0..count {
            // SAFETY: the gap holds `count` slots.
            unsafe { gap.add(offset).write(unit) };
        }
        Ok(())
    }

    /// Inserts `units` before `pos`.
    ///
    /// # Errors
    ///
    /// Same as [`CharBuf::insert`].
    pub fn insert_units(&mut self, pos: usize, units: &[C]) -> Result<(), CharBufError> {
        let gap = self.open_gap(pos, units.len())?;
        // SAFETY: `units` cannot alias this buffer while it is borrowed mutably,
        // and the gap holds `units.len()` slots.
        unsafe { ptr::copy_nonoverlapping(units.as_ptr(), gap, units.len()) };
        Ok(())
    }

    /// Inserts the first `count` of `units` before `pos`; `count` is clamped
    /// to `units.len()`.
    ///
    /// # Errors
    ///
    /// Same as [`CharBuf::insert`].
    pub fn insert_units_prefix(&mut self, pos: usize, units: &[C], count: usize) -> Result<(), CharBufError> {
        self.insert_units(pos, &units[..count.min(units.len())])
    }

    /// # Errors
    ///
    /// Same as [`CharBuf::insert`].
    pub fn insert_buf<S2: RawStorage>(&mut self, pos: usize, other: &CharBuf<C, S2>) -> Result<(), CharBufError> {
        self.insert_units(pos, other.as_slice())
    }

    /// Inserts `other[subpos..subpos + sublen]` before `pos`; `sublen` is
    /// clamped to what `other` holds past `subpos`.
    ///
    /// # Errors
    ///
    /// Returns `CharBufError::OutOfRange` if `subpos > other.len()` or
    /// `pos > len`, and `CharBufError::Alloc` if growing fails.
    pub fn insert_sub<S2: RawStorage>(
        &mut self,
        pos: usize,
        other: &CharBuf<C, S2>,
        subpos: usize,
        sublen: usize,
    ) -> Result<(), CharBufError> {
        let source = other.as_slice();
        let rest = source.get(subpos..).ok_or(CharBufError::OutOfRange {
            pos: subpos,
            length: source.len(),
        })?;
        self.insert_units(pos, &rest[..sublen.min(rest.len())])
    }

    /// Inserts the units of an exact-size iterator before `pos`.
    ///
    /// The gap is opened once at the announced size. If the iterator yields
    /// fewer units, the unused part of the gap is closed again.
    ///
    /// # Errors
    ///
    /// Same as [`CharBuf::insert`].
    pub fn insert_iter<I>(&mut self, pos: usize, units: I) -> Result<(), CharBufError>
    where
        I: IntoIterator<Item = C>,
        I::IntoIter: ExactSizeIterator,
    {
        let units = units.into_iter();
        let count = units.len();
        let gap = self.open_gap(pos, count)?;

        let mut filled = 0;
        for unit in units.take(count) {
            // SAFETY: the gap holds `count` slots.
            unsafe { gap.add(filled).write(unit) };
            filled += 1;
        }
        if filled < count {
            let missing = count - filled;
            // SAFETY: the gap and the tail are initialized; the tail moves
            // down over the unused slots.
            unsafe {
                ptr::copy(gap.add(count), gap.add(filled), self.len - pos - count);
                self.set_len(self.len - missing);
            }
        }
        Ok(())
    }

    /// Removes and returns the unit at `pos`.
    ///
    /// # Errors
    ///
    /// Returns `CharBufError::OutOfRange` if `pos >= len`.
    pub fn remove(&mut self, pos: usize) -> Result<C, CharBufError> {
        let unit = *self.at(pos)?;
        self.erase(pos, 1)?;
        Ok(unit)
    }

    /// Removes up to `count` units starting at `pos`; `count` is clamped to
    /// the units past `pos`.
    ///
    /// # Errors
    ///
    /// Returns `CharBufError::OutOfRange` if `pos > len`.
    pub fn erase(&mut self, pos: usize, count: usize) -> Result<(), CharBufError> {
        self.check_offset(pos)?;
        let count = count.min(self.len - pos);
        if count == 0 {
            return Ok(());
        }
        let base = self.ptr.as_ptr();
        // SAFETY: [pos + count, len) is initialized and moves down by `count`.
        unsafe {
            ptr::copy(base.add(pos + count), base.add(pos), self.len - pos - count);
            self.set_len(self.len - count);
        }
        Ok(())
    }

    /// A new buffer holding `self[pos..pos + count]`; `count` is clamped.
    ///
    /// # Errors
    ///
    /// Returns `CharBufError::OutOfRange` if `pos > len`, and
    /// `CharBufError::Alloc` if the new buffer cannot be allocated.
    pub fn substr(&self, pos: usize, count: usize) -> Result<Self, CharBufError>
    where
        S: Clone,
    {
        self.check_offset(pos)?;
        let end = pos + count.min(self.len - pos);
        Self::try_from_units_in(&self.as_slice()[pos..end], self.storage.clone())
    }

    /// Exchanges the contents of two buffers without copying any unit.
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Replaces the contents with a copy of `other`'s units.
    ///
    /// The copy is built first and then swapped in, so on failure `self` is
    /// left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns `CharBufError::Alloc` if the copy cannot be allocated.
    pub fn assign_from(&mut self, other: &Self) -> Result<(), CharBufError>
    where
        S: Clone,
    {
        let mut fresh = other.try_clone()?;
        self.swap_with(&mut fresh);
        Ok(())
    }

    /// Moves the contents out, leaving an empty buffer on the same policy.
    #[must_use]
    pub fn take(&mut self) -> Self
    where
        S: Clone,
    {
        let empty = Self::new_in(self.storage.clone());
        mem::replace(self, empty)
    }

    /// Copy holding exactly `len + 1` slots. A buffer that never allocated
    /// copies to another one that has not.
    ///
    /// # Errors
    ///
    /// Returns `CharBufError::Alloc` if the copy cannot be allocated.
    pub fn try_clone(&self) -> Result<Self, CharBufError>
    where
        S: Clone,
    {
        Ok(self.clone_raw()?)
    }

    fn clone_raw(&self) -> Result<Self, AllocError>
    where
        S: Clone,
    {
        let mut copy = Self::new_in(self.storage.clone());
        if self.cap == 0 {
            return Ok(copy);
        }
        copy.reallocate(slots_for::<C>(self.len)?)?;
        // SAFETY: the copy has len + 1 slots and a distinct block.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), copy.ptr.as_ptr(), self.len);
            copy.set_len(self.len);
        }
        Ok(copy)
    }

    fn check_offset(&self, pos: usize) -> Result<(), CharBufError> {
        if pos > self.len {
            return Err(CharBufError::OutOfRange {
                pos,
                length: self.len,
            });
        }
        Ok(())
    }
}

impl<S: RawStorage> CharBuf<u8, S> {
    /// Appends the UTF-8 bytes of `text`.
    ///
    /// # Errors
    ///
    /// Returns `CharBufError::Alloc` if growing fails.
    pub fn push_str(&mut self, text: &str) -> Result<(), CharBufError> {
        self.append(text.as_bytes())
    }
}

fn slots_for<C>(units: usize) -> Result<usize, AllocError> {
    units.checked_add(1).ok_or(AllocError::CapacityOverflow {
        count: units,
        elem_size: mem::size_of::<C>(),
    })
}

impl<C: CodeUnit, S: RawStorage> Drop for CharBuf<C, S> {
    fn drop(&mut self) {
        self.release_block();
    }
}

impl<C: CodeUnit, S: RawStorage + Default> Default for CharBuf<C, S> {
    fn default() -> Self {
        Self::new_in(S::default())
    }
}

impl<C: CodeUnit, S: RawStorage + Clone> Clone for CharBuf<C, S> {
    fn clone(&self) -> Self {
        self.clone_raw().unwrap_or_else(|err| abort_on(err))
    }
}

impl<C: CodeUnit, S: RawStorage> Deref for CharBuf<C, S> {
    type Target = [C];

    fn deref(&self) -> &[C] {
        self.as_slice()
    }
}

impl<C: CodeUnit, S: RawStorage> DerefMut for CharBuf<C, S> {
    fn deref_mut(&mut self) -> &mut [C] {
        self.as_mut_slice()
    }
}

/// Panics when the index is out of bounds.
impl<C: CodeUnit, S: RawStorage, I: SliceIndex<[C]>> Index<I> for CharBuf<C, S> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<C: CodeUnit, S: RawStorage, I: SliceIndex<[C]>> IndexMut<I> for CharBuf<C, S> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<C: CodeUnit, S: RawStorage> fmt::Debug for CharBuf<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        C::fmt_debug(self.as_slice(), f)
    }
}

/// Renders the bytes as UTF-8, each invalid sequence as U+FFFD.
impl<S: RawStorage> fmt::Display for CharBuf<u8, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.as_slice().utf8_chunks() {
            f.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                f.write_str("\u{fffd}")?;
            }
        }
        Ok(())
    }
}

impl<C: CodeUnit, S1: RawStorage, S2: RawStorage> PartialEq<CharBuf<C, S2>> for CharBuf<C, S1> {
    fn eq(&self, other: &CharBuf<C, S2>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<C: CodeUnit, S: RawStorage> PartialEq<[C]> for CharBuf<C, S> {
    fn eq(&self, other: &[C]) -> bool {
        self.as_slice() == other
    }
}

impl<C: CodeUnit, S: RawStorage> PartialEq<&[C]> for CharBuf<C, S> {
    fn eq(&self, other: &&[C]) -> bool {
        self.as_slice() == *other
    }
}

impl<C: CodeUnit, S: RawStorage, const N: usize> PartialEq<[C; N]> for CharBuf<C, S> {
    fn eq(&self, other: &[C; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<S: RawStorage> PartialEq<str> for CharBuf<u8, S> {
    fn eq(&self, other: &str) -> bool {
        self.as_slice() == other.as_bytes()
    }
}

impl<S: RawStorage> PartialEq<&str> for CharBuf<u8, S> {
    fn eq(&self, other: &&str) -> bool {
        self.as_slice() == other.as_bytes()
    }
}

impl<C: CodeUnit, S: RawStorage> Eq for CharBuf<C, S> {}

impl<C: CodeUnit, S: RawStorage> PartialOrd for CharBuf<C, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: CodeUnit, S: RawStorage> Ord for CharBuf<C, S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<C: CodeUnit, S: RawStorage> Hash for CharBuf<C, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rawstore::Bounded;

    #[test]
    fn test_growth_from_empty_is_eight_slots() {
        let mut buf: CharBuf = CharBuf::new();
        assert_eq!(buf.capacity(), 0);

        buf.push(b'a').unwrap();
        assert_eq!(buf.capacity(), INITIAL_SLOTS);
    }

    #[test]
    fn test_growth_doubles_or_fits_need() {
        let mut buf: CharBuf = CharBuf::new();
        buf.append(&[b'x'; 7]).unwrap();
        assert_eq!(buf.capacity(), 8);

        buf.push(b'y').unwrap();
        assert_eq!(buf.capacity(), 16);

        buf.append(&[b'z'; 40]).unwrap();
        assert_eq!(buf.capacity(), 49);
    }

    #[test]
    fn test_terminator_follows_every_edit() {
        let mut buf = CharBuf::try_from_str("abcdef").unwrap();
        let check = |buf: &CharBuf| {
            let terminated = buf.as_nul_terminated();
            assert_eq!(terminated.len(), buf.len() + 1);
            assert_eq!(terminated[buf.len()], 0);
        };

        buf.erase(1, 2).unwrap();
        check(&buf);
        buf.insert(0, b'_').unwrap();
        check(&buf);
        buf.pop().unwrap();
        check(&buf);
        buf.resize(10, b'.').unwrap();
        check(&buf);
        buf.truncate(2);
        check(&buf);
        buf.clear();
        check(&buf);
    }

    #[test]
    fn test_reallocation_moves_once() {
        let budget = Bounded::unlimited();
        let mut buf = CharBuf::<u8, _>::new_in(budget.clone());
        buf.insert_n(0, 20, b'-').unwrap();

        assert_eq!(budget.total_allocations(), 1);
        assert_eq!(buf.capacity(), 21);
    }
}
