//! Random-access positions over a `SeqVec`.
//!
//! A cursor is a slot index into a borrowed sequence. Positions range over
//! `0..=len`; `len` is the end position and is never dereferenced.
//! Cursors compare by position and are meant to be compared only with
//! cursors of the same sequence.

use core::cmp::Ordering;
use core::fmt;

/// Read-only random-access position.
pub struct Cursor<'a, T> {
    slots: &'a [T],
    index: usize,
}

/// Mutable random-access position. Widens into a [`Cursor`], never the reverse.
pub struct CursorMut<'a, T> {
    slots: &'a mut [T],
    index: usize,
}

#[allow(clippy::cast_possible_wrap)]
fn distance(from: usize, to: usize) -> isize {
    // Slices never hold more than isize::MAX elements of a sized type.
    (to as isize).wrapping_sub(from as isize)
}

fn moved(index: usize, len: usize, offset: isize) -> usize {
    match index.checked_add_signed(offset) {
        Some(target) if target <= len => target,
        _ => panic!("cursor moved to {index}{offset:+}, outside 0..={len}"),
    }
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(slots: &'a [T], index: usize) -> Self {
        debug_assert!(index <= slots.len());
        Self { slots, index }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        self.index == self.slots.len()
    }

    /// The element under the cursor, `None` at the end position.
    #[must_use]
    pub fn current(&self) -> Option<&'a T> {
        self.slots.get(self.index)
    }

    /// The element `offset` slots away, `None` outside the live range.
    #[must_use]
    pub fn peek(&self, offset: isize) -> Option<&'a T> {
        self.index
            .checked_add_signed(offset)
            .and_then(|target| self.slots.get(target))
    }

    /// Moves by `offset` slots in constant time.
    ///
    /// # Panics
    ///
    /// Panics if the target lies outside `0..=len`.
    pub fn advance(&mut self, offset: isize) {
        self.index = moved(self.index, self.slots.len(), offset);
    }

    /// # Panics
    ///
    /// Panics if the target lies outside `0..=len`.
    pub fn retreat(&mut self, offset: isize) {
        self.advance(offset.wrapping_neg());
    }

    /// Steps forward; returns `false` and stays put at the end position.
    pub fn move_next(&mut self) -> bool {
        if self.is_end() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Steps back; returns `false` and stays put at the first position.
    pub fn move_prev(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Signed element distance from `self` to `other`.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> isize {
        distance(self.index, other.index)
    }
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(slots: &'a mut [T], index: usize) -> Self {
        debug_assert!(index <= slots.len());
        Self { slots, index }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        self.index == self.slots.len()
    }

    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.slots.get(self.index)
    }

    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.slots.get_mut(self.index)
    }

    #[must_use]
    pub fn peek(&self, offset: isize) -> Option<&T> {
        self.index
            .checked_add_signed(offset)
            .and_then(|target| self.slots.get(target))
    }

    /// # Panics
    ///
    /// Panics if the target lies outside `0..=len`.
    pub fn advance(&mut self, offset: isize) {
        self.index = moved(self.index, self.slots.len(), offset);
    }

    /// # Panics
    ///
    /// Panics if the target lies outside `0..=len`.
    pub fn retreat(&mut self, offset: isize) {
        self.advance(offset.wrapping_neg());
    }

    pub fn move_next(&mut self) -> bool {
        if self.is_end() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn move_prev(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    #[must_use]
    pub fn distance_to(&self, other: &Self) -> isize {
        distance(self.index, other.index)
    }

    /// A read-only view at the same position, borrowing this cursor.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.slots, self.index)
    }
}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        Cursor::new(cursor.slots, cursor.index)
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Cursor<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> PartialEq for CursorMut<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for CursorMut<'_, T> {}

impl<T> PartialOrd for CursorMut<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for CursorMut<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("len", &self.slots.len())
            .finish()
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("index", &self.index)
            .field("len", &self.slots.len())
            .finish()
    }
}
