//! Cursors walking the ring of a `RingList`.
//!
//! A cursor always rests on a node or on the sentinel. Stepping never
//! fails: stepping forward from the last element lands on the sentinel,
//! and stepping forward again lands on the first element.

use core::fmt;

use rawstore::RawStorage;

use crate::core::{Position, RingList};
use crate::error::RingListError;
use crate::node::Link;

/// Read-only cursor.
pub struct Cursor<'a, T, S: RawStorage> {
    list: &'a RingList<T, S>,
    link: Link<T, S>,
}

/// Mutable cursor. Widens into a [`Cursor`], never the reverse.
pub struct CursorMut<'a, T, S: RawStorage> {
    list: &'a mut RingList<T, S>,
    link: Link<T, S>,
}

impl<'a, T, S: RawStorage> Cursor<'a, T, S> {
    pub(crate) fn new(list: &'a RingList<T, S>, link: Link<T, S>) -> Self {
        Self { list, link }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.list.position(self.link)
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        self.link.is_none()
    }

    /// The element under the cursor, `None` on the sentinel.
    #[must_use]
    pub fn current(&self) -> Option<&'a T> {
        self.list.value(self.link)
    }

    #[must_use]
    pub fn peek_next(&self) -> Option<&'a T> {
        self.list.value(self.list.next(self.link))
    }

    #[must_use]
    pub fn peek_prev(&self) -> Option<&'a T> {
        self.list.value(self.list.prev(self.link))
    }

    pub fn move_next(&mut self) {
        self.link = self.list.next(self.link);
    }

    pub fn move_prev(&mut self) {
        self.link = self.list.prev(self.link);
    }
}

impl<'a, T, S: RawStorage> CursorMut<'a, T, S> {
    pub(crate) fn new(list: &'a mut RingList<T, S>, link: Link<T, S>) -> Self {
        Self { list, link }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.list.position(self.link)
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        self.link.is_none()
    }

    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.list.value(self.link)
    }

    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.list.value_mut(self.link)
    }

    #[must_use]
    pub fn peek_next(&self) -> Option<&T> {
        self.list.value(self.list.next(self.link))
    }

    #[must_use]
    pub fn peek_prev(&self) -> Option<&T> {
        self.list.value(self.list.prev(self.link))
    }

    pub fn move_next(&mut self) {
        self.link = self.list.next(self.link);
    }

    pub fn move_prev(&mut self) {
        self.link = self.list.prev(self.link);
    }

    /// Removes the element under the cursor and moves on to the next node.
    ///
    /// # Errors
    ///
    /// Returns `RingListError::PositionIsEnd` on the sentinel.
    pub fn remove_current(&mut self) -> Result<T, RingListError> {
        let next = self.list.next(self.link);
        let value = self
            .list
            .remove_at(self.link)
            .ok_or(RingListError::PositionIsEnd)?;
        self.link = next;
        Ok(value)
    }

    /// A read-only view at the same node, borrowing this cursor.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, T, S> {
        Cursor::new(&*self.list, self.link)
    }
}

impl<T, S: RawStorage + Clone> CursorMut<'_, T, S> {
    /// Inserts `value` before the cursor; the cursor does not move.
    ///
    /// # Errors
    ///
    /// Returns `RingListError::Alloc` if a node cannot be allocated.
    pub fn insert_before(&mut self, value: T) -> Result<Position, RingListError> {
        self.list.insert_at(self.link, value)
    }
}

impl<'a, T, S: RawStorage> From<CursorMut<'a, T, S>> for Cursor<'a, T, S> {
    fn from(cursor: CursorMut<'a, T, S>) -> Self {
        Cursor::new(cursor.list, cursor.link)
    }
}

impl<T, S: RawStorage> Clone for Cursor<'_, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S: RawStorage> Copy for Cursor<'_, T, S> {}

impl<T, S: RawStorage> PartialEq for Cursor<'_, T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.link == other.link
    }
}

impl<T, S: RawStorage> Eq for Cursor<'_, T, S> {}

impl<T: fmt::Debug, S: RawStorage> fmt::Debug for Cursor<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.current()).finish()
    }
}

impl<T: fmt::Debug, S: RawStorage> fmt::Debug for CursorMut<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.current()).finish()
    }
}
