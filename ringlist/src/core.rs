use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;
use core::sync::atomic::{AtomicUsize, Ordering};

use log::trace;
use rawstore::{abort_on, AllocError, Global, RawStorage};

use crate::cursor::{Cursor, CursorMut};
use crate::error::RingListError;
use crate::iter::{Iter, IterMut};
use crate::node::{Link, Node, Spares};

/// Identities handed to lists. `0` is reserved for the end position.
static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

/// A list identity that no other list has held before.
fn fresh_id() -> usize {
    match NEXT_ID.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| id.checked_add(1)) {
        Ok(id) => id,
        Err(_) => panic!("ringlist identities exhausted"),
    }
}

/// A handle naming one node of a `RingList`, or its end.
///
/// Positions are plain values that borrow nothing. Each one is tagged with
/// the identity of the list that handed it out, and a list rejects positions
/// carrying any other identity without looking at the node they name. A
/// position stays valid until its node is removed, or until the list gives
/// nodes away through a splice or merge or releases its spare nodes; the
/// list takes a new identity then. Invalid positions are rejected with
/// `RingListError::InvalidPosition`.
///
/// The end position is the same for every list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    list: usize,
    node: Option<NonNull<u8>>,
    generation: u32,
}

// SAFETY: a position is an inert token. Only the list whose identity it
// carries follows its pointer.
unsafe impl Send for Position {}
// SAFETY: as above.
unsafe impl Sync for Position {}

impl Position {
    pub(crate) const END: Self = Self {
        list: 0,
        node: None,
        generation: 0,
    };

    #[must_use]
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }
}

/// A doubly linked ring with a sentinel node, drawing node storage from an
/// explicit allocation policy.
///
/// The sentinel sits between the last and the first element, so the ring is
/// never broken: `next_of(end())` is the first element and `prev_of(end())`
/// the last. Its links are part of the list value, so an empty list owns no
/// memory.
pub struct RingList<T, S: RawStorage = Global> {
    head: Link<T, S>,
    tail: Link<T, S>,
    pub(crate) len: usize,
    spares: Spares<T, S>,
    id: usize,
    storage: S,
    _owns: PhantomData<T>,
}

// SAFETY: the list owns its payloads and node policies like `Vec<T>` does.
unsafe impl<T: Send, S: RawStorage + Send> Send for RingList<T, S> {}
// SAFETY: shared access only hands out `&T` and `&S`.
unsafe impl<T: Sync, S: RawStorage + Sync> Sync for RingList<T, S> {}

impl<T> RingList<T> {
    /// Creates an empty list using the process allocator. Nothing is allocated.
    #[must_use]
    pub fn new() -> Self {
        Self::new_in(Global)
    }

    /// # Errors
    ///
    /// Returns `RingListError::Alloc` if the nodes cannot be allocated.
    pub fn try_from_slice(items: &[T]) -> Result<Self, RingListError>
    where
        T: Clone,
    {
        Self::try_from_slice_in(items, Global)
    }

    /// # Errors
    ///
    /// Returns `RingListError::Alloc` if the nodes cannot be allocated.
    pub fn from_array<const N: usize>(items: [T; N]) -> Result<Self, RingListError> {
        Self::from_array_in(items, Global)
    }
}

impl<T, S: RawStorage> RingList<T, S> {
    /// Creates an empty list drawing node storage from `storage`.
    #[must_use]
    pub fn new_in(storage: S) -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            spares: Spares::new(),
            id: fresh_id(),
            storage,
            _owns: PhantomData,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes the list holds memory for: its elements plus the
    /// spare nodes kept from earlier removals. Spare nodes are reused by
    /// inserts and freed by [`RingList::shrink_to_fit`] or on drop.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.len + self.spares.len()
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Position of the first element, or `end()` when the list is empty.
    #[must_use]
    pub fn begin(&self) -> Position {
        self.position(self.head)
    }

    /// The end position. It names the sentinel and is never dereferenced.
    #[must_use]
    pub fn end(&self) -> Position {
        Position::END
    }

    /// # Errors
    ///
    /// Returns `RingListError::InvalidPosition` if `pos` is not valid here.
    pub fn next_of(&self, pos: Position) -> Result<Position, RingListError> {
        let link = self.resolve(pos)?;
        Ok(self.position(self.next(link)))
    }

    /// # Errors
    ///
    /// Returns `RingListError::InvalidPosition` if `pos` is not valid here.
    pub fn prev_of(&self, pos: Position) -> Result<Position, RingListError> {
        let link = self.resolve(pos)?;
        Ok(self.position(self.prev(link)))
    }

    /// Position of the element at `index`; `index == len` yields `end()`.
    ///
    /// Walks from whichever end is nearer.
    ///
    /// # Errors
    ///
    /// Returns `RingListError::IndexOutOfBounds` if `index > len`.
    pub fn position_of(&self, index: usize) -> Result<Position, RingListError> {
        Ok(self.position(self.link_of(index)?))
    }

    fn link_of(&self, index: usize) -> Result<Link<T, S>, RingListError> {
        if index > self.len {
            return Err(RingListError::IndexOutOfBounds {
                index,
                length: self.len,
            });
        }
        let mut link = None;
        if index < self.len / 2 {
            for _ in 0..=index {
                link = self.next(link);
            }
        } else {
            for _ in index..self.len {
                link = self.prev(link);
            }
        }
        Ok(link)
    }

    /// Checked access by index, O(min(index, len - index)).
    ///
    /// # Errors
    ///
    /// Returns `RingListError::IndexOutOfBounds` if `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T, RingListError> {
        let length = self.len;
        let link = self.link_of(index)?;
        self.value(link)
            .ok_or(RingListError::IndexOutOfBounds { index, length })
    }

    /// # Errors
    ///
    /// Returns `RingListError::IndexOutOfBounds` if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, RingListError> {
        let length = self.len;
        let link = self.link_of(index)?;
        self.value_mut(link)
            .ok_or(RingListError::IndexOutOfBounds { index, length })
    }

    /// The element at `pos`; `None` for `end()` and for invalid positions.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&T> {
        let link = self.resolve(pos).ok()?;
        self.value(link)
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        let link = self.resolve(pos).ok()?;
        self.value_mut(link)
    }

    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.value(self.head)
    }

    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.value(self.tail)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.value_mut(self.head)
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.value_mut(self.tail)
    }

    /// Removes the first element. Returns `None` and leaves the sentinel
    /// alone when the list is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        self.remove_at(self.head)
    }

    pub fn pop_back(&mut self) -> Option<T> {
        self.remove_at(self.tail)
    }

    /// Removes the node at `pos` and returns its value. The node is kept as
    /// a spare for later inserts.
    ///
    /// # Errors
    ///
    /// Returns `RingListError::PositionIsEnd` for `end()` and
    /// `RingListError::InvalidPosition` if `pos` is not valid here.
    pub fn remove(&mut self, pos: Position) -> Result<T, RingListError> {
        let node = self.node_of(pos)?;
        self.remove_at(Some(node)).ok_or(RingListError::PositionIsEnd)
    }

    /// Destroys every element. The nodes are kept as spares.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Frees the spare nodes, so that `capacity() == len()`.
    ///
    /// The list takes a new identity when there was anything to free, so
    /// positions handed out before are rejected afterwards.
    pub fn shrink_to_fit(&mut self) {
        if self.spares.len() == 0 {
            return;
        }
        trace!("ringlist releasing {} spare nodes", self.spares.len());
        self.spares.release();
        self.renew_id();
    }

    /// Moves every node of `other` before `pos` by relinking the two ends of
    /// its ring, in O(1). `other` is left empty.
    ///
    /// Returns the position of the first moved node, or `pos` when `other`
    /// was empty. Positions into `other` are invalid afterwards; the moved
    /// nodes are reached through this list's positions.
    ///
    /// # Errors
    ///
    /// Returns `RingListError::InvalidPosition` if `pos` is not valid here;
    /// both lists are unchanged then.
    pub fn splice(&mut self, pos: Position, other: &mut Self) -> Result<Position, RingListError> {
        let at = self.resolve(pos)?;
        let Some(first) = other.head else {
            return Ok(pos);
        };
        let count = other.len;
        self.transfer(at, other, first, None, count);
        other.renew_id();
        Ok(self.position(Some(first)))
    }

    /// Moves the node `it` of `other` before `pos`, in O(1).
    ///
    /// # Errors
    ///
    /// Returns `RingListError::InvalidPosition` if `pos` is not valid here or
    /// `it` is not valid in `other`, and `RingListError::PositionIsEnd` if
    /// `it` is `end()`.
    pub fn splice_one(&mut self, pos: Position, other: &mut Self, it: Position) -> Result<Position, RingListError> {
        let at = self.resolve(pos)?;
        let node = other.node_of(it)?;
        let last = other.next(Some(node));
        self.transfer(at, other, node, last, 1);
        other.renew_id();
        Ok(self.position(Some(node)))
    }

    /// Moves the run `[first, last)` of `other` before `pos`.
    ///
    /// The run is relinked at its two ends; only the walk that checks it and
    /// counts its nodes is O(k).
    ///
    /// # Errors
    ///
    /// Returns `RingListError::InvalidPosition` if `pos` is not valid here,
    /// if `first` or `last` are not valid in `other`, or if `last` cannot be
    /// reached from `first` without passing `other`'s end. Nothing moves then.
    pub fn splice_range(
        &mut self,
        pos: Position,
        other: &mut Self,
        first: Position,
        last: Position,
    ) -> Result<Position, RingListError> {
        let at = self.resolve(pos)?;
        let first = other.resolve(first)?;
        let last = other.resolve(last)?;
        let count = other.run_length(first, last, None)?;
        let Some(first) = first.filter(|_| count > 0) else {
            return Ok(pos);
        };
        self.transfer(at, other, first, last, count);
        other.renew_id();
        Ok(self.position(Some(first)))
    }

    /// Moves the node at `it` before `pos` within this list.
    ///
    /// Nothing moves when `pos` is `it` or the node right after it. All
    /// positions stay valid.
    ///
    /// # Errors
    ///
    /// Returns `RingListError::InvalidPosition` for invalid positions and
    /// `RingListError::PositionIsEnd` if `it` is `end()`.
    pub fn move_to(&mut self, pos: Position, it: Position) -> Result<Position, RingListError> {
        let at = self.resolve(pos)?;
        let node = self.node_of(it)?;
        if at == Some(node) || at == self.next(Some(node)) {
            return Ok(it);
        }
        self.unlink(node);
        self.link_before(at, node);
        Ok(it)
    }

    /// Moves the run `[first, last)` of this list before `pos` by relinking
    /// its two ends. All positions stay valid.
    ///
    /// Returns the position of the run's first node, or `pos` for an empty run.
    ///
    /// # Errors
    ///
    /// Returns `RingListError::InvalidPosition` for invalid positions, if
    /// `last` cannot be reached from `first` without passing `end()`, or if
    /// `pos` lies inside the run.
    pub fn move_range_to(&mut self, pos: Position, first: Position, last: Position) -> Result<Position, RingListError> {
        let at = self.resolve(pos)?;
        let first_link = self.resolve(first)?;
        let last_link = self.resolve(last)?;
        if first_link == last_link {
            return Ok(pos);
        }
        self.run_length(first_link, last_link, Some(at))?;
        if at == last_link {
            return Ok(first);
        }
        let (Some(head), Some(tail)) = (first_link, self.prev(last_link)) else {
            return Ok(pos);
        };

        let before = self.prev(first_link);
        self.set_next(before, last_link);
        self.set_prev(last_link, before);

        let prev = self.prev(at);
        // SAFETY: both ends of the run are linked nodes of this list.
        unsafe {
            (*head.as_ptr()).prev = prev;
            (*tail.as_ptr()).next = at;
        }
        self.set_next(prev, first_link);
        self.set_prev(at, Some(tail));
        Ok(first)
    }

    /// Merges the sorted list `other` into this sorted list. See [`RingList::merge_by`].
    pub fn merge(&mut self, other: &mut Self)
    where
        T: Ord,
    {
        self.merge_by(other, |a, b| a < b);
    }

    /// Merges `other`, sorted by `less`, into this list, sorted the same way.
    ///
    /// Walks this list once; each front node of `other` that is strictly less
    /// than the current node is relinked before it. Once this list is
    /// exhausted the rest of `other` is appended in one step. The merge is
    /// stable and ties keep this list's elements first. Nothing is allocated
    /// and no payload moves. `other` is left empty.
    pub fn merge_by<F>(&mut self, other: &mut Self, mut less: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        if other.is_empty() {
            return;
        }
        let mut cursor = self.head;
        while let (Some(ours), Some(theirs)) = (cursor, other.head) {
            // SAFETY: both nodes are linked, so both hold payloads.
            let moves = unsafe { less(Node::value(theirs), Node::value(ours)) };
            if moves {
                let next = other.next(Some(theirs));
                self.transfer(cursor, other, theirs, next, 1);
            } else {
                cursor = self.next(cursor);
            }
        }
        if let Some(first) = other.head {
            let count = other.len;
            self.transfer(None, other, first, None, count);
        }
        other.renew_id();
    }

    /// Exchanges the contents of two lists in O(1). Positions follow their nodes.
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    pub fn iter(&self) -> Iter<'_, T, S> {
        Iter::new(self.head, self.tail, self.len)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T, S> {
        IterMut::new(self.head, self.tail, self.len)
    }

    /// Iterates from the last element to the first.
    pub fn iter_rev(&self) -> core::iter::Rev<Iter<'_, T, S>> {
        self.iter().rev()
    }

    /// Read-only cursor on `pos`.
    ///
    /// # Errors
    ///
    /// Returns `RingListError::InvalidPosition` if `pos` is not valid here.
    pub fn cursor(&self, pos: Position) -> Result<Cursor<'_, T, S>, RingListError> {
        let link = self.resolve(pos)?;
        Ok(Cursor::new(self, link))
    }

    /// Mutable cursor on `pos`.
    ///
    /// # Errors
    ///
    /// Returns `RingListError::InvalidPosition` if `pos` is not valid here.
    pub fn cursor_mut(&mut self, pos: Position) -> Result<CursorMut<'_, T, S>, RingListError> {
        let link = self.resolve(pos)?;
        Ok(CursorMut::new(self, link))
    }

    pub fn cursor_front(&self) -> Cursor<'_, T, S> {
        Cursor::new(self, self.head)
    }

    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, S> {
        let first = self.head;
        CursorMut::new(self, first)
    }

    /// Resolves a position to a link, rejecting positions from other lists
    /// before touching their node, and stale ones by generation.
    pub(crate) fn resolve(&self, pos: Position) -> Result<Link<T, S>, RingListError> {
        let Some(addr) = pos.node else {
            return Ok(None);
        };
        if pos.list != self.id {
            return Err(RingListError::InvalidPosition);
        }
        let node = addr.cast::<Node<T, S>>();
        // SAFETY: this list issued the position under its current identity,
        // and every node it issued positions for since is linked or parked.
        let generation = unsafe { (*node.as_ptr()).generation };
        if generation == pos.generation {
            Ok(Some(node))
        } else {
            Err(RingListError::InvalidPosition)
        }
    }

    /// Like `resolve`, but the end position is an error too.
    fn node_of(&self, pos: Position) -> Result<NonNull<Node<T, S>>, RingListError> {
        self.resolve(pos)?.ok_or(RingListError::PositionIsEnd)
    }

    pub(crate) fn position(&self, link: Link<T, S>) -> Position {
        match link {
            None => Position::END,
            Some(node) => Position {
                list: self.id,
                node: Some(node.cast()),
                // SAFETY: callers pass links of this list.
                generation: unsafe { (*node.as_ptr()).generation },
            },
        }
    }

    fn renew_id(&mut self) {
        self.id = fresh_id();
    }

    pub(crate) fn next(&self, link: Link<T, S>) -> Link<T, S> {
        match link {
            None => self.head,
            // SAFETY: linked nodes stay allocated while the list owns them.
            Some(node) => unsafe { (*node.as_ptr()).next },
        }
    }

    pub(crate) fn prev(&self, link: Link<T, S>) -> Link<T, S> {
        match link {
            None => self.tail,
            // SAFETY: as in `next`.
            Some(node) => unsafe { (*node.as_ptr()).prev },
        }
    }

    fn set_next(&mut self, link: Link<T, S>, to: Link<T, S>) {
        match link {
            None => self.head = to,
            // SAFETY: as in `next`.
            Some(node) => unsafe { (*node.as_ptr()).next = to },
        }
    }

    fn set_prev(&mut self, link: Link<T, S>, to: Link<T, S>) {
        match link {
            None => self.tail = to,
            // SAFETY: as in `next`.
            Some(node) => unsafe { (*node.as_ptr()).prev = to },
        }
    }

    pub(crate) fn value(&self, link: Link<T, S>) -> Option<&T> {
        // SAFETY: linked nodes hold payloads, and `&self` rules out `&mut T`.
        link.map(|node| unsafe { Node::value(node) })
    }

    pub(crate) fn value_mut(&mut self, link: Link<T, S>) -> Option<&mut T> {
        // SAFETY: linked nodes hold payloads, and `&mut self` is exclusive.
        link.map(|node| unsafe { Node::value_mut(node) })
    }

    fn link_before(&mut self, at: Link<T, S>, node: NonNull<Node<T, S>>) {
        let prev = self.prev(at);
        // SAFETY: `node` is allocated and about to be linked here.
        unsafe {
            (*node.as_ptr()).prev = prev;
            (*node.as_ptr()).next = at;
        }
        self.set_next(prev, Some(node));
        self.set_prev(at, Some(node));
        self.len += 1;
    }

    fn unlink(&mut self, node: NonNull<Node<T, S>>) {
        // SAFETY: `node` is linked in this list.
        let (prev, next) = unsafe { ((*node.as_ptr()).prev, (*node.as_ptr()).next) };
        self.set_next(prev, next);
        self.set_prev(next, prev);
        self.len -= 1;
    }

    /// Unlinks the node `link` and parks it; `None` for the sentinel.
    pub(crate) fn remove_at(&mut self, link: Link<T, S>) -> Option<T> {
        let node = link?;
        self.unlink(node);
        // SAFETY: the node was linked, so it holds a payload, and now it is
        // linked nowhere.
        unsafe {
            let value = Node::empty(node);
            self.spares.push(node);
            Some(value)
        }
    }

    /// Unlinks the first node and frees it, handing back its payload.
    fn destroy_front(&mut self) -> Option<T> {
        let node = self.head?;
        self.unlink(node);
        // SAFETY: as in `remove_at`; nothing can reach the node afterwards.
        unsafe {
            let value = Node::empty(node);
            Node::free(node);
            Some(value)
        }
    }

    /// Counts the nodes of `[first, last)`, failing if the walk passes the
    /// sentinel before reaching `last` or meets `forbidden` inside the run.
    fn run_length(
        &self,
        first: Link<T, S>,
        last: Link<T, S>,
        forbidden: Option<Link<T, S>>,
    ) -> Result<usize, RingListError> {
        let mut count = 0;
        let mut link = first;
        while link != last {
            if link.is_none() || forbidden == Some(link) {
                return Err(RingListError::InvalidPosition);
            }
            count += 1;
            link = self.next(link);
        }
        Ok(count)
    }

    /// Unlinks the `count` nodes of `[first, last)` from `other` and links
    /// them before `at`, relinking only the ends of the run.
    fn transfer(&mut self, at: Link<T, S>, other: &mut Self, first: NonNull<Node<T, S>>, last: Link<T, S>, count: usize) {
        let Some(tail) = other.prev(last) else {
            return;
        };
        let before = other.prev(Some(first));
        other.set_next(before, last);
        other.set_prev(last, before);
        other.len -= count;

        let prev = self.prev(at);
        // SAFETY: the run's ends are allocated and now linked nowhere.
        unsafe {
            (*first.as_ptr()).prev = prev;
            (*tail.as_ptr()).next = at;
        }
        self.set_next(prev, Some(first));
        self.set_prev(at, Some(tail));
        self.len += count;
    }
}

impl<T, S: RawStorage + Clone> RingList<T, S> {
    /// # Errors
    ///
    /// Returns `RingListError::Alloc` if the nodes cannot be allocated.
    pub fn try_from_slice_in(items: &[T], storage: S) -> Result<Self, RingListError>
    where
        T: Clone,
    {
        Self::try_from_iter_in(items.iter().cloned(), storage)
    }

    /// # Errors
    ///
    /// Returns `RingListError::Alloc` if the nodes cannot be allocated.
    pub fn from_array_in<const N: usize>(items: [T; N], storage: S) -> Result<Self, RingListError> {
        Self::try_from_iter_in(items, storage)
    }

    /// # Errors
    ///
    /// Returns `RingListError::Alloc` if the nodes cannot be allocated.
    pub fn try_from_iter_in<I>(items: I, storage: S) -> Result<Self, RingListError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = Self::new_in(storage);
        list.insert_iter(Position::END, items)?;
        Ok(list)
    }

    /// Makes sure `additional` nodes can be inserted without allocating.
    ///
    /// # Errors
    ///
    /// Returns `RingListError::Alloc` if a node cannot be allocated. Nodes
    /// allocated before the failure are kept as spares.
    pub fn reserve(&mut self, additional: usize) -> Result<(), RingListError> {
        if self.spares.len() >= additional {
            return Ok(());
        }
        trace!(
            "ringlist reserving {} nodes, {} spare",
            additional,
            self.spares.len()
        );
        while self.spares.len() < additional {
            let node = Node::vacant(&self.storage)?;
            // SAFETY: the node is fresh and vacant.
            unsafe { self.spares.push(node) };
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `RingListError::Alloc` if a node cannot be allocated.
    pub fn push_front(&mut self, value: T) -> Result<Position, RingListError> {
        self.insert_at(self.head, value)
    }

    /// # Errors
    ///
    /// Returns `RingListError::Alloc` if a node cannot be allocated.
    pub fn push_back(&mut self, value: T) -> Result<Position, RingListError> {
        self.insert_at(None, value)
    }

    /// Inserts `value` before `pos` and returns the new node's position.
    ///
    /// Only the two neighbours are relinked; every other position stays valid.
    ///
    /// # Errors
    ///
    /// Returns `RingListError::InvalidPosition` if `pos` is not valid here
    /// and `RingListError::Alloc` if a node cannot be allocated.
    pub fn insert(&mut self, pos: Position, value: T) -> Result<Position, RingListError> {
        let at = self.resolve(pos)?;
        self.insert_at(at, value)
    }

    /// Builds the value in place before `pos`; `make` runs only once the node
    /// is secured.
    ///
    /// # Errors
    ///
    /// Same as [`RingList::insert`].
    pub fn insert_with<F>(&mut self, pos: Position, make: F) -> Result<Position, RingListError>
    where
        F: FnOnce() -> T,
    {
        let at = self.resolve(pos)?;
        self.reserve(1)?;
        self.insert_at(at, make())
    }

    /// Inserts `count` clones of `value` before `pos`.
    ///
    /// Returns the position of the first inserted node, or `pos` when
    /// `count` is zero.
    ///
    /// # Errors
    ///
    /// Same as [`RingList::insert`]. All nodes are secured first.
    pub fn insert_n(&mut self, pos: Position, count: usize, value: &T) -> Result<Position, RingListError>
    where
        T: Clone,
    {
        let at = self.resolve(pos)?;
        self.reserve(count)?;
        let mut first = pos;
        for n in 0..count {
            let inserted = self.insert_at(at, value.clone())?;
            if n == 0 {
                first = inserted;
            }
        }
        Ok(first)
    }

    /// Inserts the items of `items`, in order, before `pos`.
    ///
    /// Returns the position of the first inserted node, or `pos` when nothing
    /// was inserted. If a node cannot be allocated midway, the nodes inserted
    /// by this call are removed again before the error is returned.
    ///
    /// # Errors
    ///
    /// Same as [`RingList::insert`].
    pub fn insert_iter<I>(&mut self, pos: Position, items: I) -> Result<Position, RingListError>
    where
        I: IntoIterator<Item = T>,
    {
        let at = self.resolve(pos)?;
        let items = items.into_iter();
        self.reserve(items.size_hint().0)?;

        let mut first = None;
        let mut inserted = 0;
        for item in items {
            let node = match self.link_new(at, item) {
                Ok(node) => node,
                Err(err) => {
                    self.unwind_inserted(first, inserted);
                    return Err(err.into());
                }
            };
            if first.is_none() {
                first = Some(node);
            }
            inserted += 1;
        }
        Ok(match first {
            Some(node) => self.position(Some(node)),
            None => pos,
        })
    }

    fn unwind_inserted(&mut self, first: Option<NonNull<Node<T, S>>>, count: usize) {
        let mut link = first;
        for _ in 0..count {
            let next = self.next(link);
            drop(self.remove_at(link));
            link = next;
        }
    }

    /// Replaces the contents with clones of `other`'s elements.
    ///
    /// A full copy is built first and then swapped in, so on failure `self`
    /// is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns `RingListError::Alloc` if the copy cannot be allocated.
    pub fn assign_from(&mut self, other: &Self) -> Result<(), RingListError>
    where
        T: Clone,
    {
        let mut fresh = other.try_clone()?;
        self.swap_with(&mut fresh);
        Ok(())
    }

    /// Moves the contents out, leaving an empty list on the same policy.
    ///
    /// Positions follow the nodes into the returned list.
    #[must_use]
    pub fn take(&mut self) -> Self {
        let empty = Self::new_in(self.storage.clone());
        mem::replace(self, empty)
    }

    /// Deep copy on a clone of the same allocation policy.
    ///
    /// # Errors
    ///
    /// Returns `RingListError::Alloc` if the copy cannot be allocated.
    pub fn try_clone(&self) -> Result<Self, RingListError>
    where
        T: Clone,
    {
        Ok(self.clone_raw()?)
    }

    fn clone_raw(&self) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        let mut copy = Self::new_in(self.storage.clone());
        for item in self {
            copy.link_new(None, item.clone())?;
        }
        Ok(copy)
    }

    pub(crate) fn insert_at(&mut self, at: Link<T, S>, value: T) -> Result<Position, RingListError> {
        let node = self.link_new(at, value)?;
        Ok(self.position(Some(node)))
    }

    /// Links `value` before `at` in a spare node, or a new one.
    fn link_new(&mut self, at: Link<T, S>, value: T) -> Result<NonNull<Node<T, S>>, AllocError> {
        let node = match self.spares.pop() {
            Some(node) => node,
            None => Node::vacant(&self.storage)?,
        };
        // SAFETY: spare and fresh nodes are vacant.
        unsafe { Node::fill(node, value) };
        self.link_before(at, node);
        Ok(node)
    }
}

impl<T, S: RawStorage> Drop for RingList<T, S> {
    fn drop(&mut self) {
        /// Frees the remaining nodes if a payload's `Drop` panics.
        struct Rest<'a, T, S: RawStorage>(&'a mut RingList<T, S>);

        impl<T, S: RawStorage> Drop for Rest<'_, T, S> {
            fn drop(&mut self) {
                while let Some(value) = self.0.destroy_front() {
                    drop(value);
                }
                self.0.spares.release();
            }
        }

        while let Some(value) = self.destroy_front() {
            let rest = Rest(&mut *self);
            drop(value);
            mem::forget(rest);
        }
        self.spares.release();
    }
}

impl<T, S: RawStorage + Default> Default for RingList<T, S> {
    fn default() -> Self {
        Self::new_in(S::default())
    }
}

impl<T: Clone, S: RawStorage + Clone> Clone for RingList<T, S> {
    fn clone(&self) -> Self {
        self.clone_raw().unwrap_or_else(|err| abort_on(err))
    }
}

impl<T: fmt::Debug, S: RawStorage> fmt::Debug for RingList<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T, U, S1, S2> PartialEq<RingList<U, S2>> for RingList<T, S1>
where
    T: PartialEq<U>,
    S1: RawStorage,
    S2: RawStorage,
{
    fn eq(&self, other: &RingList<U, S2>) -> bool {
        self.len == other.len && self.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<T: PartialEq<U>, U, S: RawStorage> PartialEq<[U]> for RingList<T, S> {
    fn eq(&self, other: &[U]) -> bool {
        self.len == other.len() && self.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<T: PartialEq<U>, U, S: RawStorage, const N: usize> PartialEq<[U; N]> for RingList<T, S> {
    fn eq(&self, other: &[U; N]) -> bool {
        *self == other[..]
    }
}

impl<T: Eq, S: RawStorage> Eq for RingList<T, S> {}

impl<T: Hash, S: RawStorage> Hash for RingList<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for item in self {
            item.hash(state);
        }
    }
}
