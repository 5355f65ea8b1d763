use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use rawstore::{Global, RawStorage};

use crate::core::RingList;
use crate::node::{Link, Node};

/// Borrowing iterator over a `RingList`, front to back.
///
/// Follows `next` links from the front and `prev` links from the back, and
/// stops after `len` elements in total.
pub struct Iter<'a, T, S: RawStorage = Global> {
    front: Link<T, S>,
    back: Link<T, S>,
    remaining: usize,
    _borrow: PhantomData<&'a RingList<T, S>>,
}

// SAFETY: behaves like `&RingList<T, S>`.
unsafe impl<T: Sync, S: RawStorage + Sync> Send for Iter<'_, T, S> {}
// SAFETY: as above.
unsafe impl<T: Sync, S: RawStorage + Sync> Sync for Iter<'_, T, S> {}

impl<T, S: RawStorage> Iter<'_, T, S> {
    pub(crate) fn new(front: Link<T, S>, back: Link<T, S>, remaining: usize) -> Self {
        Self {
            front,
            back,
            remaining,
            _borrow: PhantomData,
        }
    }
}

impl<T, S: RawStorage> Clone for Iter<'_, T, S> {
    fn clone(&self) -> Self {
        Self::new(self.front, self.back, self.remaining)
    }
}

impl<'a, T, S: RawStorage> Iterator for Iter<'a, T, S> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front?;
        self.remaining -= 1;
        // SAFETY: `remaining` counts the linked nodes between front and back,
        // and the list is borrowed shared for `'a`.
        unsafe {
            self.front = (*node.as_ptr()).next;
            Some(Node::value(node))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, S: RawStorage> DoubleEndedIterator for Iter<'_, T, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back?;
        self.remaining -= 1;
        // SAFETY: as in `next`.
        unsafe {
            self.back = (*node.as_ptr()).prev;
            Some(Node::value(node))
        }
    }
}

impl<T, S: RawStorage> ExactSizeIterator for Iter<'_, T, S> {}

impl<T, S: RawStorage> FusedIterator for Iter<'_, T, S> {}

impl<T: fmt::Debug, S: RawStorage> fmt::Debug for Iter<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Mutably borrowing iterator over a `RingList`.
pub struct IterMut<'a, T, S: RawStorage = Global> {
    front: Link<T, S>,
    back: Link<T, S>,
    remaining: usize,
    _borrow: PhantomData<&'a mut RingList<T, S>>,
}

// SAFETY: behaves like `&mut [T]` over the nodes it has not yielded yet.
unsafe impl<T: Send, S: RawStorage> Send for IterMut<'_, T, S> {}
// SAFETY: shared access to the iterator gives no access to any element.
unsafe impl<T: Sync, S: RawStorage> Sync for IterMut<'_, T, S> {}

impl<T, S: RawStorage> IterMut<'_, T, S> {
    pub(crate) fn new(front: Link<T, S>, back: Link<T, S>, remaining: usize) -> Self {
        Self {
            front,
            back,
            remaining,
            _borrow: PhantomData,
        }
    }
}

impl<'a, T, S: RawStorage> Iterator for IterMut<'a, T, S> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front?;
        self.remaining -= 1;
        // SAFETY: the links are read through the raw pointer, never through
        // a yielded payload, and each node is yielded at most once.
        unsafe {
            self.front = (*node.as_ptr()).next;
            Some(Node::value_mut(node))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, S: RawStorage> DoubleEndedIterator for IterMut<'_, T, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back?;
        self.remaining -= 1;
        // SAFETY: as in `next`.
        unsafe {
            self.back = (*node.as_ptr()).prev;
            Some(Node::value_mut(node))
        }
    }
}

impl<T, S: RawStorage> ExactSizeIterator for IterMut<'_, T, S> {}

impl<T, S: RawStorage> FusedIterator for IterMut<'_, T, S> {}

impl<T, S: RawStorage> fmt::Debug for IterMut<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("remaining", &self.remaining)
            .finish()
    }
}

/// Owning iterator over a `RingList`. Unyielded elements are dropped with it.
pub struct IntoIter<T, S: RawStorage = Global> {
    list: RingList<T, S>,
}

impl<T, S: RawStorage> Iterator for IntoIter<T, S> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, S: RawStorage> DoubleEndedIterator for IntoIter<T, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T, S: RawStorage> ExactSizeIterator for IntoIter<T, S> {}

impl<T, S: RawStorage> FusedIterator for IntoIter<T, S> {}

impl<T: fmt::Debug, S: RawStorage> fmt::Debug for IntoIter<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

impl<T, S: RawStorage> IntoIterator for RingList<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T, S>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T, S: RawStorage> IntoIterator for &'a RingList<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, S: RawStorage> IntoIterator for &'a mut RingList<T, S> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
