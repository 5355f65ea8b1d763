//! Nodes of a `RingList`.
//!
//! Every node is its own block from an allocation policy and carries a clone
//! of that policy, so it is freed through the policy it came from whichever
//! list owns it by then. Moving nodes between lists is therefore relinking
//! only: payloads stay where they are and nothing is allocated.
//!
//! Taking the payload out of a node bumps its generation. Vacant nodes are
//! parked on a spare chain, threaded through `next`, and reused by later
//! inserts; their memory stays valid until the chain is released.

use core::mem::MaybeUninit;
use core::ptr::{self, NonNull};

use rawstore::{AllocError, RawStorage};

/// A link to a node; `None` is the sentinel.
pub(crate) type Link<T, S> = Option<NonNull<Node<T, S>>>;

pub(crate) struct Node<T, S: RawStorage> {
    pub(crate) prev: Link<T, S>,
    pub(crate) next: Link<T, S>,
    pub(crate) generation: u32,
    value: MaybeUninit<T>,
    storage: S,
}

impl<T, S: RawStorage> Node<T, S> {
    /// Allocates a node without a payload.
    pub(crate) fn vacant(storage: &S) -> Result<NonNull<Self>, AllocError>
    where
        S: Clone,
    {
        let node = storage.allocate::<Self>(1)?;
        let vacant = Self {
            prev: None,
            next: None,
            generation: 0,
            value: MaybeUninit::uninit(),
            storage: storage.clone(),
        };
        // SAFETY: the block is fresh and sized for one node.
        unsafe { storage.construct(node.as_ptr(), vacant) };
        Ok(node)
    }

    /// # Safety
    ///
    /// `node` must hold a payload, and no mutable reference to it may exist
    /// during `'a`.
    pub(crate) unsafe fn value<'a>(node: NonNull<Self>) -> &'a T {
        unsafe { (*node.as_ptr()).value.assume_init_ref() }
    }

    /// # Safety
    ///
    /// `node` must hold a payload, and no other reference to it may exist
    /// during `'a`.
    pub(crate) unsafe fn value_mut<'a>(node: NonNull<Self>) -> &'a mut T {
        unsafe { (*node.as_ptr()).value.assume_init_mut() }
    }

    /// # Safety
    ///
    /// `node` must be vacant.
    pub(crate) unsafe fn fill(node: NonNull<Self>, value: T) {
        unsafe { (*node.as_ptr()).value.write(value) };
    }

    /// Moves the payload out and bumps the generation.
    ///
    /// # Safety
    ///
    /// `node` must hold a payload.
    pub(crate) unsafe fn empty(node: NonNull<Self>) -> T {
        unsafe {
            let slot = node.as_ptr();
            (*slot).generation = (*slot).generation.wrapping_add(1);
            (*slot).value.assume_init_read()
        }
    }

    /// Returns the block of a vacant node to its policy.
    ///
    /// # Safety
    ///
    /// `node` must be vacant and unreachable afterwards.
    pub(crate) unsafe fn free(node: NonNull<Self>) {
        unsafe {
            let storage = ptr::addr_of!((*node.as_ptr()).storage).read();
            storage.deallocate(node, 1);
        }
    }
}

/// Vacant nodes kept for reuse.
pub(crate) struct Spares<T, S: RawStorage> {
    head: Link<T, S>,
    len: usize,
}

impl<T, S: RawStorage> Spares<T, S> {
    pub(crate) const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// # Safety
    ///
    /// `node` must be vacant and linked nowhere else.
    pub(crate) unsafe fn push(&mut self, node: NonNull<Node<T, S>>) {
        unsafe {
            (*node.as_ptr()).prev = None;
            (*node.as_ptr()).next = self.head;
        }
        self.head = Some(node);
        self.len += 1;
    }

    pub(crate) fn pop(&mut self) -> Link<T, S> {
        let node = self.head?;
        // SAFETY: parked nodes stay allocated while they are on the chain.
        self.head = unsafe { (*node.as_ptr()).next };
        self.len -= 1;
        Some(node)
    }

    /// Frees every parked node.
    pub(crate) fn release(&mut self) {
        while let Some(node) = self.pop() {
            // SAFETY: parked nodes are vacant, and `pop` unchained this one.
            unsafe { Node::free(node) };
        }
    }
}
