#![no_std]

//! `SeqVec`: a contiguous growable sequence with an explicit allocation policy.
//!
//! Storage is drawn from a [`RawStorage`] value owned by the sequence
//! ([`Global`] by default), and every operation that may allocate returns a
//! `Result` instead of aborting.
//!
//! # Performance Characteristics
//!
//! - `push()`: amortized O(1); a full sequence grows to `max(1, 2 × capacity)`
//! - `pop()`, `get()`, `at()`: O(1)
//! - `insert()`, `remove()`, `erase()`: O(distance to end), by shifting the tail
//! - `reserve(n)`: allocates exactly `n` slots, O(len) element moves
//! - `swap_with()`: O(1), no element is touched
//!
//! # Error Safety
//!
//! New storage is allocated before anything is moved, so an allocation
//! failure leaves the sequence as it was. A panic in a user `Clone` during a
//! multi-element insert closes the gap again; a panic in a user `Drop` during
//! `erase` still shifts the tail. Nothing is leaked or dropped twice.
//!
//! ```
//! # use seqvec::{SeqVec, SeqVecError};
//! let mut seq = SeqVec::from_array([1, 2, 3]).unwrap();
//!
//! seq.insert(1, 4).unwrap();
//! assert_eq!(seq, [1, 4, 2, 3]);
//!
//! assert_eq!(seq.remove(0), Ok(1));
//! assert_eq!(
//!     seq.at(7),
//!     Err(SeqVecError::IndexOutOfBounds { index: 7, length: 3 })
//! );
//! ```
//!
//! # Bounded Storage
//!
//! ```
//! # use rawstore::Bounded;
//! # use seqvec::{SeqVec, SeqVecError};
//! let budget = Bounded::new(16);
//! let mut seq = SeqVec::new_in(budget.clone());
//!
//! seq.extend_from_slice(&[1u32, 2, 3, 4]).unwrap();
//! assert!(matches!(seq.push(5), Err(SeqVecError::Alloc(_))));
//! assert_eq!(seq.len(), 4);
//!
//! drop(seq);
//! assert_eq!(budget.live_blocks(), 0);
//! ```
//!
//! # Cursors
//!
//! Random-access positions come in a read-only and a mutable flavour. A
//! mutable cursor converts into a read-only one, never the reverse:
//!
//! ```
//! # use seqvec::{Cursor, SeqVec};
//! let mut seq = SeqVec::from_array([10, 20, 30, 40]).unwrap();
//!
//! let mut first = seq.begin_mut();
//! first.advance(2);
//! *first.current_mut().unwrap() += 5;
//! let first: Cursor<'_, _> = first.into();
//! assert_eq!(first.current(), Some(&35));
//!
//! let begin = seq.begin();
//! let end = seq.end();
//! assert_eq!(begin.distance_to(&end), 4);
//! assert!(begin < end);
//! assert_eq!(end.current(), None);
//! ```

mod core;
mod cursor;
mod error;
mod iter;

pub use crate::core::SeqVec;
pub use cursor::{Cursor, CursorMut};
pub use error::SeqVecError;
pub use iter::IntoIter;
pub use rawstore::{Bounded, Global, RawStorage};
