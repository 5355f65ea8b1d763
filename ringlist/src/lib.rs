#![no_std]

//! `RingList`: a doubly linked ring with a sentinel node, drawing node
//! storage from an explicit allocation policy.
//!
//! Nodes are addressed by [`Position`] values instead of references. The end
//! position names the sentinel, which sits between the last and the first
//! element, so walking forward from the end reaches the front and walking
//! backward reaches the back. Positions carry the identity of the list that
//! handed them out: a position from another list, or one whose node was
//! removed or given away, is rejected and never followed.
//!
//! Each node is allocated on its own and remembers its policy, so nodes move
//! between lists by relinking alone.
//!
//! # Performance Characteristics
//!
//! - `push_*()`, `pop_*()`, `insert()`, `remove()`: O(1), only the two
//!   neighbours are relinked
//! - `move_to()`: O(1); `move_range_to()`: O(1) relinking after an O(k)
//!   walk that checks the run
//! - `splice()`, `splice_one()`: O(1); `splice_range()`: O(1) relinking
//!   after an O(k) walk that checks and counts the run. Nothing is allocated
//!   and no payload moves
//! - `merge()`: O(n + m) comparisons, no allocation
//! - `at()`, `position_of()`: O(min(i, n - i))
//! - `swap_with()`: O(1)
//!
//! ```
//! # use ringlist::{RingList, RingListError};
//! let mut list = RingList::from_array([1, 2, 3]).unwrap();
//!
//! let second = list.next_of(list.begin()).unwrap();
//! let inserted = list.insert(second, 9).unwrap();
//! assert_eq!(list, [1, 9, 2, 3]);
//!
//! assert_eq!(list.remove(inserted), Ok(9));
//! assert_eq!(list.remove(inserted), Err(RingListError::InvalidPosition));
//! assert_eq!(list.remove(list.end()), Err(RingListError::PositionIsEnd));
//! ```
//!
//! # Splicing and Merging
//!
//! ```
//! # use ringlist::RingList;
//! let mut odds = RingList::from_array([1, 3, 5]).unwrap();
//! let mut evens = RingList::from_array([2, 4, 6]).unwrap();
//!
//! odds.merge(&mut evens);
//! assert_eq!(odds, [1, 2, 3, 4, 5, 6]);
//! assert!(evens.is_empty());
//!
//! let mut tail = RingList::from_array([7, 8]).unwrap();
//! let end = odds.end();
//! odds.splice(end, &mut tail).unwrap();
//! assert_eq!(odds.len(), 8);
//! ```
//!
//! # Cursors
//!
//! ```
//! # use ringlist::RingList;
//! let mut list = RingList::from_array([1, 2, 3, 4]).unwrap();
//!
//! let mut cursor = list.cursor_front_mut();
//! while !cursor.is_end() {
//!     if cursor.current().is_some_and(|value| value % 2 == 0) {
//!         cursor.remove_current().unwrap();
//!     } else {
//!         cursor.move_next();
//!     }
//! }
//! assert_eq!(list, [1, 3]);
//! ```

mod core;
mod cursor;
mod error;
mod iter;
mod node;

pub use crate::core::{Position, RingList};
pub use cursor::{Cursor, CursorMut};
pub use error::RingListError;
pub use iter::{IntoIter, Iter, IterMut};
pub use rawstore::{Bounded, Global, RawStorage};
