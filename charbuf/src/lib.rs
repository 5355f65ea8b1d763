#![no_std]

//! `CharBuf`: a growable buffer of code units that always keeps a `NUL`
//! terminator behind its contents, on an explicit allocation policy.
//!
//! Units are bytes by default, or UTF-16 and UTF-32 units through the
//! [`CodeUnit`] parameter. The buffer never interprets them; searching and
//! comparison work on plain units.
//!
//! # Performance Characteristics
//!
//! - `push()`, `append()`: amortized O(1) per unit; a full buffer grows to
//!   twice its slots, or 8 slots from empty, or exactly what is needed when
//!   that is more
//! - `insert*()`, `erase()`: O(distance to end), by shifting the tail
//! - `find*()`: O(n × m) for a needle of m units, O(n × k) for a set of k
//! - `as_nul_terminated()`: O(1), the terminator is kept up to date
//! - `swap_with()`: O(1)
//!
//! ```
//! # use charbuf::{CharBuf, CharBufError};
//! let mut text = CharBuf::try_from_str("hello").unwrap();
//! text.push_str(" world").unwrap();
//!
//! assert_eq!(text.find_units(b"world", 0), Some(6));
//! assert_eq!(text.find_units(b"xyz", 0), None);
//! assert_eq!(text.as_nul_terminated().last(), Some(&0));
//!
//! let word = text.substr(6, 100).unwrap();
//! assert_eq!(word, "world");
//! assert_eq!(
//!     text.substr(12, 1),
//!     Err(CharBufError::OutOfRange { pos: 12, length: 11 })
//! );
//! ```
//!
//! # Wide Units
//!
//! ```
//! # use charbuf::CharBuf;
//! let units: Vec<u16> = "päivää".encode_utf16().collect();
//! let text = CharBuf::<u16>::try_from_units(&units).unwrap();
//!
//! assert_eq!(text.find_first_of(&[u16::from(b'v')], 0), Some(3));
//! assert_eq!(format!("{text:?}"), "\"päivää\"");
//! ```
//!
//! # Bounded Storage
//!
//! ```
//! # use charbuf::{Bounded, CharBuf, CharBufError};
//! let budget = Bounded::new(8);
//! let mut text = CharBuf::<u8, _>::new_in(budget.clone());
//!
//! text.append(b"1234567").unwrap();
//! assert!(matches!(text.push(b'8'), Err(CharBufError::Alloc(_))));
//! assert_eq!(text, "1234567");
//!
//! drop(text);
//! assert_eq!(budget.live_blocks(), 0);
//! ```

mod code_unit;
mod core;
mod error;
mod search;

pub use crate::core::CharBuf;
pub use code_unit::CodeUnit;
pub use error::CharBufError;
pub use rawstore::{Bounded, Global, RawStorage};
