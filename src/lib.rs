//! Sentinel-anchored doubly linked lists with a lock-guarded concurrent
//! variant.
//!
//! # Design
//!
//! Both list types store their nodes in a slab arena and link them by
//! slot index instead of pointer:
//!
//! ```text
//! Slab<RingNode<T>>   - owns the nodes, stable slots, freed slots recycled
//! Ring / ConcurrentList - wire slots into a cycle through the sentinel
//! ```
//!
//! One reserved slot, the sentinel, closes the cycle. It never holds a
//! user value; its `next` is the logical head and its `prev` the logical
//! tail, and an empty list is the sentinel pointing at itself. That
//! yields:
//!
//! - **No recursive teardown**: dropping or clearing frees flat slots,
//!   never a "free my successor" destructor chain. A list of a million
//!   nodes clears without touching the call stack.
//! - **No null links**: every node always has a live `prev` and `next`,
//!   so splices never branch on end-of-list.
//! - **Compact nodes**: links are `u32` by default rather than
//!   machine-word pointers.
//!
//! # Two variants
//!
//! - [`Ring`] is the single-owner list: `&mut self` operations, borrowed
//!   access, iterators. Use it when one owner holds the data.
//! - [`ConcurrentList`] shares one [`Ring`] across threads behind a
//!   single reader/writer lock. Reads take the lock shared and clone
//!   values out; every mutation, including the `map`/`modify*` transform
//!   operations, runs as one exclusive critical section. See the
//!   [`concurrent`] module docs for the callback contract.
//!
//! # Quick start
//!
//! ```
//! use ringlist::ConcurrentList;
//!
//! let list: ConcurrentList<u64> = ConcurrentList::new();
//!
//! list.push_back(1);
//! list.push_back(3);
//! list.insert(2, 1).unwrap();
//!
//! assert_eq!(list.get(1), Some(2));
//!
//! list.modify(1, |v| v * 10);
//! assert_eq!(list.to_vec(), vec![1, 20, 3]);
//!
//! assert_eq!(list.pop_front(), Some(1));
//! ```

#![warn(missing_docs)]

pub mod concurrent;
pub mod index;
pub mod ring;

pub use concurrent::ConcurrentList;
pub use index::Index;
pub use ring::{Iter, OutOfBounds, Ring};
