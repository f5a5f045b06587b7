//! Lock-guarded concurrent variant of the ring list.
//!
//! [`ConcurrentList`] wraps a [`Ring`] in a single `parking_lot` reader/
//! writer lock. Every public operation is exactly one critical section:
//! shared for pure reads (`get*`, `len`, `is_empty`), exclusive for
//! anything that mutates structure or values. The lock totally orders
//! writers against each other and against readers, so no caller ever
//! observes a partially rewired cycle.
//!
//! Values cross the lock boundary by move (`pop*`) or by clone (`get*`);
//! no reference to a node survives outside a critical section.
//!
//! # Composite operations
//!
//! `modify` and `map` resolve their target and apply the caller's
//! transform inside one exclusive section. The naive alternative -- read
//! the value, compute, write it back through two separate acquisitions --
//! is unsound under concurrent structural changes: the element at a given
//! index can change between the two calls.
//!
//! # Callback contract
//!
//! The transform passed to [`map`](ConcurrentList::map) and
//! [`modify*`](ConcurrentList::modify) runs while the exclusive lock is
//! held. It must not call back into the same list, directly or
//! transitively; the lock is not reentrant and doing so deadlocks. This
//! is a precondition, not a runtime-detected error.
//!
//! A transform that panics does not corrupt the list. `parking_lot`
//! locks do not poison, so other threads keep operating on the same
//! ring; the element whose transform panicked is removed (its value was
//! consumed by the callback), every invariant holds, and the panic
//! resumes on the calling thread.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use ringlist::ConcurrentList;
//!
//! let list: Arc<ConcurrentList<u64>> = Arc::new(ConcurrentList::new());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let list = Arc::clone(&list);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 list.push_back(t * 100 + i);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(list.len(), 400);
//! ```

use crossbeam_utils::CachePadded;
use parking_lot::RwLock;

use crate::{Index, OutOfBounds, Ring};

/// A sentinel-anchored list safe for shared use across threads.
///
/// All operations take `&self`; interior mutability is provided by one
/// coarse reader/writer lock covering the whole ring. List-wide
/// operations (`map`, `clear`) are first-class here, which is what makes
/// a single lock the right grain: per-node locking would force a
/// lock-ordering protocol for every splice without helping those at all.
///
/// Every operation may block waiting for the lock. There are no try/
/// timeout variants and no cancellation.
pub struct ConcurrentList<T, Idx: Index = u32> {
    inner: CachePadded<RwLock<Ring<T, Idx>>>,
}

impl<T, Idx: Index> Default for ConcurrentList<T, Idx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, Idx: Index> ConcurrentList<T, Idx> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            inner: CachePadded::new(RwLock::new(Ring::new())),
        }
    }

    /// Creates an empty list with room for `capacity` elements before
    /// the arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: CachePadded::new(RwLock::new(Ring::with_capacity(capacity))),
        }
    }

    /// Returns the current number of elements.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the list currently holds no elements.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    // ========================================================================
    // Structural mutation (exclusive lock)
    // ========================================================================

    /// Pushes a value to the front of the list.
    pub fn push_front(&self, value: T) {
        self.inner.write().push_front(value);
    }

    /// Pushes a value to the back of the list.
    pub fn push_back(&self, value: T) {
        self.inner.write().push_back(value);
    }

    /// Inserts a value at the given logical index.
    ///
    /// The bounds check and the splice happen under one exclusive
    /// acquisition, so the index cannot go stale between them.
    ///
    /// # Errors
    ///
    /// Returns `Err(OutOfBounds(value))` when `index` is greater than the
    /// length at the time the lock is acquired; the list is left
    /// untouched.
    pub fn insert(&self, value: T, index: usize) -> Result<(), OutOfBounds<T>> {
        self.inner.write().insert(value, index)
    }

    /// Removes and returns the front element, or `None` if empty.
    pub fn pop_front(&self) -> Option<T> {
        self.inner.write().pop_front()
    }

    /// Removes and returns the back element, or `None` if empty.
    pub fn pop_back(&self) -> Option<T> {
        self.inner.write().pop_back()
    }

    /// Removes and returns the element at the given index.
    ///
    /// Returns `None` when the list is empty or the index is out of
    /// range; the length check and the unlink are atomic, so the count
    /// can never underflow on a raced pop.
    pub fn pop(&self, index: usize) -> Option<T> {
        self.inner.write().pop(index)
    }

    /// Removes every element, resetting the list to the empty state.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    // ========================================================================
    // Transformation (exclusive lock, caller callback runs under it)
    // ========================================================================

    /// Replaces every element with `f(old_value)`, front to back, in one
    /// exclusive critical section.
    ///
    /// An empty list performs no calls to `f`. Concurrent `map` calls
    /// serialize: with K threads each applying `|v| v + 1`, every element
    /// ends up exactly `K` larger.
    ///
    /// `f` must not call back into this list; if it panics, the element
    /// being transformed is removed (see the module docs).
    pub fn map<F>(&self, f: F)
    where
        F: FnMut(T) -> T,
    {
        self.inner.write().map(f);
    }

    /// Replaces the element at `index` with `f(old_value)`.
    ///
    /// Returns `true` if a replacement happened. When the index is out
    /// of range, `f` is never invoked and the list is untouched.
    ///
    /// `f` must not call back into this list; if it panics, the element
    /// being transformed is removed (see the module docs).
    pub fn modify<F>(&self, index: usize, f: F) -> bool
    where
        F: FnOnce(T) -> T,
    {
        self.inner.write().modify(index, f)
    }

    /// Replaces the front element with `f(old_value)`.
    ///
    /// Returns `true` if a replacement happened; `false` on an empty
    /// list, without invoking `f`.
    pub fn modify_front<F>(&self, f: F) -> bool
    where
        F: FnOnce(T) -> T,
    {
        self.inner.write().modify_front(f)
    }

    /// Replaces the back element with `f(old_value)`.
    ///
    /// Returns `true` if a replacement happened; `false` on an empty
    /// list, without invoking `f`.
    pub fn modify_back<F>(&self, f: F) -> bool
    where
        F: FnOnce(T) -> T,
    {
        self.inner.write().modify_back(f)
    }
}

impl<T: Clone, Idx: Index> ConcurrentList<T, Idx> {
    /// Returns a clone of the element at the given index.
    ///
    /// Returns `None` when the list is empty or the index is out of
    /// range. Cloning under the shared lock is what lets the reference
    /// stay inside the critical section.
    pub fn get(&self, index: usize) -> Option<T> {
        self.inner.read().get(index).cloned()
    }

    /// Returns a clone of the front element, or `None` if empty.
    pub fn get_front(&self) -> Option<T> {
        self.inner.read().front().cloned()
    }

    /// Returns a clone of the back element, or `None` if empty.
    pub fn get_back(&self) -> Option<T> {
        self.inner.read().back().cloned()
    }

    /// Returns a snapshot of the whole list, front to back, taken under
    /// one shared acquisition.
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.read().iter().cloned().collect()
    }
}

impl<T, Idx: Index> FromIterator<T> for ConcurrentList<T, Idx> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            inner: CachePadded::new(RwLock::new(Ring::from_iter(iter))),
        }
    }
}
