//! Sentinel-anchored circular doubly linked list over a slab arena.
//!
//! Nodes live in a [`slab::Slab`]; traversal links are slot indices, not
//! pointers. One reserved slot, the sentinel, closes the ring: its `next`
//! is the logical head and its `prev` the logical tail, and an empty ring
//! is the sentinel pointing at itself. The sentinel never holds a user
//! value and is never removed.
//!
//! Keeping nodes in an arena sidesteps the classic teardown hazard of
//! owning-pointer lists (a destructor chain that recurses once per node):
//! slots are freed one at a time, and dropping the whole arena is a flat
//! loop over occupied slots.
//!
//! [`Ring`] is the single-owner variant; it performs no locking. The
//! thread-safe wrapper lives in [`crate::concurrent`].
//!
//! # Example
//!
//! ```
//! use ringlist::Ring;
//!
//! let mut ring: Ring<u64> = Ring::new();
//!
//! ring.push_back(1);
//! ring.push_back(2);
//! ring.push_front(0);
//!
//! assert_eq!(ring.len(), 3);
//! assert_eq!(ring.get(1), Some(&1));
//! assert_eq!(ring.pop_front(), Some(0));
//! ```

use slab::Slab;

use crate::Index;

/// Error returned when an insert index is past the end of the list.
///
/// Carries the value back to the caller, so a failed insert never
/// destroys its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds<T>(pub T);

impl<T> OutOfBounds<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> core::fmt::Display for OutOfBounds<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "insert index out of bounds")
    }
}

impl<T: core::fmt::Debug> std::error::Error for OutOfBounds<T> {}

/// A node in the ring.
///
/// The value slot is `None` only for the sentinel (and transiently for
/// the node a transform callback is running on); every reachable node
/// otherwise holds `Some`. Links are arena slot indices, never null: the
/// ring is cyclic, so every node always has a live `prev` and `next`.
#[derive(Debug)]
struct RingNode<T, Idx> {
    value: Option<T>,
    prev: Idx,
    next: Idx,
}

/// A sentinel-anchored circular doubly linked list.
///
/// Supports O(1) push/pop at both ends, O(index) positional insert,
/// removal, read, and in-place transformation. Logical index 0 is the
/// node after the sentinel; index `len - 1` is the node before it.
///
/// # Type Parameters
///
/// - `T`: element type
/// - `Idx`: link index type (default `u32`, which keeps a node at
///   `Option<T>` + 8 bytes of links). A narrower type shrinks nodes but
///   caps the ring at [`Idx::slot_limit()`](crate::Index::slot_limit)
///   slots, sentinel included; growing past that panics on insertion.
#[derive(Debug)]
pub struct Ring<T, Idx: Index = u32> {
    slots: Slab<RingNode<T, Idx>>,
    sentinel: Idx,
    len: usize,
}

impl<T, Idx: Index> Default for Ring<T, Idx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, Idx: Index> Ring<T, Idx> {
    /// Creates an empty ring.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty ring with room for `capacity` elements before the
    /// arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        // One extra slot for the sentinel.
        let mut slots = Slab::with_capacity(capacity + 1);

        let slot = slots.insert(RingNode {
            value: None,
            prev: Idx::NONE,
            next: Idx::NONE,
        });
        let sentinel = Idx::from_slot(slot);

        // Empty ring: the sentinel points at itself in both directions.
        let node = &mut slots[slot];
        node.prev = sentinel;
        node.next = sentinel;

        Self {
            slots,
            sentinel,
            len: 0,
        }
    }

    /// Returns the number of elements in the ring.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the ring holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn node(&self, idx: Idx) -> &RingNode<T, Idx> {
        &self.slots[idx.as_slot()]
    }

    #[inline]
    fn node_mut(&mut self, idx: Idx) -> &mut RingNode<T, Idx> {
        &mut self.slots[idx.as_slot()]
    }

    // ========================================================================
    // Index resolution
    // ========================================================================

    /// Resolves a logical index to its arena slot.
    ///
    /// Walks forward from `sentinel.next`, stopping at the sentinel so an
    /// out-of-range index cannot wrap around the cycle and silently
    /// resolve to `index % len`. Returns `Idx::NONE` when the sentinel is
    /// reached first. O(index).
    fn node_at(&self, index: usize) -> Idx {
        let mut current = self.node(self.sentinel).next;
        let mut i = 0;

        while current != self.sentinel && i < index {
            current = self.node(current).next;
            i += 1;
        }

        if current == self.sentinel {
            Idx::NONE
        } else {
            current
        }
    }

    // ========================================================================
    // Structural mutation
    // ========================================================================

    /// Splices a new node into the ring immediately before `anchor`.
    ///
    /// The sentinel's self-links make the empty ring a non-case: splicing
    /// before the sentinel of an empty ring produces the degenerate
    /// single-element cycle with no special path.
    fn splice_before(&mut self, anchor: Idx, value: T) -> Idx {
        let prev = self.node(anchor).prev;

        let slot = self.slots.insert(RingNode {
            value: Some(value),
            prev,
            next: anchor,
        });
        assert!(slot < Idx::slot_limit(), "ring exceeds index type capacity");
        let idx = Idx::from_slot(slot);

        self.node_mut(prev).next = idx;
        self.node_mut(anchor).prev = idx;
        self.len += 1;

        idx
    }

    /// Pushes a value to the front of the ring. O(1).
    ///
    /// # Panics
    ///
    /// Panics if the ring outgrows the link type: `Idx` can address
    /// [`Idx::slot_limit()`](crate::Index::slot_limit) slots, one of
    /// which is the sentinel's.
    pub fn push_front(&mut self, value: T) {
        let head = self.node(self.sentinel).next;
        self.splice_before(head, value);
    }

    /// Pushes a value to the back of the ring. O(1).
    ///
    /// # Panics
    ///
    /// Panics if the ring outgrows the link type, as for
    /// [`push_front`](Self::push_front).
    pub fn push_back(&mut self, value: T) {
        self.splice_before(self.sentinel, value);
    }

    /// Inserts a value at the given logical index, shifting the former
    /// occupant and everything after it one position toward the back.
    ///
    /// `insert(v, 0)` is equivalent to [`push_front`](Self::push_front)
    /// and `insert(v, len())` to [`push_back`](Self::push_back).
    ///
    /// # Errors
    ///
    /// Returns `Err(OutOfBounds(value))` when `index > len()`, leaving
    /// the ring untouched.
    ///
    /// # Panics
    ///
    /// Panics if the ring outgrows the link type, as for
    /// [`push_front`](Self::push_front).
    pub fn insert(&mut self, value: T, index: usize) -> Result<(), OutOfBounds<T>> {
        if index > self.len {
            return Err(OutOfBounds(value));
        }

        if index == self.len {
            self.push_back(value);
        } else {
            // index < len, so resolution cannot miss
            let target = self.node_at(index);
            self.splice_before(target, value);
        }

        Ok(())
    }

    /// Detaches a node, frees its slot, and returns its value slot.
    ///
    /// Caller must pass a reachable (non-sentinel) slot. The value is
    /// `None` only when a transform callback unwound mid-replacement.
    fn detach(&mut self, idx: Idx) -> Option<T> {
        let node = self.slots.remove(idx.as_slot());

        self.node_mut(node.prev).next = node.next;
        self.node_mut(node.next).prev = node.prev;
        self.len -= 1;

        node.value
    }

    /// Detaches a node, frees its slot, and returns its value.
    ///
    /// Caller must pass a reachable (non-sentinel) slot.
    fn unlink(&mut self, idx: Idx) -> T {
        self.detach(idx).expect("reachable node holds a value")
    }

    /// Removes and returns the front element, or `None` if empty. O(1).
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.node(self.sentinel).next;
        if head == self.sentinel {
            return None;
        }
        Some(self.unlink(head))
    }

    /// Removes and returns the back element, or `None` if empty. O(1).
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.node(self.sentinel).prev;
        if tail == self.sentinel {
            return None;
        }
        Some(self.unlink(tail))
    }

    /// Removes and returns the element at the given index.
    ///
    /// Returns `None` when the ring is empty or the index is out of
    /// range. O(index).
    pub fn pop(&mut self, index: usize) -> Option<T> {
        let target = self.node_at(index);
        if target.is_none() {
            return None;
        }
        Some(self.unlink(target))
    }

    /// Removes every element and resets the ring to the empty state.
    ///
    /// Frees slots one at a time while walking the cycle; no recursion,
    /// regardless of length.
    pub fn clear(&mut self) {
        let mut current = self.node(self.sentinel).next;
        while current != self.sentinel {
            let next = self.node(current).next;
            self.slots.remove(current.as_slot());
            current = next;
        }

        let sentinel = self.sentinel;
        let node = self.node_mut(sentinel);
        node.prev = sentinel;
        node.next = sentinel;
        self.len = 0;
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns a reference to the element at the given index. O(index).
    pub fn get(&self, index: usize) -> Option<&T> {
        let idx = self.node_at(index);
        if idx.is_none() {
            return None;
        }
        self.node(idx).value.as_ref()
    }

    /// Returns a mutable reference to the element at the given index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let idx = self.node_at(index);
        if idx.is_none() {
            return None;
        }
        self.node_mut(idx).value.as_mut()
    }

    /// Returns a reference to the front element. O(1).
    pub fn front(&self) -> Option<&T> {
        let head = self.node(self.sentinel).next;
        if head == self.sentinel {
            return None;
        }
        self.node(head).value.as_ref()
    }

    /// Returns a mutable reference to the front element. O(1).
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let head = self.node(self.sentinel).next;
        if head == self.sentinel {
            return None;
        }
        self.node_mut(head).value.as_mut()
    }

    /// Returns a reference to the back element. O(1).
    pub fn back(&self) -> Option<&T> {
        let tail = self.node(self.sentinel).prev;
        if tail == self.sentinel {
            return None;
        }
        self.node(tail).value.as_ref()
    }

    /// Returns a mutable reference to the back element. O(1).
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let tail = self.node(self.sentinel).prev;
        if tail == self.sentinel {
            return None;
        }
        self.node_mut(tail).value.as_mut()
    }

    // ========================================================================
    // Transformation
    // ========================================================================

    /// Replaces the value at `idx` with `f` applied to it.
    ///
    /// The value is moved out of the node while `f` runs. If `f`
    /// unwinds, the guard detaches the now-valueless node so the ring
    /// stays closed and `len` stays honest; the unwind then continues.
    fn apply<F>(&mut self, idx: Idx, f: F)
    where
        F: FnOnce(T) -> T,
    {
        struct HoleGuard<'a, T, Idx: Index> {
            ring: &'a mut Ring<T, Idx>,
            idx: Idx,
        }

        impl<T, Idx: Index> Drop for HoleGuard<'_, T, Idx> {
            fn drop(&mut self) {
                self.ring.detach(self.idx);
            }
        }

        let value = self
            .node_mut(idx)
            .value
            .take()
            .expect("reachable node holds a value");

        let guard = HoleGuard { ring: self, idx };
        let value = f(value);
        guard.ring.node_mut(idx).value = Some(value);
        core::mem::forget(guard);
    }

    /// Replaces every element with `f(old_value)`, front to back.
    ///
    /// An empty ring performs no calls to `f`.
    ///
    /// If `f` panics, the element whose transform panicked is removed
    /// from the ring; elements already visited keep their new values,
    /// later ones are untouched, and the ring remains closed and usable.
    pub fn map<F>(&mut self, mut f: F)
    where
        F: FnMut(T) -> T,
    {
        let mut current = self.node(self.sentinel).next;
        while current != self.sentinel {
            self.apply(current, &mut f);
            current = self.node(current).next;
        }
    }

    /// Replaces the element at `index` with `f(old_value)`.
    ///
    /// Returns `true` if a replacement happened. When the index is out of
    /// range, `f` is never invoked and `false` is returned.
    ///
    /// If `f` panics, the target element is removed and the ring remains
    /// closed and usable.
    pub fn modify<F>(&mut self, index: usize, f: F) -> bool
    where
        F: FnOnce(T) -> T,
    {
        let idx = self.node_at(index);
        if idx.is_none() {
            return false;
        }
        self.apply(idx, f);
        true
    }

    /// Replaces the front element with `f(old_value)`. O(1).
    ///
    /// Returns `true` if a replacement happened.
    pub fn modify_front<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(T) -> T,
    {
        let head = self.node(self.sentinel).next;
        if head == self.sentinel {
            return false;
        }
        self.apply(head, f);
        true
    }

    /// Replaces the back element with `f(old_value)`. O(1).
    ///
    /// Returns `true` if a replacement happened.
    pub fn modify_back<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(T) -> T,
    {
        let tail = self.node(self.sentinel).prev;
        if tail == self.sentinel {
            return false;
        }
        self.apply(tail, f);
        true
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns a double-ended iterator over references, front to back.
    pub fn iter(&self) -> Iter<'_, T, Idx> {
        Iter {
            ring: self,
            front: self.node(self.sentinel).next,
            back: self.node(self.sentinel).prev,
            remaining: self.len,
        }
    }

    /// Walks the cycle in both directions and checks it against `len`.
    #[cfg(test)]
    pub(crate) fn assert_closed(&self) {
        let mut steps = 0;
        let mut current = self.node(self.sentinel).next;
        while current != self.sentinel {
            let next = self.node(current).next;
            assert!(self.node(next).prev == current, "broken neighbor link");
            assert!(self.node(current).value.is_some(), "valueless user node");
            current = next;
            steps += 1;
            assert!(steps <= self.len, "forward walk exceeded len");
        }
        assert_eq!(steps, self.len, "forward walk disagrees with len");

        let mut steps = 0;
        let mut current = self.node(self.sentinel).prev;
        while current != self.sentinel {
            current = self.node(current).prev;
            steps += 1;
            assert!(steps <= self.len, "backward walk exceeded len");
        }
        assert_eq!(steps, self.len, "backward walk disagrees with len");

        assert!(self.node(self.sentinel).value.is_none());
        // Sentinel slot plus one slot per element.
        assert_eq!(self.slots.len(), self.len + 1);
    }
}

impl<'a, T, Idx: Index> IntoIterator for &'a Ring<T, Idx> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, Idx>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, Idx: Index> FromIterator<T> for Ring<T, Idx> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut ring = Self::with_capacity(iter.size_hint().0);
        for value in iter {
            ring.push_back(value);
        }
        ring
    }
}

/// Double-ended iterator over ring elements.
///
/// Counts down `remaining` rather than watching for cursor crossing; the
/// front and back cursors meeting is not a terminal state on a cycle.
pub struct Iter<'a, T, Idx: Index> {
    ring: &'a Ring<T, Idx>,
    front: Idx,
    back: Idx,
    remaining: usize,
}

impl<'a, T, Idx: Index> Iterator for Iter<'a, T, Idx> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.ring.node(self.front);
        self.front = node.next;
        self.remaining -= 1;
        node.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, Idx: Index> DoubleEndedIterator for Iter<'_, T, Idx> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.ring.node(self.back);
        self.back = node.prev;
        self.remaining -= 1;
        node.value.as_ref()
    }
}

impl<T, Idx: Index> ExactSizeIterator for Iter<'_, T, Idx> {}
