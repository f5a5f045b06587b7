//! Slot index types for ring links.
//!
//! Ring nodes name their neighbors by arena slot, not by pointer. The
//! [`Index`] trait abstracts the integer type those links are stored as:
//! the top value of the type is reserved as `NONE`, which index
//! resolution returns for out-of-range positions, so links never need an
//! `Option` wrapper.

/// A copyable slot index with a reserved "no slot" value.
///
/// The default link type is `u32`, which keeps a node's two links at 8
/// bytes total. Narrower types shrink nodes further at the cost of
/// capacity: reserving the top value leaves [`slot_limit`] addressable
/// slots, one of which the sentinel occupies.
///
/// [`slot_limit`]: Index::slot_limit
///
/// # Example
///
/// ```
/// use ringlist::Index;
///
/// assert!(u32::NONE.is_none());
/// assert_eq!(u32::from_slot(7).as_slot(), 7);
///
/// // u8 links: 255 is reserved, slots 0..=254 remain.
/// assert_eq!(u8::slot_limit(), 255);
/// ```
pub trait Index: Copy + Eq {
    /// Reserved value meaning "no slot"; never a valid arena slot.
    const NONE: Self;

    /// Creates an index naming the given arena slot.
    fn from_slot(slot: usize) -> Self;

    /// Returns the arena slot this index names.
    fn as_slot(self) -> usize;

    /// Returns `true` if this is the reserved `NONE` value.
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this index names a slot.
    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Number of slots this index type can address (`NONE` excluded).
    #[inline]
    fn slot_limit() -> usize {
        Self::NONE.as_slot()
    }
}

impl Index for u8 {
    const NONE: Self = u8::MAX;

    #[inline]
    fn from_slot(slot: usize) -> Self {
        slot as u8
    }

    #[inline]
    fn as_slot(self) -> usize {
        self as usize
    }
}

impl Index for u16 {
    const NONE: Self = u16::MAX;

    #[inline]
    fn from_slot(slot: usize) -> Self {
        slot as u16
    }

    #[inline]
    fn as_slot(self) -> usize {
        self as usize
    }
}

impl Index for u32 {
    const NONE: Self = u32::MAX;

    #[inline]
    fn from_slot(slot: usize) -> Self {
        slot as u32
    }

    #[inline]
    fn as_slot(self) -> usize {
        self as usize
    }
}

impl Index for usize {
    const NONE: Self = usize::MAX;

    #[inline]
    fn from_slot(slot: usize) -> Self {
        slot
    }

    #[inline]
    fn as_slot(self) -> usize {
        self
    }
}
