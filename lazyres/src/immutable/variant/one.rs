use crate::sequence::SequenceCore;
use crate::slot::{Slot, SlotRef};

/// A single element, stored inline without an array.
///
/// An inline value is copied with the list; only a deferred cell is shared
/// between clones.
#[derive(Clone)]
pub struct One<T> {
    slot: Slot<T>,
}

impl<T> One<T> {
    pub(crate) fn new(slot: Slot<T>) -> Self {
        One { slot }
    }

    pub(crate) fn raw(&self) -> &Slot<T> {
        &self.slot
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.slot, &other.slot) {
            (Slot::Deferred(a), Slot::Deferred(b)) => a.ptr_eq(b),
            _ => std::ptr::eq(self, other),
        }
    }
}

impl<T> SequenceCore for One<T> {
    type Item = T;

    #[inline]
    fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    fn len(&self) -> usize {
        1
    }

    #[inline]
    fn slot(&self, index: usize) -> SlotRef<'_, T> {
        assert!(
            index == 0,
            "index {index} out of bounds for a single element sequence"
        );
        self.slot.as_ref()
    }

    #[inline]
    fn is_any_unresolved(&self) -> bool {
        self.slot.is_unresolved()
    }
}
