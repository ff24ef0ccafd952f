use std::sync::Arc;

use crate::immutable::variant::{Empty, Many, One, Storage};
use crate::immutable::ImmutableList;
use crate::slot::{Slot, SlotRef};

/// Collects slots for a new immutable sequence.
///
/// When the sequence is built, the buffer picks the storage: nothing, a
/// single slot, or an array. An array whose slots are all resolved is stored
/// as plain values, so the result reads without going through any cell.
pub(crate) struct SlotBuffer<T> {
    slots: Vec<Slot<T>>,
}

impl<T: Clone> SlotBuffer<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Copy a borrowed slot; a still pending cell is shared, not forced.
    #[inline]
    pub(crate) fn push_ref(&mut self, slot: SlotRef<'_, T>) {
        self.slots.push(slot.to_slot());
    }

    #[inline]
    pub(crate) fn push_slot(&mut self, mut slot: Slot<T>) {
        slot.settle();
        self.slots.push(slot);
    }

    #[inline]
    pub(crate) fn push_value(&mut self, value: T) {
        self.slots.push(Slot::Value(value));
    }

    pub(crate) fn finish(self) -> ImmutableList<T> {
        let mut slots = self.slots;
        match slots.len() {
            0 => ImmutableList::Empty(Empty::new()),
            1 => match slots.pop() {
                Some(mut slot) => {
                    slot.settle();
                    ImmutableList::One(One::new(slot))
                }
                None => unreachable!("a buffer of length 1 has a slot"),
            },
            _ => ImmutableList::Many(Many::new(storage(slots))),
        }
    }
}

/// Array storage for `slots`, degraded to plain values when none of them
/// is pending any more.
pub(crate) fn storage<T: Clone>(slots: Vec<Slot<T>>) -> Storage<T> {
    if slots.iter().any(Slot::is_unresolved) {
        Storage::Lazy(Arc::from(slots))
    } else {
        tracing::trace!(len = slots.len(), "storing settled sequence as plain values");
        Storage::Plain(slots.into_iter().map(Slot::into_value).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Deferred, ImmutableList, SequenceCore, SequenceExt, Slot};

    use super::*;

    #[test]
    fn test_finish_picks_variant() {
        let buffer = SlotBuffer::<i32>::with_capacity(0);
        assert!(matches!(buffer.finish(), ImmutableList::Empty(_)));

        let mut buffer = SlotBuffer::with_capacity(1);
        buffer.push_value(1);
        assert!(matches!(buffer.finish(), ImmutableList::One(_)));

        let mut buffer = SlotBuffer::with_capacity(2);
        buffer.push_value(1);
        buffer.push_value(2);
        assert!(matches!(buffer.finish(), ImmutableList::Many(_)));
    }

    #[test]
    fn test_finish_degrades_settled_slots() {
        let cell = Deferred::new(|| 2);
        let mut buffer = SlotBuffer::with_capacity(2);
        buffer.push_value(1);
        buffer.push_slot(Slot::Deferred(cell.clone()));
        cell.get();
        let list = buffer.finish();
        assert!(!list.is_any_unresolved());
        assert!(list.is_plain());
        assert_eq!(list, [1, 2]);
    }

    #[test]
    fn test_finish_keeps_pending_cells() {
        let cell = Deferred::new(|| 2);
        let mut buffer = SlotBuffer::with_capacity(2);
        buffer.push_value(1);
        buffer.push_slot(Slot::Deferred(cell.clone()));
        let list = buffer.finish();
        assert!(list.is_any_unresolved());
        assert!(!list.is_plain());
        list.get(1).unwrap();
        assert!(cell.is_resolved());
    }
}
