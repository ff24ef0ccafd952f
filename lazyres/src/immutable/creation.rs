use std::sync::Arc;

use crate::sequence::conversion::SlotBuffer;
use crate::sequence::{Iter, SequenceExt};
use crate::slot::Slot;
use crate::IntoDeferred;

use super::core::ImmutableList;
use super::variant::{Empty, Many, One, Storage};

impl<T: Clone> ImmutableList<T> {
    /// Build a list from a batch of deferred computations.
    ///
    /// Each item may be a callback or an existing [`Deferred`](crate::Deferred);
    /// an existing cell is stored as is, not wrapped again. Nothing is
    /// forced.
    pub fn from_deferred<I>(callbacks: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoDeferred<T>,
    {
        Self::from_slots(
            callbacks
                .into_iter()
                .map(|callback| Slot::Deferred(callback.into_deferred()))
                .collect(),
        )
    }

    /// A single element list computed by `callback` on first access.
    pub fn from_callback<C>(callback: C) -> Self
    where
        C: IntoDeferred<T>,
    {
        ImmutableList::One(One::new(Slot::Deferred(callback.into_deferred())))
    }

    /// Build a list from slots that may mix values and deferred cells.
    ///
    /// Cells that are already resolved are stored as their values; if no
    /// cell is left pending, the list is stored as plain values.
    pub fn from_slots(slots: Vec<Slot<T>>) -> Self {
        let mut buffer = SlotBuffer::with_capacity(slots.len());
        for slot in slots {
            buffer.push_slot(slot);
        }
        buffer.finish()
    }
}

impl<T> From<Vec<T>> for ImmutableList<T> {
    fn from(mut values: Vec<T>) -> Self {
        match values.len() {
            0 => ImmutableList::Empty(Empty::new()),
            1 => match values.pop() {
                Some(value) => ImmutableList::One(One::new(Slot::Value(value))),
                None => unreachable!("a vector of length 1 has an element"),
            },
            _ => ImmutableList::Many(Many::new(Storage::Plain(Arc::from(values)))),
        }
    }
}

impl<T> FromIterator<T> for ImmutableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

impl<'a, T> IntoIterator for &'a ImmutableList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, ImmutableList<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
