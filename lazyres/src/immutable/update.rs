use std::hash::Hash;

use ahash::{HashSet, HashSetExt};

use crate::error::{self, Error};
use crate::sequence::conversion::SlotBuffer;
use crate::sequence::{search, SequenceCore, SequenceExt};
use crate::slot::Slot;
use crate::IntoDeferred;

use super::core::ImmutableList;

// Every operation here leaves `self` alone and returns a new list. Slots are
// copied over without forcing unless the operation has to look at values;
// the new list is stored as plain values when nothing in it is pending.

impl<T: Clone> ImmutableList<T> {
    fn buffer_with(&self, extra: usize) -> SlotBuffer<T> {
        let mut buffer = SlotBuffer::with_capacity(self.len() + extra);
        for index in 0..self.len() {
            buffer.push_ref(self.slot(index));
        }
        buffer
    }

    /// A new list with `value` appended.
    pub fn with_pushed(&self, value: T) -> Self {
        let mut buffer = self.buffer_with(1);
        buffer.push_value(value);
        buffer.finish()
    }

    /// A new list with an element computed on first access appended.
    pub fn with_pushed_deferred<C>(&self, callback: C) -> Self
    where
        C: IntoDeferred<T>,
    {
        let mut buffer = self.buffer_with(1);
        buffer.push_slot(Slot::Deferred(callback.into_deferred()));
        buffer.finish()
    }

    /// A new list with `values` appended. Returns this list unchanged if
    /// `values` is empty.
    pub fn with_appended<I>(&self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter();
        let mut buffer = self.buffer_with(values.size_hint().0);
        let mut added = false;
        for value in values {
            buffer.push_value(value);
            added = true;
        }
        if added {
            buffer.finish()
        } else {
            self.clone()
        }
    }

    /// A new list with the elements of `other` appended, without forcing
    /// any of them.
    pub fn with_appended_sequence<S>(&self, other: &S) -> Self
    where
        S: SequenceCore<Item = T> + ?Sized,
    {
        if other.is_empty() {
            return self.clone();
        }
        let mut buffer = self.buffer_with(other.len());
        for index in 0..other.len() {
            buffer.push_ref(other.slot(index));
        }
        buffer.finish()
    }

    /// A new list without one element equal to `value`.
    ///
    /// If no element is equal, this list is returned unchanged and shares
    /// its storage. A single inline value is copied instead, see
    /// [`ptr_eq`](ImmutableList::ptr_eq).
    pub fn without(&self, value: &T) -> Self
    where
        T: PartialEq,
    {
        match self.any_position(|element| element == value) {
            Some(removed) => {
                let mut buffer = SlotBuffer::with_capacity(self.len() - 1);
                for index in (0..self.len()).filter(|&index| index != removed) {
                    buffer.push_ref(self.slot(index));
                }
                buffer.finish()
            }
            None => self.clone(),
        }
    }

    /// A new list without any element equal to one of `values`. Forces
    /// every element.
    ///
    /// If nothing is removed, this list is returned unchanged.
    pub fn without_all<'v, I>(&self, values: I) -> Self
    where
        I: IntoIterator<Item = &'v T>,
        T: Eq + Hash + 'v,
    {
        let mut removals: HashSet<&T> = HashSet::new();
        removals.extend(values);
        if removals.is_empty() {
            return self.clone();
        }
        let mut buffer = SlotBuffer::with_capacity(self.len());
        let mut removed = false;
        for index in 0..self.len() {
            let slot = self.slot(index);
            if removals.contains(slot.resolve()) {
                removed = true;
            } else {
                buffer.push_ref(slot);
            }
        }
        if removed {
            buffer.finish()
        } else {
            self.clone()
        }
    }

    /// A new list with the element at `index` replaced by `value`.
    pub fn with_replaced(&self, index: usize, value: T) -> error::Result<Self> {
        let index = error::check_index(index, self.len())?;
        let mut buffer = SlotBuffer::with_capacity(self.len());
        for before in 0..index {
            buffer.push_ref(self.slot(before));
        }
        buffer.push_value(value);
        for after in index + 1..self.len() {
            buffer.push_ref(self.slot(after));
        }
        Ok(buffer.finish())
    }

    /// A new list with the elements in reverse order. Never forces.
    pub fn reversed(&self) -> Self {
        let mut buffer = SlotBuffer::with_capacity(self.len());
        for index in (0..self.len()).rev() {
            buffer.push_ref(self.slot(index));
        }
        buffer.finish()
    }

    /// A new list of the elements that satisfy `predicate`. Forces every
    /// element.
    pub fn filtered<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        let mut buffer = SlotBuffer::with_capacity(self.len());
        for index in 0..self.len() {
            let slot = self.slot(index);
            if predicate(slot.resolve()) {
                buffer.push_ref(slot);
            }
        }
        buffer.finish()
    }

    /// Split into the elements that satisfy `predicate` and those that
    /// don't, keeping their order. Forces every element.
    pub fn partition<F>(&self, mut predicate: F) -> (Self, Self)
    where
        F: FnMut(&T) -> bool,
    {
        let mut selected = SlotBuffer::with_capacity(self.len());
        let mut rejected = SlotBuffer::with_capacity(self.len());
        for index in 0..self.len() {
            let slot = self.slot(index);
            if predicate(slot.resolve()) {
                selected.push_ref(slot);
            } else {
                rejected.push_ref(slot);
            }
        }
        (selected.finish(), rejected.finish())
    }

    /// A view of the first `count` elements, or of all of them if there are
    /// fewer.
    pub fn take(&self, count: usize) -> Self {
        self.view(0, count.min(self.len()))
    }

    /// A view without the first `count` elements.
    pub fn drop(&self, count: usize) -> Self {
        self.view(count.min(self.len()), self.len())
    }

    /// A view of the longest prefix whose elements satisfy `predicate`.
    /// Forces elements up to the first one that doesn't.
    pub fn take_while<F>(&self, predicate: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        self.view(0, search::prefix_len(self, predicate))
    }

    /// A view without the longest prefix whose elements satisfy `predicate`.
    pub fn drop_while<F>(&self, predicate: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        self.view(search::prefix_len(self, predicate), self.len())
    }

    /// `take_while` and `drop_while` in one pass.
    pub fn partition_while<F>(&self, predicate: F) -> (Self, Self)
    where
        F: FnMut(&T) -> bool,
    {
        let split = search::prefix_len(self, predicate);
        (self.view(0, split), self.view(split, self.len()))
    }

    /// Views of consecutive runs of `size` elements; the last one may be
    /// shorter.
    pub fn chunk(&self, size: usize) -> error::Result<Vec<Self>> {
        if size == 0 {
            return Err(Error::InvalidArgument("chunk size must be positive"));
        }
        Ok((0..self.len())
            .step_by(size)
            .map(|from| self.view(from, (from + size).min(self.len())))
            .collect())
    }
}
