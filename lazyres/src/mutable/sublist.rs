use std::cmp::Ordering;

use crate::error;
use crate::sequence::{SequenceCore, SequenceExt};
use crate::slot::{Slot, SlotRef};
use crate::IntoDeferred;

use super::list::{copy_slots, MutableList};

/// A window onto part of a [`MutableList`].
///
/// Every read and every change goes straight to the list the view was
/// taken from, at the translated index. Changes that add or remove
/// elements adjust the view's length, and the length of every view it was
/// taken from, so all of them keep covering the same elements.
///
/// The view borrows the list mutably: nothing else can change the list
/// while the view is alive.
pub struct MutableSubList<'a, T> {
    root: &'a mut MutableList<T>,
    offset: usize,
    len: usize,
    // lengths of the views this one was taken from, outermost first
    enclosing: Vec<&'a mut usize>,
}

impl<'a, T> MutableSubList<'a, T> {
    pub(crate) fn new(root: &'a mut MutableList<T>, offset: usize, len: usize) -> Self {
        MutableSubList {
            root,
            offset,
            len,
            enclosing: Vec::new(),
        }
    }

    fn grow(&mut self, count: usize) {
        self.len += count;
        for len in &mut self.enclosing {
            **len += count;
        }
    }

    fn shrink(&mut self, count: usize) {
        self.len -= count;
        for len in &mut self.enclosing {
            **len -= count;
        }
    }

    fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Remove all elements of the view from the underlying list.
    pub fn clear(&mut self) {
        let range = self.offset..self.end();
        self.root.clear_range(range);
        self.shrink(self.len);
    }
}

impl<'a, T: Clone> MutableSubList<'a, T> {
    fn insert_slots(&mut self, index: usize, slots: Vec<Slot<T>>) {
        let count = slots.len();
        self.root.insert_slots(self.offset + index, slots);
        self.grow(count);
    }

    /// A view of `from..to` of this view.
    ///
    /// The new view refers to the underlying list directly, however deeply
    /// views are nested.
    pub fn sub_list(&mut self, from: usize, to: usize) -> error::Result<MutableSubList<'_, T>> {
        error::check_range(from, to, self.len)?;
        let mut enclosing: Vec<&mut usize> = self
            .enclosing
            .iter_mut()
            .map(|len| &mut **len)
            .collect();
        enclosing.push(&mut self.len);
        Ok(MutableSubList {
            root: &mut *self.root,
            offset: self.offset + from,
            len: to - from,
            enclosing,
        })
    }

    /// Get the element at `index`, forcing it if needed and keeping the
    /// value in place of the cell.
    pub fn resolve(&mut self, index: usize) -> error::Result<&T> {
        let index = error::check_index(index, self.len)?;
        Ok(self.root.resolve_at(self.offset + index))
    }

    pub fn push(&mut self, value: T) {
        self.insert_slots(self.len, vec![Slot::Value(value)]);
    }

    pub fn push_deferred<C>(&mut self, callback: C)
    where
        C: IntoDeferred<T>,
    {
        self.insert_slots(self.len, vec![Slot::Deferred(callback.into_deferred())]);
    }

    pub fn insert(&mut self, index: usize, value: T) -> error::Result<()> {
        let index = error::check_position(index, self.len)?;
        self.insert_slots(index, vec![Slot::Value(value)]);
        Ok(())
    }

    pub fn insert_deferred<C>(&mut self, index: usize, callback: C) -> error::Result<()>
    where
        C: IntoDeferred<T>,
    {
        let index = error::check_position(index, self.len)?;
        self.insert_slots(index, vec![Slot::Deferred(callback.into_deferred())]);
        Ok(())
    }

    pub fn insert_values<I>(&mut self, index: usize, values: I) -> error::Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let index = error::check_position(index, self.len)?;
        self.insert_slots(index, values.into_iter().map(Slot::Value).collect());
        Ok(())
    }

    pub fn insert_sequence<S>(&mut self, index: usize, other: &S) -> error::Result<()>
    where
        S: SequenceCore<Item = T> + ?Sized,
    {
        let index = error::check_position(index, self.len)?;
        self.insert_slots(index, copy_slots(other));
        Ok(())
    }

    pub fn append_sequence<S>(&mut self, other: &S)
    where
        S: SequenceCore<Item = T> + ?Sized,
    {
        self.insert_slots(self.len, copy_slots(other));
    }

    pub fn remove(&mut self, index: usize) -> error::Result<T> {
        let index = error::check_index(index, self.len)?;
        let slot = self.root.remove_slot(self.offset + index);
        self.shrink(1);
        Ok(slot.into_value())
    }

    pub fn remove_item(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.position(|element| element == value) {
            Some(index) => {
                self.root.remove_slot(self.offset + index);
                self.shrink(1);
                true
            }
            None => false,
        }
    }

    pub fn set(&mut self, index: usize, value: T) -> error::Result<T> {
        let index = error::check_index(index, self.len)?;
        Ok(self.root.set_at(self.offset + index, value))
    }

    /// Remove every element of the view that satisfies `predicate`.
    /// Returns how many were removed.
    pub fn remove_if<F>(&mut self, predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let range = self.offset..self.end();
        let removed = self.root.remove_range_if(range, predicate);
        self.shrink(removed);
        removed
    }

    pub fn retain<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.remove_if(|value| !predicate(value));
    }

    /// Stable sort of the view's elements. Forces every one of them.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let range = self.offset..self.end();
        self.root.sort_range_by(range, compare);
    }

    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp);
    }

    pub fn replace_all<F>(&mut self, operator: F)
    where
        F: FnMut(&T) -> T,
    {
        let range = self.offset..self.end();
        self.root.replace_range(range, operator);
    }
}

impl<T> SequenceCore for MutableSubList<'_, T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn slot(&self, index: usize) -> SlotRef<'_, T> {
        assert!(
            index < self.len,
            "index {index} out of bounds for a sub list of length {}",
            self.len
        );
        self.root.slot(self.offset + index)
    }
}

impl<T: Clone> Extend<T> for MutableSubList<'_, T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        let slots = values.into_iter().map(Slot::Value).collect();
        self.insert_slots(self.len, slots);
    }
}
