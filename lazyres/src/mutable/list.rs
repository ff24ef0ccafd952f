use std::cmp::Ordering;
use std::hash::Hash;
use std::mem;
use std::ops::Range;

use ahash::{HashSet, HashSetExt};

use crate::error::{self, Error};
use crate::sequence::{search, SequenceCore, SequenceExt};
use crate::slot::{Slot, SlotRef};
use crate::IntoDeferred;

use super::sublist::MutableSubList;

/// A growable sequence whose elements may be computed lazily.
///
/// Reading an element through [`resolve`](MutableList::resolve) forces it
/// and stores the value in place of its cell, so later reads of the same
/// index don't go through the cell at all.
///
/// [`get`](SequenceExt::get) does **not** write back. It only has shared
/// access, so it forces the cell and leaves the cell in the slot; the cell
/// stays resolved, but later reads still go through it. Use `resolve` when
/// the value should replace the cell.
///
/// Any number of threads may read a list they share, including forcing the
/// same pending element. Structural changes need `&mut self`, so they can't
/// race with reads or with each other.
#[derive(Clone)]
pub struct MutableList<T> {
    slots: Vec<Slot<T>>,
}

// the largest capacity the growth policy will pick on its own
fn max_capacity<T>() -> usize {
    isize::MAX as usize / mem::size_of::<Slot<T>>() - 8
}

impl<T> MutableList<T> {
    pub fn new() -> Self {
        MutableList { slots: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MutableList {
            slots: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Remove all elements. Keeps the capacity.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    // Grow by half the current capacity plus one, or to exactly what's
    // needed if that's more.
    fn reserve_for(&mut self, additional: usize) {
        let needed = self.slots.len().saturating_add(additional);
        let old = self.slots.capacity();
        if needed <= old {
            return;
        }
        let grown = (old + old / 2 + 1).min(max_capacity::<T>());
        let new = needed.max(grown);
        tracing::debug!(old, new, "growing mutable list storage");
        self.slots.reserve_exact(new - self.slots.len());
    }

    pub(crate) fn from_raw(slots: Vec<Slot<T>>) -> Self {
        MutableList { slots }
    }

    pub(crate) fn clear_range(&mut self, range: Range<usize>) {
        self.slots.drain(range);
    }
}

impl<T: Clone> MutableList<T> {
    /// Build a list from slots that may mix values and deferred cells.
    /// Nothing is forced.
    pub fn from_slots(mut slots: Vec<Slot<T>>) -> Self {
        for slot in &mut slots {
            slot.settle();
        }
        Self::from_raw(slots)
    }

    /// Build a list from a batch of deferred computations.
    ///
    /// Each item may be a callback or an existing [`Deferred`](crate::Deferred);
    /// an existing cell is stored as is, not wrapped again.
    pub fn from_deferred<I>(callbacks: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoDeferred<T>,
    {
        Self::from_raw(
            callbacks
                .into_iter()
                .map(|callback| Slot::Deferred(callback.into_deferred()))
                .collect(),
        )
    }

    /// Get the element at `index`, forcing it if needed and keeping the
    /// value in place of the cell.
    pub fn resolve(&mut self, index: usize) -> error::Result<&T> {
        let index = error::check_index(index, self.len())?;
        Ok(self.resolve_at(index))
    }

    pub fn push(&mut self, value: T) {
        self.insert_slots(self.len(), vec![Slot::Value(value)]);
    }

    /// Append an element computed on first access.
    pub fn push_deferred<C>(&mut self, callback: C)
    where
        C: IntoDeferred<T>,
    {
        self.insert_slots(self.len(), vec![Slot::Deferred(callback.into_deferred())]);
    }

    /// Insert `value` at `index`, shifting later elements up. Nothing is
    /// forced by the shift.
    pub fn insert(&mut self, index: usize, value: T) -> error::Result<()> {
        let index = error::check_position(index, self.len())?;
        self.insert_slots(index, vec![Slot::Value(value)]);
        Ok(())
    }

    pub fn insert_deferred<C>(&mut self, index: usize, callback: C) -> error::Result<()>
    where
        C: IntoDeferred<T>,
    {
        let index = error::check_position(index, self.len())?;
        self.insert_slots(index, vec![Slot::Deferred(callback.into_deferred())]);
        Ok(())
    }

    /// Insert plain values at `index`.
    pub fn insert_values<I>(&mut self, index: usize, values: I) -> error::Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let index = error::check_position(index, self.len())?;
        self.insert_slots(index, values.into_iter().map(Slot::Value).collect());
        Ok(())
    }

    /// Insert the elements of another sequence at `index`, without forcing
    /// them.
    pub fn insert_sequence<S>(&mut self, index: usize, other: &S) -> error::Result<()>
    where
        S: SequenceCore<Item = T> + ?Sized,
    {
        let index = error::check_position(index, self.len())?;
        self.insert_slots(index, copy_slots(other));
        Ok(())
    }

    /// Append the elements of another sequence, without forcing them.
    pub fn append_sequence<S>(&mut self, other: &S)
    where
        S: SequenceCore<Item = T> + ?Sized,
    {
        self.insert_slots(self.len(), copy_slots(other));
    }

    /// Remove the element at `index` and return it, forced.
    pub fn remove(&mut self, index: usize) -> error::Result<T> {
        let index = error::check_index(index, self.len())?;
        Ok(self.remove_slot(index).into_value())
    }

    /// Remove the first element equal to `value`. Returns whether one was
    /// found.
    pub fn remove_item(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.position(|element| element == value) {
            Some(index) => {
                self.remove_slot(index);
                true
            }
            None => false,
        }
    }

    /// Replace the element at `index`, returning the previous one, forced.
    pub fn set(&mut self, index: usize, value: T) -> error::Result<T> {
        let index = error::check_index(index, self.len())?;
        Ok(self.set_at(index, value))
    }

    /// Remove every element that satisfies `predicate`, keeping the order
    /// of the rest. Forces every element. Returns how many were removed.
    pub fn remove_if<F>(&mut self, predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        self.remove_range_if(0..self.len(), predicate)
    }

    /// Keep only the elements that satisfy `predicate`.
    pub fn retain<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.remove_if(|value| !predicate(value));
    }

    /// Remove every element equal to one of `values`. Returns whether
    /// anything was removed.
    pub fn remove_all<'v, I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = &'v T>,
        T: Eq + Hash + 'v,
    {
        let mut removals: HashSet<&T> = HashSet::new();
        removals.extend(values);
        if removals.is_empty() {
            return false;
        }
        self.remove_if(|value| removals.contains(value)) > 0
    }

    /// Keep only the elements equal to one of `values`. Returns whether
    /// anything was removed.
    pub fn retain_all<'v, I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = &'v T>,
        T: Eq + Hash + 'v,
    {
        let mut kept: HashSet<&T> = HashSet::new();
        kept.extend(values);
        self.remove_if(|value| !kept.contains(value)) > 0
    }

    /// Stable sort by `compare`. Forces every element first.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.sort_range_by(0..self.len(), compare);
    }

    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp);
    }

    /// Replace every element by the result of `operator`.
    pub fn replace_all<F>(&mut self, operator: F)
    where
        F: FnMut(&T) -> T,
    {
        self.replace_range(0..self.len(), operator);
    }

    /// A view of `from..to` through which the list can be read and changed.
    ///
    /// Changes made through the view are changes to this list; the view
    /// keeps its own length in step with them.
    pub fn sub_list(&mut self, from: usize, to: usize) -> error::Result<MutableSubList<'_, T>> {
        error::check_range(from, to, self.len())?;
        Ok(MutableSubList::new(self, from, to - from))
    }

    /// A copy of the first `count` elements, or of all of them if there are
    /// fewer. Pending elements stay pending.
    pub fn take(&self, count: usize) -> Self {
        self.copy_range(0, count.min(self.len()))
    }

    /// A copy without the first `count` elements.
    pub fn drop(&self, count: usize) -> Self {
        self.copy_range(count.min(self.len()), self.len())
    }

    /// A copy in reverse order. Nothing is forced.
    pub fn reversed(&self) -> Self {
        Self::from_raw(self.slots.iter().rev().map(|slot| slot.as_ref().to_slot()).collect())
    }

    /// A copy of the longest prefix whose elements satisfy `predicate`.
    pub fn take_while<F>(&self, predicate: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        self.copy_range(0, search::prefix_len(self, predicate))
    }

    /// A copy without the longest prefix whose elements satisfy `predicate`.
    pub fn drop_while<F>(&self, predicate: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        self.copy_range(search::prefix_len(self, predicate), self.len())
    }

    pub fn partition_while<F>(&self, predicate: F) -> (Self, Self)
    where
        F: FnMut(&T) -> bool,
    {
        let split = search::prefix_len(self, predicate);
        (self.copy_range(0, split), self.copy_range(split, self.len()))
    }

    /// Copies of consecutive runs of `size` elements; the last one may be
    /// shorter.
    pub fn chunk(&self, size: usize) -> error::Result<Vec<Self>> {
        if size == 0 {
            return Err(Error::InvalidArgument("chunk size must be positive"));
        }
        Ok((0..self.len())
            .step_by(size)
            .map(|from| self.copy_range(from, (from + size).min(self.len())))
            .collect())
    }

    /// Split into the elements that satisfy `predicate` and those that
    /// don't. Forces every element.
    pub fn partition<F>(&self, mut predicate: F) -> (Self, Self)
    where
        F: FnMut(&T) -> bool,
    {
        let mut selected = Vec::new();
        let mut rejected = Vec::new();
        for value in self.iter() {
            if predicate(value) {
                selected.push(Slot::Value(value.clone()));
            } else {
                rejected.push(Slot::Value(value.clone()));
            }
        }
        (Self::from_raw(selected), Self::from_raw(rejected))
    }

    fn copy_range(&self, from: usize, to: usize) -> Self {
        Self::from_raw(self.slots[from..to].iter().map(|slot| slot.as_ref().to_slot()).collect())
    }

    // The operations below work on raw indices into the whole list; bounds
    // are checked by the callers, which may be views onto part of it.

    pub(crate) fn resolve_at(&mut self, index: usize) -> &T {
        self.slots[index].settle_forced()
    }

    pub(crate) fn set_at(&mut self, index: usize, value: T) -> T {
        mem::replace(&mut self.slots[index], Slot::Value(value)).into_value()
    }

    // Already resolved cells that get moved by the shift are replaced by
    // their values; pending cells move as they are.
    pub(crate) fn insert_slots(&mut self, index: usize, slots: Vec<Slot<T>>) {
        let count = slots.len();
        if count == 0 {
            return;
        }
        self.reserve_for(count);
        self.slots.splice(index..index, slots);
        settle_all(&mut self.slots[index + count..]);
    }

    pub(crate) fn remove_slot(&mut self, index: usize) -> Slot<T> {
        let slot = self.slots.remove(index);
        settle_all(&mut self.slots[index..]);
        slot
    }

    // Every element of `range` is forced and judged before any slot moves,
    // so a panicking callback or predicate leaves the order untouched.
    pub(crate) fn remove_range_if<F>(&mut self, range: Range<usize>, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let doomed: Vec<bool> = self.slots[range.clone()]
            .iter_mut()
            .map(|slot| predicate(slot.settle_forced()))
            .collect();
        let removed = doomed.iter().filter(|&&gone| gone).count();
        if removed == 0 {
            return 0;
        }
        let mut index = 0;
        self.slots.retain(|_| {
            let keep = !range.contains(&index) || !doomed[index - range.start];
            index += 1;
            keep
        });
        settle_all(&mut self.slots[range.start..]);
        removed
    }

    pub(crate) fn sort_range_by<F>(&mut self, range: Range<usize>, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let slots = &mut self.slots[range];
        for slot in slots.iter_mut() {
            slot.settle_forced();
        }
        slots.sort_by(|a, b| compare(a.resolve(), b.resolve()));
    }

    pub(crate) fn replace_range<F>(&mut self, range: Range<usize>, mut operator: F)
    where
        F: FnMut(&T) -> T,
    {
        for slot in &mut self.slots[range] {
            let value = operator(slot.settle_forced());
            *slot = Slot::Value(value);
        }
    }
}

fn settle_all<T: Clone>(slots: &mut [Slot<T>]) {
    for slot in slots {
        slot.settle();
    }
}

pub(crate) fn copy_slots<S>(other: &S) -> Vec<Slot<S::Item>>
where
    S: SequenceCore + ?Sized,
    S::Item: Clone,
{
    (0..other.len()).map(|index| other.slot(index).to_slot()).collect()
}

impl<T> Default for MutableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SequenceCore for MutableList<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn slot(&self, index: usize) -> SlotRef<'_, T> {
        self.slots[index].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::sync::Arc;

    use crate::Deferred;

    use super::*;

    fn lazy(values: &[i32]) -> MutableList<i32> {
        MutableList::from_deferred(values.iter().map(|&value| move || value))
    }

    #[test]
    fn test_growth_policy() {
        let mut list = MutableList::with_capacity(10);
        list.extend(0..10);
        assert_eq!(list.capacity(), 10);
        list.push(10);
        assert_eq!(list.capacity(), 16);

        let mut list = MutableList::new();
        list.push(0);
        assert_eq!(list.capacity(), 1);
        let mut capacities = vec![list.capacity()];
        for value in 1..10 {
            list.push(value);
            if capacities.last() != Some(&list.capacity()) {
                capacities.push(list.capacity());
            }
        }
        assert_eq!(capacities, vec![1, 2, 4, 7, 11]);
    }

    #[test]
    fn test_growth_takes_what_is_needed() {
        let mut list = MutableList::with_capacity(2);
        list.insert_values(0, 0..10).unwrap();
        assert_eq!(list.capacity(), 10);
    }

    #[test]
    fn test_resolve_writes_back() {
        let mut list = lazy(&[1, 2, 3]);
        assert!(list.is_unresolved(1).unwrap());
        assert_eq!(list.resolve(1), Ok(&2));
        assert!(!list.is_unresolved(1).unwrap());
        assert!(matches!(list.slots[1], Slot::Value(2)));
        assert!(matches!(list.slots[0], Slot::Deferred(_)));
    }

    #[test]
    fn test_get_does_not_write_back() {
        let list = lazy(&[1]);
        assert_eq!(list.get(0), Ok(&1));
        assert!(matches!(list.slots[0], Slot::Deferred(_)));
        assert!(!list.is_unresolved(0).unwrap());
    }

    #[test]
    fn test_remove_if_keeps_order_when_callback_panics() {
        let failed_once = Arc::new(AtomicUsize::new(0));
        let flag = Arc::clone(&failed_once);
        let mut list = MutableList::from_slots(vec![
            Slot::Value(1),
            Slot::Value(2),
            Slot::Value(3),
            Slot::Value(4),
            Slot::deferred(move || {
                if flag.fetch_add(1, AtomicOrdering::SeqCst) == 0 {
                    panic!("not loaded yet");
                }
                5
            }),
            Slot::Value(6),
        ]);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            list.remove_if(|v| v % 2 == 0)
        }));
        assert!(result.is_err());
        assert!(list.is_unresolved(4).unwrap());
        assert_eq!(list, [1, 2, 3, 4, 5, 6]);

        assert_eq!(list.remove_if(|v| v % 2 == 0), 3);
        assert_eq!(list, [1, 3, 5]);
        assert_eq!(failed_once.load(AtomicOrdering::SeqCst), 2);
    }

    #[test]
    fn test_insert_shifts_without_forcing() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_in_callback = Arc::clone(&counter);
        let mut list = MutableList::from(vec![10, 20]);
        list.push_deferred(move || {
            counter_in_callback.fetch_add(1, AtomicOrdering::SeqCst);
            30
        });
        list.insert(1, 99).unwrap();
        assert_eq!(counter.load(AtomicOrdering::SeqCst), 0);
        assert!(list.is_unresolved(3).unwrap());
        assert_eq!(list, [10, 99, 20, 30]);
        assert_eq!(
            list.insert(9, 0),
            Err(Error::IndexOutOfBounds { index: 9, size: 4 })
        );
    }

    #[test]
    fn test_shift_settles_resolved_cells() {
        let cell = Deferred::new(|| 2);
        let mut list = MutableList::from_deferred([Deferred::new(|| 1), cell.clone()]);
        cell.get();
        assert!(matches!(list.slots[1], Slot::Deferred(_)));
        list.insert(0, 0).unwrap();
        assert!(matches!(list.slots[2], Slot::Value(2)));
        assert!(matches!(list.slots[1], Slot::Deferred(_)));
        list.remove(0).unwrap();
        assert!(matches!(list.slots[1], Slot::Value(2)));
    }

    #[test]
    fn test_remove_and_set_return_forced_values() {
        let mut list = lazy(&[1, 2, 3]);
        assert_eq!(list.remove(0), Ok(1));
        assert_eq!(list.set(1, 30), Ok(3));
        assert_eq!(list, [2, 30]);
        assert_eq!(
            list.remove(2),
            Err(Error::IndexOutOfBounds { index: 2, size: 2 })
        );
    }

    #[test]
    fn test_remove_item() {
        let mut list = lazy(&[1, 2, 3, 2]);
        assert!(list.remove_item(&2));
        assert_eq!(list, [1, 3, 2]);
        assert!(!list.remove_item(&7));
    }

    #[test]
    fn test_remove_if_keeps_order() {
        let mut list = MutableList::from(vec![1, 2, 3]);
        assert_eq!(list.remove_if(|v| v % 2 == 0), 1);
        assert_eq!(list, [1, 3]);

        let mut list = lazy(&[5, 6, 7, 8, 9, 10]);
        list.retain(|v| v % 3 != 0);
        assert_eq!(list, [5, 7, 8, 10]);
        assert!(!list.is_any_unresolved());
    }

    #[test]
    fn test_remove_all_and_retain_all() {
        let mut list = lazy(&[1, 2, 3, 4, 2]);
        assert!(list.remove_all(&[2, 9]));
        assert_eq!(list, [1, 3, 4]);
        assert!(!list.remove_all(&[9]));
        assert!(list.retain_all(&[3, 4]));
        assert_eq!(list, [3, 4]);
    }

    #[test]
    fn test_sort() {
        let mut list = lazy(&[3, 1, 2]);
        list.sort();
        assert_eq!(list, [1, 2, 3]);
        list.sort_by(|a, b| b.cmp(a));
        assert_eq!(list, [3, 2, 1]);
    }

    #[test]
    fn test_replace_all() {
        let mut list = lazy(&[1, 2]);
        list.replace_all(|v| v * 10);
        assert_eq!(list, [10, 20]);
        assert!(list.slots.iter().all(|slot| matches!(slot, Slot::Value(_))));
    }

    #[test]
    fn test_append_sequence_copies_raw_slots() {
        let source = lazy(&[7, 8]);
        let mut list = MutableList::from(vec![1]);
        list.append_sequence(&source);
        assert!(list.is_unresolved(1).unwrap());
        assert!(list.is_unresolved(2).unwrap());
        assert_eq!(list, [1, 7, 8]);
        // the cells are shared with the source
        assert!(!source.is_any_unresolved());
    }

    #[test]
    fn test_insert_sequence() {
        let mut list = MutableList::from(vec![1, 4]);
        list.insert_sequence(1, &lazy(&[2, 3])).unwrap();
        assert_eq!(list, [1, 2, 3, 4]);
        assert!(list.insert_sequence(5, &lazy(&[0])).is_err());
    }

    #[test]
    fn test_take_drop_and_chunk_copy_lazily() {
        let list = lazy(&[1, 2, 3, 4, 5]);
        let head = list.take(2);
        assert!(head.is_any_unresolved());
        assert_eq!(head, [1, 2]);
        assert_eq!(list.drop(3), [4, 5]);
        let (low, high) = list.partition_while(|v| *v < 3);
        assert_eq!(low, [1, 2]);
        assert_eq!(high, [3, 4, 5]);
        let chunks = list.chunk(2).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2], [5]);
        assert!(list.chunk(0).is_err());
    }

    #[test]
    fn test_reversed_shares_cells() {
        let list = lazy(&[1, 2, 3]);
        let reversed = list.reversed();
        assert!(reversed.is_any_unresolved());
        assert_eq!(reversed, [3, 2, 1]);
        assert!(!list.is_any_unresolved());
    }

    #[test]
    fn test_partition_forces() {
        let list = lazy(&[1, 2, 3, 4]);
        let (even, odd) = list.partition(|v| v % 2 == 0);
        assert_eq!(even, [2, 4]);
        assert_eq!(odd, [1, 3]);
        assert!(!list.is_any_unresolved());
    }

    #[test]
    fn test_clone_shares_cells() {
        let list = lazy(&[1]);
        let copy = list.clone();
        copy.get(0).unwrap();
        assert!(!list.is_unresolved(0).unwrap());
    }
}
