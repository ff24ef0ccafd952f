use std::cmp::Ordering;
use std::hash::Hash;

use ahash::{HashSet, HashSetExt};

use crate::error;
use crate::immutable::ImmutableList;
use crate::mutable::MutableList;
use crate::slot::SlotRef;
use crate::IntoDeferred;

use super::conversion::SlotBuffer;
use super::iter::{Iter, ResolvedOnly};
use super::search;

/// The core sequence interface: a sequence must implement this to function.
///
/// If you do, [`SequenceExt`] provides the whole read API on top of it.
pub trait SequenceCore {
    type Item;

    /// The number of elements in the sequence.
    fn len(&self) -> usize;

    /// Check whether the sequence is empty
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw access to the slot at `index`. Never forces.
    ///
    /// Panics if `index` is out of bounds; [`SequenceExt::get`] is the
    /// checked accessor.
    fn slot(&self, index: usize) -> SlotRef<'_, Self::Item>;

    /// Whether any element would still run a callback when read.
    fn is_any_unresolved(&self) -> bool {
        (0..self.len()).any(|index| self.slot(index).is_unresolved())
    }

    /// An immutable copy of the sequence that keeps pending elements lazy.
    fn to_immutable(&self) -> ImmutableList<Self::Item>
    where
        Self::Item: Clone,
    {
        let mut buffer = SlotBuffer::with_capacity(self.len());
        for index in 0..self.len() {
            buffer.push_ref(self.slot(index));
        }
        buffer.finish()
    }

    /// A mutable copy of the sequence that keeps pending elements lazy.
    fn to_mutable(&self) -> MutableList<Self::Item>
    where
        Self::Item: Clone,
    {
        MutableList::from_slots(
            (0..self.len())
                .map(|index| self.slot(index).to_slot())
                .collect(),
        )
    }
}

/// Read operations every sequence gets for free.
///
/// Searches never force an element that can't influence their answer: they
/// look at values that are already available first, and only force pending
/// elements when those can't settle it. The answer is always the one a
/// front to back scan over fully forced elements would give.
pub trait SequenceExt: SequenceCore {
    /// Get the element at `index`, forcing it if needed.
    fn get(&self, index: usize) -> error::Result<&Self::Item> {
        let index = error::check_index(index, self.len())?;
        Ok(self.slot(index).resolve())
    }

    fn first(&self) -> Option<&Self::Item> {
        (!self.is_empty()).then(|| self.slot(0).resolve())
    }

    fn last(&self) -> Option<&Self::Item> {
        let len = self.len();
        (len > 0).then(|| self.slot(len - 1).resolve())
    }

    /// Some element of the sequence, preferring one that is already
    /// available. Only forces when every element is pending.
    fn any_value(&self) -> Option<&Self::Item> {
        (0..self.len())
            .find_map(|index| self.slot(index).resolved())
            .or_else(|| self.first())
    }

    /// Whether reading the element at `index` would run a callback.
    fn is_unresolved(&self, index: usize) -> error::Result<bool> {
        let index = error::check_index(index, self.len())?;
        Ok(self.slot(index).is_unresolved())
    }

    /// Iterate over all elements, forcing each as it's reached.
    fn iter(&self) -> Iter<'_, Self> {
        Iter::new(self)
    }

    /// Iterate over the elements that are already available, skipping
    /// pending ones without forcing them.
    ///
    /// This is for best-effort inspection only: which elements show up
    /// depends on what has been forced so far.
    fn resolved_only(&self) -> ResolvedOnly<'_, Self> {
        ResolvedOnly::new(self)
    }

    fn any<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&Self::Item) -> bool,
    {
        search::scan(self, false, predicate).is_some()
    }

    fn all<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Self::Item) -> bool,
    {
        search::scan(self, false, |value| !predicate(value)).is_none()
    }

    fn none<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&Self::Item) -> bool,
    {
        !self.any(predicate)
    }

    /// The first element that satisfies `predicate`.
    fn find<F>(&self, predicate: F) -> Option<&Self::Item>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        search::scan(self, true, predicate).map(|index| self.slot(index).resolve())
    }

    /// The index of the first element that satisfies `predicate`.
    fn position<F>(&self, predicate: F) -> Option<usize>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        search::scan(self, true, predicate)
    }

    /// The index of the last element that satisfies `predicate`.
    fn rposition<F>(&self, predicate: F) -> Option<usize>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        search::rscan(self, true, predicate)
    }

    /// The index of some element that satisfies `predicate`.
    ///
    /// Cheaper than [`position`](SequenceExt::position) when the sequence
    /// has pending elements, but not necessarily the first match.
    fn any_position<F>(&self, predicate: F) -> Option<usize>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        search::scan(self, false, predicate)
    }

    fn index_of(&self, value: &Self::Item) -> Option<usize>
    where
        Self::Item: PartialEq,
    {
        self.position(|element| element == value)
    }

    fn last_index_of(&self, value: &Self::Item) -> Option<usize>
    where
        Self::Item: PartialEq,
    {
        self.rposition(|element| element == value)
    }

    fn contains(&self, value: &Self::Item) -> bool
    where
        Self::Item: PartialEq,
    {
        self.any(|element| element == value)
    }

    /// Whether every one of `values` occurs in the sequence.
    fn contains_all<'v, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'v Self::Item>,
        Self::Item: Eq + Hash + 'v,
    {
        let mut remaining: HashSet<&Self::Item> = HashSet::new();
        remaining.extend(values);
        if remaining.is_empty() {
            return true;
        }
        self.any(|element| {
            remaining.remove(element);
            remaining.is_empty()
        })
    }

    /// Binary search over a sequence sorted by `compare`, forcing only the
    /// probed elements. Same result convention as [`slice::binary_search_by`].
    fn binary_search_by<F>(&self, mut compare: F) -> Result<usize, usize>
    where
        F: FnMut(&Self::Item) -> Ordering,
    {
        let mut low = 0;
        let mut high = self.len();
        while low < high {
            let middle = low + (high - low) / 2;
            match compare(self.slot(middle).resolve()) {
                Ordering::Less => low = middle + 1,
                Ordering::Greater => high = middle,
                Ordering::Equal => return Ok(middle),
            }
        }
        Err(low)
    }

    /// All elements as a vector, forcing every one of them.
    fn to_vec(&self) -> Vec<Self::Item>
    where
        Self::Item: Clone,
    {
        self.iter().cloned().collect()
    }

    /// An immutable copy of `from..to` that keeps pending elements lazy.
    fn range_to_immutable(&self, from: usize, to: usize) -> error::Result<ImmutableList<Self::Item>>
    where
        Self::Item: Clone,
    {
        error::check_range(from, to, self.len())?;
        let mut buffer = SlotBuffer::with_capacity(to - from);
        for index in from..to {
            buffer.push_ref(self.slot(index));
        }
        Ok(buffer.finish())
    }

    /// A mutable copy of `from..to` that keeps pending elements lazy.
    fn range_to_mutable(&self, from: usize, to: usize) -> error::Result<MutableList<Self::Item>>
    where
        Self::Item: Clone,
    {
        error::check_range(from, to, self.len())?;
        Ok(MutableList::from_slots(
            (from..to).map(|index| self.slot(index).to_slot()).collect(),
        ))
    }
}

impl<S> SequenceExt for S where S: SequenceCore + ?Sized {}

/// Structural mutation.
///
/// The mutable family implements this for real. Immutable sequences
/// implement it too, but every method fails with
/// [`Error::Unsupported`](crate::Error::Unsupported);
/// use their copy-and-rebuild methods instead.
pub trait SequenceMut: SequenceCore {
    fn push(&mut self, value: Self::Item) -> error::Result<()>;

    /// Append an element computed on first access.
    fn push_deferred<C>(&mut self, callback: C) -> error::Result<()>
    where
        C: IntoDeferred<Self::Item>;

    fn insert(&mut self, index: usize, value: Self::Item) -> error::Result<()>;

    fn insert_deferred<C>(&mut self, index: usize, callback: C) -> error::Result<()>
    where
        C: IntoDeferred<Self::Item>;

    /// Remove the element at `index` and return it, forced.
    fn remove(&mut self, index: usize) -> error::Result<Self::Item>;

    /// Remove the first element equal to `value`. Returns whether one was
    /// found.
    fn remove_item(&mut self, value: &Self::Item) -> error::Result<bool>
    where
        Self::Item: PartialEq;

    /// Replace the element at `index` and return the previous one, forced.
    fn set(&mut self, index: usize, value: Self::Item) -> error::Result<Self::Item>;

    /// Remove every element that satisfies `predicate`, keeping the order of
    /// the rest. Returns the number of removed elements.
    fn remove_if<F>(&mut self, predicate: F) -> error::Result<usize>
    where
        F: FnMut(&Self::Item) -> bool;

    /// Stable sort; forces every element.
    fn sort_by<F>(&mut self, compare: F) -> error::Result<()>
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering;

    fn clear(&mut self) -> error::Result<()>;

    /// Append plain values.
    fn extend_values<I>(&mut self, values: I) -> error::Result<()>
    where
        I: IntoIterator<Item = Self::Item>;

    /// Append the elements of another sequence without forcing them.
    fn append_sequence<S>(&mut self, other: &S) -> error::Result<()>
    where
        S: SequenceCore<Item = Self::Item> + ?Sized;

    fn insert_values<I>(&mut self, index: usize, values: I) -> error::Result<()>
    where
        I: IntoIterator<Item = Self::Item>;

    /// Insert the elements of another sequence without forcing them.
    fn insert_sequence<S>(&mut self, index: usize, other: &S) -> error::Result<()>
    where
        S: SequenceCore<Item = Self::Item> + ?Sized;

    /// Replace every element by the result of `operator`.
    fn replace_all<F>(&mut self, operator: F) -> error::Result<()>
    where
        F: FnMut(&Self::Item) -> Self::Item;
}
