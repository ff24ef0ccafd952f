use std::cmp::Ordering;

use crate::error;
use crate::sequence::{Iter, SequenceCore, SequenceExt, SequenceMut};
use crate::slot::Slot;
use crate::IntoDeferred;

use super::list::MutableList;
use super::sublist::MutableSubList;

impl<T> From<Vec<T>> for MutableList<T> {
    fn from(values: Vec<T>) -> Self {
        MutableList::from_raw(values.into_iter().map(Slot::Value).collect())
    }
}

impl<T> FromIterator<T> for MutableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        MutableList::from_raw(iter.into_iter().map(Slot::Value).collect())
    }
}

impl<T: Clone> Extend<T> for MutableList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        let slots = values.into_iter().map(Slot::Value).collect();
        self.insert_slots(self.len(), slots);
    }
}

impl<'a, T> IntoIterator for &'a MutableList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, MutableList<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// The trait forms of the inherent methods, so generic code can mutate any
// sequence. Operations that can't fail still return a `Result`, as the
// immutable family rejects all of them.
macro_rules! impl_sequence_mut {
    ($([$($generics:tt)*] $ty:ty;)*) => {
        $(
            impl<$($generics)*> SequenceMut for $ty {
                fn push(&mut self, value: T) -> error::Result<()> {
                    <$ty>::push(self, value);
                    Ok(())
                }

                fn push_deferred<C>(&mut self, callback: C) -> error::Result<()>
                where
                    C: IntoDeferred<T>,
                {
                    <$ty>::push_deferred(self, callback);
                    Ok(())
                }

                fn insert(&mut self, index: usize, value: T) -> error::Result<()> {
                    <$ty>::insert(self, index, value)
                }

                fn insert_deferred<C>(&mut self, index: usize, callback: C) -> error::Result<()>
                where
                    C: IntoDeferred<T>,
                {
                    <$ty>::insert_deferred(self, index, callback)
                }

                fn remove(&mut self, index: usize) -> error::Result<T> {
                    <$ty>::remove(self, index)
                }

                fn remove_item(&mut self, value: &T) -> error::Result<bool>
                where
                    T: PartialEq,
                {
                    Ok(<$ty>::remove_item(self, value))
                }

                fn set(&mut self, index: usize, value: T) -> error::Result<T> {
                    <$ty>::set(self, index, value)
                }

                fn remove_if<F>(&mut self, predicate: F) -> error::Result<usize>
                where
                    F: FnMut(&T) -> bool,
                {
                    Ok(<$ty>::remove_if(self, predicate))
                }

                fn sort_by<F>(&mut self, compare: F) -> error::Result<()>
                where
                    F: FnMut(&T, &T) -> Ordering,
                {
                    <$ty>::sort_by(self, compare);
                    Ok(())
                }

                fn clear(&mut self) -> error::Result<()> {
                    <$ty>::clear(self);
                    Ok(())
                }

                fn extend_values<I>(&mut self, values: I) -> error::Result<()>
                where
                    I: IntoIterator<Item = T>,
                {
                    self.extend(values);
                    Ok(())
                }

                fn append_sequence<S>(&mut self, other: &S) -> error::Result<()>
                where
                    S: SequenceCore<Item = T> + ?Sized,
                {
                    <$ty>::append_sequence(self, other);
                    Ok(())
                }

                fn insert_values<I>(&mut self, index: usize, values: I) -> error::Result<()>
                where
                    I: IntoIterator<Item = T>,
                {
                    <$ty>::insert_values(self, index, values)
                }

                fn insert_sequence<S>(&mut self, index: usize, other: &S) -> error::Result<()>
                where
                    S: SequenceCore<Item = T> + ?Sized,
                {
                    <$ty>::insert_sequence(self, index, other)
                }

                fn replace_all<F>(&mut self, operator: F) -> error::Result<()>
                where
                    F: FnMut(&T) -> T,
                {
                    <$ty>::replace_all(self, operator);
                    Ok(())
                }
            }
        )*
    };
}

impl_sequence_mut! {
    [T: Clone] MutableList<T>;
    ['a, T: Clone] MutableSubList<'a, T>;
}
