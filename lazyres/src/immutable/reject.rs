use std::cmp::Ordering;

use crate::error::{self, Error};
use crate::sequence::{SequenceCore, SequenceMut};
use crate::IntoDeferred;

use super::core::ImmutableList;

fn unsupported<T>(operation: &'static str) -> error::Result<T> {
    Err(Error::Unsupported { operation })
}

// An immutable list never changes in place; see update.rs for the
// operations that build a changed copy instead.
impl<T: Clone> SequenceMut for ImmutableList<T> {
    fn push(&mut self, _value: T) -> error::Result<()> {
        unsupported("push")
    }

    fn push_deferred<C>(&mut self, _callback: C) -> error::Result<()>
    where
        C: IntoDeferred<T>,
    {
        unsupported("push_deferred")
    }

    fn insert(&mut self, _index: usize, _value: T) -> error::Result<()> {
        unsupported("insert")
    }

    fn insert_deferred<C>(&mut self, _index: usize, _callback: C) -> error::Result<()>
    where
        C: IntoDeferred<T>,
    {
        unsupported("insert_deferred")
    }

    fn remove(&mut self, _index: usize) -> error::Result<T> {
        unsupported("remove")
    }

    fn remove_item(&mut self, _value: &T) -> error::Result<bool>
    where
        T: PartialEq,
    {
        unsupported("remove_item")
    }

    fn set(&mut self, _index: usize, _value: T) -> error::Result<T> {
        unsupported("set")
    }

    fn remove_if<F>(&mut self, _predicate: F) -> error::Result<usize>
    where
        F: FnMut(&T) -> bool,
    {
        unsupported("remove_if")
    }

    fn sort_by<F>(&mut self, _compare: F) -> error::Result<()>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        unsupported("sort_by")
    }

    fn clear(&mut self) -> error::Result<()> {
        unsupported("clear")
    }

    fn extend_values<I>(&mut self, _values: I) -> error::Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        unsupported("extend_values")
    }

    fn append_sequence<S>(&mut self, _other: &S) -> error::Result<()>
    where
        S: SequenceCore<Item = T> + ?Sized,
    {
        unsupported("append_sequence")
    }

    fn insert_values<I>(&mut self, _index: usize, _values: I) -> error::Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        unsupported("insert_values")
    }

    fn insert_sequence<S>(&mut self, _index: usize, _other: &S) -> error::Result<()>
    where
        S: SequenceCore<Item = T> + ?Sized,
    {
        unsupported("insert_sequence")
    }

    fn replace_all<F>(&mut self, _operator: F) -> error::Result<()>
    where
        F: FnMut(&T) -> T,
    {
        unsupported("replace_all")
    }
}
