// Equality, hashing and formatting all look at forced values only, so a
// sequence behaves like a plain list of its values no matter which of its
// elements happen to be resolved.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::immutable::ImmutableList;
use crate::mutable::{MutableList, MutableSubList};

use super::traits::{SequenceCore, SequenceExt};

pub(crate) fn sequence_eq<A, B>(a: &A, b: &B) -> bool
where
    A: SequenceCore + ?Sized,
    B: SequenceCore<Item = A::Item> + ?Sized,
    A::Item: PartialEq,
{
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(a, b)| a == b)
}

pub(crate) fn slice_eq<S>(sequence: &S, values: &[S::Item]) -> bool
where
    S: SequenceCore + ?Sized,
    S::Item: PartialEq,
{
    sequence.len() == values.len() && sequence.iter().zip(values).all(|(a, b)| a == b)
}

// hashes the same way a slice of the values does
pub(crate) fn sequence_hash<S, H>(sequence: &S, state: &mut H)
where
    S: SequenceCore + ?Sized,
    S::Item: Hash,
    H: Hasher,
{
    state.write_usize(sequence.len());
    for value in sequence.iter() {
        value.hash(state);
    }
}

macro_rules! impl_sequence_eq {
    ($([$($generics:tt)*] $lhs:ty, $rhs:ty;)*) => {
        $(
            impl<$($generics)*> PartialEq<$rhs> for $lhs
            where
                T: PartialEq,
            {
                #[inline]
                fn eq(&self, other: &$rhs) -> bool {
                    sequence_eq(self, other)
                }
            }
        )*
    };
}

macro_rules! impl_slice_eq {
    ($([$($generics:tt)*] $lhs:ty, $rhs:ty;)*) => {
        $(
            impl<$($generics)*> PartialEq<$rhs> for $lhs
            where
                T: PartialEq,
            {
                #[inline]
                fn eq(&self, other: &$rhs) -> bool {
                    slice_eq(self, &other[..])
                }
            }
        )*
    };
}

macro_rules! impl_value_traits {
    ($([$($generics:tt)*] $ty:ty;)*) => {
        $(
            impl<$($generics)*> Eq for $ty where T: Eq {}

            impl<$($generics)*> Hash for $ty
            where
                T: Hash,
            {
                fn hash<H: Hasher>(&self, state: &mut H) {
                    sequence_hash(self, state)
                }
            }

            impl<$($generics)*> fmt::Debug for $ty
            where
                T: fmt::Debug,
            {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_list().entries(self.iter()).finish()
                }
            }
        )*
    };
}

impl_sequence_eq! {
    [T] ImmutableList<T>, ImmutableList<T>;
    [T] ImmutableList<T>, MutableList<T>;
    ['a, T] ImmutableList<T>, MutableSubList<'a, T>;
    [T] MutableList<T>, MutableList<T>;
    [T] MutableList<T>, ImmutableList<T>;
    ['a, T] MutableList<T>, MutableSubList<'a, T>;
    ['a, 'b, T] MutableSubList<'a, T>, MutableSubList<'b, T>;
    ['a, T] MutableSubList<'a, T>, ImmutableList<T>;
    ['a, T] MutableSubList<'a, T>, MutableList<T>;
}

impl_slice_eq! {
    [T] ImmutableList<T>, Vec<T>;
    [T] ImmutableList<T>, [T];
    [T, const N: usize] ImmutableList<T>, [T; N];
    [T] MutableList<T>, Vec<T>;
    [T] MutableList<T>, [T];
    [T, const N: usize] MutableList<T>, [T; N];
    ['a, T] MutableSubList<'a, T>, Vec<T>;
    ['a, T] MutableSubList<'a, T>, [T];
    ['a, T, const N: usize] MutableSubList<'a, T>, [T; N];
}

impl<T> PartialEq<ImmutableList<T>> for Vec<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &ImmutableList<T>) -> bool {
        slice_eq(other, self)
    }
}

impl<T> PartialEq<MutableList<T>> for Vec<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &MutableList<T>) -> bool {
        slice_eq(other, self)
    }
}

impl_value_traits! {
    [T] ImmutableList<T>;
    [T] MutableList<T>;
    ['a, T] MutableSubList<'a, T>;
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use ahash::{HashSet, HashSetExt};

    use crate::{Deferred, ImmutableList, MutableList, Slot};

    use super::*;

    fn hash_of<V: Hash + ?Sized>(value: &V) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn test_equal_regardless_of_resolution() {
        let lazy = ImmutableList::from_slots(vec![
            Slot::deferred(|| String::from("a")),
            Slot::Value(String::from("b")),
        ]);
        let plain = ImmutableList::from(strings(&["a", "b"]));
        assert_eq!(lazy, plain);
        assert_eq!(hash_of(&lazy), hash_of(&plain));
    }

    #[test]
    fn test_hash_matches_plain_vec() {
        let values = strings(&["x", "y", "z"]);
        let list: ImmutableList<String> = ImmutableList::from_deferred(
            values
                .clone()
                .into_iter()
                .map(|value| move || value.clone()),
        );
        assert_eq!(hash_of(&list), hash_of(&values));
        assert_eq!(list, values);
        assert_eq!(values, list);
    }

    #[test]
    fn test_cross_family_equality() {
        let immutable = ImmutableList::from(vec![1, 2, 3]);
        let mut mutable = MutableList::from(vec![0, 1, 2, 3]);
        assert_ne!(immutable, mutable);
        mutable.remove(0).unwrap();
        assert_eq!(immutable, mutable);
        assert_eq!(mutable, immutable);
        assert_eq!(mutable, [1, 2, 3]);
        assert_eq!(hash_of(&immutable), hash_of(&mutable));
    }

    #[test]
    fn test_usable_as_set_key() {
        let mut set = HashSet::new();
        set.insert(ImmutableList::from_deferred([Deferred::new(|| 1)]));
        assert!(set.contains(&ImmutableList::from(vec![1])));
    }

    #[test]
    fn test_length_mismatch() {
        let list = ImmutableList::from(vec![1, 2]);
        assert_ne!(list, [1, 2, 3]);
        assert_ne!(list, Vec::<i32>::new());
    }

    #[test]
    fn test_debug_forces() {
        let list: ImmutableList<i32> = ImmutableList::from_deferred((1..=2).map(|i| move || i));
        insta::assert_snapshot!(format!("{:?}", list), @"[1, 2]");
        assert!(!list.is_any_unresolved());
    }
}
