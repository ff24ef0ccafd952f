// The variants are dispatched by hand with a match per method, so the
// per-variant implementations stay statically dispatched on the inside.

// creation.rs contains the factories
// update.rs contains the copy-and-rebuild operations
// reject.rs rejects in place mutation

use crate::error;
use crate::sequence::SequenceCore;
use crate::slot::SlotRef;

use super::variant::{Empty, Many, One, SubList};

/// A fixed-size sequence whose elements may be computed lazily.
///
/// An immutable list never changes after construction; reading it never
/// disturbs its storage, so it can be shared across threads and read
/// concurrently, including forcing the same pending element from several
/// threads at once. "Updates" build a new list that reuses the slots of
/// this one, both resolved values and still pending cells.
///
/// Cloning is cheap for array backed lists: the storage is shared.
#[derive(Clone)]
pub enum ImmutableList<T> {
    Empty(Empty<T>),
    One(One<T>),
    Many(Many<T>),
    SubList(SubList<T>),
}

static_assertions::assert_impl_all!(ImmutableList<String>: Send, Sync, Clone);

impl<T> Default for ImmutableList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> ImmutableList<T> {
    /// The empty list. Allocates nothing.
    pub const fn empty() -> Self {
        ImmutableList::Empty(Empty::new())
    }

    /// A view of `from..to` that shares this list's storage.
    ///
    /// Views of views refer to the underlying storage directly, so there is
    /// never more than one level of indirection.
    pub fn sub_list(&self, from: usize, to: usize) -> error::Result<Self>
    where
        T: Clone,
    {
        error::check_range(from, to, self.len())?;
        Ok(self.view(from, to))
    }

    // `from..to` must be a valid range
    pub(crate) fn view(&self, from: usize, to: usize) -> Self
    where
        T: Clone,
    {
        if from == 0 && to == self.len() {
            return self.clone();
        }
        if from == to {
            return Self::empty();
        }
        match self {
            ImmutableList::Many(inner) => {
                ImmutableList::SubList(SubList::new(inner.storage().clone(), from, to - from))
            }
            ImmutableList::SubList(inner) => ImmutableList::SubList(SubList::new(
                inner.storage().clone(),
                inner.offset() + from,
                to - from,
            )),
            // a non-empty proper range needs at least two elements
            ImmutableList::Empty(_) | ImmutableList::One(_) => {
                unreachable!("proper sub range of a list with fewer than two elements")
            }
        }
    }

    /// Whether every element is stored as a plain value, so reading never
    /// goes through a cell.
    pub fn is_plain(&self) -> bool {
        match self {
            ImmutableList::Empty(_) => true,
            ImmutableList::One(inner) => !matches!(inner.raw(), crate::Slot::Deferred(_)),
            ImmutableList::Many(inner) => inner.storage().is_plain(),
            ImmutableList::SubList(inner) => inner.storage().is_plain(),
        }
    }

    /// Whether both lists are the same list: they share storage and cover
    /// the same part of it.
    ///
    /// A single element held inline as a plain value has no shared identity:
    /// it is copied along with the list, so a clone of such a list is never
    /// identical to the original. A single pending or deferred element is
    /// identified by its cell, which clones share.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ImmutableList::Empty(_), ImmutableList::Empty(_)) => true,
            (ImmutableList::One(a), ImmutableList::One(b)) => a.ptr_eq(b),
            (ImmutableList::Many(a), ImmutableList::Many(b)) => a.storage().ptr_eq(b.storage()),
            (ImmutableList::SubList(a), ImmutableList::SubList(b)) => {
                a.storage().ptr_eq(b.storage()) && a.offset() == b.offset() && a.len() == b.len()
            }
            _ => false,
        }
    }
}

impl<T> SequenceCore for ImmutableList<T> {
    type Item = T;

    fn is_empty(&self) -> bool {
        match self {
            ImmutableList::Empty(inner) => inner.is_empty(),
            ImmutableList::One(inner) => inner.is_empty(),
            ImmutableList::Many(inner) => inner.is_empty(),
            ImmutableList::SubList(inner) => inner.is_empty(),
        }
    }

    fn len(&self) -> usize {
        match self {
            ImmutableList::Empty(inner) => inner.len(),
            ImmutableList::One(inner) => inner.len(),
            ImmutableList::Many(inner) => inner.len(),
            ImmutableList::SubList(inner) => inner.len(),
        }
    }

    fn slot(&self, index: usize) -> SlotRef<'_, T> {
        match self {
            ImmutableList::Empty(inner) => inner.slot(index),
            ImmutableList::One(inner) => inner.slot(index),
            ImmutableList::Many(inner) => inner.slot(index),
            ImmutableList::SubList(inner) => inner.slot(index),
        }
    }

    fn is_any_unresolved(&self) -> bool {
        match self {
            ImmutableList::Empty(inner) => inner.is_any_unresolved(),
            ImmutableList::One(inner) => inner.is_any_unresolved(),
            ImmutableList::Many(inner) => inner.is_any_unresolved(),
            ImmutableList::SubList(inner) => inner.is_any_unresolved(),
        }
    }

    // already immutable, so share the storage
    fn to_immutable(&self) -> ImmutableList<T>
    where
        T: Clone,
    {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, SequenceExt, Slot};

    use super::*;

    #[test]
    fn test_empty_is_const() {
        const EMPTY: ImmutableList<i32> = ImmutableList::empty();
        assert!(EMPTY.is_empty());
        assert!(EMPTY.ptr_eq(&ImmutableList::default()));
        assert_eq!(
            EMPTY.get(0),
            Err(Error::IndexOutOfBounds { index: 0, size: 0 })
        );
    }

    #[test]
    fn test_sub_list_bounds() {
        let list = ImmutableList::from(vec![1, 2, 3]);
        assert_eq!(
            list.sub_list(2, 1),
            Err(Error::InvalidRange {
                from: 2,
                to: 1,
                size: 3
            })
        );
        assert!(list.sub_list(0, 4).is_err());
        assert!(list.sub_list(3, 3).unwrap().is_empty());
        assert!(list.sub_list(0, 3).unwrap().ptr_eq(&list));
    }

    #[test]
    fn test_nested_sub_list_collapses() {
        let list = ImmutableList::from((0..10).collect::<Vec<_>>());
        let outer = list.sub_list(2, 9).unwrap();
        let inner = outer.sub_list(1, 4).unwrap();
        assert_eq!(inner, [3, 4, 5]);
        match (&list, &inner) {
            (ImmutableList::Many(many), ImmutableList::SubList(sub)) => {
                assert!(sub.storage().ptr_eq(many.storage()));
                assert_eq!(sub.offset(), 3);
            }
            _ => panic!("expected a view onto the original storage"),
        }
    }

    #[test]
    fn test_sub_list_does_not_force() {
        let list: ImmutableList<i32> = ImmutableList::from_deferred((0..4).map(|i| move || i));
        let view = list.sub_list(1, 3).unwrap();
        assert!(view.is_any_unresolved());
        assert_eq!(view.get(0), Ok(&1));
        assert!(!list.is_unresolved(1).unwrap());
        assert!(view.is_any_unresolved());
        assert_eq!(view.get(1), Ok(&2));
        assert!(!view.is_any_unresolved());
        assert!(list.is_any_unresolved());
    }

    #[test]
    fn test_identity_of_clones() {
        let many = ImmutableList::from(vec![1, 2]);
        assert!(many.clone().ptr_eq(&many));

        let deferred = ImmutableList::from_callback(|| 1);
        assert!(deferred.clone().ptr_eq(&deferred));

        let inline = ImmutableList::from(vec![1]);
        assert!(inline.ptr_eq(&inline));
        assert!(!inline.clone().ptr_eq(&inline));
        // still equal by value
        assert_eq!(inline.clone(), inline);
    }

    #[test]
    fn test_is_plain() {
        assert!(ImmutableList::from(vec![1, 2]).is_plain());
        assert!(!ImmutableList::from_slots(vec![Slot::deferred(|| 1)]).is_plain());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_slot_out_of_bounds_panics() {
        let list = ImmutableList::from(vec![1, 2, 3]);
        let view = list.sub_list(0, 2).unwrap();
        view.slot(2);
    }
}
