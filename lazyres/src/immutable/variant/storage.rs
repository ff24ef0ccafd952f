use std::ops::Range;
use std::sync::Arc;

use crate::slot::{Slot, SlotRef};

/// Shared array storage behind `Many` and `SubList`.
///
/// `Plain` holds sequences whose elements were all resolved when the
/// storage was built.
pub(crate) enum Storage<T> {
    Plain(Arc<[T]>),
    Lazy(Arc<[Slot<T>]>),
}

impl<T> Storage<T> {
    #[inline]
    pub(crate) fn len(&self) -> usize {
        match self {
            Storage::Plain(values) => values.len(),
            Storage::Lazy(slots) => slots.len(),
        }
    }

    #[inline]
    pub(crate) fn slot(&self, index: usize) -> SlotRef<'_, T> {
        match self {
            Storage::Plain(values) => SlotRef::Value(&values[index]),
            Storage::Lazy(slots) => slots[index].as_ref(),
        }
    }

    pub(crate) fn is_any_unresolved_in(&self, range: Range<usize>) -> bool {
        match self {
            Storage::Plain(_) => false,
            Storage::Lazy(slots) => slots[range].iter().any(Slot::is_unresolved),
        }
    }

    #[inline]
    pub(crate) fn is_plain(&self) -> bool {
        matches!(self, Storage::Plain(_))
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Storage::Plain(a), Storage::Plain(b)) => Arc::ptr_eq(a, b),
            (Storage::Lazy(a), Storage::Lazy(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T> Clone for Storage<T> {
    fn clone(&self) -> Self {
        match self {
            Storage::Plain(values) => Storage::Plain(Arc::clone(values)),
            Storage::Lazy(slots) => Storage::Lazy(Arc::clone(slots)),
        }
    }
}
