use crate::sequence::SequenceCore;
use crate::slot::SlotRef;

use super::storage::Storage;

/// Two or more elements in shared array storage.
#[derive(Clone)]
pub struct Many<T> {
    storage: Storage<T>,
}

impl<T> Many<T> {
    pub(crate) fn new(storage: Storage<T>) -> Self {
        debug_assert!(storage.len() > 1);
        Many { storage }
    }

    pub(crate) fn storage(&self) -> &Storage<T> {
        &self.storage
    }
}

impl<T> SequenceCore for Many<T> {
    type Item = T;

    #[inline]
    fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    fn len(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    fn slot(&self, index: usize) -> SlotRef<'_, T> {
        self.storage.slot(index)
    }

    fn is_any_unresolved(&self) -> bool {
        self.storage.is_any_unresolved_in(0..self.storage.len())
    }
}
