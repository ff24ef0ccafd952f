use crate::sequence::SequenceCore;
use crate::slot::SlotRef;

use super::storage::Storage;

/// A window onto the array storage of another sequence. Owns no slots of
/// its own.
#[derive(Clone)]
pub struct SubList<T> {
    storage: Storage<T>,
    offset: usize,
    len: usize,
}

impl<T> SubList<T> {
    pub(crate) fn new(storage: Storage<T>, offset: usize, len: usize) -> Self {
        debug_assert!(offset + len <= storage.len());
        SubList {
            storage,
            offset,
            len,
        }
    }

    pub(crate) fn storage(&self) -> &Storage<T> {
        &self.storage
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }
}

impl<T> SequenceCore for SubList<T> {
    type Item = T;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len == 0
    }

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
        self.storage.slot(self.offset + index)
    }

    fn is_any_unresolved(&self) -> bool {
        self.storage
            .is_any_unresolved_in(self.offset..self.offset + self.len)
    }
}
