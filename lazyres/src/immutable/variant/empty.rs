use std::marker::PhantomData;

use crate::sequence::SequenceCore;
use crate::slot::SlotRef;

#[derive(Clone)]
pub struct Empty<T> {
    marker: PhantomData<T>,
}

impl<T> Empty<T> {
    pub(crate) const fn new() -> Self {
        Empty {
            marker: PhantomData,
        }
    }
}

impl<T> SequenceCore for Empty<T> {
    type Item = T;

    #[inline]
    fn is_empty(&self) -> bool {
        true
    }

    #[inline]
    fn len(&self) -> usize {
        0
    }

    fn slot(&self, index: usize) -> SlotRef<'_, T> {
        panic!("index {index} out of bounds for an empty sequence")
    }

    #[inline]
    fn is_any_unresolved(&self) -> bool {
        false
    }
}
