use std::iter::FusedIterator;

use super::traits::SequenceCore;

/// Iterator over the elements of a sequence, forcing each as it's reached.
pub struct Iter<'a, S: ?Sized> {
    sequence: &'a S,
    front: usize,
    back: usize,
}

impl<'a, S> Iter<'a, S>
where
    S: SequenceCore + ?Sized,
{
    pub(crate) fn new(sequence: &'a S) -> Self {
        Self {
            sequence,
            front: 0,
            back: sequence.len(),
        }
    }
}

impl<'a, S> Iterator for Iter<'a, S>
where
    S: SequenceCore + ?Sized,
{
    type Item = &'a S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let value = self.sequence.slot(self.front).resolve();
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        // skipping must not force what's skipped
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<S> DoubleEndedIterator for Iter<'_, S>
where
    S: SequenceCore + ?Sized,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.sequence.slot(self.back).resolve())
    }
}

impl<S> ExactSizeIterator for Iter<'_, S> where S: SequenceCore + ?Sized {}

impl<S> FusedIterator for Iter<'_, S> where S: SequenceCore + ?Sized {}

impl<S: ?Sized> Clone for Iter<'_, S> {
    fn clone(&self) -> Self {
        Self {
            sequence: self.sequence,
            front: self.front,
            back: self.back,
        }
    }
}

/// Iterator over the elements that were already available when reached.
/// Never forces.
pub struct ResolvedOnly<'a, S: ?Sized> {
    sequence: &'a S,
    index: usize,
}

impl<'a, S> ResolvedOnly<'a, S>
where
    S: SequenceCore + ?Sized,
{
    pub(crate) fn new(sequence: &'a S) -> Self {
        Self { sequence, index: 0 }
    }
}

impl<'a, S> Iterator for ResolvedOnly<'a, S>
where
    S: SequenceCore + ?Sized,
{
    type Item = &'a S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.sequence.len() {
            let slot = self.sequence.slot(self.index);
            self.index += 1;
            if let Some(value) = slot.resolved() {
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.sequence.len() - self.index))
    }
}

impl<S> FusedIterator for ResolvedOnly<'_, S> where S: SequenceCore + ?Sized {}
