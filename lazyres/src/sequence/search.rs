// Searches over sequences that may contain pending slots.
//
// A search first looks at everything it can read without forcing: plain
// values and cells that are already resolved. Pending slots are remembered
// in a skip set. Only when that first pass can't settle the answer are the
// skipped slots forced, in order.
//
// For searches that need the left-most match, a resolved match found in the
// first pass is only a candidate: a pending slot before it might match too.
// The first pass stops at the candidate, so every skipped index lies before
// it and forcing them in order either finds an earlier match or confirms the
// candidate. Pending slots after the candidate are never forced.

use super::skip::SkipSet;
use super::traits::SequenceCore;

/// Find a matching index, scanning front to back.
///
/// With `leftmost`, the result is the first matching index, exactly as a
/// fully forced scan would report it. Without it, any matching index may be
/// returned, which lets a match among resolved slots win outright.
pub(crate) fn scan<S, F>(seq: &S, leftmost: bool, mut predicate: F) -> Option<usize>
where
    S: SequenceCore + ?Sized,
    F: FnMut(&S::Item) -> bool,
{
    let len = seq.len();
    let mut skipped = SkipSet::new();
    let mut candidate = None;
    for index in 0..len {
        match seq.slot(index).resolved() {
            Some(value) => {
                if predicate(value) {
                    candidate = Some(index);
                    break;
                }
            }
            None => skipped.insert(index),
        }
    }
    if candidate.is_some() && (!leftmost || skipped.is_empty()) {
        return candidate;
    }
    tracing::trace!(skipped = skipped.len(), "forcing skipped slots");
    for index in skipped.iter() {
        if predicate(seq.slot(index).resolve()) {
            return Some(index);
        }
    }
    candidate
}

/// Find a matching index, scanning back to front.
///
/// The mirror image of [`scan`]: with `leftmost` the result is the last
/// matching index.
pub(crate) fn rscan<S, F>(seq: &S, leftmost: bool, mut predicate: F) -> Option<usize>
where
    S: SequenceCore + ?Sized,
    F: FnMut(&S::Item) -> bool,
{
    let len = seq.len();
    // the skip set wants ascending indices, so it records distances from
    // the end
    let mut skipped = SkipSet::new();
    let mut candidate = None;
    for distance in 0..len {
        let index = len - 1 - distance;
        match seq.slot(index).resolved() {
            Some(value) => {
                if predicate(value) {
                    candidate = Some(index);
                    break;
                }
            }
            None => skipped.insert(distance),
        }
    }
    if candidate.is_some() && (!leftmost || skipped.is_empty()) {
        return candidate;
    }
    tracing::trace!(skipped = skipped.len(), "forcing skipped slots");
    for distance in skipped.iter() {
        let index = len - 1 - distance;
        if predicate(seq.slot(index).resolve()) {
            return Some(index);
        }
    }
    candidate
}

/// The length of the longest prefix whose elements all satisfy `predicate`.
///
/// Forces elements front to back until the first one that fails.
pub(crate) fn prefix_len<S, F>(seq: &S, mut predicate: F) -> usize
where
    S: SequenceCore + ?Sized,
    F: FnMut(&S::Item) -> bool,
{
    (0..seq.len())
        .find(|&index| !predicate(seq.slot(index).resolve()))
        .unwrap_or(seq.len())
}
