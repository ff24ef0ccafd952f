//! Ordered sequences whose elements may be computed lazily.
//!
//! A compiler that loads a large graph of cross references can't always
//! resolve a reference at the moment it fills a list. The sequences in this
//! crate hold, per element, either a value or a [`Deferred`] cell that
//! computes the value the first time it's needed, at most once. Readers see
//! an ordinary list: length, indexed access, iteration, searches and
//! equality all behave as if every element had been computed up front.
//!
//! Two families of sequences are provided:
//!
//! - [`ImmutableList`] never changes; "updates" build a new list that
//!   shares what it can with the old one.
//! - [`MutableList`] can be changed in place, directly or through a
//!   [`MutableSubList`] view.
//!
//! Searches avoid forcing elements where they can: anything that is already
//! available is looked at first, and pending elements are only forced if
//! the answer still depends on them.
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! use lazyres::SequenceExt;
//!
//! let calls = Arc::new(AtomicUsize::new(0));
//! let list = lazyres::immutable(["a", "b", "c"].map(|name| {
//!     let calls = Arc::clone(&calls);
//!     move || {
//!         calls.fetch_add(1, Ordering::SeqCst);
//!         name.to_string()
//!     }
//! }));
//! assert!(list.any(|name| name == "b"));
//! // "c" was never needed
//! assert_eq!(calls.load(Ordering::SeqCst), 2);
//! assert!(list.is_unresolved(2).unwrap());
//! ```
mod error;
mod immutable;
mod mutable;
mod sequence;
#[cfg(feature = "serde")]
mod serialize;
mod slot;

pub use error::{Error, Result};
pub use immutable::{Empty, ImmutableList, Many, One, SubList};
pub use lazyres_cell::{Callback, Deferred, IntoDeferred};
pub use mutable::{MutableList, MutableSubList};
pub use sequence::{Iter, ResolvedOnly, SequenceCore, SequenceExt, SequenceMut};
pub use slot::{Slot, SlotRef};

/// Build an immutable list from a batch of deferred computations.
///
/// Each item may be a callback or an existing [`Deferred`]; nothing is
/// forced.
pub fn immutable<T, I>(callbacks: I) -> ImmutableList<T>
where
    T: Clone,
    I: IntoIterator,
    I::Item: IntoDeferred<T>,
{
    ImmutableList::from_deferred(callbacks)
}

/// Build a mutable list from a batch of deferred computations.
pub fn mutable<T, I>(callbacks: I) -> MutableList<T>
where
    T: Clone,
    I: IntoIterator,
    I::Item: IntoDeferred<T>,
{
    MutableList::from_deferred(callbacks)
}
