//! Exactly-once deferred cells.
//!
//! A [`Deferred`] wraps a callback that produces a value the first time the
//! cell is read. It's the building block of the lazy sequences in the
//! `lazyres` crate, but it's usable on its own.
//!
//! ```
//! use lazyres_cell::Deferred;
//!
//! let cell = Deferred::new(|| 6 * 7);
//! assert!(!cell.is_resolved());
//! assert_eq!(*cell.get(), 42);
//! assert!(cell.is_resolved());
//! ```
mod callback;
mod deferred;

pub use callback::{Callback, IntoDeferred};
pub use deferred::Deferred;
