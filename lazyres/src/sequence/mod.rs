//! The sequence interface shared by the immutable and mutable families.
//!
//! Every backing store implements [`SequenceCore`], handing out raw slots.
//! [`SequenceExt`] builds indexed access, iteration, searches and
//! conversions on top of that, so the algorithms exist only once.
mod compare;
pub(crate) mod conversion;
mod iter;
pub(crate) mod search;
mod skip;
mod traits;

pub use iter::{Iter, ResolvedOnly};
pub use traits::{SequenceCore, SequenceExt, SequenceMut};
