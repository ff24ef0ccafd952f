//! Fixed-size sequences.
//!
//! An [`ImmutableList`] is one of a small number of variants: empty, a
//! single inline element, an array, or a window onto another list's array.
//! The factories pick the variant from the number of elements.
mod core;
mod creation;
mod reject;
mod update;
pub(crate) mod variant;

pub use self::core::ImmutableList;
pub use variant::{Empty, Many, One, SubList};
