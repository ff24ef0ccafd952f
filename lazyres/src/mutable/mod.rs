//! Growable sequences and views onto them.
mod creation;
mod list;
mod sublist;

pub use list::MutableList;
pub use sublist::MutableSubList;
