mod empty;
mod many;
mod one;
mod storage;
mod sublist;

pub use empty::Empty;
pub use many::Many;
pub use one::One;
pub(crate) use storage::Storage;
pub use sublist::SubList;
