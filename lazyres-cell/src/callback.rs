use crate::Deferred;

/// The boxed form of a deferred computation.
///
/// It's `FnMut` rather than `FnOnce` so that a callback that panicked can
/// be run again on the next access.
pub type Callback<T> = Box<dyn FnMut() -> T + Send>;

/// Something that can be turned into a [`Deferred`] cell.
///
/// This is implemented for closures producing a `T` and for `Deferred<T>`
/// itself. Converting a `Deferred` hands back the very same cell, so
/// factories that accept `IntoDeferred` never double-wrap.
pub trait IntoDeferred<T> {
    fn into_deferred(self) -> Deferred<T>;
}

impl<T> IntoDeferred<T> for Deferred<T> {
    #[inline]
    fn into_deferred(self) -> Deferred<T> {
        self
    }
}

impl<T, F> IntoDeferred<T> for F
where
    F: FnMut() -> T + Send + 'static,
{
    #[inline]
    fn into_deferred(self) -> Deferred<T> {
        Deferred::new(self)
    }
}
