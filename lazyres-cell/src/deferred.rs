use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::callback::{Callback, IntoDeferred};

/// A value that is computed by a callback the first time it's needed.
///
/// The callback runs at most once, even when several threads force the
/// cell at the same time: the losers of the race block on the cell's lock
/// until the winner has stored the value, then all of them observe that
/// same value. Once the value is stored the callback is dropped.
///
/// `Deferred` is a cheap handle; cloning it shares the underlying cell, so a
/// value forced through one clone is visible through all of them.
///
/// If the callback panics, the panic propagates to the caller that forced
/// the cell and the cell stays pending. The next access runs the callback
/// again.
pub struct Deferred<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    // published last; readers only ever look at this without the lock
    value: OnceLock<T>,
    // `Some` for as long as `value` is unset
    pending: Mutex<Option<Callback<T>>>,
}

impl<T> Inner<T> {
    fn into_value(self) -> T {
        let Inner { value, pending } = self;
        match (value.into_inner(), pending.into_inner()) {
            (Some(value), _) => value,
            (None, Some(mut callback)) => callback(),
            (None, None) => unreachable!("a pending deferred cell always holds its callback"),
        }
    }
}

impl<T> Deferred<T> {
    /// Create a pending cell that computes its value with `callback`.
    pub fn new<F>(callback: F) -> Self
    where
        F: FnMut() -> T + Send + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                value: OnceLock::new(),
                pending: Mutex::new(Some(Box::new(callback))),
            }),
        }
    }

    /// Create a cell that is already resolved to `value`.
    pub fn resolved(value: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: OnceLock::from(value),
                pending: Mutex::new(None),
            }),
        }
    }

    /// Turn anything that can become a deferred cell into one.
    ///
    /// An existing `Deferred` is returned as is; it's never wrapped in
    /// another cell.
    pub fn from_callback<C>(callback: C) -> Self
    where
        C: IntoDeferred<T>,
    {
        callback.into_deferred()
    }

    /// Get the value, running the callback if this is the first access.
    pub fn get(&self) -> &T {
        match self.inner.value.get() {
            Some(value) => value,
            None => self.force(),
        }
    }

    #[cold]
    fn force(&self) -> &T {
        let mut pending = self.inner.pending.lock();
        // another thread may have resolved the cell while we waited
        if let Some(value) = self.inner.value.get() {
            return value;
        }
        let callback = match pending.as_mut() {
            Some(callback) => callback,
            None => unreachable!("a pending deferred cell always holds its callback"),
        };
        tracing::trace!("forcing deferred value");
        let value = callback();
        let value = self.inner.value.get_or_init(|| value);
        // the callback is only released after the value is published
        *pending = None;
        value
    }

    /// Whether the value has been computed. Never blocks.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.inner.value.get().is_some()
    }

    /// The value, if it has been computed. Never forces the cell.
    #[inline]
    pub fn resolved_value(&self) -> Option<&T> {
        self.inner.value.get()
    }

    /// Run `action` with the value if it's already computed.
    ///
    /// Returns `true` if `action` ran. Never forces the cell.
    pub fn if_resolved<F>(&self, action: F) -> bool
    where
        F: FnOnce(&T),
    {
        match self.inner.value.get() {
            Some(value) => {
                action(value);
                true
            }
            None => false,
        }
    }

    /// Consume the handle and take the value, forcing it if needed.
    ///
    /// When this is the last handle to the cell the value is moved out,
    /// otherwise it's cloned.
    pub fn into_value(self) -> T
    where
        T: Clone,
    {
        match Arc::try_unwrap(self.inner) {
            Ok(inner) => inner.into_value(),
            Err(inner) => Deferred { inner }.get().clone(),
        }
    }

    /// Whether both handles refer to the same cell.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolved_value() {
            Some(value) => f.debug_tuple("Deferred").field(value).finish(),
            None => f.write_str("Deferred(<pending>)"),
        }
    }
}
