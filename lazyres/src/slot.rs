use std::fmt;

use lazyres_cell::{Deferred, IntoDeferred};

/// One storage position of a sequence.
///
/// A slot holds either a concrete value or a deferred cell that computes
/// the value on first access.
#[derive(Clone)]
pub enum Slot<T> {
    Value(T),
    Deferred(Deferred<T>),
}

impl<T> Slot<T> {
    /// A slot computed by `callback` on first access.
    ///
    /// Passing an existing [`Deferred`] stores that very cell.
    pub fn deferred<C>(callback: C) -> Self
    where
        C: IntoDeferred<T>,
    {
        Slot::Deferred(callback.into_deferred())
    }

    #[inline]
    pub fn as_ref(&self) -> SlotRef<'_, T> {
        match self {
            Slot::Value(value) => SlotRef::Value(value),
            Slot::Deferred(cell) => SlotRef::Deferred(cell),
        }
    }

    /// The value, forcing the cell if needed.
    #[inline]
    pub fn resolve(&self) -> &T {
        self.as_ref().resolve()
    }

    /// The value if it's available without forcing.
    #[inline]
    pub fn resolved(&self) -> Option<&T> {
        self.as_ref().resolved()
    }

    /// Whether reading the value would run a callback.
    #[inline]
    pub fn is_unresolved(&self) -> bool {
        self.as_ref().is_unresolved()
    }

    /// Take the value out of the slot, forcing it if needed.
    pub fn into_value(self) -> T
    where
        T: Clone,
    {
        match self {
            Slot::Value(value) => value,
            Slot::Deferred(cell) => cell.into_value(),
        }
    }

    /// Replace an already resolved cell by its value. Never forces.
    pub(crate) fn settle(&mut self)
    where
        T: Clone,
    {
        let settled = match self {
            Slot::Deferred(cell) => cell.resolved_value().cloned(),
            Slot::Value(_) => None,
        };
        if let Some(value) = settled {
            *self = Slot::Value(value);
        }
    }

    /// Force the slot and store the value in place of the cell.
    pub(crate) fn settle_forced(&mut self) -> &T
    where
        T: Clone,
    {
        if let Slot::Deferred(cell) = self {
            let value = cell.get().clone();
            *self = Slot::Value(value);
        }
        match self {
            Slot::Value(value) => value,
            Slot::Deferred(_) => unreachable!("a forced slot holds a value"),
        }
    }
}

impl<T> From<Deferred<T>> for Slot<T> {
    fn from(cell: Deferred<T>) -> Self {
        Slot::Deferred(cell)
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Slot::Deferred(cell) => fmt::Debug::fmt(cell, f),
        }
    }
}

/// A borrowed slot, as handed out by every backing store.
///
/// Plain storage (a slice of values) and slot storage both hand out
/// `SlotRef`s, so the sequence algorithms don't care which one they read.
pub enum SlotRef<'a, T> {
    Value(&'a T),
    Deferred(&'a Deferred<T>),
}

impl<T> Clone for SlotRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SlotRef<'_, T> {}

impl<'a, T> SlotRef<'a, T> {
    /// The value, forcing the cell if needed.
    #[inline]
    pub fn resolve(self) -> &'a T {
        match self {
            SlotRef::Value(value) => value,
            SlotRef::Deferred(cell) => cell.get(),
        }
    }

    /// The value if it's available without forcing.
    #[inline]
    pub fn resolved(self) -> Option<&'a T> {
        match self {
            SlotRef::Value(value) => Some(value),
            SlotRef::Deferred(cell) => cell.resolved_value(),
        }
    }

    #[inline]
    pub fn is_unresolved(self) -> bool {
        match self {
            SlotRef::Value(_) => false,
            SlotRef::Deferred(cell) => !cell.is_resolved(),
        }
    }

    /// An owned copy of this slot that shares a still pending cell and
    /// unwraps a resolved one. Never forces.
    pub fn to_slot(self) -> Slot<T>
    where
        T: Clone,
    {
        match self {
            SlotRef::Value(value) => Slot::Value(value.clone()),
            SlotRef::Deferred(cell) => match cell.resolved_value() {
                Some(value) => Slot::Value(value.clone()),
                None => Slot::Deferred(cell.clone()),
            },
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SlotRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotRef::Value(value) => f.debug_tuple("Value").field(value).finish(),
            SlotRef::Deferred(cell) => fmt::Debug::fmt(cell, f),
        }
    }
}
