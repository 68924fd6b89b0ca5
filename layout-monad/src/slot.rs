use std::fmt;
use std::rc::Rc;

use crate::LayoutError;

/// Deferred computation backing a single layout.
///
/// Shared so that it can be cloned out of its slot and run without holding a
/// borrow, which keeps the slot Pending if the computation fails or panics.
pub(crate) type Thunk<T> = Rc<dyn Fn() -> Result<T, LayoutError>>;

pub(crate) fn constant<T: Clone + 'static>(value: T) -> Thunk<T> {
    Rc::new(move || Ok(value.clone()))
}

/// Per-layout storage: Pending moves to Resolved at most once, never back.
pub(crate) enum Slot<T> {
    Pending(Thunk<T>),
    Resolved(T),
}

impl<T> Slot<T> {
    pub(crate) fn is_resolved(&self) -> bool {
        matches!(self, Slot::Resolved(_))
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Pending(_) => f.write_str("Pending"),
            Slot::Resolved(value) => f.debug_tuple("Resolved").field(value).finish(),
        }
    }
}
