//! Type-erased receiver.

use std::any::type_name;
use std::fmt;
use std::mem;

use tracing::trace;

use crate::{ErrorReceiver, Receiver, ValueReceiver};

/// Object-safe view of a receiver, used as the dispatch table of [`AnyReceiver`].
trait ErasedReceiver<E, V> {
    fn deliver_value_boxed(self: Box<Self>, value: V);
    fn deliver_error_boxed(self: Box<Self>, error: E);
    fn deliver_cancel_boxed(self: Box<Self>);
}

impl<E, V, R> ErasedReceiver<E, V> for R
where
    R: ValueReceiver<V> + ErrorReceiver<E>,
{
    fn deliver_value_boxed(self: Box<Self>, value: V) {
        ValueReceiver::deliver_value(*self, value);
    }

    fn deliver_error_boxed(self: Box<Self>, error: E) {
        ErrorReceiver::deliver_error(*self, error);
    }

    fn deliver_cancel_boxed(self: Box<Self>) {
        Receiver::deliver_cancel(*self);
    }
}

/// A receiver of errors `E` and values `V` whose concrete type has been erased.
///
/// Any receiver that accepts both `E` and `V` can be boxed into an `AnyReceiver<E, V>`, letting
/// receivers of different concrete types be stored and invoked through one type.
///
/// # Empty state
///
/// A default-constructed `AnyReceiver` is empty. Every terminal delivered to an empty receiver
/// is silently discarded, which makes an empty receiver a safe placeholder that callers can
/// deliver to without checking for presence first.
///
/// # Example
///
/// ```rust
/// use execution::{AnyReceiver, LoggingReceiver, ValueReceiver};
///
/// let log = LoggingReceiver::new();
///
/// let receivers: Vec<AnyReceiver<String, (u32,)>> =
///     vec![AnyReceiver::new(log.clone()), AnyReceiver::default()];
///
/// for receiver in receivers {
///     receiver.deliver_value((5,));
/// }
///
/// // Only the non-empty receiver recorded anything.
/// assert_eq!(log.log(), ["value: 5"]);
/// ```
pub struct AnyReceiver<E, V> {
    target: Option<Box<dyn ErasedReceiver<E, V> + Send>>,
}

impl<E, V> AnyReceiver<E, V> {
    /// Boxes `receiver`.
    #[must_use]
    pub fn new<R>(receiver: R) -> Self
    where
        R: ValueReceiver<V> + ErrorReceiver<E> + Send + 'static,
    {
        Self {
            target: Some(Box::new(receiver)),
        }
    }

    /// Creates an empty receiver that discards everything delivered to it.
    #[must_use]
    pub const fn empty() -> Self {
        Self { target: None }
    }

    /// Whether this box holds no receiver.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.target.is_none()
    }

    /// Replaces the boxed receiver with `receiver`, dropping the previous one (if any).
    pub fn set<R>(&mut self, receiver: R)
    where
        R: ValueReceiver<V> + ErrorReceiver<E> + Send + 'static,
    {
        *self = Self::new(receiver);
    }

    /// Moves the boxed receiver out, leaving this box empty.
    #[must_use]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }
}

impl<E, V> Default for AnyReceiver<E, V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<E, V> fmt::Debug for AnyReceiver<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("is_empty", &self.is_empty())
            .finish()
    }
}

impl<E, V> Receiver for AnyReceiver<E, V> {
    fn deliver_cancel(self) {
        match self.target {
            Some(target) => target.deliver_cancel_boxed(),
            None => trace!("discarding cancellation delivered to empty AnyReceiver"),
        }
    }
}

impl<E, V> ValueReceiver<V> for AnyReceiver<E, V> {
    fn deliver_value(self, value: V) {
        match self.target {
            Some(target) => target.deliver_value_boxed(value),
            None => trace!("discarding value delivered to empty AnyReceiver"),
        }
    }
}

impl<E, V> ErrorReceiver<E> for AnyReceiver<E, V> {
    fn deliver_error(self, error: E) {
        match self.target {
            Some(target) => target.deliver_error_boxed(error),
            None => trace!("discarding error delivered to empty AnyReceiver"),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;
    use crate::LoggingReceiver;

    assert_impl_all!(AnyReceiver<i32, (i32, String)>: Send, fmt::Debug, Default);
    assert_not_impl_any!(AnyReceiver<i32, (i32, String)>: Sync, Clone);

    #[test]
    fn empty_discards_cancel() {
        let receiver = AnyReceiver::<i32, ()>::default();
        receiver.deliver_cancel();
    }

    #[test]
    fn empty_discards_value() {
        let receiver = AnyReceiver::<i32, (String,)>::default();
        receiver.deliver_value(("message".to_string(),));
    }

    #[test]
    fn empty_discards_error() {
        let receiver = AnyReceiver::<i32, (String,)>::default();
        receiver.deliver_error(3);
    }

    #[test]
    fn forwards_value() {
        let log = LoggingReceiver::new();

        AnyReceiver::<i32, (i32, &str)>::new(log.clone()).deliver_value((3, "hello"));

        assert_eq!(log.log(), ["value: 3, hello"]);
    }

    #[test]
    fn forwards_error() {
        let log = LoggingReceiver::new();

        AnyReceiver::<i32, (i32,)>::new(log.clone()).deliver_error(3);

        assert_eq!(log.log(), ["error: 3"]);
    }

    #[test]
    fn forwards_cancel() {
        let log = LoggingReceiver::new();

        AnyReceiver::<i32, (i32,)>::new(log.clone()).deliver_cancel();

        assert_eq!(log.log(), ["cancel"]);
    }

    #[test]
    fn is_empty_reflects_state() {
        let mut receiver = AnyReceiver::<i32, ()>::empty();
        assert!(receiver.is_empty());

        receiver.set(LoggingReceiver::new());
        assert!(!receiver.is_empty());

        let taken = receiver.take();
        assert!(receiver.is_empty());
        assert!(!taken.is_empty());
    }

    #[test]
    fn set_drops_previous_target() {
        struct DropCounter(Arc<AtomicUsize>);

        impl Drop for DropCounter {
            fn drop(&mut self) {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }

        impl Receiver for DropCounter {
            fn deliver_cancel(self) {}
        }

        impl ValueReceiver<()> for DropCounter {
            fn deliver_value(self, _value: ()) {}
        }

        impl ErrorReceiver<i32> for DropCounter {
            fn deliver_error(self, _error: i32) {}
        }

        let drops = Arc::new(AtomicUsize::new(0));

        let mut receiver = AnyReceiver::<i32, ()>::new(DropCounter(Arc::clone(&drops)));
        assert_eq!(drops.load(Ordering::Relaxed), 0);

        let log = LoggingReceiver::new();
        receiver.set(log.clone());
        assert_eq!(drops.load(Ordering::Relaxed), 1);

        // The replacement is the one that receives.
        receiver.deliver_error(9);
        assert_eq!(log.log(), ["error: 9"]);
    }

    #[test]
    fn debug_shows_emptiness() {
        let receiver = AnyReceiver::<i32, ()>::empty();
        assert!(format!("{receiver:?}").contains("is_empty: true"));
    }
}
