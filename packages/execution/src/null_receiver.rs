use crate::{ErrorReceiver, Receiver, ValueReceiver};

/// A receiver that accepts any terminal notification and ignores it.
///
/// Use it when an operation must be started but nobody is interested in how it ends.
///
/// # Example
///
/// ```rust
/// use execution::{NullReceiver, ValueSender, submit};
///
/// submit(ValueSender::new((3, 4)), NullReceiver);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[expect(clippy::exhaustive_structs, reason = "intentionally an empty struct")]
pub struct NullReceiver;

impl Receiver for NullReceiver {
    #[inline]
    fn deliver_cancel(self) {}
}

impl<V> ValueReceiver<V> for NullReceiver {
    #[inline]
    fn deliver_value(self, _value: V) {}
}

impl<E> ErrorReceiver<E> for NullReceiver {
    #[inline]
    fn deliver_error(self, _error: E) {}
}
