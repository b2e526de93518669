//! Type-erased sender.

use std::any::type_name;
use std::fmt;
use std::mem;

use crate::error::Result;
use crate::{AnyReceiver, Error, ErrorReceiver, Sender, ValueReceiver};

/// Object-safe view of a sender, used as the dispatch table of [`AnySender`].
trait ErasedSender<E, V> {
    fn submit_boxed(self: Box<Self>, receiver: AnyReceiver<E, V>);
}

impl<E, V, S> ErasedSender<E, V> for S
where
    S: Sender<AnyReceiver<E, V>>,
{
    fn submit_boxed(self: Box<Self>, receiver: AnyReceiver<E, V>) {
        Sender::submit(*self, receiver);
    }
}

/// A sender of errors `E` and values `V` whose concrete type has been erased.
///
/// Any sender that can be submitted to an [`AnyReceiver<E, V>`] can be boxed into an
/// `AnySender<E, V>`. The box in turn can be submitted to any receiver that accepts `E` and `V`:
/// the receiver is wrapped into an [`AnyReceiver`] on the way in, so the boxed sender sees a
/// receiver type it supports. The outcome observed by the receiver is exactly the one the boxed
/// sender would have delivered directly.
///
/// A boxed sender only has to support the capabilities it actually uses, so e.g. a
/// [`CancelSender`][crate::CancelSender] can be boxed as an `AnySender` of any shape.
///
/// # Empty state
///
/// A default-constructed `AnySender` is empty. Unlike an empty [`AnyReceiver`], an empty sender
/// cannot be used: there is no operation that could produce an outcome. Submitting one is a
/// contract violation that panics; use [`try_submit()`](Self::try_submit) if emptiness cannot be
/// ruled out.
///
/// # Example
///
/// ```rust
/// use execution::{AnySender, CancelSender, ErrorSender, LoggingReceiver, ValueSender, submit};
///
/// let senders: Vec<AnySender<i32, (i32, String)>> = vec![
///     AnySender::new(ValueSender::new((3, "hello".to_string()))),
///     AnySender::new(ErrorSender::new(3)),
///     AnySender::new(CancelSender),
/// ];
///
/// let receiver = LoggingReceiver::new();
///
/// for sender in senders {
///     submit(sender, receiver.clone());
/// }
///
/// assert_eq!(receiver.log(), ["value: 3, hello", "error: 3", "cancel"]);
/// ```
pub struct AnySender<E, V> {
    target: Option<Box<dyn ErasedSender<E, V> + Send>>,
}

impl<E, V> AnySender<E, V> {
    /// Boxes `sender`.
    #[must_use]
    pub fn new<S>(sender: S) -> Self
    where
        S: Sender<AnyReceiver<E, V>> + Send + 'static,
    {
        Self {
            target: Some(Box::new(sender)),
        }
    }

    /// Creates an empty sender, which must not be submitted.
    #[must_use]
    pub const fn empty() -> Self {
        Self { target: None }
    }

    /// Whether this box holds no sender.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.target.is_none()
    }

    /// Replaces the boxed sender with `sender`, dropping the previous one (if any).
    pub fn set<S>(&mut self, sender: S)
    where
        S: Sender<AnyReceiver<E, V>> + Send + 'static,
    {
        *self = Self::new(sender);
    }

    /// Moves the boxed sender out, leaving this box empty.
    #[must_use]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Submits the boxed sender to `receiver`, or reports that there is nothing to submit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySender`] if this box is empty. The receiver is dropped without any
    /// terminal notification in that case.
    pub fn try_submit<R>(self, receiver: R) -> Result<()>
    where
        R: ValueReceiver<V> + ErrorReceiver<E> + Send + 'static,
    {
        let Some(target) = self.target else {
            return Err(Error::EmptySender);
        };

        target.submit_boxed(AnyReceiver::new(receiver));
        Ok(())
    }
}

impl<E, V> Default for AnySender<E, V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<E, V> fmt::Debug for AnySender<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("is_empty", &self.is_empty())
            .finish()
    }
}

impl<E, V, R> Sender<R> for AnySender<E, V>
where
    R: ValueReceiver<V> + ErrorReceiver<E> + Send + 'static,
{
    /// Submits the boxed sender to `receiver`.
    ///
    /// # Panics
    ///
    /// Panics if this box is empty.
    fn submit(self, receiver: R) {
        if let Err(error) = self.try_submit(receiver) {
            panic!("{error}");
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;
    use crate::{CancelSender, ErrorSender, LoggingReceiver, NullReceiver, ValueSender, submit};

    assert_impl_all!(AnySender<i32, (i32, String)>: Send, fmt::Debug, Default);
    assert_not_impl_any!(AnySender<i32, (i32, String)>: Sync, Clone);

    #[test]
    fn cancel_sender_through_box() {
        let receiver = LoggingReceiver::new();

        submit(AnySender::<i32, ()>::new(CancelSender), receiver.clone());

        assert_eq!(receiver.log(), ["cancel"]);
    }

    #[test]
    fn error_sender_through_box() {
        let receiver = LoggingReceiver::new();

        submit(AnySender::<i32, ()>::new(ErrorSender::new(3)), receiver.clone());

        assert_eq!(receiver.log(), ["error: 3"]);
    }

    #[test]
    fn value_sender_through_box() {
        let receiver = LoggingReceiver::new();

        submit(
            AnySender::<i32, (i32, String)>::new(ValueSender::new((3, "hello".to_string()))),
            receiver.clone(),
        );

        assert_eq!(receiver.log(), ["value: 3, hello"]);
    }

    #[test]
    fn boxed_matches_unboxed() {
        let direct = LoggingReceiver::new();
        submit(ValueSender::new((1, "x")), direct.clone());
        submit(ErrorSender::new(2), direct.clone());
        submit(CancelSender, direct.clone());

        let boxed = LoggingReceiver::new();
        submit(
            AnySender::<i32, (i32, &'static str)>::new(ValueSender::new((1, "x"))),
            boxed.clone(),
        );
        submit(
            AnySender::<i32, (i32, &'static str)>::new(ErrorSender::new(2)),
            boxed.clone(),
        );
        submit(
            AnySender::<i32, (i32, &'static str)>::new(CancelSender),
            boxed.clone(),
        );

        assert_eq!(direct.log(), boxed.log());
    }

    #[test]
    fn box_of_box_is_transparent() {
        let receiver = LoggingReceiver::new();

        let inner = AnySender::<i32, (u8,)>::new(ValueSender::new((8_u8,)));
        submit(AnySender::<i32, (u8,)>::new(inner), receiver.clone());

        assert_eq!(receiver.log(), ["value: 8"]);
    }

    #[test]
    fn try_submit_on_empty_reports_error() {
        let receiver = LoggingReceiver::new();

        let result = AnySender::<i32, ()>::default().try_submit(receiver.clone());

        assert_eq!(result, Err(Error::EmptySender));
        assert!(receiver.log().is_empty());
    }

    #[test]
    fn try_submit_on_filled_delivers() {
        let receiver = LoggingReceiver::new();

        let result = AnySender::<i32, ()>::new(CancelSender).try_submit(receiver.clone());

        assert_eq!(result, Ok(()));
        assert_eq!(receiver.log(), ["cancel"]);
    }

    #[test]
    fn submit_on_empty_panics() {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            submit(AnySender::<i32, ()>::empty(), NullReceiver);
        }));

        assert!(result.is_err());
    }

    #[test]
    fn set_and_take() {
        let mut sender = AnySender::<i32, ()>::empty();
        assert!(sender.is_empty());

        sender.set(ErrorSender::new(1));
        sender.set(ErrorSender::new(2));
        assert!(!sender.is_empty());

        let taken = sender.take();
        assert!(sender.is_empty());

        let receiver = LoggingReceiver::new();
        submit(taken, receiver.clone());
        assert_eq!(receiver.log(), ["error: 2"]);
    }
}
