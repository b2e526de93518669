//! Senders that immediately deliver a fixed terminal outcome.

use crate::{ErrorReceiver, Receiver, Sender, ValueReceiver};

/// A sender that always delivers the cancellation terminal.
///
/// The receiver only needs the [`Receiver`] capability, so a `CancelSender` can be submitted to
/// receivers of any value or error shape.
///
/// Delivery happens inline, before `submit` returns.
///
/// # Example
///
/// ```rust
/// use execution::{CancelSender, LoggingReceiver, submit};
///
/// let receiver = LoggingReceiver::new();
/// submit(CancelSender, receiver.clone());
///
/// assert_eq!(receiver.log(), ["cancel"]);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[expect(clippy::exhaustive_structs, reason = "intentionally an empty struct")]
pub struct CancelSender;

impl<R> Sender<R> for CancelSender
where
    R: Receiver,
{
    #[inline]
    fn submit(self, receiver: R) {
        receiver.deliver_cancel();
    }
}

/// A sender that always delivers the error terminal with the error it holds.
///
/// Delivery happens inline, before `submit` returns. The error is moved into the receiver.
///
/// # Example
///
/// ```rust
/// use execution::{ErrorSender, LoggingReceiver, submit};
///
/// let receiver = LoggingReceiver::new();
/// submit(ErrorSender::new(3), receiver.clone());
///
/// assert_eq!(receiver.log(), ["error: 3"]);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorSender<E> {
    error: E,
}

impl<E> ErrorSender<E> {
    /// Creates a sender that will deliver `error`.
    #[must_use]
    pub const fn new(error: E) -> Self {
        Self { error }
    }

    /// Returns the error this sender will deliver.
    #[must_use]
    pub const fn error(&self) -> &E {
        &self.error
    }

    /// Gives back the error without delivering it.
    #[must_use]
    pub fn into_error(self) -> E {
        self.error
    }
}

impl<E, R> Sender<R> for ErrorSender<E>
where
    R: ErrorReceiver<E>,
{
    #[inline]
    fn submit(self, receiver: R) {
        receiver.deliver_error(self.error);
    }
}

/// A sender that always delivers the value terminal with the values it holds.
///
/// `V` is a tuple of all the values to deliver. Delivery happens inline, before `submit`
/// returns, and the values are moved into the receiver.
///
/// # Example
///
/// ```rust
/// use execution::{LoggingReceiver, ValueSender, submit};
///
/// let receiver = LoggingReceiver::new();
/// submit(ValueSender::new((3, "hello")), receiver.clone());
///
/// assert_eq!(receiver.log(), ["value: 3, hello"]);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValueSender<V> {
    value: V,
}

impl<V> ValueSender<V> {
    /// Creates a sender that will deliver `value`.
    #[must_use]
    pub const fn new(value: V) -> Self {
        Self { value }
    }

    /// Returns the values this sender will deliver.
    #[must_use]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Gives back the values without delivering them.
    #[must_use]
    pub fn into_value(self) -> V {
        self.value
    }
}

impl<V, R> Sender<R> for ValueSender<V>
where
    R: ValueReceiver<V>,
{
    #[inline]
    fn submit(self, receiver: R) {
        receiver.deliver_value(self.value);
    }
}
