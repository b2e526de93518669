//! Bridge from the sender/receiver protocol to a future resolving to the delivered outcome.

use std::any::type_name;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use tracing::trace;

use crate::error::Result;
use crate::{Error, ErrorReceiver, Receiver, Sender, ValueReceiver};

/// The terminal notification an operation delivered.
#[derive(Clone, Debug, Eq, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "the three terminals are the complete protocol"
)]
pub enum Outcome<E, V> {
    /// The operation produced values.
    Value(V),

    /// The operation failed.
    Error(E),

    /// The operation was cancelled.
    Cancelled,
}

impl<E, V> Outcome<E, V> {
    /// Whether the operation produced values.
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Whether the operation failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Whether the operation was cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Converts into a `Result`, with `None` standing for cancellation.
    #[must_use]
    pub fn into_result(self) -> Option<std::result::Result<V, E>> {
        match self {
            Self::Value(value) => Some(Ok(value)),
            Self::Error(error) => Some(Err(error)),
            Self::Cancelled => None,
        }
    }
}

/// A receiver that resolves the [`Completion`] it was created with.
///
/// Created by [`promise()`]. Whichever terminal is delivered becomes the [`Outcome`] of the
/// completion. Dropping the receiver without delivering resolves the completion with
/// [`Error::Abandoned`].
pub struct PromiseReceiver<E, V> {
    sender: oneshot::Sender<Outcome<E, V>>,
}

impl<E, V> PromiseReceiver<E, V> {
    fn resolve(self, outcome: Outcome<E, V>) {
        if self.sender.send(outcome).is_err() {
            trace!("outcome discarded because the completion was dropped");
        }
    }
}

impl<E, V> fmt::Debug for PromiseReceiver<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("is_canceled", &self.sender.is_canceled())
            .finish()
    }
}

impl<E, V> Receiver for PromiseReceiver<E, V> {
    fn deliver_cancel(self) {
        self.resolve(Outcome::Cancelled);
    }
}

impl<E, V> ValueReceiver<V> for PromiseReceiver<E, V> {
    fn deliver_value(self, value: V) {
        self.resolve(Outcome::Value(value));
    }
}

impl<E, V> ErrorReceiver<E> for PromiseReceiver<E, V> {
    fn deliver_error(self, error: E) {
        self.resolve(Outcome::Error(error));
    }
}

/// A future that resolves to the [`Outcome`] delivered to the matching [`PromiseReceiver`].
///
/// # Errors
///
/// Resolves to [`Error::Abandoned`] if the promise receiver is dropped without a terminal
/// notification, for example because the task carrying it was dropped by its executor.
#[must_use = "futures do nothing unless polled"]
pub struct Completion<E, V> {
    receiver: oneshot::Receiver<Outcome<E, V>>,
}

impl<E, V> Future for Completion<E, V> {
    type Output = Result<Outcome<E, V>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|result| result.map_err(|oneshot::Canceled| Error::Abandoned))
    }
}

impl<E, V> fmt::Debug for Completion<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>()).finish_non_exhaustive()
    }
}

/// Creates a connected receiver and completion pair.
///
/// # Example
///
/// ```rust
/// use execution::{Outcome, ValueSender, promise, submit};
/// use futures::executor::block_on;
///
/// let (receiver, completion) = promise::<String, (i32,)>();
/// submit(ValueSender::new((7,)), receiver);
///
/// assert_eq!(block_on(completion), Ok(Outcome::Value((7,))));
/// ```
#[must_use]
pub fn promise<E, V>() -> (PromiseReceiver<E, V>, Completion<E, V>) {
    let (sender, receiver) = oneshot::channel();

    (PromiseReceiver { sender }, Completion { receiver })
}

/// Submits `sender` to a fresh [`PromiseReceiver`] and returns the completion resolving to its
/// outcome.
///
/// # Example
///
/// ```rust
/// use execution::{ErrorSender, Outcome, into_future};
/// use futures::executor::block_on;
///
/// let completion = into_future::<_, &str, ()>(ErrorSender::new("timed out"));
///
/// assert_eq!(block_on(completion), Ok(Outcome::Error("timed out")));
/// ```
pub fn into_future<S, E, V>(sender: S) -> Completion<E, V>
where
    S: Sender<PromiseReceiver<E, V>>,
{
    let (receiver, completion) = promise();
    sender.submit(receiver);
    completion
}
