//! The receiver and sender capability sets.

/// Accepts the cancellation terminal of an operation.
///
/// This is the capability every receiver has. Receivers that can also accept a value or an
/// error additionally implement [`ValueReceiver`] and [`ErrorReceiver`]. A sender states in its
/// [`Sender`] bounds exactly which of these it needs, so a sender that can only cancel (such as
/// [`CancelSender`][crate::CancelSender]) accepts receivers of any value or error shape.
///
/// Terminal methods consume the receiver: once one of them has been called, the receiver is
/// gone and no other terminal can be delivered to it.
pub trait Receiver {
    /// Signals that the operation was abandoned without producing a value or an error.
    fn deliver_cancel(self);
}

/// Accepts the value terminal of an operation producing `V`.
///
/// `V` is a tuple holding all the values of the operation. An operation without values
/// delivers `()`.
pub trait ValueReceiver<V>: Receiver {
    /// Signals that the operation completed and produced `value`.
    fn deliver_value(self, value: V);
}

/// Accepts the error terminal of an operation failing with `E`.
pub trait ErrorReceiver<E>: Receiver {
    /// Signals that the operation failed with `error`.
    fn deliver_error(self, error: E);
}

/// An operation that, once submitted to a receiver of type `R`, eventually delivers exactly one
/// terminal notification to it.
///
/// Submission consumes the sender. Whatever payload the sender holds is moved into the
/// receiver at delivery time.
///
/// A sender may deliver inline, before `submit` returns, or arrange for delivery to happen
/// later (e.g. through an [`Executor`][crate::Executor]). Callers must not assume either.
pub trait Sender<R> {
    /// Starts the operation, which will deliver its terminal notification to `receiver`.
    fn submit(self, receiver: R);
}

/// Submits `sender` to `receiver`.
///
/// Equivalent to `sender.submit(receiver)`, provided for call sites that read better with the
/// pair spelled out.
#[inline]
pub fn submit<S, R>(sender: S, receiver: R)
where
    S: Sender<R>,
{
    sender.submit(receiver);
}
