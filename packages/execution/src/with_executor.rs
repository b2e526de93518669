//! Moving the submission of a sender onto an executor.

use tracing::trace;

use crate::{AnyReceiver, AnySender, Executor, Sender, Task};

/// A sender that submits the sender it wraps from a task run by an executor.
///
/// Submitting a `SenderWithExecutor` does not deliver anything by itself. It packages the wrapped
/// sender and the receiver into a [`Task`], hands the task to the executor and returns. When the
/// executor runs the task, the wrapped sender is submitted to the receiver, which then receives
/// exactly the terminal notification it would have received from a direct submission.
///
/// If the executor never runs the task, the receiver is dropped without any notification.
///
/// This separates where a completion fires from where the operation was submitted: the wrapped
/// sender needs no knowledge of threads or queues.
///
/// # Example
///
/// ```rust
/// use execution::{ErrorSender, LoggingReceiver, QueueExecutor, SenderWithExecutor, submit};
///
/// let queue = QueueExecutor::new();
/// let receiver = LoggingReceiver::new();
///
/// submit(
///     SenderWithExecutor::new(ErrorSender::new(3), queue.clone()),
///     receiver.clone(),
/// );
/// assert!(receiver.log().is_empty());
///
/// queue.run_one();
/// assert_eq!(receiver.log(), ["error: 3"]);
/// ```
#[derive(Clone, Debug)]
pub struct SenderWithExecutor<S, X> {
    sender: S,
    executor: X,
}

impl<S, X> SenderWithExecutor<S, X> {
    /// Wraps `sender` so that it is submitted from a task run by `executor`.
    #[must_use]
    pub const fn new(sender: S, executor: X) -> Self {
        Self { sender, executor }
    }

    /// The executor that will run the submission.
    #[must_use]
    pub const fn executor(&self) -> &X {
        &self.executor
    }

    /// Takes the adapter apart into the wrapped sender and the executor.
    #[must_use]
    pub fn into_parts(self) -> (S, X) {
        (self.sender, self.executor)
    }
}

impl<S, X, R> Sender<R> for SenderWithExecutor<S, X>
where
    S: Sender<R> + Send + 'static,
    X: Executor,
    R: Send + 'static,
{
    fn submit(self, receiver: R) {
        let Self { sender, executor } = self;

        executor.execute(Task::new(move || sender.submit(receiver)));

        trace!("scheduled deferred submission");
    }
}

/// Wraps `sender` so that it is submitted from a task run by `executor`.
///
/// Shorthand for [`SenderWithExecutor::new()`].
#[must_use]
pub const fn with_executor<S, X>(sender: S, executor: X) -> SenderWithExecutor<S, X> {
    SenderWithExecutor::new(sender, executor)
}

/// Adapters available on every sender.
pub trait SenderExt: Sized {
    /// Wraps this sender so that it is submitted from a task run by `executor`.
    #[must_use]
    fn with_executor<X>(self, executor: X) -> SenderWithExecutor<Self, X> {
        SenderWithExecutor::new(self, executor)
    }

    /// Erases the concrete type of this sender.
    #[must_use]
    fn into_any<E, V>(self) -> AnySender<E, V>
    where
        Self: Sender<AnyReceiver<E, V>> + Send + 'static,
    {
        AnySender::new(self)
    }
}

impl<S> SenderExt for S {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;
    use crate::{
        CancelSender, ErrorSender, InlineExecutor, LoggingReceiver, QueueExecutor, ValueSender,
        submit,
    };

    assert_impl_all!(SenderWithExecutor<ValueSender<(i32,)>, QueueExecutor>: Send, Sync, Clone);

    #[test]
    fn value_waits_for_queue() {
        let queue = QueueExecutor::new();
        let receiver = LoggingReceiver::new();

        submit(
            with_executor(ValueSender::new((3, "hello".to_string())), queue.clone()),
            receiver.clone(),
        );

        assert!(receiver.log().is_empty());
        assert_eq!(queue.len(), 1);

        assert!(queue.run_one());
        assert_eq!(receiver.log(), ["value: 3, hello"]);
    }

    #[test]
    fn error_waits_for_queue() {
        let queue = QueueExecutor::new();
        let receiver = LoggingReceiver::new();

        submit(
            with_executor(ErrorSender::new(3), queue.clone()),
            receiver.clone(),
        );

        assert!(receiver.log().is_empty());
        assert_eq!(queue.len(), 1);

        queue.run_one();
        assert_eq!(receiver.log(), ["error: 3"]);
    }

    #[test]
    fn cancel_waits_for_queue() {
        let queue = QueueExecutor::new();
        let receiver = LoggingReceiver::new();

        submit(with_executor(CancelSender, queue.clone()), receiver.clone());

        assert!(receiver.log().is_empty());
        assert_eq!(queue.len(), 1);

        queue.run_one();
        assert_eq!(receiver.log(), ["cancel"]);
    }

    #[test]
    fn boxed_value_waits_for_queue() {
        let queue = QueueExecutor::new();
        let receiver = LoggingReceiver::new();

        let sender: AnySender<i32, (i32, String)> = AnySender::new(with_executor(
            ValueSender::new((3, "hello".to_string())),
            queue.clone(),
        ));
        submit(sender, receiver.clone());

        assert!(receiver.log().is_empty());
        assert_eq!(queue.len(), 1);

        queue.run_one();
        assert_eq!(receiver.log(), ["value: 3, hello"]);
    }

    #[test]
    fn boxed_error_waits_for_queue() {
        let queue = QueueExecutor::new();
        let receiver = LoggingReceiver::new();

        let sender: AnySender<i32, ()> =
            with_executor(ErrorSender::new(3), queue.clone()).into_any();
        submit(sender, receiver.clone());

        assert!(receiver.log().is_empty());
        assert_eq!(queue.len(), 1);

        queue.run_one();
        assert_eq!(receiver.log(), ["error: 3"]);
    }

    #[test]
    fn boxed_cancel_waits_for_queue() {
        let queue = QueueExecutor::new();
        let receiver = LoggingReceiver::new();

        let sender: AnySender<i32, ()> = CancelSender.with_executor(queue.clone()).into_any();
        submit(sender, receiver.clone());

        assert!(receiver.log().is_empty());
        assert_eq!(queue.len(), 1);

        queue.run_one();
        assert_eq!(receiver.log(), ["cancel"]);
    }

    #[test]
    fn submissions_complete_in_queue_order() {
        let queue = QueueExecutor::new();
        let receiver = LoggingReceiver::new();

        submit(
            ValueSender::new(("a",)).with_executor(queue.clone()),
            receiver.clone(),
        );
        submit(
            ValueSender::new(("b",)).with_executor(queue.clone()),
            receiver.clone(),
        );

        assert_eq!(queue.run_all(), 2);
        assert_eq!(receiver.log(), ["value: a", "value: b"]);
    }

    #[test]
    fn inline_executor_delivers_before_submit_returns() {
        let receiver = LoggingReceiver::new();

        submit(
            ValueSender::new((1,)).with_executor(InlineExecutor),
            receiver.clone(),
        );

        assert_eq!(receiver.log(), ["value: 1"]);
    }

    #[test]
    fn never_run_task_delivers_nothing() {
        let queue = QueueExecutor::new();
        let receiver = LoggingReceiver::new();

        submit(
            ValueSender::new((1,)).with_executor(queue.clone()),
            receiver.clone(),
        );
        drop(queue);

        assert!(receiver.log().is_empty());
    }

    #[test]
    fn into_parts_returns_components() {
        let queue = QueueExecutor::builder().name("parts").build();
        let adapter = with_executor(ErrorSender::new(5), queue);

        assert_eq!(adapter.executor().name(), "parts");

        let (sender, executor) = adapter.into_parts();
        assert_eq!(sender.into_error(), 5);
        assert!(executor.is_empty());
    }
}
