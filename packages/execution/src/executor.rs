//! Deferred work and the executors that run it.

use std::any::type_name;
use std::fmt;
use std::iter;
use std::sync::Arc;

use crossbeam::queue::SegQueue;
use tracing::{debug, trace};

const DEFAULT_QUEUE_NAME: &str = "queue";

/// A single-use unit of deferred work.
///
/// A task can be moved (including to other threads) but not copied, and running it consumes it,
/// so every task runs at most once. Whoever owns a task decides whether and when it runs.
pub struct Task {
    body: Box<dyn FnOnce() + Send>,
}

impl Task {
    /// Creates a task that will call `body` when run.
    #[must_use]
    pub fn new<F>(body: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            body: Box::new(body),
        }
    }

    /// Runs the task to completion on the calling thread.
    pub fn run(self) {
        (self.body)();
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>()).finish_non_exhaustive()
    }
}

/// Accepts tasks and runs each of them exactly once, at a time and on a thread of its choosing.
///
/// An executor may run a task inline before `execute` returns, or keep it and run it later
/// (e.g. when some other party drains a queue). Code handing a task to an executor must not
/// assume either. No ordering is guaranteed between tasks given to different executors.
///
/// Every `Fn(Task)` closure is an executor.
///
/// # Example
///
/// ```rust
/// use execution::{Executor, Task};
///
/// let executor = |task: Task| task.run();
/// executor.execute(Task::new(|| println!("running")));
/// ```
pub trait Executor {
    /// Takes ownership of `task`, committing to run it exactly once.
    fn execute(&self, task: Task);
}

impl<F> Executor for F
where
    F: Fn(Task),
{
    #[inline]
    fn execute(&self, task: Task) {
        self(task);
    }
}

/// An executor that runs every task immediately, on the thread that hands it over.
///
/// Composing a sender with this executor keeps the whole pipeline synchronous.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[expect(clippy::exhaustive_structs, reason = "intentionally an empty struct")]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    #[inline]
    fn execute(&self, task: Task) {
        task.run();
    }
}

/// A cloneable, type-erased handle to an executor that can be shared between threads.
///
/// All clones refer to the same underlying executor.
#[derive(Clone)]
pub struct AnyExecutor {
    inner: Arc<dyn Executor + Send + Sync>,
}

impl AnyExecutor {
    /// Wraps `executor` into a shareable handle.
    #[must_use]
    pub fn new<X>(executor: X) -> Self
    where
        X: Executor + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(executor),
        }
    }
}

impl Executor for AnyExecutor {
    fn execute(&self, task: Task) {
        self.inner.execute(task);
    }
}

impl fmt::Debug for AnyExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>()).finish_non_exhaustive()
    }
}

struct QueueInner {
    name: String,
    tasks: SegQueue<Task>,
}

impl Drop for QueueInner {
    #[cfg_attr(test, mutants::skip)] // Only emits a log event, there is nothing else to observe.
    fn drop(&mut self) {
        let abandoned = self.tasks.len();

        if abandoned > 0 {
            debug!(
                executor = %self.name,
                abandoned,
                "queue executor dropped with tasks that never ran"
            );
        }
    }
}

/// An executor that queues tasks until they are explicitly drained, oldest first.
///
/// [`execute()`](Executor::execute) only appends the task to the queue. Tasks run when
/// [`run_one()`](Self::run_one) or [`run_all()`](Self::run_all) is called, in the order they
/// were accepted. A task is removed from the queue before it runs, so a running task may queue
/// more work on the same executor.
///
/// Clones share the same queue. Accepting and draining may happen on any thread.
///
/// If the last clone is dropped while tasks are still queued, those tasks are dropped without
/// running.
///
/// # Example
///
/// ```rust
/// use execution::{Executor, QueueExecutor, Task};
///
/// let queue = QueueExecutor::builder().name("io-completions").build();
///
/// queue.execute(Task::new(|| println!("first")));
/// queue.execute(Task::new(|| println!("second")));
/// assert_eq!(queue.len(), 2);
///
/// assert_eq!(queue.run_all(), 2);
/// assert!(queue.is_empty());
/// ```
#[derive(Clone)]
pub struct QueueExecutor {
    inner: Arc<QueueInner>,
}

impl QueueExecutor {
    /// Creates a queue executor with default settings.
    ///
    /// Use [`QueueExecutor::builder()`] for custom configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a builder for configuring a queue executor.
    #[must_use]
    pub fn builder() -> QueueExecutorBuilder {
        QueueExecutorBuilder::new()
    }

    /// The name that identifies this executor in log events.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Number of tasks waiting to run.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.tasks.len()
    }

    /// Whether no tasks are waiting to run.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.tasks.is_empty()
    }

    /// Runs the oldest queued task, if there is one.
    ///
    /// Returns whether a task was run.
    pub fn run_one(&self) -> bool {
        let Some(task) = self.inner.tasks.pop() else {
            return false;
        };

        trace!(executor = %self.inner.name, "running queued task");
        task.run();

        true
    }

    /// Runs queued tasks until the queue is empty, including tasks queued by the tasks being
    /// run.
    ///
    /// Returns the number of tasks that were run.
    pub fn run_all(&self) -> usize {
        let count = iter::from_fn(|| self.run_one().then_some(())).count();

        trace!(executor = %self.inner.name, count, "drained queue executor");

        count
    }
}

impl Default for QueueExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for QueueExecutor {
    fn execute(&self, task: Task) {
        self.inner.tasks.push(task);

        trace!(
            executor = %self.inner.name,
            queued = self.inner.tasks.len(),
            "accepted task"
        );
    }
}

impl fmt::Debug for QueueExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("name", &self.inner.name)
            .field("len", &self.len())
            .finish()
    }
}

/// Builder for configuring a [`QueueExecutor`].
#[derive(Debug)]
#[must_use]
pub struct QueueExecutorBuilder {
    name: String,
}

impl QueueExecutorBuilder {
    fn new() -> Self {
        Self {
            name: DEFAULT_QUEUE_NAME.to_string(),
        }
    }

    /// Sets the name that identifies the executor in log events.
    ///
    /// Default is `"queue"`.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builds the executor with the configured settings.
    #[must_use]
    pub fn build(self) -> QueueExecutor {
        QueueExecutor {
            inner: Arc::new(QueueInner {
                name: self.name,
                tasks: SegQueue::new(),
            }),
        }
    }
}
