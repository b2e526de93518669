#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Completion-notification protocol for asynchronous operations.
//!
//! A [`Sender`] represents an operation that has not run yet. Submitting it to a receiver
//! causes the sender to eventually deliver exactly one terminal notification to that receiver:
//!
//! * a value, via [`ValueReceiver::deliver_value`],
//! * an error, via [`ErrorReceiver::deliver_error`], or
//! * a cancellation, via [`Receiver::deliver_cancel`].
//!
//! Multiple values travel together as a tuple. An operation that succeeds without producing
//! anything delivers the empty tuple `()`.
//!
//! # Static and type-erased forms
//!
//! Concrete senders ([`ValueSender`], [`ErrorSender`], [`CancelSender`]) and concrete
//! receivers compose through generics with static dispatch and no allocation. When the concrete
//! type must be hidden (heterogeneous collections, API boundaries), wrap the sender in an
//! [`AnySender`] or the receiver in an [`AnyReceiver`]. Both boxes have an empty state, which is
//! also their [`Default`].
//!
//! ```rust
//! use execution::{AnySender, LoggingReceiver, ValueSender, submit};
//!
//! let receiver = LoggingReceiver::new();
//!
//! let sender: AnySender<i32, (i32, String)> =
//!     AnySender::new(ValueSender::new((3, "hello".to_string())));
//! submit(sender, receiver.clone());
//!
//! assert_eq!(receiver.log(), ["value: 3, hello"]);
//! ```
//!
//! # Executors
//!
//! Where a completion fires is decided by an [`Executor`]. Wrapping a sender in a
//! [`SenderWithExecutor`] turns its submission into a [`Task`] that the executor runs whenever
//! and wherever it chooses:
//!
//! ```rust
//! use execution::{LoggingReceiver, QueueExecutor, SenderExt, ValueSender, submit};
//!
//! let queue = QueueExecutor::new();
//! let receiver = LoggingReceiver::new();
//!
//! submit(
//!     ValueSender::new((42,)).with_executor(queue.clone()),
//!     receiver.clone(),
//! );
//!
//! // Nothing has been delivered yet, the work is waiting in the queue.
//! assert!(receiver.log().is_empty());
//! assert_eq!(queue.len(), 1);
//!
//! queue.run_all();
//! assert_eq!(receiver.log(), ["value: 42"]);
//! ```
//!
//! # Awaiting an outcome
//!
//! [`into_future`] submits a sender to a [`PromiseReceiver`] and returns a [`Completion`] that
//! resolves to the delivered [`Outcome`].

mod any_receiver;
mod any_sender;
mod error;
mod executor;
mod logging_receiver;
mod null_receiver;
mod promise;
mod protocol;
mod senders;
mod with_executor;

pub use any_receiver::*;
pub use any_sender::*;
pub use error::*;
pub use executor::*;
pub use logging_receiver::*;
pub use null_receiver::*;
pub use promise::*;
pub use protocol::*;
pub use senders::*;
pub use with_executor::*;
