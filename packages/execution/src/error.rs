use thiserror::Error;

/// Failures reported by the execution machinery itself.
///
/// Errors produced by operations travel through [`ErrorReceiver`][crate::ErrorReceiver] and
/// never appear here.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// An empty [`AnySender`][crate::AnySender] was submitted. Nothing was delivered to the
    /// receiver.
    #[error("cannot submit an empty AnySender: there is no operation to deliver an outcome")]
    EmptySender,

    /// The receiver awaiting an outcome was dropped without any terminal notification having
    /// been delivered to it, e.g. because the executor holding the work was dropped first.
    #[error("operation was abandoned without delivering a value, an error or a cancellation")]
    Abandoned,
}

/// A specialized `Result` type for execution operations, returning the crate's [`Error`] type
/// as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
