//! A receiver that records every terminal it is given as a line of text.

use std::fmt::{self, Display};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{ErrorReceiver, Receiver, ValueReceiver};

/// Formats a value tuple as its elements' [`Display`] output joined by `", "`.
///
/// Implemented for tuples of up to eight elements, including the empty tuple (which formats
/// as an empty string).
pub trait DisplayValues {
    /// Writes the comma-separated values to `f`.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by the formatter.
    fn fmt_values(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

macro_rules! impl_display_values_for_tuples {
    () => {
        impl DisplayValues for () {
            fn fmt_values(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
                Ok(())
            }
        }
    };
    ($head:ident, $($tail:ident,)*) => {
        impl_display_values_for_tuples!(@IMPL $head, $($tail,)*);
        impl_display_values_for_tuples!($($tail,)*);
    };
    (@IMPL $first:ident, $($rest:ident,)*) => {
        impl<$first: Display, $($rest: Display),*> DisplayValues for ($first, $($rest,)*) {
            #[allow(non_snake_case, reason = "type parameter names reused as bindings")]
            fn fmt_values(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let ($first, $($rest,)*) = self;
                write!(f, "{}", $first)?;
                $(write!(f, ", {}", $rest)?;)*
                Ok(())
            }
        }
    };
}

impl_display_values_for_tuples!(A, B, C, D, E, F, G, H,);

struct Values<'a, V: ?Sized>(&'a V);

impl<V: DisplayValues + ?Sized> Display for Values<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_values(f)
    }
}

/// A receiver that appends one line per terminal notification to a shared log.
///
/// Clones share the same log, so a clone can be handed to a sender while the original is kept
/// for inspecting what was delivered. The lines are:
///
/// * `value: <v1>, <v2>, ...` for a value delivery,
/// * `error: <e>` for an error delivery,
/// * `cancel` for a cancellation.
///
/// # Example
///
/// ```rust
/// use execution::{ErrorSender, LoggingReceiver, submit};
///
/// let receiver = LoggingReceiver::new();
/// submit(ErrorSender::new("disk full"), receiver.clone());
///
/// assert_eq!(receiver.log(), ["error: disk full"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LoggingReceiver {
    log: Arc<Mutex<Vec<String>>>,
}

impl LoggingReceiver {
    /// Creates a receiver with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the lines logged so far, oldest first.
    #[must_use]
    pub fn log(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    fn push(&self, line: String) {
        self.log.lock().push(line);
    }
}

impl Receiver for LoggingReceiver {
    fn deliver_cancel(self) {
        self.push("cancel".to_string());
    }
}

impl<V> ValueReceiver<V> for LoggingReceiver
where
    V: DisplayValues,
{
    fn deliver_value(self, value: V) {
        self.push(format!("value: {}", Values(&value)));
    }
}

impl<E> ErrorReceiver<E> for LoggingReceiver
where
    E: Display,
{
    fn deliver_error(self, error: E) {
        self.push(format!("error: {error}"));
    }
}
