#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))] // Test support code only.

//! Private helpers for the integration tests of the execution packages.

use std::env;
use std::panic;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Runs `test_fn` on a separate thread and aborts the test if it does not finish in time.
///
/// Deferred work that is never drained or a receiver that is never completed turns into a hang
/// rather than a failure. The watchdog converts such hangs into a panic after 10 seconds (60
/// seconds under Miri, where thread synchronization is much slower).
///
/// Setting the `MUTATION_TESTING` environment variable to `1` disables the watchdog and calls
/// `test_fn` directly, so the mutation testing harness can apply its own timeouts.
///
/// Panics raised by `test_fn` are propagated to the caller.
///
/// # Panics
///
/// Panics if `test_fn` does not return before the timeout elapses.
///
/// # Example
///
/// ```rust
/// use testing::with_watchdog;
///
/// let answer = with_watchdog(|| 6 * 7);
/// assert_eq!(answer, 42);
/// ```
pub fn with_watchdog<F, R>(test_fn: F) -> R
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    if env::var("MUTATION_TESTING").as_deref() == Ok("1") {
        return test_fn();
    }

    let timeout = if cfg!(miri) {
        Duration::from_secs(60)
    } else {
        Duration::from_secs(10)
    };

    let (tx, rx) = mpsc::channel();

    let test_thread = thread::spawn(move || {
        // If the receiving side gave up waiting, there is nobody to report to.
        drop(tx.send(test_fn()));
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => {
            test_thread
                .join()
                .expect("test thread finished sending, so it cannot have panicked");
            result
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            panic!("test did not finish within {timeout:?}, assuming it hangs");
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => match test_thread.join() {
            Ok(()) => panic!("test thread exited without producing a result"),
            Err(payload) => panic::resume_unwind(payload),
        },
    }
}
