//! Cooperative cancellation
//!
//! Long-running work polls a [`Cancellation`] signal instead of being
//! preempted. Signals are one-shot: once raised they stay raised.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A stop signal that can be observed but not reset
pub trait Cancellation {
    fn is_cancelled(&self) -> bool;
}

impl Cancellation for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: Cancellation + ?Sized> Cancellation for &T {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// Signal that is never raised
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl Cancellation for Never {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Shared cancellation flag
///
/// Clones observe the same flag, so a token handed to a timer thread or an
/// OS signal handler cancels every run holding a clone.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the signal. Calling this more than once has no further effect.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// The underlying flag, for registration with `signal_hook::flag`
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Cancel this token once `timeout` elapses
    ///
    /// The timer thread is detached in practice; callers may drop the handle.
    pub fn cancel_after(&self, timeout: Duration) -> JoinHandle<()> {
        let token = self.clone();
        thread::spawn(move || {
            thread::sleep(timeout);
            tracing::debug!("Timeout of {:?} elapsed, cancelling", timeout);
            token.cancel();
        })
    }
}

impl Cancellation for CancelToken {
    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Raises the signal on the `trip`-th poll (1-based) and stays raised
#[cfg(test)]
pub(crate) struct TripOnPoll {
    pub(crate) polls: std::cell::Cell<usize>,
    trip: usize,
}

#[cfg(test)]
impl TripOnPoll {
    pub(crate) fn new(trip: usize) -> Self {
        Self {
            polls: std::cell::Cell::new(0),
            trip,
        }
    }
}

#[cfg(test)]
impl Cancellation for TripOnPoll {
    fn is_cancelled(&self) -> bool {
        self.polls.set(self.polls.get() + 1);
        self.polls.get() >= self.trip
    }
}
