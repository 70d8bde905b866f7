//! Repeating tick clock with a cancellation handle.
//!
//! Replaces a self-rescheduling timer loop with an explicit abstraction:
//! real time in production, synchronous single-stepping with a zero interval
//! in tests and benches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Cloneable flag for stopping a running tick loop from outside, including
/// from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> CancelHandle {
        CancelHandle::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// A repeating timer: one outstanding tick at a time, no rescheduling.
pub struct Ticker {
    interval: Duration,
    cancel: CancelHandle,
}

impl Ticker {
    pub fn new(interval: Duration) -> Ticker {
        Ticker {
            interval,
            cancel: CancelHandle::new(),
        }
    }

    /// Handle for stopping this ticker's loop.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Invokes `on_tick` once per interval until the callback returns false
    /// or the handle is cancelled. A zero interval skips sleeping, so the
    /// loop single-steps synchronously.
    pub fn run<F>(&self, mut on_tick: F)
    where
        F: FnMut() -> bool,
    {
        loop {
            if self.cancel.is_cancelled() {
                break;
            }
            if !self.interval.is_zero() {
                thread::sleep(self.interval);
            }
            if self.cancel.is_cancelled() {
                break;
            }
            if !on_tick() {
                break;
            }
        }
    }
}
