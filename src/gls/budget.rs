//! Cooperative search budget: wall-clock limit and caller cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::models::TerminationReason;

/// Shared flag a caller sets to stop a running search early.
///
/// Clones share the same flag, so one clone can be handed to another thread.
///
/// # Examples
///
/// ```
/// use route_engine::gls::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`cancel`](Self::cancel) was called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Time limit and cancellation, polled every `interval` ticks.
#[derive(Debug)]
pub struct SearchBudget<'a> {
    start: Instant,
    limit: Duration,
    cancel: &'a CancelToken,
    interval: usize,
    ticks: usize,
    stopped: Option<TerminationReason>,
}

impl<'a> SearchBudget<'a> {
    /// Starts the clock.
    pub fn new(limit: Duration, cancel: &'a CancelToken, interval: usize) -> Self {
        Self {
            start: Instant::now(),
            limit,
            cancel,
            interval: interval.max(1),
            ticks: 0,
            stopped: None,
        }
    }

    /// Counts one unit of work; polls the clock and the token every
    /// `interval` ticks. Returns `true` once the budget is exhausted.
    pub fn tick(&mut self) -> bool {
        if self.stopped.is_some() {
            return true;
        }
        self.ticks += 1;
        if self.ticks.is_multiple_of(self.interval) {
            return self.check().is_some();
        }
        false
    }

    /// Polls immediately. Cancellation wins over the time limit.
    pub fn check(&mut self) -> Option<TerminationReason> {
        if self.stopped.is_none() {
            if self.cancel.is_cancelled() {
                self.stopped = Some(TerminationReason::Cancelled);
            } else if self.start.elapsed() >= self.limit {
                self.stopped = Some(TerminationReason::TimeLimit);
            }
        }
        self.stopped
    }

    /// Why the budget ran out, if it did.
    pub fn stopped(&self) -> Option<TerminationReason> {
        self.stopped
    }

    /// Time since the budget was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
