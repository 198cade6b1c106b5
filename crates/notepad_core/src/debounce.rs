//! Trailing debounce for bursty input.
//!
//! # Invariants
//! - Only the most recently scheduled value can fire.
//! - A scheduled value fires at most once.

use std::time::{Duration, Instant};

/// Restartable one-shot timer driven by caller-supplied instants.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Schedules `value`, replacing and cancelling any pending one.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.window));
    }

    /// Returns the pending value once its quiet window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = self.deadline().is_some_and(|deadline| now >= deadline);
        if !ready {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }

    /// Deadline of the pending value, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
