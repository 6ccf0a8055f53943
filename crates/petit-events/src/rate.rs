//! Rate limiting
//!
//! Throttle: at most one pass per interval (leading edge).
//! Debounce: fires only after a quiet period; re-triggering cancels the
//! pending fire.

use std::time::{Duration, Instant};

/// Leading-edge throttle
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// True at most once per interval
    pub fn allow(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last pass, so the next call is allowed
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Trailing-edge debounce
#[derive(Debug)]
pub struct Debounce {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Record a triggering call; any pending fire is pushed back
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// True once the quiet period has elapsed; consumes the pending fire
    pub fn fire_ready(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending fire
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a fire is pending
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
