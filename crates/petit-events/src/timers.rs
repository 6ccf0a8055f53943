//! Timer scheduler
//!
//! One-shot tasks keyed by an absolute due time. The clock is supplied by
//! the caller, so tests advance time without sleeping. Tasks scheduled
//! while a drain runs fire on the next drain.

use petit_dom::Page;
use std::time::Instant;

/// Timer handle; cancelling it is the disposer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

/// A scheduled callback; may chain follow-up work
pub type Task = Box<dyn FnOnce(&mut Page, &mut Scheduler)>;

struct Entry {
    id: TimerId,
    due: Instant,
    task: Task,
}

/// One-shot timer scheduler
#[derive(Default)]
pub struct Scheduler {
    next: u32,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task at an absolute time
    pub fn schedule(&mut self, due: Instant, task: Task) -> TimerId {
        let id = TimerId(self.next);
        self.next += 1;
        self.entries.push(Entry { id, due, task });
        id
    }

    /// Cancel a pending task; false if it already ran or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Number of pending tasks
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Earliest pending due time
    pub fn next_due(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Run every task due at or before `now`, in due order
    pub fn run_due(&mut self, now: Instant, page: &mut Page) {
        let mut due: Vec<Entry> = Vec::new();
        let mut rest: Vec<Entry> = Vec::new();
        for entry in self.entries.drain(..) {
            if entry.due <= now {
                due.push(entry);
            } else {
                rest.push(entry);
            }
        }
        self.entries = rest;
        due.sort_by_key(|e| (e.due, e.id.0));

        for entry in due {
            (entry.task)(page, self);
        }
    }
}
